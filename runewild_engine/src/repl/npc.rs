//! `repl::npc` module
//!
//! Contains repl loop handlers for commands that involve NPCs, including the
//! interactive conversation loop.

use crate::command::Target;
use crate::dialogue::{Conversation, DialogueError};
use crate::npc::Npc;
use crate::repl::input::{InputEvent, LineReader};
use crate::repl::quests::accept_quest;
use crate::view::{View, ViewItem};
use crate::world::RunewildWorld;

use anyhow::Result;
use log::info;

/// Start a conversation with an NPC standing in the player's location.
///
/// # Errors
/// - if the player's location or the NPC is missing from the world
/// - if reading input fails during the conversation
pub fn talk_handler(world: &mut RunewildWorld, view: &mut View, input: &mut dyn LineReader, target: &Target) -> Result<()> {
    if !world.player_location_ref()?.has_npc(&target.id) {
        view.push(ViewItem::ActionFailure(format!(
            "There is no one named {} around here.",
            target.display
        )));
        return Ok(());
    }
    let npc = world.npc(&target.id)?.clone();
    info!("{} started talking to {} ({})", world.player.name, npc.name, npc.id);
    run_conversation(world, view, input, &npc)
}

/// Walk an NPC's dialogue tree with the player until a terminal node is shown or
/// the player stops answering.
///
/// Each visited node is shown, and any quest it triggers is accepted before its
/// choices are offered. Input that isn't a valid choice number re-prompts the same node.
///
/// # Errors
/// - if the tree references a node that does not exist
/// - if reading input fails
pub fn run_conversation(world: &mut RunewildWorld, view: &mut View, input: &mut dyn LineReader, npc: &Npc) -> Result<()> {
    let mut conversation = Conversation::start(&npc.dialogue)?;
    let mut node = conversation.node()?;
    loop {
        view.push(ViewItem::NpcSpeech {
            name: npc.name.clone(),
            text: node.text.clone(),
        });
        if let Some(quest_id) = &node.trigger_quest {
            accept_quest(world, view, quest_id);
        }
        if node.is_terminal() {
            info!("conversation with {} ended at '{}'", npc.id, conversation.current_id());
            return Ok(());
        }
        view.push(ViewItem::DialogueChoices(
            node.choices.iter().map(|choice| choice.text.clone()).collect(),
        ));

        node = loop {
            view.flush();
            let line = match input.read_line(&view.prompt("Choose a response: "))? {
                InputEvent::Line(line) => line,
                InputEvent::Eof | InputEvent::Interrupted => {
                    info!("conversation with {} abandoned", npc.id);
                    view.push(ViewItem::EngineMessage(format!("You end the conversation with {}.", npc.name)));
                    return Ok(());
                },
            };
            match conversation.choose(&line) {
                Ok(next) => break next,
                Err(err @ DialogueError::MissingNode(_)) => return Err(err.into()),
                Err(_) => view.push(ViewItem::Error(format!(
                    "Please enter a number between 1 and {}.",
                    node.choices.len()
                ))),
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplaySettings;
    use crate::dialogue::DialogueTree;
    use crate::location::Location;
    use crate::quest::{QuestLog, QuestProgress, QuestStatus};
    use crate::repl::input::ScriptedInput;
    use runewild_data::{ChoiceDef, DialogueNodeDef, NpcDef};
    use std::collections::BTreeMap;

    fn elder() -> Npc {
        let mut dialogue = BTreeMap::new();
        dialogue.insert(
            "greeting".to_string(),
            DialogueNodeDef {
                text: "Ah, a new face.".into(),
                trigger_quest: None,
                choices: vec![ChoiceDef {
                    text: "Can I help?".into(),
                    goes_to: "quest".into(),
                }],
            },
        );
        dialogue.insert(
            "quest".to_string(),
            DialogueNodeDef {
                text: "Find my sword.".into(),
                trigger_quest: Some("find_sword".into()),
                choices: Vec::new(),
            },
        );
        Npc::from(&NpcDef {
            id: "elder_rowan".into(),
            name: "Elder Rowan".into(),
            dialogue,
            ..NpcDef::default()
        })
    }

    fn world_with_elder() -> RunewildWorld {
        let mut world = RunewildWorld::new_empty();
        let mut gate = Location {
            id: "village_entrance".into(),
            name: "Village Entrance".into(),
            ..Location::default()
        };
        gate.npcs.insert("elder_rowan".into());
        world.locations.insert(gate.id.clone(), gate);
        world.npcs.insert("elder_rowan".into(), elder());
        world
    }

    fn plain_view() -> View {
        View::buffered(DisplaySettings {
            colors_enabled: false,
            text_width: 0,
        })
    }

    fn target(id: &str, display: &str) -> Target {
        Target {
            id: id.into(),
            display: display.into(),
        }
    }

    #[test]
    fn trigger_quest_is_accepted_on_visit() {
        let mut world = world_with_elder();
        let mut view = plain_view();
        let mut input = ScriptedInput::new(["1"]);
        talk_handler(&mut world, &mut view, &mut input, &target("elder_rowan", "Elder Rowan")).unwrap();

        assert_eq!(
            world.player.active_quests,
            QuestLog::from_iter([("find_sword".to_string(), QuestProgress::active())])
        );
        view.flush();
        let text = view.take_output();
        assert!(text.contains("Find my sword."));
        assert!(text.contains("Quest accepted"));
    }

    #[test]
    fn invalid_choices_reprompt_same_node() {
        let mut world = world_with_elder();
        let mut view = plain_view();
        let mut input = ScriptedInput::new(["abc", "7", "1"]);
        talk_handler(&mut world, &mut view, &mut input, &target("elder_rowan", "Elder Rowan")).unwrap();
        assert_eq!(input.prompts.len(), 3);
        assert_eq!(world.player.active_quests.get("find_sword").map(|p| p.status), Some(QuestStatus::Active));
        let text = view.take_output();
        assert_eq!(text.matches("Please enter a number between 1 and 1.").count(), 2);
    }

    #[test]
    fn end_of_input_ends_conversation() {
        let mut world = world_with_elder();
        let mut view = plain_view();
        let mut input = ScriptedInput::new(Vec::<String>::new());
        talk_handler(&mut world, &mut view, &mut input, &target("elder_rowan", "Elder Rowan")).unwrap();
        assert!(world.player.active_quests.is_empty());
        assert_eq!(input.prompts.len(), 1);
    }

    #[test]
    fn absent_npc_is_reported_by_display_name() {
        let mut world = world_with_elder();
        let mut view = plain_view();
        let mut input = ScriptedInput::default();
        talk_handler(&mut world, &mut view, &mut input, &target("old_hermit", "Old Hermit")).unwrap();
        assert_eq!(
            view.items,
            vec![ViewItem::ActionFailure(
                "There is no one named Old Hermit around here.".into()
            )]
        );
    }

    #[test]
    fn greeting_only_npc_says_one_line() {
        let mut world = world_with_elder();
        let guard = Npc {
            id: "guard".into(),
            name: "Guard".into(),
            description: String::new(),
            dialogue: DialogueTree::from_npc_def(&NpcDef {
                name: "Guard".into(),
                greeting_message: Some("Move along.".into()),
                ..NpcDef::default()
            }),
        };
        let mut view = plain_view();
        let mut input = ScriptedInput::default();
        run_conversation(&mut world, &mut view, &mut input, &guard).unwrap();
        assert!(input.prompts.is_empty());
        assert_eq!(
            view.items,
            vec![ViewItem::NpcSpeech {
                name: "Guard".into(),
                text: "Move along.".into(),
            }]
        );
    }
}
