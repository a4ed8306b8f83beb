//! `repl::quests` module
//!
//! Quest acceptance and the interactive quest log.

use crate::repl::input::{InputEvent, LineReader};
use crate::view::{QuestLine, View, ViewItem};
use crate::world::{RunewildWorld, format_id};

use anyhow::Result;
use log::{info, warn};

/// Mark a quest active for the player and announce it.
pub fn accept_quest(world: &mut RunewildWorld, view: &mut View, quest_id: &str) {
    let name = world
        .quest(quest_id)
        .map_or_else(|_| format_id(quest_id), |quest| quest.name.clone());
    if world.player.accept_quest(quest_id) {
        info!("{} accepted quest '{quest_id}'", world.player.name);
    } else {
        info!("{} re-accepted quest '{quest_id}'", world.player.name);
    }
    view.push(ViewItem::QuestAccepted(name));
}

/// List the player's quests and show details for one picked by number.
///
/// An empty answer returns silently; anything that isn't a listed number is
/// reported and changes nothing.
///
/// # Errors
/// - if reading input fails
pub fn quests_handler(world: &RunewildWorld, view: &mut View, input: &mut dyn LineReader) -> Result<()> {
    if world.player.active_quests.is_empty() {
        view.push(ViewItem::EngineMessage("You have no active quests.".to_string()));
        return Ok(());
    }

    let entries: Vec<_> = world.player.active_quests.iter().collect();
    let lines = entries
        .iter()
        .map(|(id, progress)| QuestLine {
            name: world
                .quest(id)
                .map_or_else(|_| format_id(id), |quest| quest.name.clone()),
            status: progress.status.as_str().to_string(),
        })
        .collect();
    view.push(ViewItem::QuestList(lines));
    view.flush();

    let answer = match input.read_line(&view.prompt("Enter a quest number for details (or press Enter to go back): "))? {
        InputEvent::Line(line) => line,
        InputEvent::Eof | InputEvent::Interrupted => return Ok(()),
    };
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(());
    }

    let Some((quest_id, _)) = answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| entries.get(index))
    else {
        view.push(ViewItem::Error(format!("'{answer}' is not a valid quest number.")));
        return Ok(());
    };

    match world.quest(quest_id) {
        Ok(quest) => view.push(ViewItem::QuestDetail {
            name: quest.name.clone(),
            description: quest.description.clone(),
            objectives: quest
                .objectives
                .iter()
                .map(|obj| (obj.description.clone(), obj.completed))
                .collect(),
            reward_gold: quest.reward_gold,
            reward_items: quest
                .reward_items
                .iter()
                .map(|id| world.item_display_name(id))
                .collect(),
        }),
        Err(err) => {
            warn!("quest log entry has no catalog entry: {err}");
            view.push(ViewItem::Error(format!("No details are known for {}.", format_id(quest_id))));
        },
    }
    Ok(())
}
