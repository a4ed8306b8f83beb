//! Character creation.
//!
//! Walks a new player through choosing a name, race, class and background,
//! previews the resulting stats, and applies the choices once confirmed.

use std::collections::BTreeMap;

use anyhow::Result;
use log::info;
use runewild_data::Id;
use thiserror::Error;

use crate::location::ItemHolder;
use crate::repl::input::{InputEvent, LineReader};
use crate::stats::{PrimaryStat, StatSources};
use crate::view::{OptionLine, View, ViewItem};
use crate::world::{RunewildWorld, resolve_sources};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 20;

/// Input ended before the character was finished.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("character creation aborted")]
pub struct CreationAborted;

/// Choices made so far, not yet applied to the player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterDraft {
    pub name: String,
    pub race: Option<Id>,
    pub class: Option<Id>,
    pub background: Option<Id>,
}

impl CharacterDraft {
    pub fn sources<'a>(&self, world: &'a RunewildWorld) -> StatSources<'a> {
        resolve_sources(
            &world.races,
            &world.classes,
            &world.backgrounds,
            [self.race.as_deref(), self.class.as_deref(), self.background.as_deref()],
        )
    }
}

/// Run the interactive creation flow and apply the confirmed character to `world.player`.
///
/// # Errors
/// - [`CreationAborted`] if input ends before confirmation
/// - if reading input fails or the player was already initialized
pub fn create_character(world: &mut RunewildWorld, view: &mut View, input: &mut dyn LineReader) -> Result<()> {
    loop {
        let name = prompt_name(view, input)?;
        let race = choose_option(view, input, "Choose your race:", &world.races, |race| OptionLine {
            name: race.name.clone(),
            description: race.description.clone(),
            detail: None,
        })?;
        let class = choose_option(view, input, "Choose your class:", &world.classes, |class| OptionLine {
            name: class.name.clone(),
            description: class.description.clone(),
            detail: class.playstyle.as_ref().map(|style| format!("Playstyle: {style}")),
        })?;
        let background = choose_option(view, input, "Choose your background:", &world.backgrounds, |bg| {
            OptionLine {
                name: bg.name.clone(),
                description: bg.description.clone(),
                detail: (bg.starting_gold > 0).then(|| format!("Starting gold: {}", bg.starting_gold)),
            }
        })?;

        let draft = CharacterDraft {
            name,
            race,
            class,
            background,
        };
        view.push(preview(world, &draft));
        if confirm(view, input)? {
            apply_draft(world, draft)?;
            return Ok(());
        }
        view.push(ViewItem::EngineMessage("Very well, let's start over.".to_string()));
    }
}

/// Apply a confirmed draft: identity, class starting items, background gold, then
/// current stats at their maximums.
///
/// # Errors
/// - if the player's current stats were already initialized
pub fn apply_draft(world: &mut RunewildWorld, draft: CharacterDraft) -> Result<()> {
    let starting_items: Vec<Id> = draft
        .class
        .as_ref()
        .and_then(|id| world.classes.get(id))
        .map(|class| class.starting_items.clone())
        .unwrap_or_default();
    let starting_gold = draft
        .background
        .as_ref()
        .and_then(|id| world.backgrounds.get(id))
        .map_or(0, |bg| bg.starting_gold);

    let player = &mut world.player;
    player.name = draft.name;
    player.race = draft.race;
    player.class = draft.class;
    player.background = draft.background;
    for item in starting_items {
        player.add_item(item);
    }
    player.gold = player.gold.saturating_add(starting_gold);
    world.initialize_player_stats()?;
    info!(
        "character created: {} ({:?} / {:?} / {:?}), {} gold, {} item(s)",
        world.player.name,
        world.player.race,
        world.player.class,
        world.player.background,
        world.player.gold,
        world.player.inventory.len()
    );
    Ok(())
}

/// Check a proposed name; returns the trimmed name or a message for the player.
pub fn validate_name(raw: &str) -> Result<String, String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("Your name cannot be empty.".to_string());
    }
    let len = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
        return Err(format!(
            "Your name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters."
        ));
    }
    Ok(name.to_string())
}

fn read_answer(view: &mut View, input: &mut dyn LineReader, prompt: &str) -> Result<String> {
    view.flush();
    match input.read_line(&view.prompt(prompt))? {
        InputEvent::Line(line) => Ok(line),
        InputEvent::Eof | InputEvent::Interrupted => Err(CreationAborted.into()),
    }
}

fn prompt_name(view: &mut View, input: &mut dyn LineReader) -> Result<String> {
    loop {
        let answer = read_answer(view, input, "What is your name, traveler? ")?;
        match validate_name(&answer) {
            Ok(name) => return Ok(name),
            Err(message) => view.push(ViewItem::Error(message)),
        }
    }
}

/// Offer a numbered list of catalog entries. An empty catalog is skipped.
fn choose_option<T>(
    view: &mut View,
    input: &mut dyn LineReader,
    heading: &str,
    catalog: &BTreeMap<Id, T>,
    describe: impl Fn(&T) -> OptionLine,
) -> Result<Option<Id>> {
    if catalog.is_empty() {
        return Ok(None);
    }
    let ids: Vec<&Id> = catalog.keys().collect();
    view.push(ViewItem::ChoiceList {
        heading: heading.to_string(),
        options: catalog.values().map(describe).collect(),
    });
    loop {
        let answer = read_answer(view, input, "Enter a number: ")?;
        let picked = answer
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| ids.get(index));
        match picked {
            Some(id) => return Ok(Some((*id).clone())),
            None => view.push(ViewItem::Error(format!(
                "Please enter a number between 1 and {}.",
                ids.len()
            ))),
        }
    }
}

fn confirm(view: &mut View, input: &mut dyn LineReader) -> Result<bool> {
    loop {
        let answer = read_answer(view, input, "Is this correct? (yes/no) ")?;
        match answer.trim().to_lowercase().as_str() {
            "yes" | "y" => return Ok(true),
            "no" | "n" => return Ok(false),
            _ => view.push(ViewItem::Error("Please answer yes or no.".to_string())),
        }
    }
}

fn preview(world: &RunewildWorld, draft: &CharacterDraft) -> ViewItem {
    let sources = draft.sources(world);
    let block = world.player.stats(&sources);
    let chosen = |name: Option<&String>| name.cloned().unwrap_or_else(|| "None".to_string());
    ViewItem::CharacterSheet {
        name: draft.name.clone(),
        race: chosen(sources.race.map(|r| &r.name)),
        class: chosen(sources.class.map(|c| &c.name)),
        background: chosen(sources.background.map(|b| &b.name)),
        primaries: PrimaryStat::ALL
            .iter()
            .map(|stat| (stat.label().to_string(), block.get(*stat)))
            .collect(),
        secondaries: vec![
            ("Health".to_string(), block.max_health()),
            ("Mana".to_string(), block.max_mana()),
            ("Stamina".to_string(), block.max_stamina()),
            ("Attack".to_string(), block.attack_power()),
            ("Magic".to_string(), block.magic_power()),
            ("Defense".to_string(), block.defense()),
        ],
    }
}
