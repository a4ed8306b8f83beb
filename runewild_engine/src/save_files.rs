//! Save file support.
//!
//! The game keeps a single save slot, `saves/savegame.json`. It records where the
//! player is, what they carry, their quest log, what lies in each location, and
//! (once a character has been created) the character itself.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use log::{info, warn};
use runewild_data::Id;
use serde::{Deserialize, Serialize};

use crate::quest::QuestLog;
use crate::stats::BaseStats;
use crate::world::RunewildWorld;

pub const SAVE_DIR: &str = "saves";
pub const SAVE_FILE: &str = "savegame.json";
pub const SAVE_VERSION: &str = "0.0.1";

/// Snapshot of everything that changes during play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveGame {
    pub version: String,
    #[serde(alias = "current_location_id")]
    pub current_location: Id,
    #[serde(default)]
    pub active_quests: QuestLog,
    #[serde(default)]
    pub inventory: Vec<Id>,
    #[serde(default)]
    pub location_items: BTreeMap<Id, Vec<Id>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<CharacterSnapshot>,
}

/// The created character. Absent from saves made before character creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub name: String,
    pub race: Option<Id>,
    pub class: Option<Id>,
    pub background: Option<Id>,
    pub level: u32,
    pub gold: u32,
    #[serde(default)]
    pub base: BaseStats,
    pub current_health: Option<i32>,
    pub current_mana: Option<i32>,
    pub current_stamina: Option<i32>,
}

impl SaveGame {
    /// Capture the current state of `world`.
    pub fn capture(world: &RunewildWorld) -> Self {
        let player = &world.player;
        let character = player.is_initialized().then(|| CharacterSnapshot {
            name: player.name.clone(),
            race: player.race.clone(),
            class: player.class.clone(),
            background: player.background.clone(),
            level: player.level,
            gold: player.gold,
            base: player.base,
            current_health: player.current_health,
            current_mana: player.current_mana,
            current_stamina: player.current_stamina,
        });
        Self {
            version: SAVE_VERSION.to_string(),
            current_location: player.location.clone(),
            active_quests: player.active_quests.clone(),
            inventory: player.inventory.clone(),
            location_items: world
                .locations
                .iter()
                .map(|(id, location)| (id.clone(), location.items.clone()))
                .collect(),
            character,
        }
    }

    pub fn is_current_version(&self) -> bool {
        self.version == SAVE_VERSION
    }

    /// Apply this snapshot to a freshly loaded world.
    ///
    /// Item lists are replaced for every known location in the save; unknown
    /// locations are skipped with a warning.
    ///
    /// # Errors
    /// - if the saved current location does not exist (nothing is changed)
    pub fn restore_into(&self, world: &mut RunewildWorld) -> Result<()> {
        if !self.is_current_version() {
            warn!(
                "save file version {} differs from current version {SAVE_VERSION}",
                self.version
            );
        }
        if !world.locations.contains_key(&self.current_location) {
            bail!("save refers to unknown current location '{}'", self.current_location);
        }

        for (location_id, items) in &self.location_items {
            match world.locations.get_mut(location_id) {
                Some(location) => location.items.clone_from(items),
                None => warn!("save lists items for unknown location '{location_id}'; skipped"),
            }
        }

        let player = &mut world.player;
        player.location.clone_from(&self.current_location);
        player.inventory.clone_from(&self.inventory);
        player.active_quests.clone_from(&self.active_quests);
        if let Some(character) = &self.character {
            player.name.clone_from(&character.name);
            player.race.clone_from(&character.race);
            player.class.clone_from(&character.class);
            player.background.clone_from(&character.background);
            player.level = character.level;
            player.gold = character.gold;
            player.base = character.base;
            player.current_health = character.current_health;
            player.current_mana = character.current_mana;
            player.current_stamina = character.current_stamina;
        }
        info!(
            "save restored: {} at '{}', {} item(s) carried, {} quest(s)",
            player.name,
            player.location,
            player.inventory.len(),
            player.active_quests.len()
        );
        Ok(())
    }
}

pub fn save_path(dir: &Path) -> PathBuf {
    dir.join(SAVE_FILE)
}

/// Write the world's save snapshot into `dir`, creating it if needed.
///
/// # Errors
/// - if the directory cannot be created or the file cannot be written
pub fn write_save(world: &RunewildWorld, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating save directory '{}'", dir.display()))?;
    let path = save_path(dir);
    let json = serde_json::to_string_pretty(&SaveGame::capture(world)).context("serializing save game")?;
    fs::write(&path, json).with_context(|| format!("writing save file '{}'", path.display()))?;
    info!("saved game to '{}'", path.display());
    Ok(path)
}

/// Read the save in `dir`. A missing file means there is no saved game.
///
/// # Errors
/// - if the file exists but cannot be read or parsed
pub fn read_save(dir: &Path) -> Result<Option<SaveGame>> {
    let path = save_path(dir);
    if !path.exists() {
        info!("no save file at '{}'", path.display());
        return Ok(None);
    }
    let raw = fs::read_to_string(&path).with_context(|| format!("reading save file '{}'", path.display()))?;
    let save = serde_json::from_str(&raw).with_context(|| format!("parsing save file '{}'", path.display()))?;
    Ok(Some(save))
}
