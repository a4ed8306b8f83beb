//! Data structures representing the game world.
//!
//! This module defines [`RunewildWorld`], the aggregate of every catalog loaded at
//! startup plus the single mutable [`Player`].
use crate::player::PlayerError;
use crate::stats::StatSources;
use crate::{Item, Location, Npc, Player, Quest, RUNEWILD_VERSION};

use log::info;
use runewild_data::{BackgroundDef, ClassDef, Id, RaceDef, START_LOCATION};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Failed lookups into the world catalogs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("unknown location '{0}'")]
    UnknownLocation(Id),
    #[error("unknown npc '{0}'")]
    UnknownNpc(Id),
    #[error("unknown item '{0}'")]
    UnknownItem(Id),
    #[error("unknown quest '{0}'")]
    UnknownQuest(Id),
}

/// Methods common to any named entity in the world.
pub trait WorldObject {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn description(&self) -> &str;
}

/// Complete state of the running game.
///
/// Catalogs are built once by the loader. During play only `Location::items` and
/// the player change.
#[derive(Debug, Clone)]
pub struct RunewildWorld {
    pub locations: HashMap<Id, Location>,
    pub npcs: HashMap<Id, Npc>,
    pub items: HashMap<Id, Item>,
    pub quests: HashMap<Id, Quest>,
    pub races: BTreeMap<Id, RaceDef>,
    pub classes: BTreeMap<Id, ClassDef>,
    pub backgrounds: BTreeMap<Id, BackgroundDef>,
    pub start_location: Id,
    pub player: Player,
    pub version: String,
}

impl Default for RunewildWorld {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl RunewildWorld {
    /// Create a new empty world with a default player at the start location.
    pub fn new_empty() -> RunewildWorld {
        let world = Self {
            locations: HashMap::new(),
            npcs: HashMap::new(),
            items: HashMap::new(),
            quests: HashMap::new(),
            races: BTreeMap::new(),
            classes: BTreeMap::new(),
            backgrounds: BTreeMap::new(),
            start_location: START_LOCATION.to_string(),
            player: Player::default(),
            version: RUNEWILD_VERSION.to_string(),
        };
        info!("new, empty 'RunewildWorld' created");
        world
    }

    /// # Errors
    /// - if no location with this id exists
    pub fn location(&self, id: &str) -> Result<&Location, WorldError> {
        self.locations
            .get(id)
            .ok_or_else(|| WorldError::UnknownLocation(id.to_string()))
    }

    /// # Errors
    /// - if no location with this id exists
    pub fn location_mut(&mut self, id: &str) -> Result<&mut Location, WorldError> {
        self.locations
            .get_mut(id)
            .ok_or_else(|| WorldError::UnknownLocation(id.to_string()))
    }

    /// # Errors
    /// - if no NPC with this id exists
    pub fn npc(&self, id: &str) -> Result<&Npc, WorldError> {
        self.npcs.get(id).ok_or_else(|| WorldError::UnknownNpc(id.to_string()))
    }

    /// # Errors
    /// - if no item with this id exists
    pub fn item(&self, id: &str) -> Result<&Item, WorldError> {
        self.items.get(id).ok_or_else(|| WorldError::UnknownItem(id.to_string()))
    }

    /// # Errors
    /// - if no quest with this id exists
    pub fn quest(&self, id: &str) -> Result<&Quest, WorldError> {
        self.quests.get(id).ok_or_else(|| WorldError::UnknownQuest(id.to_string()))
    }

    /// Obtain a reference to the location the player occupies.
    /// # Errors
    /// - if the player's location id is not found
    pub fn player_location_ref(&self) -> Result<&Location, WorldError> {
        self.location(&self.player.location)
    }

    /// Obtain a mutable reference to the location the player occupies.
    /// # Errors
    /// - if the player's location id is not found
    pub fn player_location_mut(&mut self) -> Result<&mut Location, WorldError> {
        let id = self.player.location.clone();
        self.location_mut(&id)
    }

    /// Name to show for an item id: the catalog name if there is one, else the id made readable.
    pub fn item_display_name(&self, id: &str) -> String {
        self.items
            .get(id)
            .map_or_else(|| format_id(id), |item| item.name.clone())
    }

    /// Name to show for a location id, falling back to the readable id.
    pub fn location_display_name(&self, id: &str) -> String {
        self.locations
            .get(id)
            .map_or_else(|| format_id(id), |location| location.name.clone())
    }

    /// Race, class and background definitions chosen by the player, where known.
    pub fn stat_sources(&self) -> StatSources<'_> {
        let player = &self.player;
        resolve_sources(
            &self.races,
            &self.classes,
            &self.backgrounds,
            [player.race.as_deref(), player.class.as_deref(), player.background.as_deref()],
        )
    }

    /// Fill the player's current HP/MP/stamina from their chosen options.
    ///
    /// # Errors
    /// - `PlayerError::AlreadyInitialized` if the player was already initialized
    pub fn initialize_player_stats(&mut self) -> Result<(), PlayerError> {
        let player = &self.player;
        let sources = resolve_sources(
            &self.races,
            &self.classes,
            &self.backgrounds,
            [player.race.as_deref(), player.class.as_deref(), player.background.as_deref()],
        );
        self.player.initialize_current_stats(&sources)
    }
}

/// Look up `[race, class, background]` ids in their catalogs; unknown or absent ids give `None`.
pub fn resolve_sources<'a>(
    races: &'a BTreeMap<Id, RaceDef>,
    classes: &'a BTreeMap<Id, ClassDef>,
    backgrounds: &'a BTreeMap<Id, BackgroundDef>,
    [race, class, background]: [Option<&str>; 3],
) -> StatSources<'a> {
    StatSources {
        race: race.and_then(|id| races.get(id)),
        class: class.and_then(|id| classes.get(id)),
        background: background.and_then(|id| backgrounds.get(id)),
    }
}

/// Turn an id like `rusty_sword` into `Rusty Sword`.
pub fn format_id(id: &str) -> String {
    id.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
