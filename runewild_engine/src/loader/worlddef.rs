//! WorldDef loader and conversion helpers.
//!
//! Gathers the per-entity catalogs into a `WorldDef` and converts it into runtime
//! engine structs.

use std::path::Path;

use anyhow::{Result, bail};
use runewild_data::WorldDef;

use crate::loader::catalog::load_catalog;
use crate::world::RunewildWorld;
use crate::{Item, Location, Npc, Quest};

/// Read every content directory below `root` into a `WorldDef`.
///
/// # Errors
/// - if `root` is not a directory
pub fn load_worlddef(root: &Path) -> Result<WorldDef> {
    if !root.is_dir() {
        bail!("data directory '{}' not found", root.display());
    }
    Ok(WorldDef {
        locations: load_catalog(&root.join("locations")),
        npcs: load_catalog(&root.join("npcs")),
        items: load_catalog(&root.join("items")),
        quests: load_catalog(&root.join("quests")),
        races: load_catalog(&root.join("races")),
        classes: load_catalog(&root.join("classes")),
        backgrounds: load_catalog(&root.join("backgrounds")),
        ..WorldDef::default()
    })
}

/// Convert a `WorldDef` into a populated `RunewildWorld`, with the player at the start location.
pub fn build_world_from_def(def: &WorldDef) -> RunewildWorld {
    let mut world = RunewildWorld::new_empty();
    world.start_location.clone_from(&def.start_location);
    world.player.location.clone_from(&def.start_location);

    world.locations = def
        .locations
        .iter()
        .map(|(id, loc)| (id.clone(), Location::from(loc)))
        .collect();
    world.npcs = def.npcs.iter().map(|(id, npc)| (id.clone(), Npc::from(npc))).collect();
    world.items = def.items.iter().map(|(id, item)| (id.clone(), Item::from(item))).collect();
    world.quests = def
        .quests
        .iter()
        .map(|(id, quest)| (id.clone(), Quest::from(quest)))
        .collect();
    world.races = def.races.clone();
    world.classes = def.classes.clone();
    world.backgrounds = def.backgrounds.clone();
    world
}
