//! Location module
//!
//! A `Location` is a node of the world graph: it has exits to other locations, a set
//! of NPCs standing in it, and a list of items lying on the ground.

use std::collections::{BTreeMap, BTreeSet};

use runewild_data::{Id, LocationDef};

use crate::world::WorldObject;

/// Anything that can hold item ids.
pub trait ItemHolder {
    /// Insert an item into the holder's contents.
    fn add_item(&mut self, item_id: Id);
    /// Remove one occurrence of an item. Returns `false` if it wasn't there.
    fn remove_item(&mut self, item_id: &str) -> bool;
    /// Return `true` when the holder contains the given item.
    fn contains_item(&self, item_id: &str) -> bool;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub id: Id,
    pub name: String,
    pub short_description: String,
    pub detailed_description: String,
    pub exits: BTreeMap<String, Id>,
    pub npcs: BTreeSet<Id>,
    pub items: Vec<Id>,
}

impl WorldObject for Location {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.detailed_description
    }
}

impl ItemHolder for Location {
    fn add_item(&mut self, item_id: Id) {
        self.items.push(item_id);
    }

    fn remove_item(&mut self, item_id: &str) -> bool {
        match self.items.iter().position(|id| id == item_id) {
            Some(index) => {
                self.items.remove(index);
                true
            },
            None => false,
        }
    }

    fn contains_item(&self, item_id: &str) -> bool {
        self.items.iter().any(|id| id == item_id)
    }
}

impl Location {
    /// Destination of the exit named `direction`, ignoring case.
    pub fn exit_to(&self, direction: &str) -> Option<&Id> {
        self.exits
            .iter()
            .find(|(dir, _)| dir.eq_ignore_ascii_case(direction))
            .map(|(_, target)| target)
    }

    pub fn has_npc(&self, npc_id: &str) -> bool {
        self.npcs.contains(npc_id)
    }
}

impl From<&LocationDef> for Location {
    fn from(def: &LocationDef) -> Self {
        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            short_description: def.short_description.clone(),
            detailed_description: def.detailed_description.clone(),
            exits: def.exits.clone(),
            npcs: def.npcs.iter().cloned().collect(),
            items: def.items.clone(),
        }
    }
}
