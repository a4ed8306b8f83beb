//! Item module
//!
//! Items are read-only catalog entries. Where an item currently lies is tracked by
//! id in `Location::items` and `Player::inventory`.

use runewild_data::{Id, ItemDef};

use crate::world::WorldObject;

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub item_type: String,
    pub value: u32,
    pub weight: f32,
    pub rarity: String,
}

impl WorldObject for Item {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl From<&ItemDef> for Item {
    fn from(def: &ItemDef) -> Self {
        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            description: def.description.clone(),
            item_type: def.item_type.clone(),
            value: def.value,
            weight: def.weight,
            rarity: def.rarity.clone(),
        }
    }
}
