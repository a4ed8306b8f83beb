//! NPC module
//!
//! Non-player characters stand in locations and can be talked to.

use runewild_data::{Id, NpcDef};

use crate::dialogue::DialogueTree;
use crate::world::WorldObject;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Npc {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub dialogue: DialogueTree,
}

impl WorldObject for Npc {
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

impl From<&NpcDef> for Npc {
    fn from(def: &NpcDef) -> Self {
        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            description: def.description.clone(),
            dialogue: DialogueTree::from_npc_def(def),
        }
    }
}
