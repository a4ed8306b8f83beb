use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Stable identifier used across content references (the file stem of each entity).
pub type Id = String;

/// Location every new game starts in, and the root of the reachability check.
pub const START_LOCATION: &str = "village_entrance";

/// Name of the dialogue node every conversation starts from.
pub const GREETING_NODE: &str = "greeting";

/// All world content, keyed by id, as read from the content directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldDef {
    pub start_location: Id,
    #[serde(default)]
    pub locations: BTreeMap<Id, LocationDef>,
    #[serde(default)]
    pub npcs: BTreeMap<Id, NpcDef>,
    #[serde(default)]
    pub items: BTreeMap<Id, ItemDef>,
    #[serde(default)]
    pub quests: BTreeMap<Id, QuestDef>,
    #[serde(default)]
    pub races: BTreeMap<Id, RaceDef>,
    #[serde(default)]
    pub classes: BTreeMap<Id, ClassDef>,
    #[serde(default)]
    pub backgrounds: BTreeMap<Id, BackgroundDef>,
}

impl Default for WorldDef {
    fn default() -> Self {
        Self {
            start_location: START_LOCATION.to_string(),
            locations: BTreeMap::new(),
            npcs: BTreeMap::new(),
            items: BTreeMap::new(),
            quests: BTreeMap::new(),
            races: BTreeMap::new(),
            classes: BTreeMap::new(),
            backgrounds: BTreeMap::new(),
        }
    }
}

/// A place the player can stand in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationDef {
    #[serde(default)]
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub detailed_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exits: BTreeMap<String, Id>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub npcs: Vec<Id>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Id>,
}

/// A non-player character. Either `greeting_message` or a `dialogue` tree rooted
/// at [`GREETING_NODE`] must be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NpcDef {
    #[serde(default)]
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub greeting_message: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dialogue: BTreeMap<Id, DialogueNodeDef>,
}

impl NpcDef {
    /// True if a conversation with this NPC has somewhere to start.
    pub fn has_greeting(&self) -> bool {
        self.dialogue.contains_key(GREETING_NODE) || self.greeting_message.is_some()
    }
}

/// One node of an NPC's conversation tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DialogueNodeDef {
    pub text: String,
    #[serde(default)]
    pub trigger_quest: Option<Id>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub choices: Vec<ChoiceDef>,
}

/// A player response that moves the conversation to another node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChoiceDef {
    pub text: String,
    pub goes_to: Id,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    #[serde(default)]
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default = "default_item_type")]
    pub item_type: String,
    #[serde(default)]
    pub value: u32,
    #[serde(default)]
    pub weight: f32,
    #[serde(default = "default_rarity")]
    pub rarity: String,
}

impl Default for ItemDef {
    fn default() -> Self {
        Self {
            id: Id::new(),
            name: String::new(),
            description: String::new(),
            item_type: default_item_type(),
            value: 0,
            weight: 0.0,
            rarity: default_rarity(),
        }
    }
}

fn default_item_type() -> String {
    "misc".to_string()
}

fn default_rarity() -> String {
    "common".to_string()
}

/// Quest definition: objectives are tracked in order, rewards are granted on completion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestDef {
    #[serde(default)]
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub objectives: Vec<ObjectiveDef>,
    #[serde(default)]
    pub rewards: RewardsDef,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectiveDef {
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RewardsDef {
    #[serde(default)]
    pub gold: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Id>,
}

/// Per-stat additive bonuses granted by a race, class or background.
/// Entries that are absent from the file count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBonuses {
    pub strength: i32,
    pub agility: i32,
    pub intelligence: i32,
    pub vitality: i32,
    pub wisdom: i32,
    pub charisma: i32,
    pub luck: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RaceDef {
    #[serde(default)]
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stat_bonuses: Option<StatBonuses>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassDef {
    #[serde(default)]
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub playstyle: Option<String>,
    #[serde(default)]
    pub stat_bonuses: Option<StatBonuses>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub starting_items: Vec<Id>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackgroundDef {
    #[serde(default)]
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stat_bonuses: Option<StatBonuses>,
    #[serde(default)]
    pub starting_gold: u32,
}

/// Content files often spell an empty list as a bare key (`npcs:`), which
/// deserializes as null. Treat that the same as an omitted field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_lists_deserialize_as_empty() {
        let json = r#"{ "name": "Square", "exits": null, "npcs": null, "items": null }"#;
        let loc: LocationDef = serde_json::from_str(json).unwrap();
        assert!(loc.exits.is_empty());
        assert!(loc.npcs.is_empty());
        assert!(loc.items.is_empty());
    }

    #[test]
    fn item_type_field_is_renamed() {
        let json = r#"{ "name": "Rusty Sword", "type": "weapon", "value": 5, "weight": 3.5 }"#;
        let item: ItemDef = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_type, "weapon");
        assert_eq!(item.rarity, "common");
        assert_eq!(item.value, 5);
    }

    #[test]
    fn missing_stat_bonus_entries_are_zero() {
        let json = r#"{ "name": "Elf", "stat_bonuses": { "agility": 2 } }"#;
        let race: RaceDef = serde_json::from_str(json).unwrap();
        let bonuses = race.stat_bonuses.unwrap();
        assert_eq!(bonuses.agility, 2);
        assert_eq!(bonuses.strength, 0);
        assert_eq!(bonuses.luck, 0);
    }

    #[test]
    fn greeting_message_counts_as_greeting() {
        let npc = NpcDef {
            name: "Guard".into(),
            greeting_message: Some("Halt.".into()),
            ..NpcDef::default()
        };
        assert!(npc.has_greeting());
        assert!(!NpcDef::default().has_greeting());
    }
}
