//! Quest module
//!
//! Quest definitions are catalog data; the player's progress on a quest is a small
//! [`QuestProgress`] record stored in `Player::active_quests` and written to saves.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use runewild_data::{Id, QuestDef};

use crate::world::WorldObject;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quest {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub objectives: Vec<Objective>,
    pub reward_gold: u32,
    pub reward_items: Vec<Id>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Objective {
    pub description: String,
    pub completed: bool,
}

impl WorldObject for Quest {
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

impl From<&QuestDef> for Quest {
    fn from(def: &QuestDef) -> Self {
        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            description: def.description.clone(),
            objectives: def
                .objectives
                .iter()
                .map(|obj| Objective {
                    description: obj.description.clone(),
                    completed: obj.completed,
                })
                .collect(),
            reward_gold: def.rewards.gold,
            reward_items: def.rewards.items.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestStatus {
    #[default]
    Active,
    Completed,
}

impl QuestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestStatus::Active => "active",
            QuestStatus::Completed => "completed",
        }
    }
}

/// Player-side record of a quest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestProgress {
    pub status: QuestStatus,
}

impl QuestProgress {
    pub fn active() -> Self {
        Self {
            status: QuestStatus::Active,
        }
    }
}

/// The player's quests in the order they were first accepted.
///
/// Serialized as a map from quest id to progress; the map's entry order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestLog {
    entries: Vec<(Id, QuestProgress)>,
}

impl QuestLog {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, quest_id: &str) -> Option<&QuestProgress> {
        self.entries.iter().find(|(id, _)| id == quest_id).map(|(_, progress)| progress)
    }

    pub fn get_mut(&mut self, quest_id: &str) -> Option<&mut QuestProgress> {
        self.entries
            .iter_mut()
            .find(|(id, _)| id == quest_id)
            .map(|(_, progress)| progress)
    }

    /// Record `progress` for `quest_id`. A known quest keeps its place in the log;
    /// the previous progress is returned.
    pub fn insert(&mut self, quest_id: Id, progress: QuestProgress) -> Option<QuestProgress> {
        match self.get_mut(&quest_id) {
            Some(existing) => Some(std::mem::replace(existing, progress)),
            None => {
                self.entries.push((quest_id, progress));
                None
            },
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Id, &QuestProgress)> {
        self.entries.iter().map(|(id, progress)| (id, progress))
    }
}

impl FromIterator<(Id, QuestProgress)> for QuestLog {
    fn from_iter<I: IntoIterator<Item = (Id, QuestProgress)>>(iter: I) -> Self {
        let mut log = QuestLog::default();
        for (id, progress) in iter {
            log.insert(id, progress);
        }
        log
    }
}

impl Serialize for QuestLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for QuestLog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LogVisitor;

        impl<'de> Visitor<'de> for LogVisitor {
            type Value = QuestLog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of quest ids to quest progress")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<QuestLog, A::Error> {
                let mut log = QuestLog::default();
                while let Some((id, progress)) = map.next_entry::<Id, QuestProgress>()? {
                    log.insert(id, progress);
                }
                Ok(log)
            }
        }

        deserializer.deserialize_map(LogVisitor)
    }
}
