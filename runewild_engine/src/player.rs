//! Player module
//!
//! The player character: identity, base stats, position, purse, inventory and quest log.

use log::info;
use runewild_data::{Id, START_LOCATION};
use thiserror::Error;

use crate::location::ItemHolder;
use crate::quest::{QuestLog, QuestProgress};
use crate::stats::{BaseStats, StatBlock, StatSources};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlayerError {
    #[error("current stats have already been initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub race: Option<Id>,
    pub class: Option<Id>,
    pub background: Option<Id>,
    pub level: u32,
    pub base: BaseStats,
    pub location: Id,
    pub gold: u32,
    pub inventory: Vec<Id>,
    pub active_quests: QuestLog,
    pub current_health: Option<i32>,
    pub current_mana: Option<i32>,
    pub current_stamina: Option<i32>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            name: "Adventurer".to_string(),
            race: None,
            class: None,
            background: None,
            level: 1,
            base: BaseStats::default(),
            location: START_LOCATION.to_string(),
            gold: 0,
            inventory: Vec::new(),
            active_quests: QuestLog::default(),
            current_health: None,
            current_mana: None,
            current_stamina: None,
        }
    }
}

impl ItemHolder for Player {
    fn add_item(&mut self, item_id: Id) {
        self.inventory.push(item_id);
    }

    fn remove_item(&mut self, item_id: &str) -> bool {
        match self.inventory.iter().position(|id| id == item_id) {
            Some(index) => {
                self.inventory.remove(index);
                true
            },
            None => false,
        }
    }

    fn contains_item(&self, item_id: &str) -> bool {
        self.inventory.iter().any(|id| id == item_id)
    }
}

impl Player {
    /// Effective primaries and level, ready for the derived-stat formulas.
    pub fn stats(&self, sources: &StatSources<'_>) -> StatBlock {
        StatBlock::new(&self.base, self.level, sources)
    }

    /// True once current health/mana/stamina have been set.
    pub fn is_initialized(&self) -> bool {
        self.current_health.is_some()
    }

    /// Fill current HP, MP and stamina to their maximums. Allowed once per character.
    ///
    /// # Errors
    /// - `PlayerError::AlreadyInitialized` if called a second time
    pub fn initialize_current_stats(&mut self, sources: &StatSources<'_>) -> Result<(), PlayerError> {
        if self.is_initialized() {
            return Err(PlayerError::AlreadyInitialized);
        }
        let block = self.stats(sources);
        self.current_health = Some(block.max_health());
        self.current_mana = Some(block.max_mana());
        self.current_stamina = Some(block.max_stamina());
        info!(
            "{} initialized with {} HP, {} MP, {} stamina",
            self.name,
            block.max_health(),
            block.max_mana(),
            block.max_stamina()
        );
        Ok(())
    }

    /// Start (or restart) a quest. Returns `true` if it wasn't already active.
    pub fn accept_quest(&mut self, quest_id: &str) -> bool {
        self.active_quests
            .insert(quest_id.to_string(), QuestProgress::active())
            .is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::QuestStatus;

    #[test]
    fn defaults_match_new_character() {
        let player = Player::default();
        assert_eq!(player.name, "Adventurer");
        assert_eq!(player.level, 1);
        assert_eq!(player.location, "village_entrance");
        assert_eq!(player.base, BaseStats::default());
        assert!(player.current_health.is_none());
    }

    #[test]
    fn initialize_sets_current_to_max_once() {
        let mut player = Player::default();
        let sources = StatSources::default();
        player.initialize_current_stats(&sources).unwrap();
        let block = player.stats(&sources);
        assert_eq!(player.current_health, Some(block.max_health()));
        assert_eq!(player.current_mana, Some(block.max_mana()));
        assert_eq!(player.current_stamina, Some(block.max_stamina()));

        assert_eq!(
            player.initialize_current_stats(&sources),
            Err(PlayerError::AlreadyInitialized)
        );
    }

    #[test]
    fn accepting_quest_overwrites_status_to_active() {
        let mut player = Player::default();
        assert!(player.accept_quest("find_sword"));
        player.active_quests.get_mut("find_sword").unwrap().status = QuestStatus::Completed;
        assert!(!player.accept_quest("find_sword"));
        assert_eq!(player.active_quests.get("find_sword").map(|p| p.status), Some(QuestStatus::Active));
    }

    #[test]
    fn inventory_keeps_duplicates_in_order() {
        let mut player = Player::default();
        player.add_item("bread".into());
        player.add_item("potion".into());
        player.add_item("bread".into());
        assert!(player.remove_item("bread"));
        assert_eq!(player.inventory, vec!["potion".to_string(), "bread".to_string()]);
    }
}
