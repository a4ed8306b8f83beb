//! Character statistics.
//!
//! Seven primary stats start from the player's base values and receive additive
//! bonuses from race, class and background. Secondary stats are derived from the
//! effective primaries and the character level with integer floor division.

use std::fmt;

use runewild_data::{BackgroundDef, ClassDef, RaceDef, StatBonuses};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimaryStat {
    Strength,
    Agility,
    Intelligence,
    Vitality,
    Wisdom,
    Charisma,
    Luck,
}

impl PrimaryStat {
    pub const ALL: [PrimaryStat; 7] = [
        PrimaryStat::Strength,
        PrimaryStat::Agility,
        PrimaryStat::Intelligence,
        PrimaryStat::Vitality,
        PrimaryStat::Wisdom,
        PrimaryStat::Charisma,
        PrimaryStat::Luck,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PrimaryStat::Strength => "Strength",
            PrimaryStat::Agility => "Agility",
            PrimaryStat::Intelligence => "Intelligence",
            PrimaryStat::Vitality => "Vitality",
            PrimaryStat::Wisdom => "Wisdom",
            PrimaryStat::Charisma => "Charisma",
            PrimaryStat::Luck => "Luck",
        }
    }

    /// This stat's entry in a bonus table.
    pub fn bonus_in(self, bonuses: &StatBonuses) -> i32 {
        match self {
            PrimaryStat::Strength => bonuses.strength,
            PrimaryStat::Agility => bonuses.agility,
            PrimaryStat::Intelligence => bonuses.intelligence,
            PrimaryStat::Vitality => bonuses.vitality,
            PrimaryStat::Wisdom => bonuses.wisdom,
            PrimaryStat::Charisma => bonuses.charisma,
            PrimaryStat::Luck => bonuses.luck,
        }
    }
}

impl fmt::Display for PrimaryStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Base values of the primaries, before any bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub strength: i32,
    pub agility: i32,
    pub intelligence: i32,
    pub vitality: i32,
    pub wisdom: i32,
    pub charisma: i32,
    pub luck: i32,
}

impl Default for BaseStats {
    fn default() -> Self {
        Self {
            strength: 10,
            agility: 10,
            intelligence: 10,
            vitality: 10,
            wisdom: 10,
            charisma: 10,
            luck: 10,
        }
    }
}

impl BaseStats {
    pub fn get(&self, stat: PrimaryStat) -> i32 {
        match stat {
            PrimaryStat::Strength => self.strength,
            PrimaryStat::Agility => self.agility,
            PrimaryStat::Intelligence => self.intelligence,
            PrimaryStat::Vitality => self.vitality,
            PrimaryStat::Wisdom => self.wisdom,
            PrimaryStat::Charisma => self.charisma,
            PrimaryStat::Luck => self.luck,
        }
    }
}

/// The character options that contribute bonuses. Any of them may be absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatSources<'a> {
    pub race: Option<&'a RaceDef>,
    pub class: Option<&'a ClassDef>,
    pub background: Option<&'a BackgroundDef>,
}

impl StatSources<'_> {
    /// Sum of every source's bonus for `stat`; missing sources and entries count as 0.
    pub fn bonus(&self, stat: PrimaryStat) -> i32 {
        [
            self.race.and_then(|r| r.stat_bonuses.as_ref()),
            self.class.and_then(|c| c.stat_bonuses.as_ref()),
            self.background.and_then(|b| b.stat_bonuses.as_ref()),
        ]
        .into_iter()
        .flatten()
        .map(|bonuses| stat.bonus_in(bonuses))
        .fold(0, i32::saturating_add)
    }
}

/// Effective primaries plus level: everything the derived formulas need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatBlock {
    pub level: i32,
    pub strength: i32,
    pub agility: i32,
    pub intelligence: i32,
    pub vitality: i32,
    pub wisdom: i32,
    pub charisma: i32,
    pub luck: i32,
}

impl StatBlock {
    pub fn new(base: &BaseStats, level: u32, sources: &StatSources<'_>) -> Self {
        let eff = |stat: PrimaryStat| base.get(stat).saturating_add(sources.bonus(stat));
        Self {
            level: i32::try_from(level).unwrap_or(i32::MAX),
            strength: eff(PrimaryStat::Strength),
            agility: eff(PrimaryStat::Agility),
            intelligence: eff(PrimaryStat::Intelligence),
            vitality: eff(PrimaryStat::Vitality),
            wisdom: eff(PrimaryStat::Wisdom),
            charisma: eff(PrimaryStat::Charisma),
            luck: eff(PrimaryStat::Luck),
        }
    }

    pub fn get(&self, stat: PrimaryStat) -> i32 {
        match stat {
            PrimaryStat::Strength => self.strength,
            PrimaryStat::Agility => self.agility,
            PrimaryStat::Intelligence => self.intelligence,
            PrimaryStat::Vitality => self.vitality,
            PrimaryStat::Wisdom => self.wisdom,
            PrimaryStat::Charisma => self.charisma,
            PrimaryStat::Luck => self.luck,
        }
    }

    pub fn max_health(&self) -> i32 {
        weighted(&[(self.vitality, 15), (self.strength, 2), (self.level, 10)])
    }

    pub fn max_mana(&self) -> i32 {
        weighted(&[(self.intelligence, 10), (self.wisdom, 5), (self.level, 5)])
    }

    pub fn max_stamina(&self) -> i32 {
        weighted(&[(self.vitality, 8), (self.agility, 3), (self.level, 5)])
    }

    pub fn attack_power(&self) -> i32 {
        self.strength.saturating_add(self.strength.div_euclid(5))
    }

    pub fn magic_power(&self) -> i32 {
        self.intelligence.saturating_add(self.intelligence.div_euclid(4))
    }

    pub fn defense(&self) -> i32 {
        self.agility.div_euclid(3).saturating_add(self.vitality.div_euclid(4))
    }

    /// Percent chance.
    pub fn crit_chance(&self) -> i32 {
        weighted(&[(5, 1), (self.agility.div_euclid(5), 1), (self.luck.div_euclid(3), 1)])
    }

    /// Percent of normal damage.
    pub fn crit_damage(&self) -> i32 {
        weighted(&[(150, 1), (self.strength.div_euclid(4), 1), (self.luck.div_euclid(5), 1)])
    }

    pub fn carry_weight(&self) -> i32 {
        weighted(&[(25, 1), (self.strength, 2), (self.vitality, 1)])
    }

    /// Percent of normal speed.
    pub fn movement_speed(&self) -> i32 {
        weighted(&[(100, 1), (self.agility, 2)])
    }

    pub fn mana_regen(&self) -> i32 {
        self.wisdom.div_euclid(2).saturating_add(self.intelligence.div_euclid(5))
    }

    pub fn health_regen(&self) -> i32 {
        self.vitality.div_euclid(3).saturating_add(self.wisdom.div_euclid(4))
    }
}

/// Sum of `value * factor` terms, clamped to the `i32` range instead of overflowing.
fn weighted(terms: &[(i32, i32)]) -> i32 {
    terms
        .iter()
        .fold(0, |total: i32, &(value, factor)| total.saturating_add(value.saturating_mul(factor)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bonuses(strength: i32, agility: i32, vitality: i32) -> Option<StatBonuses> {
        Some(StatBonuses {
            strength,
            agility,
            vitality,
            ..StatBonuses::default()
        })
    }

    #[test]
    fn no_sources_means_effective_equals_base() {
        let base = BaseStats {
            strength: 7,
            agility: 8,
            intelligence: 9,
            vitality: 11,
            wisdom: 12,
            charisma: 13,
            luck: 14,
        };
        let block = StatBlock::new(&base, 1, &StatSources::default());
        for stat in PrimaryStat::ALL {
            assert_eq!(block.get(stat), base.get(stat), "{stat}");
        }
    }

    #[test]
    fn default_character_secondaries() {
        let block = StatBlock::new(&BaseStats::default(), 1, &StatSources::default());
        assert_eq!(block.max_health(), 180);
        assert_eq!(block.max_mana(), 155);
        assert_eq!(block.max_stamina(), 115);
        assert_eq!(block.attack_power(), 12);
        assert_eq!(block.magic_power(), 12);
        assert_eq!(block.defense(), 5);
        assert_eq!(block.crit_chance(), 10);
        assert_eq!(block.crit_damage(), 154);
        assert_eq!(block.carry_weight(), 55);
        assert_eq!(block.movement_speed(), 120);
        assert_eq!(block.mana_regen(), 7);
        assert_eq!(block.health_regen(), 5);
    }

    #[test]
    fn bonuses_from_all_sources_are_summed() {
        let race = RaceDef {
            stat_bonuses: bonuses(0, 2, 0),
            ..RaceDef::default()
        };
        let class = ClassDef {
            stat_bonuses: bonuses(3, 0, 2),
            ..ClassDef::default()
        };
        let background = BackgroundDef {
            stat_bonuses: bonuses(1, -1, 0),
            ..BackgroundDef::default()
        };
        let sources = StatSources {
            race: Some(&race),
            class: Some(&class),
            background: Some(&background),
        };
        let block = StatBlock::new(&BaseStats::default(), 2, &sources);
        assert_eq!(block.strength, 14);
        assert_eq!(block.agility, 11);
        assert_eq!(block.vitality, 12);
        assert_eq!(block.luck, 10);
        // 12*15 + 14*2 + 2*10
        assert_eq!(block.max_health(), 228);
    }

    #[test]
    fn negative_stats_floor_toward_negative_infinity() {
        let base = BaseStats {
            agility: -1,
            vitality: -1,
            ..BaseStats::default()
        };
        let block = StatBlock::new(&base, 1, &StatSources::default());
        assert_eq!(block.defense(), -2);
    }

    #[test]
    fn extreme_bonuses_clamp_instead_of_overflowing() {
        let race = RaceDef {
            stat_bonuses: bonuses(i32::MAX, i32::MIN, 200_000_000),
            ..RaceDef::default()
        };
        let class = ClassDef {
            stat_bonuses: bonuses(i32::MAX, 0, 0),
            ..ClassDef::default()
        };
        let sources = StatSources {
            race: Some(&race),
            class: Some(&class),
            background: None,
        };
        let block = StatBlock::new(&BaseStats::default(), u32::MAX, &sources);
        assert_eq!(block.strength, i32::MAX);
        assert_eq!(block.agility, i32::MIN + 10);
        assert_eq!(block.level, i32::MAX);
        assert_eq!(block.max_health(), i32::MAX);
        assert_eq!(block.carry_weight(), i32::MAX);
        assert_eq!(block.movement_speed(), i32::MIN + 100);
        assert_eq!(block.attack_power(), i32::MAX);
        assert!(block.defense() < 0);
    }
}
