use std::collections::{HashSet, VecDeque};
use std::fmt;

use crate::*;

/// A single integrity problem found in a [`WorldDef`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingExitTarget { location: Id, direction: String, target: Id },
    MissingNpc { location: Id, npc: Id },
    MissingItem { location: Id, item: Id },
    MissingStartLocation { start: Id },
    UnreachableLocation { location: Id },
    MissingGreeting { npc: Id },
    DanglingChoice { npc: Id, node: Id, choice: usize, target: Id },
    MissingQuest { npc: Id, node: Id, quest: Id },
    MissingRewardItem { quest: Id, item: Id },
    MissingStartingItem { class: Id, item: Id },
}

/// How much a [`ValidationError`] matters for starting the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Reported, but play may continue.
    Warning,
    /// The game refuses to start.
    Error,
}

impl ValidationError {
    pub fn severity(&self) -> Severity {
        match self {
            ValidationError::UnreachableLocation { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingExitTarget {
                location,
                direction,
                target,
            } => write!(
                f,
                "location '{location}' has exit '{direction}' pointing to missing location '{target}'"
            ),
            ValidationError::MissingNpc { location, npc } => {
                write!(f, "location '{location}' has missing npc '{npc}'")
            },
            ValidationError::MissingItem { location, item } => {
                write!(f, "location '{location}' references missing item '{item}'")
            },
            ValidationError::MissingStartLocation { start } => {
                write!(f, "start location '{start}' does not exist")
            },
            ValidationError::UnreachableLocation { location } => {
                write!(f, "location '{location}' is unreachable")
            },
            ValidationError::MissingGreeting { npc } => {
                write!(f, "npc '{npc}' has neither a '{GREETING_NODE}' node nor a greeting message")
            },
            ValidationError::DanglingChoice {
                npc,
                node,
                choice,
                target,
            } => write!(
                f,
                "npc '{npc}' node '{node}' choice {choice} goes to missing node '{target}'"
            ),
            ValidationError::MissingQuest { npc, node, quest } => {
                write!(f, "npc '{npc}' node '{node}' triggers missing quest '{quest}'")
            },
            ValidationError::MissingRewardItem { quest, item } => {
                write!(f, "quest '{quest}' rewards missing item '{item}'")
            },
            ValidationError::MissingStartingItem { class, item } => {
                write!(f, "class '{class}' starts with missing item '{item}'")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Outcome of running every check over a world.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.issues.iter().filter(|issue| issue.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationError> {
        self.issues.iter().filter(|issue| issue.severity() == Severity::Warning)
    }

    /// True when nothing gates the start of play (warnings are allowed).
    pub fn is_playable(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Run every integrity check and collect all issues.
///
/// Checks never short-circuit: a broken exit does not hide a missing NPC, so a
/// single pass reports the full list.
///
/// ```
/// use runewild_data::{LocationDef, WorldDef, validate_world};
///
/// let mut world = WorldDef::default();
/// world.locations.insert(
///     "village_entrance".into(),
///     LocationDef { id: "village_entrance".into(), name: "Gate".into(), ..LocationDef::default() },
/// );
/// assert!(validate_world(&world).is_clean());
/// ```
pub fn validate_world(world: &WorldDef) -> ValidationReport {
    let mut issues = Vec::new();
    issues.extend(check_exits(world));
    issues.extend(check_npcs(world));
    issues.extend(check_items(world));
    issues.extend(check_reachability(world));
    issues.extend(check_dialogue(world));
    issues.extend(check_quest_rewards(world));
    issues.extend(check_starting_items(world));
    ValidationReport { issues }
}

/// Every exit must lead to a location in the catalog.
pub fn check_exits(world: &WorldDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (location_id, location) in &world.locations {
        for (direction, target) in &location.exits {
            if !world.locations.contains_key(target) {
                errors.push(ValidationError::MissingExitTarget {
                    location: location_id.clone(),
                    direction: direction.clone(),
                    target: target.clone(),
                });
            }
        }
    }
    errors
}

/// Every NPC placed in a location must exist in the NPC catalog.
pub fn check_npcs(world: &WorldDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (location_id, location) in &world.locations {
        for npc in &location.npcs {
            if !world.npcs.contains_key(npc) {
                errors.push(ValidationError::MissingNpc {
                    location: location_id.clone(),
                    npc: npc.clone(),
                });
            }
        }
    }
    errors
}

/// Every item lying in a location must exist in the item catalog.
pub fn check_items(world: &WorldDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (location_id, location) in &world.locations {
        for item in &location.items {
            if !world.items.contains_key(item) {
                errors.push(ValidationError::MissingItem {
                    location: location_id.clone(),
                    item: item.clone(),
                });
            }
        }
    }
    errors
}

/// Breadth-first walk over directed exits from the start location; every
/// location not visited is reported.
pub fn check_reachability(world: &WorldDef) -> Vec<ValidationError> {
    if world.locations.is_empty() {
        return Vec::new();
    }
    if !world.locations.contains_key(&world.start_location) {
        return vec![ValidationError::MissingStartLocation {
            start: world.start_location.clone(),
        }];
    }

    let visited = reachable_from(world, &world.start_location);
    world
        .locations
        .keys()
        .filter(|id| !visited.contains(id.as_str()))
        .map(|id| ValidationError::UnreachableLocation { location: id.clone() })
        .collect()
}

/// Location ids reachable from `start`, including `start` itself.
/// Exits to unknown locations are not followed.
pub fn reachable_from<'a>(world: &'a WorldDef, start: &'a str) -> HashSet<&'a str> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let Some(location) = world.locations.get(current) else {
            continue;
        };
        for target in location.exits.values() {
            if world.locations.contains_key(target) && visited.insert(target.as_str()) {
                queue.push_back(target.as_str());
            }
        }
    }
    visited
}

/// Conversation trees must start somewhere, stay closed, and only hand out known quests.
pub fn check_dialogue(world: &WorldDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (npc_id, npc) in &world.npcs {
        if !npc.has_greeting() {
            errors.push(ValidationError::MissingGreeting { npc: npc_id.clone() });
        }
        for (node_id, node) in &npc.dialogue {
            for (index, choice) in node.choices.iter().enumerate() {
                if !npc.dialogue.contains_key(&choice.goes_to) {
                    errors.push(ValidationError::DanglingChoice {
                        npc: npc_id.clone(),
                        node: node_id.clone(),
                        choice: index + 1,
                        target: choice.goes_to.clone(),
                    });
                }
            }
            if let Some(quest) = node.trigger_quest.as_ref().filter(|q| !world.quests.contains_key(*q)) {
                errors.push(ValidationError::MissingQuest {
                    npc: npc_id.clone(),
                    node: node_id.clone(),
                    quest: quest.clone(),
                });
            }
        }
    }
    errors
}

pub fn check_quest_rewards(world: &WorldDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (quest_id, quest) in &world.quests {
        for item in &quest.rewards.items {
            if !world.items.contains_key(item) {
                errors.push(ValidationError::MissingRewardItem {
                    quest: quest_id.clone(),
                    item: item.clone(),
                });
            }
        }
    }
    errors
}

pub fn check_starting_items(world: &WorldDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (class_id, class) in &world.classes {
        for item in &class.starting_items {
            if !world.items.contains_key(item) {
                errors.push(ValidationError::MissingStartingItem {
                    class: class_id.clone(),
                    item: item.clone(),
                });
            }
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn location(id: &str, exits: &[(&str, &str)]) -> LocationDef {
        LocationDef {
            id: id.to_string(),
            name: format!("Location {id}"),
            short_description: "Test location".into(),
            detailed_description: "A test location.".into(),
            exits: exits
                .iter()
                .map(|(dir, to)| ((*dir).to_string(), (*to).to_string()))
                .collect(),
            npcs: Vec::new(),
            items: Vec::new(),
        }
    }

    fn village() -> WorldDef {
        let mut world = WorldDef::default();
        world.locations.insert(
            "village_entrance".into(),
            location("village_entrance", &[("north", "market")]),
        );
        world
            .locations
            .insert("market".into(), location("market", &[("south", "village_entrance")]));
        world
    }

    fn node(text: &str, choices: &[(&str, &str)]) -> DialogueNodeDef {
        DialogueNodeDef {
            text: text.into(),
            trigger_quest: None,
            choices: choices
                .iter()
                .map(|(text, to)| ChoiceDef {
                    text: (*text).into(),
                    goes_to: (*to).into(),
                })
                .collect(),
        }
    }

    #[test]
    fn village_passes_every_check() {
        let report = validate_world(&village());
        assert!(report.is_clean(), "{:?}", report.issues);
        assert!(report.is_playable());
    }

    #[test]
    fn missing_exit_target_is_reported_with_direction() {
        let mut world = village();
        world
            .locations
            .get_mut("market")
            .unwrap()
            .exits
            .insert("east".into(), "docks".into());

        let errors = check_exits(&world);
        assert_eq!(
            errors,
            vec![ValidationError::MissingExitTarget {
                location: "market".into(),
                direction: "east".into(),
                target: "docks".into(),
            }]
        );
        assert!(!validate_world(&world).is_playable());
    }

    #[test]
    fn missing_npc_and_item_are_both_reported() {
        let mut world = village();
        let market = world.locations.get_mut("market").unwrap();
        market.npcs.push("ghost".into());
        market.items.push("phantom_blade".into());

        let report = validate_world(&world);
        assert!(report.issues.contains(&ValidationError::MissingNpc {
            location: "market".into(),
            npc: "ghost".into(),
        }));
        assert!(report.issues.contains(&ValidationError::MissingItem {
            location: "market".into(),
            item: "phantom_blade".into(),
        }));
        assert_eq!(report.errors().count(), 2);
    }

    #[test]
    fn unreachable_locations_are_warnings_only() {
        let mut world = village();
        world.locations.insert("hermit_hut".into(), location("hermit_hut", &[]));
        world.locations.insert("old_well".into(), location("old_well", &[]));

        let report = validate_world(&world);
        let unreachable: Vec<_> = report.warnings().collect();
        assert_eq!(unreachable.len(), 2);
        assert!(report.is_playable());
    }

    #[test]
    fn reachability_follows_directed_edges() {
        let mut world = village();
        // one-way path into the cellar, no way back is fine
        world
            .locations
            .get_mut("market")
            .unwrap()
            .exits
            .insert("down".into(), "cellar".into());
        world.locations.insert("cellar".into(), location("cellar", &[]));
        // the tower points at the market but nothing points at the tower
        world.locations.insert("tower".into(), location("tower", &[("down", "market")]));

        let errors = check_reachability(&world);
        assert_eq!(
            errors,
            vec![ValidationError::UnreachableLocation {
                location: "tower".into()
            }]
        );
    }

    #[test]
    fn broken_exit_does_not_stop_traversal() {
        let mut world = village();
        world
            .locations
            .get_mut("village_entrance")
            .unwrap()
            .exits
            .insert("west".into(), "nowhere".into());
        assert!(check_reachability(&world).is_empty());
        assert_eq!(check_exits(&world).len(), 1);
    }

    #[test]
    fn missing_start_location_is_fatal() {
        let mut world = village();
        world.start_location = "castle".into();
        let report = validate_world(&world);
        assert!(report.issues.contains(&ValidationError::MissingStartLocation {
            start: "castle".into()
        }));
        assert!(!report.is_playable());
    }

    #[test]
    fn dangling_dialogue_choice_is_reported() {
        let mut world = village();
        let mut dialogue = BTreeMap::new();
        dialogue.insert(
            "greeting".to_string(),
            node("Well met.", &[("Who are you?", "about"), ("Bye.", "farewell")]),
        );
        dialogue.insert("about".to_string(), node("I keep the gate.", &[]));
        world.npcs.insert(
            "gatekeeper".into(),
            NpcDef {
                id: "gatekeeper".into(),
                name: "Gatekeeper".into(),
                dialogue,
                ..NpcDef::default()
            },
        );

        let errors = check_dialogue(&world);
        assert_eq!(
            errors,
            vec![ValidationError::DanglingChoice {
                npc: "gatekeeper".into(),
                node: "greeting".into(),
                choice: 2,
                target: "farewell".into(),
            }]
        );
    }

    #[test]
    fn npc_without_any_greeting_is_reported() {
        let mut world = village();
        world.npcs.insert(
            "mute".into(),
            NpcDef {
                id: "mute".into(),
                name: "Mute".into(),
                ..NpcDef::default()
            },
        );
        assert_eq!(
            check_dialogue(&world),
            vec![ValidationError::MissingGreeting { npc: "mute".into() }]
        );
    }

    #[test]
    fn unknown_trigger_quest_is_reported() {
        let mut world = village();
        let mut greeting = node("Find my sword!", &[]);
        greeting.trigger_quest = Some("find_sword".into());
        world.npcs.insert(
            "elder".into(),
            NpcDef {
                id: "elder".into(),
                name: "Elder".into(),
                dialogue: BTreeMap::from([("greeting".to_string(), greeting)]),
                ..NpcDef::default()
            },
        );
        assert!(matches!(
            check_dialogue(&world).as_slice(),
            [ValidationError::MissingQuest { quest, .. }] if quest == "find_sword"
        ));

        world.quests.insert(
            "find_sword".into(),
            QuestDef {
                id: "find_sword".into(),
                name: "Find the Sword".into(),
                ..QuestDef::default()
            },
        );
        assert!(check_dialogue(&world).is_empty());
    }

    #[test]
    fn reward_and_starting_items_must_exist() {
        let mut world = village();
        world.quests.insert(
            "find_sword".into(),
            QuestDef {
                id: "find_sword".into(),
                name: "Find the Sword".into(),
                rewards: RewardsDef {
                    gold: 10,
                    items: vec!["silver_ring".into()],
                },
                ..QuestDef::default()
            },
        );
        world.classes.insert(
            "warrior".into(),
            ClassDef {
                id: "warrior".into(),
                name: "Warrior".into(),
                starting_items: vec!["iron_sword".into()],
                ..ClassDef::default()
            },
        );
        let report = validate_world(&world);
        assert_eq!(report.errors().count(), 2);
        let messages: Vec<String> = report.issues.iter().map(ToString::to_string).collect();
        assert!(messages.contains(&"quest 'find_sword' rewards missing item 'silver_ring'".to_string()));
        assert!(messages.contains(&"class 'warrior' starts with missing item 'iron_sword'".to_string()));
    }
}
