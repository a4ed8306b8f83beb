//! Command module
//!
//! Describes possible commands used during gameplay.
use crate::world::format_id;

/// A multi-word command argument, e.g. `elder rowan`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Words joined with `_`, matching content ids (`elder_rowan`).
    pub id: String,
    /// Words joined with spaces and title-cased (`Elder Rowan`).
    pub display: String,
}

impl Target {
    fn from_words(words: &[&str]) -> Self {
        let id = words.join("_");
        let display = format_id(&id);
        Self { id, display }
    }
}

/// Commands that can be executed by the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(String),
    Help,
    Inspect(Target),
    Inventory,
    Look,
    Quests,
    Quit,
    Save,
    Take(Target),
    Talk(Target),
    /// Unrecognized input, holding the line exactly as typed.
    Unknown(String),
    Use(Target),
}

/// Parses an input line into a `Command`. Verbs and arguments are case-insensitive;
/// anything unrecognized (including a verb missing its argument) is `Unknown`.
pub fn parse_command(input: &str) -> Command {
    let lowered = input.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    match words.as_slice() {
        ["go", direction, ..] => Command::Go((*direction).to_string()),
        ["talk", name @ ..] if !name.is_empty() => Command::Talk(Target::from_words(name)),
        ["take", item @ ..] if !item.is_empty() => Command::Take(Target::from_words(item)),
        ["use", item @ ..] if !item.is_empty() => Command::Use(Target::from_words(item)),
        ["inspect", item @ ..] if !item.is_empty() => Command::Inspect(Target::from_words(item)),
        ["inventory" | "inv" | "i"] => Command::Inventory,
        ["look"] => Command::Look,
        ["quests"] => Command::Quests,
        ["save"] => Command::Save,
        ["help"] => Command::Help,
        ["quit"] => Command::Quit,
        _ => Command::Unknown(input.trim_end_matches(['\r', '\n']).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn go_takes_a_direction() {
        assert_eq!(parse_command("go north"), Command::Go("north".into()));
        assert_eq!(parse_command("  GO   North "), Command::Go("north".into()));
        // words after the direction are ignored
        assert_eq!(parse_command("go north now"), Command::Go("north".into()));
    }

    #[test]
    fn multi_word_targets_join_for_id_and_display() {
        let Command::Talk(target) = parse_command("talk Elder Rowan") else {
            panic!("expected talk");
        };
        assert_eq!(target.id, "elder_rowan");
        assert_eq!(target.display, "Elder Rowan");

        assert_eq!(
            parse_command("take rusty sword"),
            Command::Take(Target {
                id: "rusty_sword".into(),
                display: "Rusty Sword".into(),
            })
        );
        assert!(matches!(parse_command("use healing potion"), Command::Use(_)));
        assert!(matches!(parse_command("inspect bread"), Command::Inspect(_)));
    }

    #[test]
    fn single_word_commands() {
        assert_eq!(parse_command("look"), Command::Look);
        assert_eq!(parse_command("Inventory"), Command::Inventory);
        assert_eq!(parse_command("quests"), Command::Quests);
        assert_eq!(parse_command("save"), Command::Save);
        assert_eq!(parse_command("help"), Command::Help);
        assert_eq!(parse_command("QUIT"), Command::Quit);
    }

    #[test]
    fn verb_without_argument_is_unknown_and_keeps_original_text() {
        assert_eq!(parse_command("Go"), Command::Unknown("Go".into()));
        assert_eq!(parse_command("talk"), Command::Unknown("talk".into()));
        assert_eq!(parse_command("Dance wildly\n"), Command::Unknown("Dance wildly".into()));
        assert_eq!(parse_command(""), Command::Unknown(String::new()));
    }
}
