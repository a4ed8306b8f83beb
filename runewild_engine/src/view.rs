//! View module.
//! This contains the view to the game world / messages.
//! Rather than printing to the console from each handler, handlers push [`ViewItem`]s
//! and the view renders them in order when flushed. Display settings (colors,
//! wrap width) are applied here and nowhere else.
use std::fmt::Write;
use std::io::{self, Write as IoWrite};

use colored::{ColoredString, Colorize};
use log::warn;
use textwrap::fill;
use variantly::Variantly;

use crate::config::DisplaySettings;
use crate::style::GameStyle;

const ICON_COMPLETE: &str = "\u{2714}"; // ✔
const ICON_PENDING: &str = " ";
const ICON_ERROR: &str = "\u{26A0}"; // ⚠
const ICON_QUEST: &str = "\u{2691}"; // ⚑

/// One line of an exit listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitLine {
    pub direction: String,
    pub destination: String,
}

/// One row of the player's quest log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestLine {
    pub name: String,
    pub status: String,
}

/// One entry of the help listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpCommand {
    pub command: &'static str,
    pub description: &'static str,
}

/// A numbered character-creation option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionLine {
    pub name: String,
    pub description: String,
    pub detail: Option<String>,
}

/// `ViewItems` are each of the various types of information / messages that may be displayed to the player.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum ViewItem {
    ActionFailure(String),
    ActionSuccess(String),
    CharacterSheet {
        name: String,
        race: String,
        class: String,
        background: String,
        primaries: Vec<(String, i32)>,
        secondaries: Vec<(String, i32)>,
    },
    ChoiceList {
        heading: String,
        options: Vec<OptionLine>,
    },
    DialogueChoices(Vec<String>),
    /// Unrecognized input, repeated back as typed.
    Echo(String),
    EngineMessage(String),
    Error(String),
    GameSaved(String),
    Help(Vec<HelpCommand>),
    Inventory(Vec<String>),
    ItemDetail {
        name: String,
        description: String,
        item_type: String,
        value: u32,
        weight: String,
        rarity: String,
    },
    LocationArrival {
        name: String,
        short_description: String,
        npcs: Vec<String>,
        exits: Vec<String>,
    },
    LocationDetail {
        description: String,
        npcs: Vec<String>,
        items: Vec<String>,
        exits: Vec<ExitLine>,
    },
    NpcSpeech {
        name: String,
        text: String,
    },
    QuestAccepted(String),
    QuestDetail {
        name: String,
        description: String,
        objectives: Vec<(String, bool)>,
        reward_gold: u32,
        reward_items: Vec<String>,
    },
    QuestList(Vec<QuestLine>),
    Title(String),
    ValidationIssue {
        message: String,
        fatal: bool,
    },
}

#[derive(Debug, Clone)]
enum Sink {
    Stdout,
    Buffer(String),
}

/// View aggregates information to be displayed on each pass through the REPL and then
/// renders and displays the result.
#[derive(Debug, Clone)]
pub struct View {
    pub settings: DisplaySettings,
    pub items: Vec<ViewItem>,
    sink: Sink,
}

impl Default for View {
    fn default() -> Self {
        Self::new(DisplaySettings::default())
    }
}

impl View {
    /// Create a view that prints to stdout.
    pub fn new(settings: DisplaySettings) -> Self {
        Self {
            settings,
            items: Vec::new(),
            sink: Sink::Stdout,
        }
    }

    /// Create a view that collects rendered output in memory (see [`View::take_output`]).
    pub fn buffered(settings: DisplaySettings) -> Self {
        Self {
            settings,
            items: Vec::new(),
            sink: Sink::Buffer(String::new()),
        }
    }

    pub fn push(&mut self, item: ViewItem) {
        self.items.push(item);
    }

    /// Render and display everything pushed since the last flush.
    pub fn flush(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let rendered = self.render();
        self.items.clear();
        match &mut self.sink {
            Sink::Stdout => {
                let mut stdout = io::stdout().lock();
                if let Err(err) = writeln!(stdout, "{rendered}").and_then(|()| stdout.flush()) {
                    warn!("failed to write to stdout: {err}");
                }
            },
            Sink::Buffer(buffer) => {
                buffer.push_str(&rendered);
                buffer.push('\n');
            },
        }
    }

    /// Drain the buffered output. Always empty for a stdout view.
    pub fn take_output(&mut self) -> String {
        match &mut self.sink {
            Sink::Stdout => String::new(),
            Sink::Buffer(buffer) => std::mem::take(buffer),
        }
    }

    /// Styled prompt string, honoring the color setting.
    pub fn prompt(&self, text: &str) -> String {
        self.paint(text.prompt_style())
    }

    /// Compose the pending items into display text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for item in &self.items {
            self.render_item(&mut out, item);
        }
        out
    }

    fn paint(&self, styled: ColoredString) -> String {
        if self.settings.colors_enabled {
            styled.to_string()
        } else {
            styled.clear().to_string()
        }
    }

    fn wrap(&self, text: &str) -> String {
        if self.settings.text_width == 0 || text.is_empty() {
            text.to_string()
        } else {
            fill(text, self.settings.text_width)
        }
    }

    #[allow(clippy::too_many_lines)]
    fn render_item(&self, out: &mut String, item: &ViewItem) {
        match item {
            ViewItem::Title(art) => {
                let _ = writeln!(out, "{}\n", self.paint(art.as_str().title_style()));
            },
            ViewItem::LocationArrival {
                name,
                short_description,
                npcs,
                exits,
            } => {
                let _ = writeln!(out, "{}", self.paint(name.location_titlebar_style()));
                let _ = writeln!(out, "{}", self.paint(self.wrap(short_description).description_style()));
                if !npcs.is_empty() {
                    let names: Vec<String> = npcs.iter().map(|n| self.paint(n.npc_style())).collect();
                    let _ = writeln!(out, "You see: {}", names.join(", "));
                }
                if !exits.is_empty() {
                    let dirs: Vec<String> = exits.iter().map(|e| self.paint(e.exit_style())).collect();
                    let _ = writeln!(out, "Exits: {}", dirs.join(", "));
                }
            },
            ViewItem::LocationDetail {
                description,
                npcs,
                items,
                exits,
            } => {
                let _ = writeln!(out, "{}", self.paint(self.wrap(description).detail_style()));
                if !npcs.is_empty() {
                    let names: Vec<String> = npcs.iter().map(|n| self.paint(n.npc_style())).collect();
                    let _ = writeln!(out, "\nPeople here: {}", names.join(", "));
                }
                if !items.is_empty() {
                    let names: Vec<String> = items.iter().map(|i| self.paint(i.item_style())).collect();
                    let _ = writeln!(out, "\nItems here: {}", names.join(", "));
                }
                if !exits.is_empty() {
                    let _ = writeln!(out, "\n{}", self.paint("Exits:".subheading_style()));
                    for exit in exits {
                        let _ = writeln!(
                            out,
                            "  {} \u{2192} {}",
                            self.paint(exit.direction.exit_style()),
                            self.paint(exit.destination.location_style())
                        );
                    }
                }
            },
            ViewItem::Inventory(names) => {
                if names.is_empty() {
                    let _ = writeln!(out, "Your inventory is empty.");
                } else {
                    let _ = writeln!(out, "You are carrying {} item{}:", names.len(), plural_s(names.len()));
                    for name in names {
                        let _ = writeln!(out, "  - {}", self.paint(name.item_style()));
                    }
                }
            },
            ViewItem::ItemDetail {
                name,
                description,
                item_type,
                value,
                weight,
                rarity,
            } => {
                let _ = writeln!(out, "{}", self.paint(name.item_style().bold()));
                if !description.is_empty() {
                    let _ = writeln!(out, "{}", self.paint(self.wrap(description).description_style()));
                }
                let _ = writeln!(out, "Type: {item_type}");
                let _ = writeln!(out, "Value: {value} gold");
                let _ = writeln!(out, "Weight: {weight}");
                let _ = writeln!(out, "Rarity: {rarity}");
            },
            ViewItem::NpcSpeech { name, text } => {
                let _ = writeln!(out, "{}", self.paint(name.npc_style()));
                let _ = writeln!(out, "{}", self.paint(self.wrap(text).speech_style()));
            },
            ViewItem::DialogueChoices(choices) => {
                for (index, choice) in choices.iter().enumerate() {
                    let _ = writeln!(out, "  {}. {}", index + 1, self.paint(choice.choice_style()));
                }
            },
            ViewItem::QuestAccepted(name) => {
                let line = format!("{ICON_QUEST} Quest accepted: {name}");
                let _ = writeln!(out, "{}", self.paint(line.quest_active_style()));
            },
            ViewItem::QuestList(quests) => {
                let _ = writeln!(out, "{}", self.paint("Active Quests:".subheading_style()));
                for (index, quest) in quests.iter().enumerate() {
                    let _ = writeln!(
                        out,
                        "  {}. {} [{}]",
                        index + 1,
                        self.paint(quest.name.quest_active_style()),
                        quest.status
                    );
                }
            },
            ViewItem::QuestDetail {
                name,
                description,
                objectives,
                reward_gold,
                reward_items,
            } => {
                let _ = writeln!(out, "{}", self.paint(name.quest_active_style().bold()));
                if !description.is_empty() {
                    let _ = writeln!(out, "{}", self.paint(self.wrap(description).description_style()));
                }
                if !objectives.is_empty() {
                    let _ = writeln!(out, "\n{}", self.paint("Objectives:".subheading_style()));
                    for (text, completed) in objectives {
                        if *completed {
                            let line = format!("  [{ICON_COMPLETE}] {text}");
                            let _ = writeln!(out, "{}", self.paint(line.quest_complete_style()));
                        } else {
                            let _ = writeln!(out, "  [{ICON_PENDING}] {text}");
                        }
                    }
                }
                let _ = writeln!(out, "\n{}", self.paint("Rewards:".subheading_style()));
                let _ = writeln!(out, "  Gold: {reward_gold}");
                if !reward_items.is_empty() {
                    let names: Vec<String> = reward_items.iter().map(|i| self.paint(i.item_style())).collect();
                    let _ = writeln!(out, "  Items: {}", names.join(", "));
                }
            },
            ViewItem::ChoiceList { heading, options } => {
                let _ = writeln!(out, "{}", self.paint(heading.subheading_style()));
                for (index, option) in options.iter().enumerate() {
                    let _ = writeln!(out, "  {}. {}", index + 1, self.paint(option.name.item_style()));
                    if !option.description.is_empty() {
                        let _ = writeln!(out, "     {}", option.description);
                    }
                    if let Some(detail) = &option.detail {
                        let _ = writeln!(out, "     {detail}");
                    }
                }
            },
            ViewItem::CharacterSheet {
                name,
                race,
                class,
                background,
                primaries,
                secondaries,
            } => {
                let _ = writeln!(out, "{}", self.paint(name.location_titlebar_style()));
                let _ = writeln!(out, "{race} {class} ({background})");
                let _ = writeln!(out, "\n{}", self.paint("Attributes:".subheading_style()));
                for (label, value) in primaries {
                    let _ = writeln!(out, "  {label:<14}{value:>4}");
                }
                let _ = writeln!(out, "\n{}", self.paint("Derived:".subheading_style()));
                for (label, value) in secondaries {
                    let _ = writeln!(out, "  {label:<14}{value:>4}");
                }
            },
            ViewItem::Help(commands) => {
                let _ = writeln!(out, "{}", self.paint("Available Commands:".subheading_style()));
                for cmd in commands {
                    let _ = writeln!(out, "  {:<18} - {}", cmd.command, cmd.description);
                }
            },
            ViewItem::GameSaved(message) | ViewItem::ActionSuccess(message) => {
                let _ = writeln!(out, "{}", self.paint(self.wrap(message).success_style()));
            },
            ViewItem::ActionFailure(message) => {
                let _ = writeln!(out, "{}", self.paint(self.wrap(message).error_style()));
            },
            ViewItem::Error(message) => {
                let line = format!("{ICON_ERROR} {message}");
                let _ = writeln!(out, "{}", self.paint(self.wrap(&line).error_style()));
            },
            ViewItem::ValidationIssue { message, fatal } => {
                let line = if *fatal {
                    format!("ERROR: {message}")
                } else {
                    format!("WARNING: {message}")
                };
                let _ = writeln!(out, "{}", self.paint(line.error_style()));
            },
            ViewItem::Echo(text) | ViewItem::EngineMessage(text) => {
                let _ = writeln!(out, "{}", self.wrap(text));
            },
        }
    }
}

/// "s" for any count other than one.
pub fn plural_s(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_view() -> View {
        View::buffered(DisplaySettings {
            colors_enabled: false,
            text_width: 0,
        })
    }

    fn rendered(item: ViewItem) -> String {
        let mut view = plain_view();
        view.push(item);
        view.flush();
        view.take_output()
    }

    #[test]
    fn inventory_pluralization() {
        assert!(rendered(ViewItem::Inventory(vec![])).contains("Your inventory is empty."));
        assert!(rendered(ViewItem::Inventory(vec!["Bread".into()])).contains("You are carrying 1 item:"));
        assert!(
            rendered(ViewItem::Inventory(vec!["Bread".into(), "Bread".into()])).contains("You are carrying 2 items:")
        );
    }

    #[test]
    fn quest_detail_marks_completed_objectives() {
        let text = rendered(ViewItem::QuestDetail {
            name: "Find the Sword".into(),
            description: "The elder lost a blade.".into(),
            objectives: vec![("Search the market".into(), true), ("Return it".into(), false)],
            reward_gold: 50,
            reward_items: vec!["Silver Ring".into()],
        });
        assert!(text.contains("[\u{2714}] Search the market"));
        assert!(text.contains("[ ] Return it"));
        assert!(text.contains("Gold: 50"));
        assert!(text.contains("Items: Silver Ring"));
    }

    #[test]
    fn wrapping_honors_text_width() {
        let mut view = View::buffered(DisplaySettings {
            colors_enabled: false,
            text_width: 10,
        });
        view.push(ViewItem::EngineMessage("one two three four five".into()));
        view.flush();
        let text = view.take_output();
        assert!(text.lines().all(|line| line.len() <= 10), "{text}");
        assert!(text.lines().count() > 1);
    }

    #[test]
    fn disabled_colors_emit_no_escape_codes() {
        let text = rendered(ViewItem::ActionFailure("You can't go that way.".into()));
        assert!(!text.contains('\u{1b}'));
        assert!(text.contains("You can't go that way."));
    }

    #[test]
    fn flush_clears_pending_items() {
        let mut view = plain_view();
        view.push(ViewItem::Echo("dance".into()));
        view.flush();
        assert!(view.items.is_empty());
        assert_eq!(view.take_output(), "dance\n\n");
        assert_eq!(view.take_output(), "");
    }
}
