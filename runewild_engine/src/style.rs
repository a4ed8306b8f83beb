//! Styling helpers for terminal output.
//!
//! [`GameStyle`] names each kind of game text once (items, NPCs, speech, quests...)
//! so the view never picks raw colors. It is implemented for anything that can be
//! viewed as a `str`. Whether the styling survives to the terminal is decided by
//! the `View`.

use colored::{ColoredString, Colorize};

type Rgb = (u8, u8, u8);

const GOLD: Rgb = (220, 180, 40);
const AMBER: Rgb = (230, 200, 60);
const TEAL: Rgb = (60, 200, 220);
const LEAF: Rgb = (110, 220, 110);
const MOSS: Rgb = (90, 200, 90);
const SKY: Rgb = (102, 208, 250);
const RUNE: Rgb = (220, 40, 220);
const EMBER: Rgb = (230, 30, 30);

fn rgb(text: &str, (r, g, b): Rgb) -> ColoredString {
    text.truecolor(r, g, b)
}

/// Semantic styles for game text.
pub trait GameStyle {
    fn item_style(&self) -> ColoredString;
    fn npc_style(&self) -> ColoredString;
    fn location_style(&self) -> ColoredString;
    fn location_titlebar_style(&self) -> ColoredString;
    fn description_style(&self) -> ColoredString;
    fn detail_style(&self) -> ColoredString;
    fn exit_style(&self) -> ColoredString;
    fn speech_style(&self) -> ColoredString;
    fn choice_style(&self) -> ColoredString;
    fn quest_active_style(&self) -> ColoredString;
    fn quest_complete_style(&self) -> ColoredString;
    fn success_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
    fn subheading_style(&self) -> ColoredString;
    fn prompt_style(&self) -> ColoredString;
    fn title_style(&self) -> ColoredString;
}

impl<T: AsRef<str> + ?Sized> GameStyle for T {
    fn item_style(&self) -> ColoredString {
        rgb(self.as_ref(), GOLD)
    }
    fn npc_style(&self) -> ColoredString {
        rgb(self.as_ref(), AMBER).bold()
    }
    fn location_style(&self) -> ColoredString {
        rgb(self.as_ref(), TEAL)
    }
    fn location_titlebar_style(&self) -> ColoredString {
        rgb(self.as_ref(), TEAL).bold()
    }
    fn description_style(&self) -> ColoredString {
        self.as_ref().normal()
    }
    fn detail_style(&self) -> ColoredString {
        self.as_ref().bright_white()
    }
    fn exit_style(&self) -> ColoredString {
        rgb(self.as_ref(), LEAF).italic()
    }
    fn speech_style(&self) -> ColoredString {
        rgb(self.as_ref(), MOSS)
    }
    fn choice_style(&self) -> ColoredString {
        rgb(self.as_ref(), SKY)
    }
    fn quest_active_style(&self) -> ColoredString {
        rgb(self.as_ref(), RUNE)
    }
    fn quest_complete_style(&self) -> ColoredString {
        rgb(self.as_ref(), LEAF).strikethrough()
    }
    fn success_style(&self) -> ColoredString {
        self.as_ref().green()
    }
    fn error_style(&self) -> ColoredString {
        rgb(self.as_ref(), EMBER)
    }
    fn subheading_style(&self) -> ColoredString {
        self.as_ref().underline()
    }
    fn prompt_style(&self) -> ColoredString {
        self.as_ref().white().bold()
    }
    fn title_style(&self) -> ColoredString {
        self.as_ref().cyan()
    }
}
