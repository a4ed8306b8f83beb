//! REPL and command handling utilities.
//!
//! The game runs in a read-eval-print loop. This module and its submodules
//! implement the various command handlers that manipulate the [`RunewildWorld`].

pub mod input;
pub mod inventory;
pub mod look;
pub mod movement;
pub mod npc;
pub mod quests;
pub mod system;

pub use inventory::*;
pub use look::*;
pub use movement::*;
pub use npc::*;
pub use quests::*;
pub use system::*;

use crate::command::{Command, parse_command};
use crate::view::{View, ViewItem};
use crate::world::RunewildWorld;

use anyhow::Result;
use log::{info, warn};
use std::path::Path;

use input::{InputEvent, LineReader};

/// Control flow signal used by handlers to exit the REPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplControl {
    Continue,
    Quit,
}

/// Run the main read–eval–print loop until the user quits or input ends.
///
/// # Errors
/// - Propagates failures from handlers, such as a missing location for the player.
pub fn run_repl(world: &mut RunewildWorld, view: &mut View, input: &mut dyn LineReader, save_dir: &Path) -> Result<()> {
    let mut turn: u64 = 0;
    loop {
        let prompt = view.prompt("> ");
        let line = match input.read_line(&prompt) {
            Ok(InputEvent::Line(line)) => line,
            Ok(InputEvent::Eof) => "quit".to_string(),
            Ok(InputEvent::Interrupted) => {
                view.push(ViewItem::EngineMessage("Command canceled.".to_string()));
                view.flush();
                continue;
            },
            Err(err) => {
                warn!("failed to read input: {err}");
                view.push(ViewItem::Error("Failed to read input. Try again.".to_string()));
                view.flush();
                continue;
            },
        };

        turn += 1;
        info!("================> TURN {turn}: \"{}\" <================", line.trim());
        let control = process_line(world, view, input, save_dir, &line)?;
        view.flush();
        if control == ReplControl::Quit {
            break;
        }
    }
    Ok(())
}

/// Parse one line of input and dispatch it to its handler.
///
/// # Errors
/// - Propagates handler failures (broken world references, input I/O errors).
pub fn process_line(
    world: &mut RunewildWorld,
    view: &mut View,
    input: &mut dyn LineReader,
    save_dir: &Path,
    line: &str,
) -> Result<ReplControl> {
    #[allow(clippy::enum_glob_use)]
    use Command::*;

    if line.trim().is_empty() {
        return Ok(ReplControl::Continue);
    }

    match parse_command(line) {
        Go(direction) => go_handler(world, view, &direction)?,
        Talk(target) => talk_handler(world, view, input, &target)?,
        Take(target) => take_handler(world, view, &target)?,
        Use(target) => use_handler(world, view, &target),
        Inspect(target) => inspect_handler(world, view, &target)?,
        Inventory => inv_handler(world, view),
        Look => look_handler(world, view)?,
        Quests => quests_handler(world, view, input)?,
        Save => save_handler(world, view, save_dir),
        Help => help_handler(view),
        Quit => return Ok(quit_handler(world, view)),
        Unknown(text) => view.push(ViewItem::Echo(text)),
    }
    Ok(ReplControl::Continue)
}
