//! `repl::system` module
//!
//! Contains repl loop handlers for commands that are for system utilities.

use std::path::Path;

use crate::repl::ReplControl;
use crate::save_files::write_save;
use crate::view::{HelpCommand, View, ViewItem};
use crate::world::RunewildWorld;

use log::{error, info};

const HELP_COMMANDS: &[HelpCommand] = &[
    HelpCommand {
        command: "look",
        description: "View a detailed description of your surroundings.",
    },
    HelpCommand {
        command: "go <direction>",
        description: "Move in a direction (north, south, east, west...).",
    },
    HelpCommand {
        command: "talk <name>",
        description: "Talk to someone nearby.",
    },
    HelpCommand {
        command: "take <item>",
        description: "Pick up an item.",
    },
    HelpCommand {
        command: "use <item>",
        description: "Use an item you are carrying.",
    },
    HelpCommand {
        command: "inspect <item>",
        description: "Examine an item you carry or can see.",
    },
    HelpCommand {
        command: "inventory",
        description: "List what you are carrying.",
    },
    HelpCommand {
        command: "quests",
        description: "Review your quest log.",
    },
    HelpCommand {
        command: "save",
        description: "Save your progress.",
    },
    HelpCommand {
        command: "help",
        description: "Show this help message.",
    },
    HelpCommand {
        command: "quit",
        description: "Exit the game.",
    },
];

/// Show the command reference.
pub fn help_handler(view: &mut View) {
    view.push(ViewItem::Help(HELP_COMMANDS.to_vec()));
}

/// Write the save file. Failures are reported to the player, not propagated.
pub fn save_handler(world: &RunewildWorld, view: &mut View, save_dir: &Path) {
    match write_save(world, save_dir) {
        Ok(path) => {
            info!("game saved to '{}'", path.display());
            view.push(ViewItem::GameSaved("Game successfully saved.".to_string()));
        },
        Err(err) => {
            error!("failed to save game: {err:#}");
            view.push(ViewItem::Error(format!("Could not save the game: {err:#}")));
        },
    }
}

/// Quit the game.
pub fn quit_handler(world: &RunewildWorld, view: &mut View) -> ReplControl {
    info!("{} quit at {}", world.player.name, world.player.location);
    info!("ending inventory:");
    world.player.inventory.iter().for_each(|id| info!("- {id}"));
    info!("ending quests:");
    world
        .player
        .active_quests
        .iter()
        .for_each(|(id, progress)| info!("* {id} ({})", progress.status.as_str()));

    view.push(ViewItem::EngineMessage(format!(
        "Farewell, {}. Runewild will await your return.",
        world.player.name
    )));
    ReplControl::Quit
}
