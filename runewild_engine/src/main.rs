#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Runewild **
//! A text adventure in the village of Runewild

use runewild_engine::character::{CreationAborted, create_character};
use runewild_engine::config::{SETTINGS_FILE, load_settings};
use runewild_engine::data_paths::data_path;
use runewild_engine::repl::input::InputManager;
use runewild_engine::repl::push_arrival;
use runewild_engine::save_files::{SAVE_DIR, SAVE_VERSION, read_save};
use runewild_engine::{View, ViewItem, load_world, run_repl};

use anyhow::{Context, Result};
use log::{info, warn};

use std::fs;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();
    let settings = load_settings(&data_path(SETTINGS_FILE)).context("while loading display settings")?;
    let mut view = View::new(settings);

    info!("Start: loading Runewild world...");
    let mut world = match load_world(&mut view) {
        Ok(world) => world,
        Err(err) => {
            view.push(ViewItem::Error("Validation failed.".to_string()));
            view.flush();
            return Err(err.context("while loading RunewildWorld"));
        },
    };
    view.flush();
    info!("RunewildWorld loaded successfully.");

    let save_dir = Path::new(SAVE_DIR);
    let mut input = InputManager::new();
    let needs_character = match read_save(save_dir).context("while reading save file")? {
        Some(save) => {
            save.restore_into(&mut world).context("while restoring saved game")?;
            if !save.is_current_version() {
                view.push(ViewItem::Error(format!(
                    "This save was made with version {} (current: {SAVE_VERSION}); some progress may be missing.",
                    save.version
                )));
            }
            view.push(ViewItem::ActionSuccess("Game loaded successfully.".to_string()));
            save.character.is_none()
        },
        None => {
            view.push(ViewItem::EngineMessage("Starting new game.".to_string()));
            true
        },
    };

    if needs_character {
        match create_character(&mut world, &mut view, &mut input) {
            Ok(()) => {},
            Err(err) if err.is::<CreationAborted>() => {
                info!("input ended during character creation; exiting");
                view.flush();
                return Ok(());
            },
            Err(err) => return Err(err.context("while creating character")),
        }
    }

    match fs::read_to_string(data_path("title.txt")) {
        Ok(title) => view.push(ViewItem::Title(title)),
        Err(err) => warn!("could not read title art: {err}"),
    }
    push_arrival(&world, &mut view)?;
    view.flush();

    info!("Starting the game!");
    run_repl(&mut world, &mut view, &mut input, save_dir)
}
