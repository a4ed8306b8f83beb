#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const RUNEWILD_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod character;
pub mod command;
pub mod config;
pub mod data_paths;
pub mod dialogue;
pub mod item;
pub mod loader;
pub mod location;
pub mod npc;
pub mod player;
pub mod quest;
pub mod repl;
pub mod save_files;
pub mod stats;
pub mod style;
pub mod view;
pub mod world;

// Re-exports for convenience
pub use config::DisplaySettings;
pub use item::Item;
pub use loader::load_world;
pub use location::{ItemHolder, Location};
pub use npc::Npc;
pub use player::Player;
pub use quest::{Quest, QuestLog, QuestProgress, QuestStatus};
pub use repl::run_repl;
pub use view::{View, ViewItem};
pub use world::{RunewildWorld, WorldError, WorldObject};
