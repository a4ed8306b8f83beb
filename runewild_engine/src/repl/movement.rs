//! `repl::movement` module
//!
//! Contains repl loop handlers for commands that change player location

use crate::view::{View, ViewItem};
use crate::world::{RunewildWorld, WorldObject, format_id};

use anyhow::Result;
use log::info;

/// Move the player along the exit named `direction`, if the current location has one.
///
/// An unknown direction changes nothing and tells the player so.
///
/// # Errors
/// - if the player's location or the exit's destination is missing from the world
pub fn go_handler(world: &mut RunewildWorld, view: &mut View, direction: &str) -> Result<()> {
    let destination = world.player_location_ref()?.exit_to(direction).cloned();
    let Some(destination) = destination else {
        info!("{} tried to go {direction}, but there is no exit", world.player.name);
        view.push(ViewItem::ActionFailure("You can't go that way.".to_string()));
        return Ok(());
    };

    // fail before moving if the graph is broken
    let new_location = world.location(&destination)?;
    info!(
        "{} moved to {} ({})",
        world.player.name,
        new_location.name(),
        new_location.id()
    );
    world.player.location = destination;
    push_arrival(world, view)
}

/// Queue the arrival view of the player's current location: name, short description,
/// who is here and where the exits lead.
///
/// # Errors
/// - if the player's location is missing from the world
pub fn push_arrival(world: &RunewildWorld, view: &mut View) -> Result<()> {
    let here = world.player_location_ref()?;
    let npcs = here
        .npcs
        .iter()
        .map(|id| world.npcs.get(id).map_or_else(|| format_id(id), |npc| npc.name.clone()))
        .collect();
    view.push(ViewItem::LocationArrival {
        name: here.name.clone(),
        short_description: here.short_description.clone(),
        npcs,
        exits: here.exits.keys().cloned().collect(),
    });
    Ok(())
}
