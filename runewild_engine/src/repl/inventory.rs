//! `repl::inventory` module
//!
//! Contains repl loop handlers for commands that move items between the player
//! and the location they are in.

use crate::command::Target;
use crate::location::ItemHolder;
use crate::view::{View, ViewItem};
use crate::world::RunewildWorld;

use anyhow::Result;
use log::info;

/// Pick up an item lying in the current location.
///
/// # Errors
/// - if the player's location is missing from the world
pub fn take_handler(world: &mut RunewildWorld, view: &mut View, target: &Target) -> Result<()> {
    if !world.player_location_mut()?.remove_item(&target.id) {
        view.push(ViewItem::ActionFailure(format!("There is no {} here.", target.display)));
        return Ok(());
    }
    world.player.add_item(target.id.clone());
    let name = world.item_display_name(&target.id);
    info!("{} took {name} ({}) from {}", world.player.name, target.id, world.player.location);
    view.push(ViewItem::ActionSuccess(format!("You take the {name}.")));
    Ok(())
}

/// Use up an item from the inventory. Items have no effects yet.
pub fn use_handler(world: &mut RunewildWorld, view: &mut View, target: &Target) {
    if !world.player.remove_item(&target.id) {
        view.push(ViewItem::ActionFailure("You don't have that item.".to_string()));
        return;
    }
    let name = world.item_display_name(&target.id);
    info!("{} used {name} ({})", world.player.name, target.id);
    view.push(ViewItem::ActionSuccess(format!("You use the {name}.")));
}

/// Show everything the player is carrying.
pub fn inv_handler(world: &RunewildWorld, view: &mut View) {
    let names = world
        .player
        .inventory
        .iter()
        .map(|id| world.item_display_name(id))
        .collect();
    view.push(ViewItem::Inventory(names));
}
