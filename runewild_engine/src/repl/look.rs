//! `repl::look` module
//!
//! Contains repl loop handlers for commands that examine the surroundings.

use crate::command::Target;
use crate::location::ItemHolder;
use crate::view::{ExitLine, View, ViewItem};
use crate::world::{RunewildWorld, format_id};

use anyhow::Result;
use log::info;

/// Describe the current location in full: description, NPCs, items and exits.
///
/// # Errors
/// - if the player's location is missing from the world
pub fn look_handler(world: &RunewildWorld, view: &mut View) -> Result<()> {
    let here = world.player_location_ref()?;
    info!("{} looked around {}", world.player.name, here.id);
    view.push(ViewItem::LocationDetail {
        description: here.detailed_description.clone(),
        npcs: here
            .npcs
            .iter()
            .map(|id| world.npcs.get(id).map_or_else(|| format_id(id), |npc| npc.name.clone()))
            .collect(),
        items: here.items.iter().map(|id| world.item_display_name(id)).collect(),
        exits: here
            .exits
            .iter()
            .map(|(direction, to)| ExitLine {
                direction: direction.clone(),
                destination: world.location_display_name(to),
            })
            .collect(),
    });
    Ok(())
}

/// Show the details of an item carried by the player or lying nearby.
///
/// # Errors
/// - if the player's location is missing from the world
pub fn inspect_handler(world: &RunewildWorld, view: &mut View, target: &Target) -> Result<()> {
    let present = world.player.contains_item(&target.id) || world.player_location_ref()?.contains_item(&target.id);
    if !present {
        view.push(ViewItem::ActionFailure("You don't see that here.".to_string()));
        return Ok(());
    }
    match world.items.get(&target.id) {
        Some(item) => {
            info!("{} inspected {} ({})", world.player.name, item.name, item.id);
            view.push(ViewItem::ItemDetail {
                name: item.name.clone(),
                description: item.description.clone(),
                item_type: item.item_type.clone(),
                value: item.value,
                weight: item.weight.to_string(),
                rarity: item.rarity.clone(),
            });
        },
        None => view.push(ViewItem::EngineMessage(format!(
            "You see nothing special about the {}.",
            target.display
        ))),
    }
    Ok(())
}
