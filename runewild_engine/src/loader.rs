//! Loader utilities for building a `RunewildWorld` from the content directories.
//!
//! Content is read into a `WorldDef`, validated as a whole, and only then turned
//! into runtime structures.

pub mod catalog;
pub mod worlddef;

use crate::data_paths::data_root;
use crate::loader::worlddef::{build_world_from_def, load_worlddef};
use crate::view::{View, ViewItem};
use crate::world::RunewildWorld;

use anyhow::{Context, Result, bail};
use log::{error, info, warn};
use runewild_data::{Severity, WorldDef, validate_world};
use std::path::Path;

/// Load the `RunewildWorld` from the detected data directory.
///
/// # Errors
/// Errors bubble up from a missing data directory or failed validation.
pub fn load_world(view: &mut View) -> Result<RunewildWorld> {
    load_world_from(data_root(), view)
}

/// Load, validate and build the world from the content directories under `root`.
/// Every validation issue is logged and shown in `view`.
///
/// # Errors
/// - if `root` is not a directory
/// - if validation reports any error (warnings are allowed)
pub fn load_world_from(root: &Path, view: &mut View) -> Result<RunewildWorld> {
    let worlddef = load_worlddef(root).context("while loading world content")?;
    validate_worlddef(&worlddef, view)?;
    let world = build_world_from_def(&worlddef);
    info!("{} locations added to RunewildWorld", world.locations.len());
    info!("{} NPCs added to RunewildWorld", world.npcs.len());
    info!("{} items added to RunewildWorld", world.items.len());
    info!("{} quests added to RunewildWorld", world.quests.len());
    info!(
        "{} races, {} classes, {} backgrounds available",
        world.races.len(),
        world.classes.len(),
        world.backgrounds.len()
    );
    Ok(world)
}

/// Validate the loaded `WorldDef`, reporting every issue, and return a single
/// aggregated error if any issue blocks play.
///
/// # Errors
/// - if any issue has `Severity::Error`
pub fn validate_worlddef(def: &WorldDef, view: &mut View) -> Result<()> {
    let report = validate_world(def);
    for issue in &report.issues {
        let fatal = issue.severity() == Severity::Error;
        if fatal {
            error!("world validation: {issue}");
        } else {
            warn!("world validation: {issue}");
        }
        view.push(ViewItem::ValidationIssue {
            message: issue.to_string(),
            fatal,
        });
    }
    if report.is_playable() {
        return Ok(());
    }
    let details = report
        .errors()
        .map(|err| format!("- {err}"))
        .collect::<Vec<_>>()
        .join("\n");
    bail!("world validation failed:\n{details}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplaySettings;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, text: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    #[test]
    fn loads_and_builds_village() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path();
        write(
            root,
            "locations/village/village_entrance.yaml",
            "name: Village Entrance\nshort_description: A gate.\nexits:\n  north: market\nnpcs: [guard]\n",
        );
        write(
            root,
            "locations/village/market.yaml",
            "name: Market\nexits:\n  south: village_entrance\nitems: [bread]\n",
        );
        write(root, "npcs/guard.yaml", "name: Guard\ngreeting_message: Halt!\n");
        write(root, "items/bread.yaml", "name: Bread\ntype: consumable\n");

        let mut view = View::buffered(DisplaySettings::default());
        let world = load_world_from(root, &mut view)?;
        assert!(view.items.is_empty());
        assert_eq!(world.locations.len(), 2);
        assert_eq!(world.player.location, "village_entrance");
        assert!(world.location("village_entrance")?.has_npc("guard"));
        assert_eq!(world.npc("guard")?.dialogue.nodes.len(), 1);
        Ok(())
    }

    #[test]
    fn broken_references_refuse_to_load_and_are_all_shown() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write(
            root,
            "locations/village_entrance.yaml",
            "name: Gate\nexits:\n  east: docks\nnpcs: [ghost]\n",
        );
        write(root, "locations/hut.yaml", "name: Hut\n");

        let mut view = View::buffered(DisplaySettings::default());
        let err = load_world_from(root, &mut view).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("docks"));
        assert!(message.contains("ghost"));
        assert_eq!(view.items.len(), 3);
        assert!(
            view.items
                .iter()
                .any(|item| matches!(item, ViewItem::ValidationIssue { fatal: false, .. }))
        );
    }

    #[test]
    fn missing_data_root_is_an_error() {
        let mut view = View::buffered(DisplaySettings::default());
        assert!(load_world_from(Path::new("/no/such/runewild/data"), &mut view).is_err());
    }
}
