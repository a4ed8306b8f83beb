//! Per-entity YAML catalogs.
//!
//! Each content directory holds one YAML file per entity, possibly nested in
//! subdirectories (e.g. `locations/starting_locations/runewild_village/market.yaml`).
//! The file stem is the entity id.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use runewild_data::{BackgroundDef, ClassDef, Id, ItemDef, LocationDef, NpcDef, QuestDef, RaceDef};
use serde::de::DeserializeOwned;
use walkdir::WalkDir;

/// Definitions whose id comes from their file name.
pub trait CatalogEntry: DeserializeOwned {
    const KIND: &'static str;
    fn set_id(&mut self, id: Id);
}

macro_rules! catalog_entry {
    ($($def:ty => $kind:literal),* $(,)?) => {
        $(
            impl CatalogEntry for $def {
                const KIND: &'static str = $kind;
                fn set_id(&mut self, id: Id) {
                    self.id = id;
                }
            }
        )*
    };
}

catalog_entry! {
    LocationDef => "location",
    NpcDef => "npc",
    ItemDef => "item",
    QuestDef => "quest",
    RaceDef => "race",
    ClassDef => "class",
    BackgroundDef => "background",
}

/// Load every `*.yaml`/`*.yml` file below `dir` into a catalog keyed by file stem.
///
/// Empty or unparseable files are skipped with a warning, as is a missing directory.
pub fn load_catalog<T: CatalogEntry>(dir: &Path) -> BTreeMap<Id, T> {
    let mut catalog = BTreeMap::new();
    if !dir.is_dir() {
        warn!("{} directory '{}' not found; no {}s loaded", T::KIND, dir.display(), T::KIND);
        return catalog;
    }

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry under '{}': {err}", dir.display());
                continue;
            },
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !is_yaml(path) {
            continue;
        }
        let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
            warn!("skipping {} file with non-UTF-8 name: '{}'", T::KIND, path.display());
            continue;
        };

        match parse_entry::<T>(path) {
            Ok(Some(mut def)) => {
                def.set_id(id.to_string());
                if catalog.insert(id.to_string(), def).is_some() {
                    warn!("duplicate {} id '{id}' at '{}' replaces an earlier file", T::KIND, path.display());
                }
            },
            Ok(None) => warn!("{} file '{}' is empty; skipped", T::KIND, path.display()),
            Err(err) => warn!("skipping {} file: {err:#}", T::KIND),
        }
    }

    info!("{} {}(s) loaded from '{}'", catalog.len(), T::KIND, dir.display());
    catalog
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// Parse one content file. `Ok(None)` for a file with no document in it.
fn parse_entry<T: CatalogEntry>(path: &Path) -> Result<Option<T>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {} from '{}'", T::KIND, path.display()))?;
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_yaml::from_str::<Option<T>>(&text).with_context(|| format!("parsing {} YAML from '{}'", T::KIND, path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn nested_files_are_keyed_by_stem() -> Result<()> {
        let dir = tempdir()?;
        let nested = dir.path().join("starting_locations/runewild_village");
        fs::create_dir_all(&nested)?;
        fs::write(
            nested.join("market.yaml"),
            "name: Market Square\nshort_description: Busy.\nexits:\n  south: village_entrance\nnpcs:\nitems: [bread]\n",
        )?;
        fs::write(nested.join("notes.txt"), "not content")?;

        let catalog: BTreeMap<Id, LocationDef> = load_catalog(dir.path());
        assert_eq!(catalog.len(), 1);
        let market = &catalog["market"];
        assert_eq!(market.id, "market");
        assert_eq!(market.exits["south"], "village_entrance");
        assert!(market.npcs.is_empty());
        assert_eq!(market.items, vec!["bread".to_string()]);
        Ok(())
    }

    #[test]
    fn empty_and_broken_files_are_skipped() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("empty.yaml"), "   \n")?;
        fs::write(dir.path().join("comment.yaml"), "# nothing yet\n")?;
        fs::write(dir.path().join("broken.yaml"), "name: [unclosed\n")?;
        fs::write(dir.path().join("bread.yml"), "name: Bread\ntype: consumable\nvalue: 2\n")?;

        let catalog: BTreeMap<Id, ItemDef> = load_catalog(dir.path());
        assert_eq!(catalog.keys().collect::<Vec<_>>(), vec!["bread"]);
        assert_eq!(catalog["bread"].item_type, "consumable");
        Ok(())
    }

    #[test]
    fn missing_directory_is_an_empty_catalog() {
        let catalog: BTreeMap<Id, NpcDef> = load_catalog(Path::new("/definitely/not/here"));
        assert!(catalog.is_empty());
    }
}
