use std::env;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Environment variable that overrides data directory detection.
pub const DATA_DIR_ENV: &str = "RUNEWILD_DATA_DIR";

/// Data directory names tried under each search base, most specific first.
const DATA_DIRS: [&str; 2] = ["runewild_engine/data", "data"];

/// Cached path to the directory containing the game's content files.
static DATA_ROOT: LazyLock<PathBuf> = LazyLock::new(detect_data_root);

/// Construct a data path relative to the resolved data root.
pub fn data_path(relative: impl AsRef<Path>) -> PathBuf {
    DATA_ROOT.join(relative)
}

pub fn data_root() -> &'static Path {
    DATA_ROOT.as_path()
}

fn detect_data_root() -> PathBuf {
    if let Some(dir) = env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    // working directory, then next to the binary and one level up (target/<profile>)
    let mut bases = vec![PathBuf::new()];
    if let Ok(exe) = env::current_exe()
        && let Some(dir) = exe.parent()
    {
        bases.extend(dir.parent().map(Path::to_path_buf));
        bases.insert(1, dir.to_path_buf());
    }
    first_data_dir(&bases).unwrap_or_else(|| PathBuf::from(DATA_DIRS[0]))
}

/// The first `<base>/<data dir>` that exists.
fn first_data_dir(bases: &[PathBuf]) -> Option<PathBuf> {
    bases
        .iter()
        .flat_map(|base| DATA_DIRS.iter().map(move |dir| base.join(dir)))
        .find(|candidate| candidate.is_dir())
}
