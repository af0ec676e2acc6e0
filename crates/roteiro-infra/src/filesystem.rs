//! Data directory layout.

use std::path::{Path, PathBuf};

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "ROTEIRO_DATA_DIR";

/// Resolve the data directory.
///
/// Priority:
/// 1. An explicit `--data-dir` argument
/// 2. `ROTEIRO_DATA_DIR` environment variable
/// 3. `~/.roteiro`
/// 4. `./.roteiro` when no home directory is known
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }

    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".roteiro");
    }

    PathBuf::from(".roteiro")
}

/// Create the data directory if it does not exist yet.
pub async fn ensure_data_dir(dir: &Path) -> Result<(), std::io::Error> {
    tokio::fs::create_dir_all(dir).await
}
