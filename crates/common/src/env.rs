//! Environment/runtime helpers
//!
//! Sanity checks to ensure the on-disk store location exists at startup.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Extract the file path from a `sqlite:` URL.
///
/// Returns `None` for in-memory databases.
pub fn sqlite_file_path(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" || path.starts_with("file::memory:") {
        return None;
    }
    Some(PathBuf::from(path))
}

/// Ensure the parent directory of a file-backed SQLite database exists.
pub async fn ensure_data_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(file) = sqlite_file_path(database_url) else {
        debug!(%database_url, "in-memory database; nothing to create");
        return Ok(());
    };
    let parent = file.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = parent {
        create_dir(dir).await?;
    }
    if tokio::fs::metadata(&file).await.is_err() {
        warn!(path = %file.display(), "database file not found; it will be created");
    }
    Ok(())
}

async fn create_dir(dir: &Path) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))
}
