use anyhow::{Result, anyhow};
use directories::ProjectDirs;
use std::path::PathBuf;

const STORE_FILE: &str = "applications.db";

/// The database path for this invocation: an explicit override when given,
/// otherwise the platform data directory.
pub fn resolve_store_path(override_path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path);
    }

    let project_dirs = ProjectDirs::from("", "", "apptrack")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    Ok(project_dirs.data_dir().join(STORE_FILE))
}
