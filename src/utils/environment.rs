use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Locate the directory where the CLI tool stores per-project conversation logs.
///
/// - Windows: `%APPDATA%\Claude\projects` when it exists, else `~\.claude\projects` when
///   that exists, else the APPDATA location
/// - Everything else: `~/.claude/projects`
pub fn get_projects_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;

    if cfg!(windows) {
        let app_data = dirs::config_dir().unwrap_or_else(|| home.join("AppData").join("Roaming"));
        Ok(windows_projects_dir(&app_data, &home))
    } else {
        Ok(unix_projects_dir(&home))
    }
}

fn unix_projects_dir(home: &Path) -> PathBuf {
    home.join(".claude").join("projects")
}

fn windows_projects_dir(app_data: &Path, home: &Path) -> PathBuf {
    let app_data_dir = app_data.join("Claude").join("projects");
    let home_dir = unix_projects_dir(home);

    if app_data_dir.exists() {
        app_data_dir
    } else if home_dir.exists() {
        home_dir
    } else {
        app_data_dir
    }
}
