use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::Project;

/// List every project directory under the storage root
///
/// Each subdirectory of `root` is one project; its name is the project id, from which
/// the working directory path and display name are reconstructed (see
/// [`reconstruct_project_path`](crate::models::reconstruct_project_path)).
///
/// # Returns
///
/// Projects sorted by display name, case-insensitively. Hidden entries (leading `.`)
/// and anything that is not a directory are skipped; symlinks count as the directory
/// they point to.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if `root` does not exist, or [`Error::Io`] if it cannot be
/// read.
pub fn list_projects(root: &Path) -> Result<Vec<Project>> {
    let entries = fs::read_dir(root).map_err(|e| Error::io(root, e))?;
    let mut projects = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| Error::io(root, e))?;
        let id = entry.file_name().to_string_lossy().into_owned();

        if id.starts_with('.') {
            continue;
        }

        match fs::metadata(entry.path()) {
            Ok(metadata) if metadata.is_dir() => {}
            Ok(_) => continue,
            Err(e) => {
                warn!("Skipping project entry {}: {}", entry.path().display(), e);
                continue;
            }
        }

        projects.push(Project::from_id(id));
    }

    projects.sort_by(compare_display_names);
    debug!("Found {} projects in {}", projects.len(), root.display());

    Ok(projects)
}

fn compare_display_names(a: &Project, b: &Project) -> Ordering {
    a.name.to_lowercase().cmp(&b.name.to_lowercase()).then_with(|| a.name.cmp(&b.name))
}
