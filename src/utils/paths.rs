use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const CONVERSATION_EXTENSION: &str = "jsonl";

/// Validates that an identifier names a single entry directly under its parent
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] if the value is empty, contains a path separator,
/// or is a `.`/`..` component.
pub fn validate_component<'a>(label: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::invalid_request(format!("Missing required parameter: {}", label)));
    }
    if value.contains('/') || value.contains('\\') || value == "." || value == ".." {
        return Err(Error::invalid_request(format!("Invalid {}: {}", label, value)));
    }
    Ok(value)
}

/// Directory holding a project's conversation files
pub fn project_dir(root: &Path, project_id: &str) -> Result<PathBuf> {
    Ok(root.join(validate_component("projectId", project_id)?))
}

/// Path of a conversation log inside its project directory
pub fn conversation_path(root: &Path, project_id: &str, conversation_id: &str) -> Result<PathBuf> {
    let conversation_id = validate_component("conversationId", conversation_id)?;
    Ok(project_dir(root, project_id)?.join(format!("{}.{}", conversation_id, CONVERSATION_EXTENSION)))
}

/// Conversation id for a log file: its name without the `.jsonl` extension
pub fn conversation_id_from_filename(filename: &str) -> &str {
    filename
        .strip_suffix(CONVERSATION_EXTENSION)
        .and_then(|stem| stem.strip_suffix('.'))
        .unwrap_or(filename)
}

/// Formats a path with `~` in place of the home directory, for display
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use ai_history_viewer::format_path_with_tilde;
///
/// let path = PathBuf::from("/Users/alice/.claude/projects");
/// // "~/.claude/projects" when the home directory is /Users/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    tilde_relative_to(path, dirs::home_dir().as_deref())
}

/// Matches whole components, so `/home/al` is not treated as the home of `/home/alice`
fn tilde_relative_to(path: &Path, home: Option<&Path>) -> String {
    match home.and_then(|home| path.strip_prefix(home).ok()) {
        Some(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Some(rest) => Path::new("~").join(rest).to_string_lossy().into_owned(),
        None => path.to_string_lossy().into_owned(),
    }
}
