use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A directory of conversation logs for one tracked working directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Directory name under the storage root
    pub id: String,
    /// Working directory reconstructed from `id`.
    ///
    /// Lossy: every hyphen in the id becomes a separator, so original path segments that
    /// contained hyphens cannot be recovered. Display only; never used to access files.
    pub path: String,
    pub name: String,
}

impl Project {
    pub fn from_id(id: impl Into<String>) -> Self {
        let id = id.into();
        let path = reconstruct_project_path(&id);
        let name = display_name(&path).to_string();
        Self { id, path, name }
    }
}

/// Turn a project id back into the working directory it was derived from.
///
/// The leading hyphen stands for the root separator and every remaining hyphen is taken
/// as a separator too, e.g. `-Users-alice-code` becomes `/Users/alice/code`.
pub fn reconstruct_project_path(id: &str) -> String {
    let rooted = match id.strip_prefix('-') {
        Some(rest) => format!("/{}", rest),
        None => id.to_string(),
    };
    rooted.replace('-', "/")
}

/// Last non-empty path segment
fn display_name(path: &str) -> &str {
    path.rsplit('/').find(|segment| !segment.is_empty()).unwrap_or("")
}

/// Lightweight metadata for one conversation file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMeta {
    pub id: String,
    pub filename: String,
    pub last_modified: DateTime<Utc>,
    pub preview: String,
    /// Non-blank lines in the raw file, including lines that never become messages
    pub message_count: usize,
}
