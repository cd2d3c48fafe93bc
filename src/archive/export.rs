use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::NormalizedMessage;
use crate::parsers::read_conversation;
use crate::utils::conversation_path;

/// Where a single-conversation export landed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutcome {
    pub saved_path: PathBuf,
    pub filename: String,
}

/// Read, classify and write one conversation as a pretty-printed JSON array.
///
/// # Errors
///
/// - [`Error::InvalidRequest`] for a blank destination or malformed ids
/// - [`Error::NotFound`] if the conversation file does not exist
/// - [`Error::Io`] if the source cannot be read or the destination cannot be written
pub fn export_conversation(
    root: &Path,
    project_id: &str,
    conversation_id: &str,
    destination: &Path,
) -> Result<ExportOutcome> {
    if destination.as_os_str().is_empty() {
        return Err(Error::invalid_request("Missing export destination"));
    }

    let source = conversation_path(root, project_id, conversation_id)?;
    let messages = read_conversation(&source)?;
    write_export(&messages, destination)
}

/// Write already-classified messages to `destination`
pub fn write_export(messages: &[NormalizedMessage], destination: &Path) -> Result<ExportOutcome> {
    let json = render_conversation_json(messages)?;
    fs::write(destination, json).map_err(|e| Error::io(destination, e))?;

    debug!("Exported {} messages to {}", messages.len(), destination.display());

    let filename =
        destination.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    Ok(ExportOutcome { saved_path: destination.to_path_buf(), filename })
}

/// Export document: the messages as a pretty-printed JSON array (two-space indent)
pub fn render_conversation_json(messages: &[NormalizedMessage]) -> Result<String> {
    Ok(serde_json::to_string_pretty(messages)?)
}

/// `claude-conversation-{id}-{YYYY-MM-DD}.json`
pub fn default_export_filename(conversation_id: &str, date: NaiveDate) -> String {
    format!("claude-conversation-{}-{}.json", conversation_id, date.format("%Y-%m-%d"))
}

/// Plain-text rendering for the clipboard: contents separated by a blank line
pub fn format_for_copy(messages: &[NormalizedMessage]) -> String {
    messages.iter().map(|m| m.content.as_str()).collect::<Vec<_>>().join("\n\n")
}
