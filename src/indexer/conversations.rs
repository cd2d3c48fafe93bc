use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::ConversationMeta;
use crate::parsers::conversation::{parse_raw_entry, read_log_text};
use crate::utils::{CONVERSATION_EXTENSION, conversation_id_from_filename, project_dir};

pub const NO_MESSAGES_PREVIEW: &str = "No messages";
const PREVIEW_CHARS: usize = 100;

/// List the conversations of a project, newest first
///
/// Metadata is derived without classifying messages: `message_count` counts non-blank
/// raw lines, and `preview` comes from the first non-meta user entry with content.
/// Files are summarized in parallel; a file that cannot be read is logged and left out.
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] for a malformed project id and [`Error::NotFound`]
/// if the project directory does not exist.
pub fn list_conversations(root: &Path, project_id: &str) -> Result<Vec<ConversationMeta>> {
    let dir = project_dir(root, project_id)?;
    let files = conversation_files(&dir)?;

    let mut conversations: Vec<ConversationMeta> = files
        .par_iter()
        .filter_map(|path| match conversation_meta(path) {
            Ok(meta) => Some(meta),
            Err(e) => {
                warn!("Skipping conversation file {}: {}", path.display(), e);
                None
            }
        })
        .collect();

    // Stable sort keeps filename order among equal modification times
    conversations.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
    debug!("Listed {} conversations in {}", conversations.len(), dir.display());

    Ok(conversations)
}

/// Every `.jsonl` entry directly inside `dir`, sorted by file name.
///
/// Entries are selected by name alone, so symlinks are followed later when read and
/// entries that turn out unreadable surface as per-file failures for the caller.
pub fn conversation_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut files = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == CONVERSATION_EXTENSION) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Summarize one conversation file
pub fn conversation_meta(path: &Path) -> Result<ConversationMeta> {
    let metadata = fs::metadata(path).map_err(|e| Error::io(path, e))?;
    let modified = metadata.modified().map_err(|e| Error::io(path, e))?;
    let content = read_log_text(path)?;

    let filename = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let id = conversation_id_from_filename(&filename).to_string();

    Ok(ConversationMeta {
        id,
        filename,
        last_modified: DateTime::<Utc>::from(modified),
        preview: preview_from_lines(&content),
        message_count: count_lines(&content),
    })
}

/// Number of non-blank lines, whether or not they parse
pub fn count_lines(content: &str) -> usize {
    content.lines().filter(|line| !line.trim().is_empty()).count()
}

/// First 100 characters of the first non-meta user entry that has content.
///
/// Only string content yields a preview; if that first entry carries content blocks
/// instead, or no such entry exists, the result is [`NO_MESSAGES_PREVIEW`].
pub fn preview_from_lines(content: &str) -> String {
    let first_user_content = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| parse_raw_entry(line).ok())
        .filter(|entry| entry.is_user() && !entry.is_meta)
        .find_map(|entry| entry.raw_content().filter(|c| has_content(c)).cloned());

    match first_user_content {
        Some(Value::String(text)) => text.chars().take(PREVIEW_CHARS).collect(),
        _ => NO_MESSAGES_PREVIEW.to_string(),
    }
}

fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
