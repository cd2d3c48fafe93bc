//! Re-open conversations that were previously exported.
//!
//! Accepts the pretty-printed JSON array written by an export, or a JSONL file with one
//! message object per line. Missing fields get the same defaults the viewer applies when
//! it loads a saved file.

use std::fs;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::models::{MessageType, NormalizedMessage};
use crate::parsers::conversation::read_log_text;
use crate::parsers::deserializers::parse_timestamp;

const PREVIEW_CHARS: usize = 50;
pub const NO_PREVIEW: &str = "No preview";

/// A conversation loaded from an exported file
#[derive(Debug, Clone, PartialEq)]
pub struct SavedConversation {
    /// File name the conversation was loaded from
    pub name: String,
    pub messages: Vec<NormalizedMessage>,
    pub message_count: usize,
    /// First message timestamp when it parses, else the file's modification time
    pub last_modified: DateTime<Utc>,
    pub preview: String,
}

pub fn open_saved_conversation(path: &Path) -> Result<SavedConversation> {
    let content = read_log_text(path)?;
    let metadata = fs::metadata(path).map_err(|e| Error::io(path, e))?;
    let modified = metadata.modified().map_err(|e| Error::io(path, e))?;

    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let is_jsonl = path.extension().is_some_and(|ext| ext == "jsonl");

    parse_saved_conversation(name, &content, is_jsonl, DateTime::<Utc>::from(modified), Utc::now())
}

/// Build a [`SavedConversation`] from file content.
///
/// `file_modified` is the fallback for `last_modified`; `now` fills missing timestamps.
pub fn parse_saved_conversation(
    name: String,
    content: &str,
    is_jsonl: bool,
    file_modified: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<SavedConversation> {
    let records = if is_jsonl {
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str::<Value>)
            .collect::<serde_json::Result<Vec<_>>>()?
    } else {
        match serde_json::from_str::<Value>(content)? {
            Value::Array(records) => records,
            _ => return Err(invalid_format(&name)),
        }
    };

    if records.is_empty() {
        return Err(invalid_format(&name));
    }

    let fallback_timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let messages = records
        .into_iter()
        .map(|record| -> Result<NormalizedMessage> {
            match record {
                Value::Object(fields) => {
                    let filled = apply_defaults(fields, &fallback_timestamp);
                    Ok(serde_json::from_value(Value::Object(filled))?)
                }
                _ => Err(invalid_format(&name)),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let preview = messages
        .iter()
        .find(|m| m.message_type == MessageType::User && !m.content.is_empty())
        .map(|m| format!("{}...", m.content.chars().take(PREVIEW_CHARS).collect::<String>()))
        .unwrap_or_else(|| NO_PREVIEW.to_string());

    let last_modified = messages
        .first()
        .and_then(|m| m.timestamp.as_ref())
        .and_then(parse_timestamp)
        .unwrap_or(file_modified);

    Ok(SavedConversation { name, message_count: messages.len(), messages, last_modified, preview })
}

fn apply_defaults(mut fields: Map<String, Value>, fallback_timestamp: &str) -> Map<String, Value> {
    if is_missing(fields.get("type")) {
        fields.insert("type".to_string(), Value::from(MessageType::Claude.as_str()));
    }
    if is_missing(fields.get("timestamp")) {
        fields.insert("timestamp".to_string(), Value::from(fallback_timestamp));
    }
    if is_missing(fields.get("content")) {
        fields.insert("content".to_string(), Value::from(""));
    }
    if !fields.contains_key("isMeta") {
        fields.insert("isMeta".to_string(), Value::Bool(false));
    }
    fields
}

fn is_missing(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

fn invalid_format(name: &str) -> Error {
    Error::invalid_request(format!("Invalid conversation file format: {}", name))
}
