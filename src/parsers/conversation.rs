use std::fs;
use std::path::Path;

use serde::{Deserialize, de};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{NormalizedMessage, RawEntry};
use crate::parsers::classifier::classify;

/// Outcome of parsing one conversation log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedConversation {
    /// Classified messages in file line order
    pub messages: Vec<NormalizedMessage>,
    /// Non-blank lines that were not valid JSON objects
    pub skipped_lines: usize,
}

/// Read a conversation JSONL file and classify every user/assistant entry.
///
/// Malformed lines are logged and skipped; only a file that cannot be read fails.
/// Invalid UTF-8 is replaced with U+FFFD, so a corrupt byte only spoils its own line.
pub fn read_conversation(path: &Path) -> Result<Vec<NormalizedMessage>> {
    let content = read_log_text(path)?;
    Ok(parse_conversation_str(&content, path).messages)
}

/// Async variant of [`read_conversation`], used by the query service
pub async fn read_conversation_async(path: &Path) -> Result<Vec<NormalizedMessage>> {
    let bytes = tokio::fs::read(path).await.map_err(|e| Error::io(path, e))?;
    let content = decode_lossy(bytes);
    Ok(parse_conversation_str(&content, path).messages)
}

/// Read a log or export file as text, decoding invalid UTF-8 lossily
pub(crate) fn read_log_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(decode_lossy(bytes))
}

fn decode_lossy(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Parse conversation log content already in memory.
///
/// `path` is only used for diagnostics.
pub fn parse_conversation_str(content: &str, path: &Path) -> ParsedConversation {
    let mut parsed = ParsedConversation::default();

    for (line_num, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(Some(entry)) => parsed.messages.push(classify(&entry)),
            // Silently skip non-conversation entries (summary, system, file-history-snapshot)
            Ok(None) => {}
            Err(source) => {
                let err = Error::Parse { path: path.to_path_buf(), line: line_num + 1, source };
                warn!("Skipping malformed line: {}", err);
                parsed.skipped_lines += 1;
            }
        }
    }

    if parsed.skipped_lines > 0 {
        debug!(
            "Parsed {}: {} messages ({} lines skipped)",
            path.display(),
            parsed.messages.len(),
            parsed.skipped_lines
        );
    }

    parsed
}

fn parse_line(line: &str) -> serde_json::Result<Option<RawEntry>> {
    let entry = parse_raw_entry(line)?;
    Ok(entry.is_conversation().then_some(entry))
}

/// Parse one log line into a [`RawEntry`]; anything but a JSON object is rejected
pub(crate) fn parse_raw_entry(line: &str) -> serde_json::Result<RawEntry> {
    let value: Value = serde_json::from_str(line)?;
    if !value.is_object() {
        return Err(de::Error::custom("expected a JSON object"));
    }
    RawEntry::deserialize(&value)
}
