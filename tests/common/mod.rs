//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for a storage root holding project directories
pub struct ProjectsDirBuilder {
    temp_dir: TempDir,
}

impl ProjectsDirBuilder {
    /// Create a new builder with an empty storage root
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the storage root
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a project directory with the given id and conversation files
    pub fn with_project(self, project_id: &str, conversations: &[ConversationFileBuilder]) -> Self {
        let project_dir = self.temp_dir.path().join(project_id);
        fs::create_dir_all(&project_dir).expect("Failed to create project dir");

        for conversation in conversations {
            conversation.create_in(&project_dir);
        }

        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for ProjectsDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one `<conversation-id>.jsonl` file
pub struct ConversationFileBuilder {
    id: String,
    lines: Vec<Vec<u8>>,
    age: Option<Duration>,
    unreadable: bool,
}

impl ConversationFileBuilder {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string(), lines: Vec::new(), age: None, unreadable: false }
    }

    /// Append a log entry
    pub fn with_entry(mut self, entry: EntryBuilder) -> Self {
        self.lines.push(entry.to_json().into_bytes());
        self
    }

    /// Append a raw line (malformed JSON, blank lines, ...)
    pub fn with_raw_line(mut self, line: &str) -> Self {
        self.lines.push(line.as_bytes().to_vec());
        self
    }

    /// Append a raw line given as bytes, which need not be valid UTF-8
    pub fn with_raw_bytes(mut self, line: &[u8]) -> Self {
        self.lines.push(line.to_vec());
        self
    }

    /// Create a directory named like the conversation file, so reading it fails
    pub fn unreadable(mut self) -> Self {
        self.unreadable = true;
        self
    }

    /// Set the file's modification time to `secs` seconds ago
    pub fn modified_secs_ago(mut self, secs: u64) -> Self {
        self.age = Some(Duration::from_secs(secs));
        self
    }

    pub fn filename(&self) -> String {
        format!("{}.jsonl", self.id)
    }

    /// Create the file in the given project directory
    pub fn create_in(&self, dir: &Path) -> PathBuf {
        let path = dir.join(self.filename());
        if self.unreadable {
            fs::create_dir(&path).expect("Failed to create unreadable entry");
            return path;
        }

        fs::write(&path, self.lines.join(&b'\n')).expect("Failed to write conversation file");

        if let Some(age) = self.age {
            let file = fs::File::options().write(true).open(&path).expect("Failed to open file");
            file.set_modified(SystemTime::now() - age).expect("Failed to set mtime");
        }

        path
    }
}

/// Builder for raw log entries
pub struct EntryBuilder {
    entry_type: String,
    uuid: String,
    timestamp: Value,
    content: Value,
    is_meta: bool,
}

impl EntryBuilder {
    /// Create a new user entry
    pub fn user() -> Self {
        Self {
            entry_type: "user".to_string(),
            uuid: "550e8400-e29b-41d4-a716-446655440001".to_string(),
            timestamp: json!("2024-01-15T10:30:00.000Z"),
            content: json!("Test message"),
            is_meta: false,
        }
    }

    /// Create a new assistant entry
    pub fn assistant() -> Self {
        Self {
            entry_type: "assistant".to_string(),
            uuid: "550e8400-e29b-41d4-a716-446655440002".to_string(),
            timestamp: json!("2024-01-15T10:30:05.000Z"),
            content: json!("Test response"),
            is_meta: false,
        }
    }

    /// Any other record type (`summary`, `system`, ...)
    pub fn other(entry_type: &str) -> Self {
        Self { entry_type: entry_type.to_string(), ..Self::user() }
    }

    /// Set string content
    pub fn text(mut self, text: &str) -> Self {
        self.content = json!(text);
        self
    }

    /// Set content blocks
    pub fn blocks(mut self, blocks: Vec<Value>) -> Self {
        self.content = Value::Array(blocks);
        self
    }

    pub fn uuid(mut self, uuid: &str) -> Self {
        self.uuid = uuid.to_string();
        self
    }

    /// Set an RFC 3339 timestamp
    pub fn timestamp(mut self, timestamp: &str) -> Self {
        self.timestamp = json!(timestamp);
        self
    }

    pub fn meta(mut self) -> Self {
        self.is_meta = true;
        self
    }

    pub fn text_block(text: &str) -> Value {
        json!({"type": "text", "text": text})
    }

    pub fn thinking_block(thinking: &str) -> Value {
        json!({"type": "thinking", "thinking": thinking})
    }

    pub fn tool_use_block(name: &str, input: Value) -> Value {
        json!({"type": "tool_use", "id": "toolu_01", "name": name, "input": input})
    }

    pub fn tool_result_block(content: &str) -> Value {
        json!({"type": "tool_result", "tool_use_id": "toolu_01", "content": content})
    }

    /// Convert to a JSONL line
    pub fn to_json(&self) -> String {
        json!({
            "type": self.entry_type,
            "uuid": self.uuid,
            "timestamp": self.timestamp,
            "isMeta": self.is_meta,
            "message": {"role": self.entry_type, "content": self.content}
        })
        .to_string()
    }
}
