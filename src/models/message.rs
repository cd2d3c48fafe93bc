use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// Display category of a normalized message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    User,
    Claude,
    Thinking,
    ToolUse,
    ToolResult,
}

impl MessageType {
    pub const ALL: [MessageType; 5] = [
        MessageType::User,
        MessageType::Claude,
        MessageType::Thinking,
        MessageType::ToolUse,
        MessageType::ToolResult,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::User => "user",
            MessageType::Claude => "claude",
            MessageType::Thinking => "thinking",
            MessageType::ToolUse => "tool_use",
            MessageType::ToolResult => "tool_result",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        MessageType::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| Error::invalid_request(format!("Unknown message type: {}", s)))
    }
}

/// The canonical, flattened form of a log entry.
///
/// Serialized field names and order match the exported JSON format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Value>,
    #[serde(rename = "type")]
    pub message_type: MessageType,
    /// Passed through exactly as it appeared in the log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Value>,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_uuid: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,
    #[serde(default)]
    pub is_meta: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_message_type_parse() {
        assert_eq!("tool_use".parse::<MessageType>().unwrap(), MessageType::ToolUse);
        assert_eq!(" Claude ".parse::<MessageType>().unwrap(), MessageType::Claude);
        assert!("assistant".parse::<MessageType>().is_err());
    }

    #[test]
    fn test_message_type_serializes_snake_case() {
        assert_eq!(serde_json::to_value(MessageType::ToolResult).unwrap(), json!("tool_result"));
    }

    #[test]
    fn test_normalized_message_serialization_omits_missing_fields() {
        let message = NormalizedMessage {
            uuid: Some(json!("u1")),
            message_type: MessageType::User,
            timestamp: Some(json!("2024-01-15T10:30:00Z")),
            content: "hello".to_string(),
            parent_uuid: None,
            cwd: None,
            git_branch: Some("main".to_string()),
            is_meta: false,
        };

        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "uuid": "u1",
                "type": "user",
                "timestamp": "2024-01-15T10:30:00Z",
                "content": "hello",
                "gitBranch": "main",
                "isMeta": false
            })
        );
    }
}
