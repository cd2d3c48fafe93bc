use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::parsers::deserializers::{deserialize_lenient_bool, deserialize_lenient_string};

pub const ENTRY_TYPE_USER: &str = "user";
pub const ENTRY_TYPE_ASSISTANT: &str = "assistant";

/// One raw JSON record from a conversation log.
///
/// Every field is optional and leniently typed: any JSON object deserializes into a
/// `RawEntry`, so shape problems surface as empty content during classification rather
/// than as parse failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    #[serde(rename = "type", default, deserialize_with = "deserialize_lenient_string")]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub uuid: Option<Value>,
    #[serde(default)]
    pub timestamp: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(rename = "parentUuid", default)]
    pub parent_uuid: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub cwd: Option<String>,
    #[serde(rename = "gitBranch", default, deserialize_with = "deserialize_lenient_string")]
    pub git_branch: Option<String>,
    #[serde(rename = "isMeta", default, deserialize_with = "deserialize_lenient_bool")]
    pub is_meta: bool,
}

impl RawEntry {
    pub fn is_user(&self) -> bool {
        self.entry_type.as_deref() == Some(ENTRY_TYPE_USER)
    }

    pub fn is_assistant(&self) -> bool {
        self.entry_type.as_deref() == Some(ENTRY_TYPE_ASSISTANT)
    }

    /// Only user and assistant records take part in a conversation
    pub fn is_conversation(&self) -> bool {
        self.is_user() || self.is_assistant()
    }

    /// `message.content`, whatever its shape
    pub fn raw_content(&self) -> Option<&Value> {
        self.message.as_ref().and_then(|m| m.get("content"))
    }
}

/// A typed fragment of a message body.
///
/// Blocks that fail to deserialize, or carry a type this crate doesn't render, become
/// [`ContentBlock::Unknown`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        #[serde(default)]
        text: String,
    },
    Thinking {
        #[serde(default)]
        thinking: String,
    },
    ToolUse {
        #[serde(default)]
        name: String,
        #[serde(default)]
        input: Value,
    },
    ToolResult {
        #[serde(default)]
        content: Value,
    },
    #[serde(other)]
    Unknown,
}

impl ContentBlock {
    pub fn from_value(value: &Value) -> Self {
        ContentBlock::deserialize(value).unwrap_or(ContentBlock::Unknown)
    }

    pub fn is_tool_result(&self) -> bool {
        matches!(self, ContentBlock::ToolResult { .. })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_raw_entry_tolerates_unexpected_field_types() {
        let entry: RawEntry = serde_json::from_value(json!({
            "type": "user",
            "uuid": 42,
            "isMeta": "yes",
            "cwd": null,
            "message": {"content": "hi"}
        }))
        .unwrap();

        assert!(entry.is_user());
        assert_eq!(entry.uuid, Some(json!(42)));
        assert!(!entry.is_meta);
        assert_eq!(entry.cwd, None);
        assert_eq!(entry.raw_content(), Some(&json!("hi")));
    }

    #[test]
    fn test_raw_entry_missing_message() {
        let entry: RawEntry = serde_json::from_str(r#"{"type":"assistant"}"#).unwrap();
        assert!(entry.is_assistant());
        assert!(entry.raw_content().is_none());
    }

    #[test]
    fn test_non_conversation_entry() {
        let entry: RawEntry = serde_json::from_str(r#"{"type":"summary","summary":"x"}"#).unwrap();
        assert!(!entry.is_conversation());
    }

    #[test]
    fn test_content_block_variants() {
        assert_eq!(
            ContentBlock::from_value(&json!({"type": "text", "text": "hello"})),
            ContentBlock::Text { text: "hello".to_string() }
        );
        assert_eq!(
            ContentBlock::from_value(&json!({"type": "tool_use", "name": "grep", "input": {"q": 1}})),
            ContentBlock::ToolUse { name: "grep".to_string(), input: json!({"q": 1}) }
        );
        assert!(ContentBlock::from_value(&json!({"type": "tool_result"})).is_tool_result());
    }

    #[test]
    fn test_content_block_unknown_shapes() {
        assert_eq!(ContentBlock::from_value(&json!({"type": "image"})), ContentBlock::Unknown);
        assert_eq!(ContentBlock::from_value(&json!("bare string")), ContentBlock::Unknown);
        assert_eq!(ContentBlock::from_value(&json!({"type": "text", "text": 5})), ContentBlock::Unknown);
    }
}
