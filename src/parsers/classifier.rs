//! Entry classification: raw log record to [`NormalizedMessage`].
//!
//! [`classify`] is total and pure. Unexpected shapes degrade to empty content instead of
//! failing, and the same entry always produces the same message.

use serde_json::Value;

use crate::models::{ContentBlock, MessageType, NormalizedMessage, RawEntry};

const THINKING_LABEL: &str = "💭 Thinking:";
const TOOL_LABEL: &str = "🔧 Tool:";
const TOOL_INPUT_LABEL: &str = "Input:";
const TOOL_RESULT_LABEL: &str = "📊 Tool Result:";
const SEGMENT_SEPARATOR: &str = "\n\n";

/// Classify a raw entry into a normalized message.
///
/// - String content is taken verbatim.
/// - Block content is flattened in block order, with thinking, tool calls and tool
///   results rendered as labeled sections.
/// - Any other content shape (missing, null, object) yields empty content.
///
/// A user entry made only of tool results becomes [`MessageType::ToolResult`]. An
/// assistant entry becomes [`MessageType::ToolUse`] if it called a tool, else
/// [`MessageType::Thinking`] if it reasoned, else [`MessageType::Claude`]. Entries that
/// are not `user` are classified as assistant output.
pub fn classify(entry: &RawEntry) -> NormalizedMessage {
    let is_user = entry.is_user();

    let (message_type, content) = match entry.raw_content() {
        Some(Value::String(text)) => (base_type(is_user), text.clone()),
        Some(Value::Array(blocks)) => classify_blocks(is_user, blocks),
        _ => (base_type(is_user), String::new()),
    };

    NormalizedMessage {
        uuid: entry.uuid.clone(),
        message_type,
        timestamp: entry.timestamp.clone(),
        content,
        parent_uuid: entry.parent_uuid.clone(),
        cwd: entry.cwd.clone(),
        git_branch: entry.git_branch.clone(),
        is_meta: entry.is_meta,
    }
}

fn base_type(is_user: bool) -> MessageType {
    if is_user { MessageType::User } else { MessageType::Claude }
}

fn classify_blocks(is_user: bool, raw_blocks: &[Value]) -> (MessageType, String) {
    let blocks: Vec<ContentBlock> = raw_blocks.iter().map(ContentBlock::from_value).collect();

    let mut segments = Vec::with_capacity(blocks.len());
    let mut has_thinking = false;
    let mut has_tool_use = false;

    for block in &blocks {
        match block {
            ContentBlock::Text { text } => segments.push(text.clone()),
            ContentBlock::Thinking { thinking } => {
                has_thinking = true;
                segments.push(format!("{}\n{}", THINKING_LABEL, thinking));
            }
            ContentBlock::ToolUse { name, input } => {
                has_tool_use = true;
                // `{:#}` pretty-prints with two-space indentation
                segments.push(format!("{} {}\n{} {:#}", TOOL_LABEL, name, TOOL_INPUT_LABEL, input));
            }
            ContentBlock::ToolResult { content } => {
                segments.push(format!("{}\n{}", TOOL_RESULT_LABEL, render_tool_result(content)));
            }
            ContentBlock::Unknown => {}
        }
    }

    let content = segments
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(SEGMENT_SEPARATOR);

    let message_type = if is_user {
        if !blocks.is_empty() && blocks.iter().all(ContentBlock::is_tool_result) {
            MessageType::ToolResult
        } else {
            MessageType::User
        }
    } else if has_tool_use {
        MessageType::ToolUse
    } else if has_thinking {
        MessageType::Thinking
    } else {
        MessageType::Claude
    };

    (message_type, content)
}

fn render_tool_result(content: &Value) -> String {
    match content {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
