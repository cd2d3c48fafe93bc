use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::MessageType;

/// Which message types take part in a search.
///
/// A total mapping from type to on/off. Types without an explicit setting are shown, so a
/// caller-supplied partial set only ever hides what it names.
///
/// Defaults: `user`, `claude` and `thinking` are shown; `tool_use` and `tool_result` are
/// hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeFilter {
    settings: BTreeMap<MessageType, bool>,
}

impl TypeFilter {
    /// Filter with every type shown
    pub fn all() -> Self {
        Self::from_settings(MessageType::ALL.map(|t| (t, true)))
    }

    /// Filter with every type hidden
    pub fn none() -> Self {
        Self::from_settings(MessageType::ALL.map(|t| (t, false)))
    }

    /// Build from explicit settings; unmentioned types are shown
    pub fn from_settings(settings: impl IntoIterator<Item = (MessageType, bool)>) -> Self {
        Self { settings: settings.into_iter().collect() }
    }

    pub fn is_enabled(&self, message_type: MessageType) -> bool {
        self.settings.get(&message_type).copied().unwrap_or(true)
    }

    pub fn set(&mut self, message_type: MessageType, enabled: bool) {
        self.settings.insert(message_type, enabled);
    }

    pub fn toggle(&mut self, message_type: MessageType) {
        let enabled = self.is_enabled(message_type);
        self.set(message_type, !enabled);
    }

    /// Shown types, in [`MessageType::ALL`] order
    pub fn enabled_types(&self) -> Vec<MessageType> {
        MessageType::ALL.into_iter().filter(|t| self.is_enabled(*t)).collect()
    }
}

impl Default for TypeFilter {
    fn default() -> Self {
        Self::from_settings([
            (MessageType::User, true),
            (MessageType::Claude, true),
            (MessageType::Thinking, true),
            (MessageType::ToolUse, false),
            (MessageType::ToolResult, false),
        ])
    }
}
