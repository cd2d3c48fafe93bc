use super::types::TypeFilter;
use crate::models::NormalizedMessage;

/// Whether a message takes part in search at all: not meta, type shown, has content
pub fn is_searchable(message: &NormalizedMessage, filter: &TypeFilter) -> bool {
    !message.is_meta && filter.is_enabled(message.message_type) && !message.content.is_empty()
}

/// Case-insensitive substring match of `needle` against searchable messages.
///
/// `needle` must already be lowercased; see [`normalize_term`].
pub fn matches_term(message: &NormalizedMessage, needle: &str, filter: &TypeFilter) -> bool {
    is_searchable(message, filter) && message.content.to_lowercase().contains(needle)
}

/// Lowercased search term, or `None` when the term is blank
pub fn normalize_term(term: &str) -> Option<String> {
    let trimmed = term.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}
