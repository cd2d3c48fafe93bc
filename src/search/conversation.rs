use crate::filters::{TypeFilter, matches_term, normalize_term};
use crate::models::NormalizedMessage;

/// Search one loaded conversation, keeping matches in their original order
///
/// Meta messages and messages whose type is hidden by `filter` never match. A blank
/// term matches nothing.
pub fn search_in_conversation(
    messages: &[NormalizedMessage],
    term: &str,
    filter: &TypeFilter,
) -> Vec<NormalizedMessage> {
    let Some(needle) = normalize_term(term) else {
        return Vec::new();
    };

    messages.iter().filter(|m| matches_term(m, &needle, filter)).cloned().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Wrap-around navigation over in-conversation search results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCursor {
    matches: Vec<NormalizedMessage>,
    current: usize,
}

impl SearchCursor {
    pub fn new(matches: Vec<NormalizedMessage>) -> Self {
        Self { matches, current: 0 }
    }

    pub fn matches(&self) -> &[NormalizedMessage] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Navigation only makes sense with more than one match
    pub fn is_navigable(&self) -> bool {
        self.matches.len() > 1
    }

    pub fn current(&self) -> Option<&NormalizedMessage> {
        self.matches.get(self.current)
    }

    /// 1-based position and total, e.g. `(2, 5)` for "2/5"
    pub fn position(&self) -> Option<(usize, usize)> {
        (!self.matches.is_empty()).then(|| (self.current + 1, self.matches.len()))
    }

    /// Step to the next or previous match, wrapping at either end
    pub fn navigate(&mut self, direction: Direction) -> Option<&NormalizedMessage> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }

        self.current = match direction {
            Direction::Next => (self.current + 1) % len,
            Direction::Previous => (self.current + len - 1) % len,
        };
        self.current()
    }
}
