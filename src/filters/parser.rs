//! Parser for message type filter specs.
//!
//! Turns a short, user-provided spec into a [`TypeFilter`].
//!
//! # Syntax
//!
//! ```text
//! spec  := token ((',' | whitespace) token)*
//! token := type | '+' type | '-' type | 'all' | 'none'
//! type  := user | claude | thinking | tool_use | tool_result (case-insensitive)
//! ```
//!
//! - Bare types list exactly what is shown: the spec starts from nothing shown.
//! - `+type` / `-type` adjust the default filter.
//! - `all` / `none` reset to everything shown / hidden.
//!
//! # Examples
//!
//! ```rust
//! # use ai_history_viewer::filters::parser::parse_type_filter;
//! # use ai_history_viewer::models::MessageType;
//! // Only user prompts
//! let filter = parse_type_filter("user").unwrap();
//! assert!(!filter.is_enabled(MessageType::Claude));
//!
//! // Defaults plus tool calls
//! let filter = parse_type_filter("+tool_use").unwrap();
//! assert!(filter.is_enabled(MessageType::ToolUse));
//! assert!(filter.is_enabled(MessageType::User));
//! ```

use super::types::TypeFilter;
use crate::error::{Error, Result};
use crate::models::MessageType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Only(MessageType),
    Enable(MessageType),
    Disable(MessageType),
    All,
    None,
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(parse_token)
        .collect()
}

fn parse_token(word: &str) -> Result<Token> {
    match word.to_lowercase().as_str() {
        "all" => return Ok(Token::All),
        "none" => return Ok(Token::None),
        _ => {}
    }

    if let Some(rest) = word.strip_prefix('+') {
        Ok(Token::Enable(rest.parse()?))
    } else if let Some(rest) = word.strip_prefix('-') {
        Ok(Token::Disable(rest.parse()?))
    } else {
        Ok(Token::Only(word.parse()?))
    }
}

/// Parse a type filter spec
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] for an empty spec or an unknown type name.
pub fn parse_type_filter(input: &str) -> Result<TypeFilter> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(Error::invalid_request("Empty type filter"));
    }

    let mut filter = if tokens.iter().any(|t| matches!(t, Token::Only(_))) {
        TypeFilter::none()
    } else {
        TypeFilter::default()
    };

    for token in tokens {
        match token {
            Token::Only(t) | Token::Enable(t) => filter.set(t, true),
            Token::Disable(t) => filter.set(t, false),
            Token::All => filter = TypeFilter::all(),
            Token::None => filter = TypeFilter::none(),
        }
    }

    Ok(filter)
}
