//! Terminal output sanitization utilities
//!
//! # Security: Terminal Injection Prevention
//!
//! Message content comes straight from conversation logs and tool output, so it can carry
//! escape sequences that clear the screen, move the cursor, rename the window or restyle
//! the terminal. Every CLI command that prints log-derived text passes it through
//! [`strip_ansi_codes`]; JSON output is left untouched since serde escapes control
//! characters.

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Removes terminal escape sequences and control characters from log-derived text
///
/// Handles CSI sequences (`ESC [ ... final-byte`, colors and cursor movement), OSC
/// sequences (`ESC ] ... BEL` or `ESC ] ... ESC \`, window titles and hyperlinks) and
/// two-character escapes. Other control characters are dropped except tab, newline and
/// carriage return.
///
/// # Examples
///
/// ```
/// use ai_history_viewer::utils::terminal::strip_ansi_codes;
///
/// let text = "\x1b[31mRed text\x1b[0m";
/// assert_eq!(strip_ansi_codes(text), "Red text");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESC {
            match chars.next() {
                // CSI: parameters and intermediates up to a final byte in '@'..='~'
                Some('[') => {
                    for next in chars.by_ref() {
                        if ('@'..='~').contains(&next) {
                            break;
                        }
                    }
                }
                // OSC: terminated by BEL or ST (ESC \)
                Some(']') => {
                    while let Some(next) = chars.next() {
                        if next == BEL {
                            break;
                        }
                        if next == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if ch.is_control() && !matches!(ch, '\t' | '\n' | '\r') {
            continue;
        }

        result.push(ch);
    }

    result
}
