//! Conversation log parsing and classification
//!
//! # Error Handling Strategy
//!
//! - **Individual line failures**: A line that is not a JSON object is logged at `warn`
//!   and skipped. It never affects the messages derived from the surrounding lines, and a
//!   file never fails because of its contents.
//!
//! - **File failures**: Only a file that cannot be opened or decoded as UTF-8 fails, with
//!   [`ErrorKind::NotFound`](crate::error::ErrorKind::NotFound) or
//!   [`ErrorKind::IoError`](crate::error::ErrorKind::IoError).
//!
//! - **Classification**: [`classify`] is total. Unexpected shapes degrade to empty content.

pub mod classifier;
pub mod conversation;
pub mod deserializers;
pub mod saved;

pub use classifier::classify;
pub use conversation::{ParsedConversation, parse_conversation_str, read_conversation, read_conversation_async};
pub use saved::{SavedConversation, open_saved_conversation};
