//! Storage layout discovery: projects and their conversation files
//!
//! # Error Handling Strategy
//!
//! - **Directory-level failures**: A missing or unreadable root/project directory fails
//!   the whole listing with [`ErrorKind::NotFound`](crate::error::ErrorKind::NotFound) or
//!   [`ErrorKind::IoError`](crate::error::ErrorKind::IoError).
//!
//! - **File-level failures**: A conversation file that cannot be summarized is logged and
//!   left out of the listing, so one unreadable log never hides the rest of a project.
//!
//! Metadata is computed from raw lines without classifying messages.

pub mod conversations;
pub mod project_discovery;

pub use conversations::{
    NO_MESSAGES_PREVIEW, conversation_files, conversation_meta, list_conversations,
};
pub use project_discovery::list_projects;
