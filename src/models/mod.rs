//! Data models for conversation logs and the views derived from them.
//!
//! - [`RawEntry`] / [`ContentBlock`] - records as they appear in a `.jsonl` log
//! - [`NormalizedMessage`] - the flattened message every other component works with
//! - [`Project`] / [`ConversationMeta`] - storage layout views
//! - [`ProjectMatch`] - a cross-project search hit
//!
//! All of these are recomputed from disk on each request; nothing here is cached.

pub mod entry;
pub mod message;
pub mod project;
pub mod search;

pub use entry::{ContentBlock, RawEntry};
pub use message::{MessageType, NormalizedMessage};
pub use project::{ConversationMeta, Project, reconstruct_project_path};
pub use search::ProjectMatch;
