//! AI History Viewer - Browse, search and back up Claude conversation logs
//!
//! This library turns the per-project `.jsonl` conversation logs written by the Claude
//! CLI (`~/.claude/projects/<project-id>/<conversation-id>.jsonl`) into normalized
//! messages and builds the viewer's operations on top of them:
//!
//! - Classifying raw log entries into typed, flattened messages
//! - Listing projects and conversations with previews
//! - Case-insensitive search within a conversation or across a project
//! - Exporting a conversation to JSON and backing up a project to a zip archive
//!
//! Source logs are only ever read. Every call recomputes its result from disk.
//!
//! # Example
//!
//! ```no_run
//! use ai_history_viewer::{HistoryService, TypeFilter, get_projects_dir};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let service = HistoryService::new(get_projects_dir()?);
//! for project in service.list_projects().await? {
//!     let results = service.search_in_project(&project.id, "refactor", &TypeFilter::default()).await?;
//!     println!("{}: {}", project.name, results.summary());
//! }
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod cli;
pub mod error;
pub mod filters;
pub mod indexer;
pub mod models;
pub mod parsers;
pub mod search;
pub mod service;
pub mod utils;

// Re-export commonly used types
pub use error::{Error, ErrorKind, Result};
pub use filters::TypeFilter;
pub use models::{ConversationMeta, MessageType, NormalizedMessage, Project, ProjectMatch};
pub use parsers::classify;
pub use service::HistoryService;
pub use utils::{format_path_with_tilde, get_projects_dir};
