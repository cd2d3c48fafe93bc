//! Substring search over normalized messages
//!
//! Two modes share one predicate (see [`crate::filters`]): case-insensitive substring
//! match on `content`, excluding meta messages and types hidden by the active
//! [`TypeFilter`](crate::filters::TypeFilter).
//!
//! - [`search_in_conversation`] filters an already-loaded conversation and keeps message
//!   order; [`SearchCursor`] steps through the hits with wrap-around.
//! - [`search_in_project`] reads each conversation of a project in turn and returns one
//!   flat list sorted newest first.
//!
//! # Error Handling Strategy
//!
//! A conversation that fails to read during a project search is logged and skipped; only
//! a missing or invalid project fails the search. Overlapping searches are serialized
//! through a [`SearchSession`], which drops results from superseded requests.

pub mod conversation;
pub mod project;
pub mod session;

pub use conversation::{Direction, SearchCursor, search_in_conversation};
pub use project::{ProjectSearchResults, search_in_project, sort_newest_first};
pub use session::{PublishedSearch, SearchSession, SearchTicket};
