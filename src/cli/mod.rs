//! Command-line shell over [`HistoryService`](crate::service::HistoryService)

pub mod commands;

pub use commands::{Cli, Commands, run};
