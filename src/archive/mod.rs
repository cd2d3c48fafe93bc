//! Writing conversations back out: single-conversation JSON export and zip backups of
//! whole projects
//!
//! # Error Handling Strategy
//!
//! - **Export**: all-or-nothing. A missing conversation or a failed write is returned
//!   to the caller.
//!
//! - **Backup**: per-conversation failures are collected in
//!   [`BackupReport::errors`](backup::BackupReport::errors) and counted in the manifest;
//!   only parameter validation, a missing or empty project, or a failure writing the
//!   archive itself fails the whole operation.

pub mod backup;
pub mod export;
pub mod manifest;
pub mod slug;

pub use backup::{BackupError, BackupReport, BackupRequest, backup_project, default_backup_filename};
pub use export::{
    ExportOutcome, default_export_filename, export_conversation, format_for_copy,
    render_conversation_json, write_export,
};
pub use manifest::{BackupManifest, MANIFEST_NAME};
pub use slug::{backup_entry_name, slugify};
