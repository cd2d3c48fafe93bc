use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Archive entry name of the manifest
pub const MANIFEST_NAME: &str = "backup-metadata.json";

/// Summary written as the last entry of every project backup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupManifest {
    pub project: ManifestProject,
    pub backup: ManifestBackup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestProject {
    pub id: String,
    pub name: String,
    /// Project directory the conversations were read from
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestBackup {
    /// ISO 8601 time of the backup, millisecond precision, UTC
    pub date: String,
    /// Conversations written to the archive
    pub conversation_count: usize,
    /// Conversation files found in the project
    pub total_conversations: usize,
    /// Conversations that failed and were left out
    pub errors: usize,
}

impl BackupManifest {
    pub fn new(
        project_id: &str,
        project_name: &str,
        project_dir: &Path,
        date: DateTime<Utc>,
        conversation_count: usize,
        total_conversations: usize,
        errors: usize,
    ) -> Self {
        Self {
            project: ManifestProject {
                id: project_id.to_string(),
                name: project_name.to_string(),
                path: project_dir.to_string_lossy().into_owned(),
            },
            backup: ManifestBackup {
                date: date.to_rfc3339_opts(SecondsFormat::Millis, true),
                conversation_count,
                total_conversations,
                errors,
            },
        }
    }
}
