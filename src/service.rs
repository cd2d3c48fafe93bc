//! Query API shared by every hosting shell
//!
//! [`HistoryService`] wraps the synchronous pipeline for async callers: directory scans,
//! exports and backups run on tokio's blocking pool and conversation reads use
//! `tokio::fs`, so a large backup never stalls other requests on the runtime.

use std::path::{Path, PathBuf};

use crate::archive::{self, BackupReport, BackupRequest, ExportOutcome};
use crate::error::Result;
use crate::filters::TypeFilter;
use crate::indexer;
use crate::models::{ConversationMeta, NormalizedMessage, Project};
use crate::parsers::{self, SavedConversation};
use crate::search::{self, ProjectSearchResults, SearchSession};
use crate::utils::conversation_path;

/// Read-only view over one storage root
#[derive(Debug, Clone)]
pub struct HistoryService {
    root: PathBuf,
}

impl HistoryService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let root = self.root.clone();
        blocking(move || indexer::list_projects(&root)).await
    }

    pub async fn list_conversations(&self, project_id: &str) -> Result<Vec<ConversationMeta>> {
        let root = self.root.clone();
        let project_id = project_id.to_string();
        blocking(move || indexer::list_conversations(&root, &project_id)).await
    }

    pub async fn read_conversation(
        &self,
        project_id: &str,
        conversation_id: &str,
    ) -> Result<Vec<NormalizedMessage>> {
        let path = conversation_path(&self.root, project_id, conversation_id)?;
        parsers::read_conversation_async(&path).await
    }

    pub fn search_in_conversation(
        &self,
        messages: &[NormalizedMessage],
        term: &str,
        filter: &TypeFilter,
    ) -> Vec<NormalizedMessage> {
        search::search_in_conversation(messages, term, filter)
    }

    pub async fn search_in_project(
        &self,
        project_id: &str,
        term: &str,
        filter: &TypeFilter,
    ) -> Result<ProjectSearchResults> {
        search::search_in_project(&self.root, project_id, term, filter).await
    }

    /// Project search that supersedes earlier searches in `session`.
    ///
    /// Returns `Ok(None)` when a newer search started before this one finished; its
    /// results (or error) are discarded.
    pub async fn search_in_project_latest(
        &self,
        session: &SearchSession,
        project_id: &str,
        term: &str,
        filter: &TypeFilter,
    ) -> Result<Option<ProjectSearchResults>> {
        let ticket = session.begin();
        let outcome = self.search_in_project(project_id, term, filter).await;

        if !session.is_current(ticket) {
            return Ok(None);
        }
        let results = outcome?;
        Ok(session.publish(ticket, term, results.clone()).then_some(results))
    }

    pub async fn export_conversation(
        &self,
        project_id: &str,
        conversation_id: &str,
        destination: &Path,
    ) -> Result<ExportOutcome> {
        let root = self.root.clone();
        let project_id = project_id.to_string();
        let conversation_id = conversation_id.to_string();
        let destination = destination.to_path_buf();
        blocking(move || {
            archive::export_conversation(&root, &project_id, &conversation_id, &destination)
        })
        .await
    }

    pub async fn backup_project(&self, request: BackupRequest) -> Result<BackupReport> {
        let root = self.root.clone();
        blocking(move || archive::backup_project(&root, &request)).await
    }

    pub async fn open_saved_conversation(&self, path: &Path) -> Result<SavedConversation> {
        let path = path.to_path_buf();
        blocking(move || parsers::open_saved_conversation(&path)).await
    }
}

async fn blocking<T, F>(task: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task).await?
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use tempfile::TempDir;

    use super::*;
    use crate::error::ErrorKind;

    fn service_with_project() -> (TempDir, HistoryService) {
        let root = TempDir::new().unwrap();
        let project = root.path().join("-home-dev-tool");
        fs::create_dir(&project).unwrap();
        fs::write(
            project.join("s1.jsonl"),
            "{\"type\":\"user\",\"timestamp\":\"2024-05-01T09:00:00Z\",\"message\":{\"content\":\"Deploy the tool\"}}\n",
        )
        .unwrap();
        let service = HistoryService::new(root.path());
        (root, service)
    }

    #[tokio::test]
    async fn test_query_api_round() {
        let (_root, service) = service_with_project();

        let projects = service.list_projects().await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "tool");

        let conversations = service.list_conversations(&projects[0].id).await.unwrap();
        assert_eq!(conversations[0].id, "s1");

        let messages = service.read_conversation(&projects[0].id, "s1").await.unwrap();
        let hits = service.search_in_conversation(&messages, "deploy", &TypeFilter::default());
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_read_conversation_rejects_traversal() {
        let (_root, service) = service_with_project();
        let err = service.read_conversation("..", "s1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    }

    #[tokio::test]
    async fn test_latest_search_is_published() {
        let (_root, service) = service_with_project();
        let session = SearchSession::new();

        let results = service
            .search_in_project_latest(&session, "-home-dev-tool", "tool", &TypeFilter::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(results.matches.len(), 1);
        assert_eq!(session.latest().unwrap().term, "tool");
    }

    #[tokio::test]
    async fn test_superseded_search_returns_none() {
        let (_root, service) = service_with_project();
        let session = SearchSession::new();
        let filter = TypeFilter::default();

        let stale = service.search_in_project_latest(&session, "-home-dev-tool", "deploy", &filter);
        tokio::pin!(stale);
        // A single poll takes the ticket and parks on the directory scan
        let first_poll = tokio::time::timeout(Duration::ZERO, stale.as_mut()).await;
        assert!(first_poll.is_err());

        let fresh = service
            .search_in_project_latest(&session, "-home-dev-tool", "tool", &filter)
            .await
            .unwrap();
        assert!(fresh.is_some());

        assert!(stale.await.unwrap().is_none());
        assert_eq!(session.latest().unwrap().term, "tool");
    }

    #[tokio::test]
    async fn test_export_and_backup() {
        let (root, service) = service_with_project();

        let destination = root.path().join("export.json");
        let outcome =
            service.export_conversation("-home-dev-tool", "s1", &destination).await.unwrap();
        assert_eq!(outcome.filename, "export.json");

        let saved = service.open_saved_conversation(&destination).await.unwrap();
        assert_eq!(saved.message_count, 1);

        let report = service
            .backup_project(BackupRequest::new(
                "-home-dev-tool",
                "tool",
                root.path().join("tool.zip"),
            ))
            .await
            .unwrap();
        assert_eq!(report.conversation_count, 1);
        assert!(report.errors.is_empty());
    }
}
