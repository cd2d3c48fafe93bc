use std::cmp::Ordering;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::filters::{TypeFilter, matches_term, normalize_term};
use crate::indexer::list_conversations;
use crate::models::{ConversationMeta, NormalizedMessage, ProjectMatch};
use crate::parsers::deserializers::timestamp_sort_key;
use crate::parsers::read_conversation_async;
use crate::utils::conversation_path;

/// Flat result of a cross-project search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectSearchResults {
    /// Matches sorted by message timestamp, newest first
    pub matches: Vec<ProjectMatch>,
    /// Conversations that were read and searched
    pub conversations_searched: usize,
    /// Conversations skipped because their file could not be read
    pub conversations_failed: usize,
}

impl ProjectSearchResults {
    /// One-line summary, e.g. `Found 3 results across 12 conversations` or
    /// `No results found in 1 conversation`
    pub fn summary(&self) -> String {
        let conversations = plural(self.conversations_searched, "conversation");
        match self.matches.len() {
            0 => format!("No results found in {}", conversations),
            n => format!("Found {} across {}", plural(n, "result"), conversations),
        }
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Search every conversation of a project.
///
/// Conversations are read one at a time in listing order (newest first). A conversation
/// that fails to read is logged and skipped. A blank term yields no matches.
///
/// # Errors
///
/// Only failures listing the project itself are returned: an invalid id
/// ([`Error::InvalidRequest`](crate::error::Error::InvalidRequest)) or a missing project
/// directory ([`Error::NotFound`](crate::error::Error::NotFound)).
pub async fn search_in_project(
    root: &Path,
    project_id: &str,
    term: &str,
    filter: &TypeFilter,
) -> Result<ProjectSearchResults> {
    let conversations = {
        let root = root.to_path_buf();
        let project_id = project_id.to_string();
        tokio::task::spawn_blocking(move || list_conversations(&root, &project_id)).await??
    };

    let Some(needle) = normalize_term(term) else {
        return Ok(ProjectSearchResults::default());
    };

    let mut results = ProjectSearchResults::default();
    for meta in &conversations {
        let path = conversation_path(root, project_id, &meta.id)?;
        match read_conversation_async(&path).await {
            Ok(messages) => {
                results.conversations_searched += 1;
                results.matches.extend(tag_matches(project_id, meta, &messages, &needle, filter));
            }
            Err(e) => {
                warn!("Skipping conversation {} during search: {}", meta.id, e);
                results.conversations_failed += 1;
            }
        }
    }

    sort_newest_first(&mut results.matches);
    debug!("Project search in {}: {}", project_id, results.summary());

    Ok(results)
}

/// Matches from one conversation, tagged with where they came from
pub fn tag_matches(
    project_id: &str,
    meta: &ConversationMeta,
    messages: &[NormalizedMessage],
    needle: &str,
    filter: &TypeFilter,
) -> Vec<ProjectMatch> {
    messages
        .iter()
        .filter(|m| matches_term(m, needle, filter))
        .map(|m| ProjectMatch {
            message: m.clone(),
            project_id: project_id.to_string(),
            conversation_id: meta.id.clone(),
            conversation_date: meta.last_modified,
            conversation_preview: meta.preview.clone(),
        })
        .collect()
}

/// Stable sort by message timestamp, newest first; unparseable timestamps go last
pub fn sort_newest_first(matches: &mut [ProjectMatch]) {
    matches.sort_by(|a, b| {
        let a_key = timestamp_sort_key(a.message.timestamp.as_ref());
        let b_key = timestamp_sort_key(b.message.timestamp.as_ref());
        match (a_key, b_key) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}
