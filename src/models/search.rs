use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::NormalizedMessage;

/// A cross-project search hit, tagged with the conversation it came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMatch {
    #[serde(flatten)]
    pub message: NormalizedMessage,
    pub project_id: String,
    pub conversation_id: String,
    pub conversation_date: DateTime<Utc>,
    pub conversation_preview: String,
}
