use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A unit of work tracked by the agent API.
///
/// Every field except `endpoint` is optional on the wire and is left out of
/// the serialized form when absent. Timestamps are carried as the server sent
/// them; they are expected to be ISO-8601 but are never parsed here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Stable identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Base URL the agent reports back to.
    #[serde(default)]
    pub endpoint: String,

    /// Server-assigned lifecycle label, e.g. `scheduled`, `accepted`, `running`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Environment for the job. After accept this is the merged agent + job env.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    /// Upper bound for a single log chunk upload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks_max_size_bytes: Option<u64>,

    /// Process exit code, as text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub signal: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub signal_reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub started_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub finished_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub runnable_at: Option<String>,

    /// Number of log chunks that failed to upload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks_failed_count: Option<u64>,
}

impl Job {
    /// Job id as used in request paths. An unset id formats as `""`.
    pub fn id_or_empty(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

/// Lightweight projection of [`Job`] used for polling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[allow(missing_docs)]
    pub state: Option<String>,
}
