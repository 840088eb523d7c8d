use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, JobStatus::Running)
    }
}

/// Snapshot of a scrape run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeJob {
    pub id: u64,
    pub categories: Vec<String>,
    pub status: JobStatus,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    /// Unknown until category discovery finishes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    pub processed: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeJob {
    pub fn new(id: u64, categories: Vec<String>) -> Self {
        Self {
            id,
            categories,
            status: JobStatus::Running,
            started_at: Utc::now(),
            finished_at: None,
            total: None,
            processed: 0,
            last_title: None,
            error: None,
        }
    }
}
