use chrono::Utc;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tracing::{info, warn};

use crate::jobs::job::{JobStatus, ScrapeJob};
use crate::scrape::{ScrapeObserver, ScrapeProgress};

#[derive(Error, Debug)]
pub enum JobError {
    /// Carries the job that is still running, unchanged.
    #[error("Scrape already running")]
    AlreadyRunning(ScrapeJob),
}

#[derive(Debug, Default)]
struct TrackerState {
    next_id: u64,
    current: Option<ScrapeJob>,
}

/// Holds the single current (or most recent) scrape job.
///
/// At most one job is `Running`. A new job can only begin once the current
/// one is terminal, and it replaces it. Updates are keyed by job id and are
/// ignored once the job is terminal or no longer current.
#[derive(Debug, Default)]
pub struct JobTracker {
    state: RwLock<TrackerState>,
}

impl JobTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, TrackerState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, TrackerState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a new running job, unless one is already running.
    pub fn begin(&self, categories: Vec<String>) -> Result<ScrapeJob, JobError> {
        let mut state = self.write();
        if let Some(current) = &state.current
            && current.status == JobStatus::Running
        {
            return Err(JobError::AlreadyRunning(current.clone()));
        }

        state.next_id += 1;
        let job = ScrapeJob::new(state.next_id, categories);
        state.current = Some(job.clone());
        info!(job_id = job.id, categories = ?job.categories, "scrape job started");
        Ok(job)
    }

    pub fn current(&self) -> Option<ScrapeJob> {
        self.read().current.clone()
    }

    pub fn record_total(&self, id: u64, total: usize) {
        self.update_running(id, |job| job.total = Some(total));
    }

    pub fn record_progress(&self, id: u64, progress: &ScrapeProgress) {
        self.update_running(id, |job| {
            job.total = Some(progress.total);
            job.processed = progress.processed;
            job.last_title = Some(progress.title.clone());
        });
    }

    pub fn complete(&self, id: u64) {
        let applied = self.update_running(id, |job| {
            job.status = JobStatus::Completed;
            job.finished_at = Some(Utc::now());
        });
        if applied {
            info!(job_id = id, "scrape job completed");
        }
    }

    pub fn fail(&self, id: u64, error: impl Into<String>) {
        let error = error.into();
        let applied = self.update_running(id, |job| {
            job.status = JobStatus::Failed;
            job.finished_at = Some(Utc::now());
            job.error = Some(error.clone());
        });
        if applied {
            warn!(job_id = id, %error, "scrape job failed");
        }
    }

    fn update_running(&self, id: u64, apply: impl FnOnce(&mut ScrapeJob)) -> bool {
        let mut state = self.write();
        match state.current.as_mut() {
            Some(job) if job.id == id && !job.status.is_terminal() => {
                apply(job);
                true
            }
            _ => false,
        }
    }

    /// Observer that feeds a scrape's progress into job `id`.
    pub fn observer(&self, id: u64) -> JobProgress<'_> {
        JobProgress { tracker: self, id }
    }
}

pub struct JobProgress<'a> {
    tracker: &'a JobTracker,
    id: u64,
}

impl ScrapeObserver for JobProgress<'_> {
    fn on_start(&self, total: usize) {
        self.tracker.record_total(self.id, total);
    }

    fn on_progress(&self, progress: &ScrapeProgress) {
        self.tracker.record_progress(self.id, progress);
    }
}
