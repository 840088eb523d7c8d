use std::sync::Arc;

use crate::config::Config;
use crate::fetcher::{FetchError, WikiClient};
use crate::jobs::{JobTracker, ScrapeRunner};
use crate::store::DataPaths;

#[derive(Clone)]
pub struct AppState {
    pub data: DataPaths,
    pub jobs: Arc<JobTracker>,
    pub runner: ScrapeRunner,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = WikiClient::new(config.wiki_base_url().clone())?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: WikiClient, config: &Config) -> Self {
        let jobs = Arc::new(JobTracker::new());
        let runner = ScrapeRunner::new(jobs.clone(), Arc::new(client), config.data_dir());
        Self {
            data: DataPaths::new(config.data_dir()),
            jobs,
            runner,
        }
    }
}
