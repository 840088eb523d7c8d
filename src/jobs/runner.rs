use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{Instrument, info_span};

use crate::fetcher::WikiClient;
use crate::jobs::job::ScrapeJob;
use crate::jobs::tracker::{JobError, JobTracker};
use crate::scrape::{ScrapeError, scrape_characters};

/// Starts scrapes in the background and reports them to a [`JobTracker`].
#[derive(Clone)]
pub struct ScrapeRunner {
    tracker: Arc<JobTracker>,
    client: Arc<WikiClient>,
    data_dir: PathBuf,
}

/// A scrape that was accepted. `handle` resolves once the job is terminal.
pub struct StartedScrape {
    pub job: ScrapeJob,
    pub handle: JoinHandle<()>,
}

impl ScrapeRunner {
    pub fn new(tracker: Arc<JobTracker>, client: Arc<WikiClient>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            tracker,
            client,
            data_dir: data_dir.into(),
        }
    }

    /// Register a job and spawn its scrape. Rejected while another job runs.
    /// There is no way to cancel a started scrape.
    pub fn start(&self, categories: Vec<String>) -> Result<StartedScrape, JobError> {
        let job = self.tracker.begin(categories.clone())?;

        let tracker = self.tracker.clone();
        let client = self.client.clone();
        let data_dir = self.data_dir.clone();
        let id = job.id;

        let work = async move {
            let observer = tracker.observer(id);
            scrape_characters(&client, &data_dir, &categories, &observer)
                .await
                .map(|_| ())
        }
        .instrument(info_span!("scrape_job", id));

        let handle = supervise(self.tracker.clone(), id, work);
        Ok(StartedScrape { job, handle })
    }
}

/// Run `work` on its own task and record its outcome on job `id`. A panic in
/// `work` fails the job, so the slot never stays `running`.
pub(crate) fn supervise<F>(tracker: Arc<JobTracker>, id: u64, work: F) -> JoinHandle<()>
where
    F: Future<Output = Result<(), ScrapeError>> + Send + 'static,
{
    tokio::spawn(async move {
        match tokio::spawn(work).await {
            Ok(Ok(())) => tracker.complete(id),
            Ok(Err(e)) => tracker.fail(id, e.to_string()),
            Err(join) => tracker.fail(id, format!("scrape task aborted: {join}")),
        }
    })
}
