use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use fisherman::{
    config::{Config, ENV_DATA_DIR, default_categories},
    fetcher::WikiClient,
    logging,
    scrape::{ScrapeObserver, ScrapeProgress, scrape_characters},
};
use tracing::info;

/// Scrape character pages from the wiki into the data directory.
#[derive(Debug, Parser)]
#[command(name = "scrape")]
struct Args {
    /// Data root; overrides the environment.
    #[arg(long, env = ENV_DATA_DIR)]
    data_dir: Option<PathBuf>,

    /// A single category to crawl.
    #[arg(long, conflicts_with = "categories")]
    category: Option<String>,

    /// Comma-separated categories to crawl.
    #[arg(long, value_delimiter = ',')]
    categories: Vec<String>,
}

impl Args {
    fn categories(&self) -> Vec<String> {
        let requested: Vec<String> = self
            .category
            .iter()
            .chain(self.categories.iter())
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        if requested.is_empty() {
            default_categories()
        } else {
            requested
        }
    }
}

struct LogProgress;

impl ScrapeObserver for LogProgress {
    fn on_start(&self, total: usize) {
        info!(total, "pages to scrape");
    }

    fn on_progress(&self, progress: &ScrapeProgress) {
        info!(
            processed = progress.processed,
            total = progress.total,
            title = %progress.title,
            "scraped"
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(dir) = &args.data_dir {
        config = config.with_data_dir(dir);
    }
    logging::init(config.log_json())?;

    let client = WikiClient::new(config.wiki_base_url().clone()).context("build wiki client")?;
    let characters = scrape_characters(&client, config.data_dir(), &args.categories(), &LogProgress)
        .await
        .context("scrape failed")?;

    info!(
        count = characters.len(),
        data_dir = %config.data_dir().display(),
        "wrote characters"
    );
    Ok(())
}
