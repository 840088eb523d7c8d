use std::path::PathBuf;

use clap::Parser;
use fisherman::{
    config::{Config, ENV_DATA_DIR},
    logging,
    store::{DataPaths, clean_data},
};
use tracing::info;

/// Remove scraped characters, the aggregate list and downloaded assets.
#[derive(Debug, Parser)]
#[command(name = "clean")]
struct Args {
    /// Data root; overrides the environment.
    #[arg(long, env = ENV_DATA_DIR)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(dir) = args.data_dir {
        config = config.with_data_dir(dir);
    }
    logging::init(config.log_json())?;

    clean_data(&DataPaths::new(config.data_dir())).await?;
    info!(data_dir = %config.data_dir().display(), "Cleaned");
    Ok(())
}
