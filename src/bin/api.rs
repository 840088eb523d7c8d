use anyhow::Context as _;
use fisherman::{api, app_state::AppState, config::Config, logging};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init(config.log_json())?;

    let state = AppState::new(&config).context("build wiki client")?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("bind {}", config.bind_addr()))?;
    info!(
        addr = config.bind_addr(),
        data_dir = %config.data_dir().display(),
        wiki = %config.wiki_base_url(),
        "API listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
