pub mod assets;
pub mod client;
pub mod errors;
pub mod types;

pub use assets::download_icon;
pub use client::{USER_AGENT, WikiClient, build_http_client};
pub use errors::FetchError;
