pub mod api;
pub mod app_state;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod jobs;
pub mod logging;
pub mod models;
pub mod scrape;
pub mod slug;
pub mod store;
