//! HTTP boundary: triggers, polls and cleans the scrape, and serves what it
//! produced.

pub mod docs;
pub mod dtos;
pub mod error;
pub mod handlers;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{app_state::AppState, health::health_check};

pub use docs::ApiDoc;
pub use error::{ApiError, ApiResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/scrape", post(handlers::start_scrape))
        .route("/scrape/status", get(handlers::scrape_status))
        .route("/clean", post(handlers::clean))
        .route("/characters", get(handlers::list_characters))
        .route("/characters/{slug}", get(handlers::get_character))
        .route("/assets/{filename}", get(handlers::get_asset))
        .fallback(handlers::route_not_found)
        .method_not_allowed_fallback(handlers::route_not_found)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}
