use utoipa::OpenApi;

use crate::api::dtos::{
    ErrorResponse, JobStatusResponse, ScrapeConflictResponse, ScrapeStartedResponse,
    StatusResponse,
};
use crate::api::handlers;
use crate::health::{self, HealthResponse};
use crate::jobs::{JobStatus, ScrapeJob};
use crate::models::Character;

#[derive(OpenApi)]
#[openapi(
    info(title = "Blood on the Clocktower API", version = "1.0.0"),
    paths(
        health::health_check,
        handlers::list_characters,
        handlers::get_character,
        handlers::get_asset,
        handlers::start_scrape,
        handlers::scrape_status,
        handlers::clean,
    ),
    components(schemas(
        Character,
        ScrapeJob,
        JobStatus,
        ErrorResponse,
        StatusResponse,
        ScrapeStartedResponse,
        ScrapeConflictResponse,
        JobStatusResponse,
        HealthResponse,
    )),
    tags(
        (name = "health", description = "Liveness"),
        (name = "characters", description = "Scraped character data"),
        (name = "scrape", description = "Background scrape control"),
    )
)]
pub struct ApiDoc;
