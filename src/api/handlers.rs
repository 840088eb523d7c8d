use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::io::ErrorKind;
use tracing::info;

use crate::{
    api::{
        dtos::{
            CharacterQuery, ErrorResponse, JobStatusResponse, ScrapeConflictResponse, ScrapeQuery,
            ScrapeStartedResponse, StatusResponse, parse_categories,
        },
        error::{ApiError, ApiResult},
    },
    app_state::AppState,
    models::Character,
    store::{StoreError, clean_data, load_characters},
};

#[utoipa::path(
    post,
    path = "/scrape",
    tag = "scrape",
    params(ScrapeQuery),
    responses(
        (status = 202, description = "Scrape started", body = ScrapeStartedResponse),
        (status = 409, description = "Scrape already running", body = ScrapeConflictResponse)
    )
)]
pub async fn start_scrape(
    State(state): State<AppState>,
    Query(query): Query<ScrapeQuery>,
) -> ApiResult<(StatusCode, Json<ScrapeStartedResponse>)> {
    let categories = parse_categories(query.categories.as_deref());
    let started = state.runner.start(categories)?;

    Ok((
        StatusCode::ACCEPTED,
        Json(ScrapeStartedResponse {
            status: "started".to_string(),
            job: started.job,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/scrape/status",
    tag = "scrape",
    responses(
        (status = 200, description = "Current or most recent scrape job", body = JobStatusResponse)
    )
)]
pub async fn scrape_status(State(state): State<AppState>) -> Json<JobStatusResponse> {
    Json(JobStatusResponse {
        job: state.jobs.current(),
    })
}

#[utoipa::path(
    post,
    path = "/clean",
    tag = "scrape",
    responses(
        (status = 200, description = "Character data and assets removed", body = StatusResponse)
    )
)]
pub async fn clean(State(state): State<AppState>) -> ApiResult<Json<StatusResponse>> {
    clean_data(&state.data).await?;
    info!(data_dir = %state.data.root().display(), "data cleaned");
    Ok(Json(StatusResponse {
        status: "ok".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/characters",
    tag = "characters",
    params(CharacterQuery),
    responses(
        (status = 200, description = "Character list", body = [Character])
    )
)]
pub async fn list_characters(
    State(state): State<AppState>,
    Query(query): Query<CharacterQuery>,
) -> ApiResult<Json<Vec<Character>>> {
    let characters = load_characters(&state.data).await?;
    Ok(Json(
        characters.into_iter().filter(|c| query.matches(c)).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/characters/{slug}",
    tag = "characters",
    params(("slug" = String, Path, description = "Character slug")),
    responses(
        (status = 200, description = "Character", body = Character),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_character(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Character>> {
    load_characters(&state.data)
        .await?
        .into_iter()
        .find(|c| c.slug == slug)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Character not found".to_string()))
}

#[utoipa::path(
    get,
    path = "/assets/{filename}",
    tag = "characters",
    params(("filename" = String, Path, description = "Icon file name, e.g. imp.png")),
    responses(
        (status = 200, description = "Asset file"),
        (status = 400, description = "Invalid file name", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_asset(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<Response> {
    if filename.is_empty()
        || filename.contains(['/', '\\'])
        || filename == "."
        || filename.contains("..")
    {
        return Err(ApiError::BadRequest("Invalid asset name".to_string()));
    }

    let path = state.data.assets_dir().join(&filename);
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ApiError::NotFound("Asset not found".to_string()));
        }
        Err(source) => return Err(StoreError::Io { path, source }.into()),
    };

    Ok(([(header::CONTENT_TYPE, content_type_for(&filename))], bytes).into_response())
}

pub async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

/// Media type from a file name's extension.
pub fn content_type_for(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}
