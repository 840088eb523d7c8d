use crate::fetcher::WikiClient;
use crate::store::{ASSETS_DIR, StoreError};
use reqwest::header::CONTENT_TYPE;
use std::path::Path;
use tracing::{debug, instrument, warn};
use url::Url;

/// Fetch an icon and write it to `<assets_dir>/<slug>.<ext>`, replacing any
/// previous file of that name.
///
/// Returns the data-root relative path (`assets/<file>`) on success. Upstream
/// failures of any kind yield `Ok(None)`: a character without an icon is still
/// a valid record. Only a failed write is an error.
#[instrument(skip(client, assets_dir))]
pub async fn download_icon(
    client: &WikiClient,
    icon_url: &str,
    assets_dir: &Path,
    slug: &str,
) -> Result<Option<String>, StoreError> {
    let parsed = match Url::parse(icon_url) {
        Ok(url) => url,
        Err(e) => {
            warn!(error = %e, "icon url is not absolute, skipping");
            return Ok(None);
        }
    };

    let response = match client.http().get(parsed.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "icon request failed");
            return Ok(None);
        }
    };
    if !response.status().is_success() {
        warn!(status = %response.status(), "icon download returned non-success status");
        return Ok(None);
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "icon body could not be read");
            return Ok(None);
        }
    };

    let extension = extension_from_path(parsed.path())
        .unwrap_or_else(|| extension_from_content_type(&content_type).to_string());
    let filename = format!("{slug}.{extension}");
    let output_path = assets_dir.join(&filename);

    tokio::fs::write(&output_path, &body)
        .await
        .map_err(|source| StoreError::Io {
            path: output_path.clone(),
            source,
        })?;

    debug!(path = %output_path.display(), bytes = body.len(), "icon written");
    Ok(Some(format!("{ASSETS_DIR}/{filename}")))
}

/// Extension of the last path segment, without the dot.
pub fn extension_from_path(url_path: &str) -> Option<String> {
    let segment = url_path.rsplit('/').next().unwrap_or_default();
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_string())
}

/// Extension for a declared media type; anything unrecognised is stored as png.
pub fn extension_from_content_type(content_type: &str) -> &'static str {
    let content_type = content_type.to_ascii_lowercase();
    if content_type.contains("svg") {
        "svg"
    } else if content_type.contains("png") {
        "png"
    } else if content_type.contains("jpeg") {
        "jpg"
    } else {
        "png"
    }
}
