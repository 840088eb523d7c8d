use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

use crate::extractor::dom::selector;
use crate::fetcher::client::origin;

/// Where character art has lived across wiki templates, most specific first.
const ICON_SELECTORS: [&str; 4] = [
    "#character-details img",
    "table.infobox img",
    ".pi-image img",
    "figure img",
];

static COMPILED_ICON_SELECTORS: LazyLock<Vec<Selector>> =
    LazyLock::new(|| ICON_SELECTORS.iter().map(|css| selector(css)).collect());

/// Absolute URL of the page's character icon, if any selector finds an image
/// with a `src`.
pub fn extract_icon_url(document: &Html, base_url: &Url) -> Option<String> {
    COMPILED_ICON_SELECTORS.iter().find_map(|sel| {
        document
            .select(sel)
            .filter_map(|img| img.value().attr("src"))
            .map(str::trim)
            .find(|src| !src.is_empty())
            .map(|src| resolve_url(src, base_url))
    })
}

/// `//host/p` gets `https:`, `/p` is joined to the wiki origin, anything else
/// is returned unchanged.
pub fn resolve_url(url: &str, base_url: &Url) -> String {
    if url.starts_with("//") {
        format!("https:{url}")
    } else if url.starts_with('/') {
        format!("{}{url}", origin(base_url))
    } else {
        url.to_string()
    }
}
