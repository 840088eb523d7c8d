#![allow(dead_code)]

use axum::Router;
use serde_json::json;
use std::path::Path;
use url::Url;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param, query_param_is_missing},
};

use fisherman::{api, app_state::AppState, config::Config, fetcher::WikiClient};

pub fn wiki_client(server: &MockServer) -> WikiClient {
    WikiClient::new(Url::parse(&server.uri()).unwrap()).unwrap()
}

pub fn test_config(server: &MockServer, data_dir: &Path) -> Config {
    Config::new("127.0.0.1:0", data_dir, Url::parse(&server.uri()).unwrap())
}

pub fn test_state(server: &MockServer, data_dir: &Path) -> AppState {
    let config = test_config(server, data_dir);
    AppState::with_client(wiki_client(server), &config)
}

pub fn test_app(state: AppState) -> Router {
    api::router(state)
}

pub fn category_body(titles: &[&str]) -> serde_json::Value {
    let members: Vec<_> = titles
        .iter()
        .map(|t| json!({"ns": 0, "title": t}))
        .collect();
    json!({"batchcomplete": "", "query": {"categorymembers": members}})
}

/// Single-page category listing.
pub async fn mount_category(server: &MockServer, category: &str, titles: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/api.php"))
        .and(query_param("list", "categorymembers"))
        .and(query_param("cmtitle", format!("Category:{category}")))
        .and(query_param_is_missing("cmcontinue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(category_body(titles)))
        .mount(server)
        .await;
}

pub async fn mount_category_failure(server: &MockServer, category: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path("/api.php"))
        .and(query_param("list", "categorymembers"))
        .and(query_param("cmtitle", format!("Category:{category}")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub async fn mount_page(server: &MockServer, title: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path("/api.php"))
        .and(query_param("action", "parse"))
        .and(query_param("page", title))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"parse": {"title": title, "text": {"*": html}}})),
        )
        .mount(server)
        .await;
}

pub async fn mount_page_failure(server: &MockServer, title: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path("/api.php"))
        .and(query_param("action", "parse"))
        .and(query_param("page", title))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub async fn mount_icon(server: &MockServer, icon_path: &str, content_type: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(icon_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body.to_vec())
                .insert_header("Content-Type", content_type),
        )
        .mount(server)
        .await;
}

/// Minimal rendered page with a classic infobox.
pub fn infobox_page(character_type: &str, ability: &str, icon_src: Option<&str>) -> String {
    let icon = icon_src
        .map(|src| format!(r#"<tr><td colspan="2"><img src="{src}"></td></tr>"#))
        .unwrap_or_default();
    format!(
        r#"<div class="mw-parser-output"><table class="infobox">{icon}
        <tr><th>Type</th><td>{character_type}</td></tr>
        <tr><th>Ability</th><td>{ability}</td></tr>
        </table></div>"#
    )
}
