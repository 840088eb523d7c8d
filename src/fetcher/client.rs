use crate::fetcher::{
    errors::FetchError,
    types::{CategoryMembersResponse, ParseResponse, continuation_value},
};
use reqwest::{Client, ClientBuilder, Response};
use std::collections::{BTreeMap, HashSet};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

pub const USER_AGENT: &str = "FishermanBot/1.0";
/// Largest page size the categorymembers list accepts for normal clients.
const CATEGORY_PAGE_LIMIT: &str = "500";

/// Build the shared HTTP client. Only the connect phase is bounded; request
/// duration is left to reqwest's defaults.
pub fn build_http_client() -> Result<Client, FetchError> {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| FetchError::Unknown(e.to_string()))
}

/// Client for one MediaWiki installation.
#[derive(Debug, Clone)]
pub struct WikiClient {
    http: Client,
    base_url: Url,
    api_url: Url,
}

impl WikiClient {
    pub fn new(base_url: Url) -> Result<Self, FetchError> {
        let http = build_http_client()?;
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: Client, base_url: Url) -> Result<Self, FetchError> {
        let api_url = Url::parse(&format!("{}/api.php", origin(&base_url)))?;
        Ok(Self {
            http,
            base_url,
            api_url,
        })
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Canonical article URL for a title, e.g. `<base>/wiki/Fortune_Teller`.
    pub fn page_url(&self, title: &str) -> String {
        format!("{}/wiki/{}", origin(&self.base_url), title.replace(' ', "_"))
    }

    /// List every page title in `Category:<category>`, following `continue`
    /// tokens until the listing is exhausted. Titles are returned in listing
    /// order without duplicates.
    #[instrument(skip(self))]
    pub async fn fetch_category_members(&self, category: &str) -> Result<Vec<String>, FetchError> {
        let mut params: BTreeMap<String, String> = BTreeMap::from([
            ("action".to_string(), "query".to_string()),
            ("format".to_string(), "json".to_string()),
            ("list".to_string(), "categorymembers".to_string()),
            ("cmtitle".to_string(), format!("Category:{category}")),
            ("cmlimit".to_string(), CATEGORY_PAGE_LIMIT.to_string()),
            ("origin".to_string(), "*".to_string()),
        ]);

        let mut titles = Vec::new();
        let mut seen = HashSet::new();
        let mut requests = 0usize;

        loop {
            requests += 1;
            let response = self.get_api(&params).await?;
            let response = ensure_success(response, || "Category fetch".to_string())?;
            let payload: CategoryMembersResponse = response
                .json()
                .await
                .map_err(FetchError::from_reqwest_error)?;

            let members = payload.query.map(|q| q.categorymembers).unwrap_or_default();
            for title in members.into_iter().filter_map(|m| m.title) {
                if seen.insert(title.clone()) {
                    titles.push(title);
                }
            }

            let Some(continuation) = payload.continuation else {
                break;
            };
            for (key, value) in &continuation {
                params.insert(key.clone(), continuation_value(value));
            }
        }

        debug!(requests, members = titles.len(), "category listing exhausted");
        Ok(titles)
    }

    /// Rendered HTML of one page. A response without a text field yields an
    /// empty string.
    #[instrument(skip(self))]
    pub async fn fetch_page_html(&self, title: &str) -> Result<String, FetchError> {
        let params = BTreeMap::from([
            ("action".to_string(), "parse".to_string()),
            ("page".to_string(), title.to_string()),
            ("format".to_string(), "json".to_string()),
            ("prop".to_string(), "text".to_string()),
            ("origin".to_string(), "*".to_string()),
        ]);

        let response = self.get_api(&params).await?;
        let response = ensure_success(response, || format!("Page fetch for {title}"))?;
        let payload: ParseResponse = response
            .json()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        Ok(payload.into_html())
    }

    async fn get_api(&self, params: &BTreeMap<String, String>) -> Result<Response, FetchError> {
        self.http
            .get(self.api_url.clone())
            .query(params)
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)
    }
}

/// Base URL without its trailing slash, so paths can be appended verbatim.
pub fn origin(base_url: &Url) -> &str {
    base_url.as_str().trim_end_matches('/')
}

pub(crate) fn ensure_success(
    response: Response,
    context: impl FnOnce() -> String,
) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(FetchError::Http {
            context: context(),
            status,
        })
    }
}
