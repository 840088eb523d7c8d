//! Drives one full crawl: category discovery, then each page in discovery
//! order, strictly one at a time.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::extractor::extract_page;
use crate::fetcher::{FetchError, WikiClient, download_icon};
use crate::models::Character;
use crate::slug::slugify;
use crate::store::{DataPaths, StoreError, save_character_list, write_character};

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("No category members found for {categories}")]
    NoMembers { categories: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Progress after a page has been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeProgress {
    pub total: usize,
    pub processed: usize,
    pub title: String,
}

/// Receives progress from a running scrape. Both hooks default to no-ops.
pub trait ScrapeObserver: Send + Sync {
    /// Called once, after discovery, with the number of pages to process.
    fn on_start(&self, _total: usize) {}

    fn on_progress(&self, _progress: &ScrapeProgress) {}
}

pub struct NoopObserver;

impl ScrapeObserver for NoopObserver {}

/// A page title and the category it was first discovered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredTitle {
    pub title: String,
    pub category: String,
}

/// Merge per-category listings into one ordered list. A title seen under an
/// earlier category keeps that category.
pub fn merge_members<I>(listings: I) -> Vec<DiscoveredTitle>
where
    I: IntoIterator<Item = (String, Vec<String>)>,
{
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for (category, titles) in listings {
        for title in titles {
            if seen.insert(title.clone()) {
                merged.push(DiscoveredTitle {
                    title,
                    category: category.clone(),
                });
            }
        }
    }
    merged
}

/// List every requested category. A category whose listing fails or comes
/// back empty is logged and contributes nothing.
pub async fn discover_titles(client: &WikiClient, categories: &[String]) -> Vec<DiscoveredTitle> {
    let mut listings = Vec::with_capacity(categories.len());
    for category in categories {
        let titles = match client.fetch_category_members(category).await {
            Ok(titles) => titles,
            Err(e) => {
                warn!(%category, error = %e, "category listing failed, skipping");
                continue;
            }
        };
        if titles.is_empty() {
            warn!(%category, "No category members found for Category:{category}");
            continue;
        }
        info!(%category, count = titles.len(), "Found {} category members in {category}", titles.len());
        listings.push((category.clone(), titles));
    }
    merge_members(listings)
}

/// Crawl `categories` and write every character under `data_dir`.
///
/// Each record is written as soon as its page is processed; the aggregate
/// `characters.json` is written only after the last page. Any page failure
/// aborts the run and leaves the records written so far in place.
pub async fn scrape_characters(
    client: &WikiClient,
    data_dir: &Path,
    categories: &[String],
    observer: &dyn ScrapeObserver,
) -> Result<Vec<Character>, ScrapeError> {
    let paths = DataPaths::new(data_dir);
    paths.ensure_dirs().await?;
    let assets_dir = paths.assets_dir();

    let members = discover_titles(client, categories).await;
    if members.is_empty() {
        return Err(ScrapeError::NoMembers {
            categories: categories.join(", "),
        });
    }

    let total = members.len();
    observer.on_start(total);
    info!(total, "starting page scrape");

    let mut characters = Vec::with_capacity(total);
    for (index, member) in members.into_iter().enumerate() {
        let html = client.fetch_page_html(&member.title).await?;
        let fields = extract_page(&html, client.base_url());

        let slug = slugify(&member.title);
        let icon_path = match fields.icon_url.as_deref() {
            Some(icon_url) => download_icon(client, icon_url, &assets_dir, &slug).await?,
            None => None,
        };

        let character = Character {
            name: member.title.clone(),
            slug,
            character_type: fields.character_type.or_else(|| Some(member.category.clone())),
            edition: fields.edition.or_else(|| Some(member.category.clone())),
            ability: fields.ability,
            icon_path,
            source_url: Some(client.page_url(&member.title)),
        };

        write_character(&paths, &character).await?;
        debug!(title = %member.title, slug = %character.slug, "character written");
        characters.push(character);

        observer.on_progress(&ScrapeProgress {
            total,
            processed: index + 1,
            title: member.title,
        });
    }

    save_character_list(&paths, &characters).await?;
    info!(count = characters.len(), "scrape complete");
    Ok(characters)
}
