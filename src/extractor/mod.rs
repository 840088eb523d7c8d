pub mod ability;
pub mod dom;
pub mod fields;
pub mod icon;

#[cfg(test)]
mod tests;

pub use ability::extract_ability;
pub use fields::{FIELD_MATCHERS, FieldMatcher, extract_field};
pub use icon::{extract_icon_url, resolve_url};

use scraper::Html;
use url::Url;

/// Everything the scraper needs from one rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageFields {
    pub character_type: Option<String>,
    pub edition: Option<String>,
    pub ability: Option<String>,
    pub icon_url: Option<String>,
}

/// Parse `html` and pull out the character fields. The parsed document is
/// dropped before returning, so callers can hold the result across awaits.
pub fn extract_page(html: &str, base_url: &Url) -> PageFields {
    let document = Html::parse_document(html);

    PageFields {
        character_type: extract_field(&document, "Type"),
        edition: extract_field(&document, "Edition"),
        ability: extract_ability(&document),
        icon_url: extract_icon_url(&document, base_url),
    }
}
