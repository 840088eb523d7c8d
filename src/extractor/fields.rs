//! Labeled-field lookup across the infobox layouts the wiki has used.

use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::extractor::dom::{cells, closest, has_class, next_element_siblings, non_empty, selector, text_of};

static INFOBOX_HEADERS: LazyLock<Selector> = LazyLock::new(|| selector("table.infobox th"));
static PORTABLE_LABELS: LazyLock<Selector> =
    LazyLock::new(|| selector(".pi-data .pi-data-label"));
static DETAILS_ROWS: LazyLock<Selector> =
    LazyLock::new(|| selector("#character-details table tr"));

/// One way of finding `label -> value` in a page.
pub trait FieldMatcher: Sync {
    fn name(&self) -> &'static str;

    /// `label` is already lowercased.
    fn find(&self, document: &Html, label: &str) -> Option<String>;
}

/// `<table class="infobox"><tr><th>Type</th><td>Demon</td></tr>`
pub struct InfoboxTable;

impl FieldMatcher for InfoboxTable {
    fn name(&self) -> &'static str {
        "infobox-table"
    }

    fn find(&self, document: &Html, label: &str) -> Option<String> {
        document
            .select(&INFOBOX_HEADERS)
            .filter(|th| text_of(*th).to_lowercase() == label)
            .filter_map(|th| closest(th, &["tr"]))
            .find_map(|row| cells(row).first().and_then(|td| non_empty(text_of(*td))))
    }
}

/// `<div class="pi-data"><h3 class="pi-data-label">Type</h3><div class="pi-data-value">Demon</div></div>`
pub struct PortableInfobox;

impl FieldMatcher for PortableInfobox {
    fn name(&self) -> &'static str {
        "portable-infobox"
    }

    fn find(&self, document: &Html, label: &str) -> Option<String> {
        document
            .select(&PORTABLE_LABELS)
            .filter(|el| text_of(*el).to_lowercase() == label)
            .filter_map(|el| next_element_siblings(el).next())
            .filter(|value| has_class(*value, "pi-data-value"))
            .find_map(|value| non_empty(text_of(value)))
    }
}

/// Generic two-column table inside `#character-details`.
pub struct DetailsTable;

impl FieldMatcher for DetailsTable {
    fn name(&self) -> &'static str {
        "details-table"
    }

    fn find(&self, document: &Html, label: &str) -> Option<String> {
        document.select(&DETAILS_ROWS).find_map(|row| {
            let cells = cells(row);
            if cells.len() < 2 || text_of(cells[0]).to_lowercase() != label {
                return None;
            }
            non_empty(text_of(cells[1]))
        })
    }
}

/// Matchers in priority order.
pub static FIELD_MATCHERS: [&dyn FieldMatcher; 3] = [&InfoboxTable, &PortableInfobox, &DetailsTable];

/// First non-empty value for `label` (case-insensitive), trying each matcher
/// in [`FIELD_MATCHERS`] order.
pub fn extract_field(document: &Html, label: &str) -> Option<String> {
    let label = label.trim().to_lowercase();
    FIELD_MATCHERS.iter().find_map(|matcher| {
        let value = matcher.find(document, &label)?;
        tracing::trace!(matcher = matcher.name(), %label, "field matched");
        Some(value)
    })
}
