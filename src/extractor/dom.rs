//! Small traversal helpers over `scraper` element trees.

use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}

static TD: LazyLock<Selector> = LazyLock::new(|| selector("td"));

/// Concatenated descendant text, trimmed.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// The element itself or its nearest ancestor with one of `names`.
pub fn closest<'a>(element: ElementRef<'a>, names: &[&str]) -> Option<ElementRef<'a>> {
    std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .find(|e| names.contains(&e.value().name()))
}

pub fn next_element_siblings<'a>(
    element: ElementRef<'a>,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element.next_siblings().filter_map(ElementRef::wrap)
}

pub fn element_children<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element.children().filter_map(ElementRef::wrap)
}

pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// `td` cells below `row`, in document order.
pub fn cells<'a>(row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    row.select(&TD).collect()
}

/// Non-empty text, otherwise `None`.
pub fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}
