//! Ability text has no single home on the wiki, so it is resolved through a
//! chain of rules. The first rule that yields non-empty text wins.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::extractor::dom::{
    element_children, has_class, next_element_siblings, selector, text_of,
};
use crate::extractor::fields::extract_field;

static SECTION_HEADINGS: LazyLock<Selector> = LazyLock::new(|| selector("h2, h3"));
static HEADLINE: LazyLock<Selector> = LazyLock::new(|| selector("span.mw-headline"));

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["“]([^"“”]+)["”]"#).expect("valid quote regex"));

type AbilityRule = fn(&Html) -> Option<String>;

/// Resolution order for ability text.
pub const ABILITY_RULES: [(&str, AbilityRule); 3] = [
    ("infobox", from_infobox),
    ("summary-section", from_summary_section),
    ("ability-section", from_ability_section),
];

pub fn extract_ability(document: &Html) -> Option<String> {
    ABILITY_RULES.iter().find_map(|(name, rule)| {
        let text = rule(document)?;
        tracing::trace!(rule = *name, "ability resolved");
        Some(text)
    })
}

fn from_infobox(document: &Html) -> Option<String> {
    extract_field(document, "Ability")
}

/// Paragraphs under the "Summary" heading. The ability is normally the quoted
/// sentence there, so a quoted substring is preferred over the whole text.
fn from_summary_section(document: &Html) -> Option<String> {
    let heading = section_headings(document)
        .into_iter()
        .find(|h| h.id.as_deref() == Some("Summary") || h.title.eq_ignore_ascii_case("summary"))?;

    let text = section_paragraphs(heading.anchor).join(" ");
    if text.is_empty() {
        return None;
    }
    match QUOTED.captures(&text).and_then(|c| c.get(1)) {
        Some(quoted) => Some(quoted.as_str().trim().to_string()),
        None => Some(text),
    }
}

/// All paragraphs under a heading titled "Ability".
fn from_ability_section(document: &Html) -> Option<String> {
    section_headings(document)
        .into_iter()
        .filter(|h| h.title.eq_ignore_ascii_case("ability"))
        .map(|h| section_paragraphs(h.anchor))
        .find(|parts| !parts.is_empty())
        .map(|parts| parts.join(" "))
}

struct SectionHeading<'a> {
    title: String,
    id: Option<String>,
    /// Element whose following siblings make up the section body.
    anchor: ElementRef<'a>,
}

/// Headings in both the `h2 > span.mw-headline` markup and the newer
/// `div.mw-heading > h2[id]` markup, in document order.
fn section_headings(document: &Html) -> Vec<SectionHeading<'_>> {
    document
        .select(&SECTION_HEADINGS)
        .filter_map(|heading| {
            let wrapper = heading_wrapper(heading);
            match heading.select(&HEADLINE).next() {
                Some(span) => Some(SectionHeading {
                    title: text_of(span),
                    id: span.value().id().map(str::to_string),
                    anchor: wrapper.unwrap_or(heading),
                }),
                None => wrapper.map(|wrapper| SectionHeading {
                    title: text_of(heading),
                    id: heading.value().id().map(str::to_string),
                    anchor: wrapper,
                }),
            }
        })
        .collect()
}

/// The `div.mw-heading` around a heading, if any.
fn heading_wrapper(heading: ElementRef<'_>) -> Option<ElementRef<'_>> {
    heading
        .parent()
        .and_then(ElementRef::wrap)
        .filter(|parent| parent.value().name() == "div" && has_class(*parent, "mw-heading"))
}

/// Sections end at the next h2/h3, bare or inside a `div.mw-heading`. Deeper
/// headings stay part of the section in either markup.
fn is_section_boundary(element: ElementRef<'_>) -> bool {
    match element.value().name() {
        "h2" | "h3" => true,
        "div" => {
            has_class(element, "mw-heading")
                && element_children(element).any(|child| matches!(child.value().name(), "h2" | "h3"))
        }
        _ => false,
    }
}

/// Non-empty paragraph texts between `anchor` and the next heading.
fn section_paragraphs(anchor: ElementRef<'_>) -> Vec<String> {
    next_element_siblings(anchor)
        .take_while(|el| !is_section_boundary(*el))
        .filter(|el| el.value().name() == "p")
        .map(text_of)
        .filter(|text| !text.is_empty())
        .collect()
}
