use scraper::Html;
use std::fs;
use url::Url;

use crate::extractor::{
    FIELD_MATCHERS, PageFields, extract_ability, extract_field, extract_icon_url, extract_page,
};

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture")
}

fn wiki_base() -> Url {
    Url::parse("https://wiki.bloodontheclocktower.com").unwrap()
}

#[test]
fn test_classic_infobox_page() {
    let fields = extract_page(&fixture("classic_infobox.html"), &wiki_base());

    assert_eq!(
        fields,
        PageFields {
            character_type: Some("Demon".to_string()),
            edition: Some("Trouble Brewing".to_string()),
            ability: Some(
                "Each night*, choose a player: they die. If you kill yourself this way, a Minion becomes the Imp."
                    .to_string()
            ),
            icon_url: Some(
                "https://wiki.bloodontheclocktower.com/images/thumb/e/e3/Imp.png/150px-Imp.png"
                    .to_string()
            ),
        }
    );
}

#[test]
fn test_infobox_takes_precedence_over_details_table() {
    let document = Html::parse_document(&fixture("classic_infobox.html"));
    assert_eq!(extract_field(&document, "Type").as_deref(), Some("Demon"));
    // Only the details table knows the artist.
    assert_eq!(
        extract_field(&document, "artist").as_deref(),
        Some("Aidan Roberts")
    );
}

#[test]
fn test_portable_infobox_page() {
    let fields = extract_page(&fixture("portable_infobox.html"), &wiki_base());

    assert_eq!(fields.character_type.as_deref(), Some("Townsfolk"));
    // Empty portable value falls through to the details table.
    assert_eq!(fields.edition.as_deref(), Some("Trouble Brewing"));
    assert_eq!(
        fields.ability.as_deref(),
        Some("Each night, you learn that 1 of 2 players is a particular Townsfolk.")
    );
    assert_eq!(
        fields.icon_url.as_deref(),
        Some("https://static.example.org/icons/Washerwoman.png")
    );
}

#[test]
fn test_summary_prefers_quoted_substring() {
    let html = r#"
        <h2><span class="mw-headline" id="Summary">Summary</span></h2>
        <p>The Chef knows how many evil players are sitting next to each other. "You start knowing how many pairs of evil players there are."</p>
        <h2><span class="mw-headline" id="How_to_Run">How to Run</span></h2>
    "#;
    let document = Html::parse_document(html);
    assert_eq!(
        extract_ability(&document).as_deref(),
        Some("You start knowing how many pairs of evil players there are.")
    );
}

#[test]
fn test_summary_without_quotes_returns_paragraph_text() {
    let html = r#"
        <h3><span class="mw-headline" id="Summary">Summary</span></h3>
        <p>  Has no ability.  </p>
        <p>Exists for flavour.</p>
        <h3><span class="mw-headline" id="Tips">Tips</span></h3>
    "#;
    let document = Html::parse_document(html);
    assert_eq!(
        extract_ability(&document).as_deref(),
        Some("Has no ability. Exists for flavour.")
    );
}

#[test]
fn test_ability_section_fallback() {
    let document = Html::parse_document(&fixture("ability_section.html"));
    assert_eq!(
        extract_ability(&document).as_deref(),
        Some("Each night, choose a player. They are safe from the Demon tonight.")
    );
}

#[test]
fn test_ability_section_same_in_both_heading_markups() {
    let classic = Html::parse_document(&fixture("ability_section.html"));
    let modern = Html::parse_document(&fixture("ability_section_modern.html"));

    let expected = Some("Each night, choose a player. They are safe from the Demon tonight.");
    assert_eq!(extract_ability(&classic).as_deref(), expected);
    assert_eq!(extract_ability(&modern).as_deref(), expected);
}

#[test]
fn test_first_summary_heading_in_document_order() {
    let html = r#"
        <div class="mw-heading mw-heading2"><h2 id="Summary">Summary</h2></div>
        <p>"Each night, choose a player: they are drunk until dusk."</p>
        <h2><span class="mw-headline" id="Summary_2">Summary</span></h2>
        <p>"You do not know you are the Drunk."</p>
    "#;
    let document = Html::parse_document(html);
    assert_eq!(
        extract_ability(&document).as_deref(),
        Some("Each night, choose a player: they are drunk until dusk.")
    );
}

#[test]
fn test_page_without_fields() {
    let fields = extract_page(&fixture("no_fields.html"), &wiki_base());
    assert_eq!(fields, PageFields::default());
}

#[test]
fn test_empty_html() {
    let fields = extract_page("", &wiki_base());
    assert_eq!(fields, PageFields::default());
}

#[test]
fn test_label_match_is_exact_not_prefix() {
    let html = r#"<table class="infobox"><tr><th>Type of play</th><td>Setup</td></tr></table>"#;
    let document = Html::parse_document(html);
    assert_eq!(extract_field(&document, "Type"), None);
}

#[test]
fn test_matcher_order() {
    let names: Vec<_> = FIELD_MATCHERS.iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["infobox-table", "portable-infobox", "details-table"]);
}

#[test]
fn test_icon_from_details_block_wins() {
    let html = r#"
        <div id="character-details"><img src="/images/details.png"></div>
        <table class="infobox"><tr><td><img src="/images/infobox.png"></td></tr></table>
    "#;
    let document = Html::parse_document(html);
    assert_eq!(
        extract_icon_url(&document, &wiki_base()).as_deref(),
        Some("https://wiki.bloodontheclocktower.com/images/details.png")
    );
}
