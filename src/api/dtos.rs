use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::default_categories;
use crate::jobs::ScrapeJob;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScrapeStartedResponse {
    pub status: String,
    pub job: ScrapeJob,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScrapeConflictResponse {
    pub detail: String,
    pub job: ScrapeJob,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct JobStatusResponse {
    pub job: Option<ScrapeJob>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScrapeQuery {
    /// Comma-separated category names; defaults to every character category.
    pub categories: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CharacterQuery {
    /// Case-insensitive match on `characterType`.
    #[serde(rename = "type")]
    pub character_type: Option<String>,
    /// Case-insensitive match on `edition`.
    pub edition: Option<String>,
}

/// Split `a, b,,c` into trimmed names. Nothing usable means the defaults.
pub fn parse_categories(raw: Option<&str>) -> Vec<String> {
    let categories: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();

    if categories.is_empty() {
        default_categories()
    } else {
        categories
    }
}

fn matches_filter(value: Option<&str>, filter: Option<&str>) -> bool {
    match filter.filter(|f| !f.is_empty()) {
        Some(filter) => value.unwrap_or_default().to_lowercase() == filter.to_lowercase(),
        None => true,
    }
}

impl CharacterQuery {
    pub fn matches(&self, character: &crate::models::Character) -> bool {
        matches_filter(
            character.character_type.as_deref(),
            self.character_type.as_deref(),
        ) && matches_filter(character.edition.as_deref(), self.edition.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Character;

    #[test]
    fn test_parse_categories_trims_and_drops_blanks() {
        assert_eq!(
            parse_categories(Some(" Demons, ,Minions,")),
            vec!["Demons".to_string(), "Minions".to_string()]
        );
    }

    #[test]
    fn test_parse_categories_defaults() {
        assert_eq!(parse_categories(None), default_categories());
        assert_eq!(parse_categories(Some(" , ")), default_categories());
    }

    #[test]
    fn test_character_filter_is_case_insensitive() {
        let character = Character {
            name: "Imp".to_string(),
            slug: "imp".to_string(),
            character_type: Some("Demon".to_string()),
            edition: Some("Trouble Brewing".to_string()),
            ability: None,
            icon_path: None,
            source_url: None,
        };

        let query = CharacterQuery {
            character_type: Some("demon".to_string()),
            edition: Some("TROUBLE BREWING".to_string()),
        };
        assert!(query.matches(&character));

        let query = CharacterQuery {
            character_type: Some("Minion".to_string()),
            edition: None,
        };
        assert!(!query.matches(&character));

        assert!(CharacterQuery::default().matches(&character));
    }
}
