//! Shapes of the MediaWiki API responses we consume. Everything is optional
//! because the API omits whole objects rather than sending empty ones.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Default, Deserialize)]
pub struct CategoryMembersResponse {
    #[serde(default)]
    pub query: Option<CategoryMembersQuery>,
    /// Continuation parameters to merge into the next request.
    #[serde(default, rename = "continue")]
    pub continuation: Option<BTreeMap<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryMembersQuery {
    #[serde(default)]
    pub categorymembers: Vec<CategoryMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryMember {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ParseResponse {
    #[serde(default)]
    pub parse: Option<ParsedPage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ParsedPage {
    #[serde(default)]
    pub text: Option<ParsedText>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ParsedText {
    #[serde(rename = "*", default)]
    pub html: Option<String>,
}

impl ParseResponse {
    /// Rendered HTML, or an empty string when the response has no text.
    pub fn into_html(self) -> String {
        self.parse
            .and_then(|p| p.text)
            .and_then(|t| t.html)
            .unwrap_or_default()
    }
}

/// Render a continuation value as a query parameter. MediaWiki sends strings,
/// but numbers are tolerated.
pub fn continuation_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_response_html() {
        let resp: ParseResponse =
            serde_json::from_value(json!({"parse": {"title": "Imp", "text": {"*": "<p>hi</p>"}}}))
                .unwrap();
        assert_eq!(resp.into_html(), "<p>hi</p>");
    }

    #[test]
    fn test_parse_response_missing_text_is_empty() {
        let resp: ParseResponse =
            serde_json::from_value(json!({"error": {"code": "missingtitle"}})).unwrap();
        assert_eq!(resp.into_html(), "");
    }

    #[test]
    fn test_category_response_with_continuation() {
        let resp: CategoryMembersResponse = serde_json::from_value(json!({
            "batchcomplete": "",
            "continue": {"cmcontinue": "page|4d4159|42", "continue": "-||"},
            "query": {"categorymembers": [{"pageid": 1, "ns": 0, "title": "Imp"}, {"ns": 0}]}
        }))
        .unwrap();

        let members = resp.query.unwrap().categorymembers;
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].title.as_deref(), Some("Imp"));
        assert!(members[1].title.is_none());

        let cont = resp.continuation.unwrap();
        assert_eq!(continuation_value(&cont["cmcontinue"]), "page|4d4159|42");
    }

    #[test]
    fn test_continuation_value_numbers() {
        assert_eq!(continuation_value(&json!(42)), "42");
    }
}
