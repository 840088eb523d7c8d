use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One scraped character, persisted as `characters/<slug>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub name: String,
    /// Derived from `name` with [`crate::slug::slugify`].
    pub slug: String,
    #[serde(default)]
    pub character_type: Option<String>,
    #[serde(default)]
    pub edition: Option<String>,
    #[serde(default)]
    pub ability: Option<String>,
    /// Path relative to the data root, e.g. `assets/imp.png`.
    #[serde(default)]
    pub icon_path: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
}
