use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sns_topic_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Response of `GET /categories`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
    #[serde(default)]
    pub count: usize,
}

/// Resolves a category id to its display name.
pub fn category_name<'a>(categories: &'a [Category], category_id: &str) -> Option<&'a str> {
    categories.iter().find(|c| c.category_id == category_id).map(|c| c.name.as_str())
}
