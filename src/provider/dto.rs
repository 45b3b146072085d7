use serde::{Deserialize, Serialize};

/// One search candidate, already reduced to the fields the client cares
/// about. The provider uses the same camelCase keys we expose, so a single
/// struct covers both directions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    #[serde(default)]
    pub used_ingredient_count: i64,
    #[serde(default)]
    pub missed_ingredient_count: i64,
}

/// Reduced recipe detail returned by `GET /recipes/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeDetail {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

/// Request body for `POST /search_recipes`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub ingredients: Option<Vec<String>>,
}
