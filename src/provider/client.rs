use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::provider::dto::{RecipeDetail, RecipeSummary};
use crate::provider::RecipeProvider;

const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";

// Single attempt, no retry; the timeout is the only safety margin.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Spoonacular-backed implementation of [`RecipeProvider`].
pub struct SpoonacularClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

/// Raw shape of `GET /recipes/{id}/information`.
#[derive(Debug, Deserialize)]
struct InformationResponse {
    id: i64,
    title: String,
    image: Option<String>,
    #[serde(default, rename = "extendedIngredients")]
    extended_ingredients: Vec<ExtendedIngredient>,
    #[serde(default)]
    instructions: Option<String>,
    #[serde(default, rename = "analyzedInstructions")]
    analyzed_instructions: Vec<AnalyzedInstruction>,
}

#[derive(Debug, Deserialize)]
struct ExtendedIngredient {
    original: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnalyzedInstruction {
    #[serde(default)]
    steps: Vec<InstructionStep>,
}

#[derive(Debug, Deserialize)]
struct InstructionStep {
    step: String,
}

impl SpoonacularClient {
    pub fn new(api_key: Option<String>) -> anyhow::Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        api_key: Option<String>,
        base_url: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key,
        })
    }

    fn require_key(&self) -> Result<&str, ApiError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ApiError::Config("SPOONACULAR_API_KEY is not configured".into()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("recipe provider unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, %url, "provider returned non-success status");
            return Err(ApiError::Upstream(format!(
                "recipe provider returned {status}: {body}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Upstream(format!("invalid provider response: {e}")))
    }
}

#[async_trait]
impl RecipeProvider for SpoonacularClient {
    async fn search_by_ingredients(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<RecipeSummary>, ApiError> {
        let url = format!("{}/recipes/findByIngredients", self.base_url);
        let joined = ingredients.join(",");

        // ranking=1 maximizes used-ingredient overlap; pantry staples are
        // not counted against the match.
        let mut query = vec![
            ("ingredients", joined.as_str()),
            ("number", "50"),
            ("ranking", "1"),
            ("ignorePantry", "true"),
        ];
        if let Some(key) = self.api_key.as_deref() {
            query.push(("apiKey", key));
        }

        let candidates: Vec<RecipeSummary> = self.get_json(&url, &query).await?;
        debug!(count = candidates.len(), "provider search returned candidates");
        Ok(candidates)
    }

    async fn recipe_detail(&self, recipe_id: i64) -> Result<RecipeDetail, ApiError> {
        let key = self.require_key()?;
        let url = format!("{}/recipes/{}/information", self.base_url, recipe_id);
        let query = [("includeNutrition", "false"), ("apiKey", key)];

        let info: InformationResponse = self.get_json(&url, &query).await?;

        let ingredients = info
            .extended_ingredients
            .into_iter()
            .filter_map(|i| i.original.or(i.name))
            .collect();
        let steps = extract_steps(&info.analyzed_instructions, info.instructions.as_deref());

        Ok(RecipeDetail {
            id: info.id,
            title: info.title,
            image: info.image,
            ingredients,
            steps,
        })
    }
}

/// Prefer the structured step list; fall back to the free-text instructions
/// blob as a single step; otherwise no steps at all.
fn extract_steps(analyzed: &[AnalyzedInstruction], instructions: Option<&str>) -> Vec<String> {
    if let Some(first) = analyzed.first() {
        if !first.steps.is_empty() {
            return first.steps.iter().map(|s| s.step.clone()).collect();
        }
    }
    match instructions {
        Some(text) if !text.trim().is_empty() => vec![text.to_string()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> InformationResponse {
        serde_json::from_str(json).expect("valid information response")
    }

    #[test]
    fn structured_steps_win_over_instructions_blob() {
        let info = parse(
            r#"{
                "id": 7,
                "title": "Soup",
                "instructions": "Just boil everything.",
                "analyzedInstructions": [
                    {"steps": [{"number": 1, "step": "Chop."}, {"number": 2, "step": "Boil."}]}
                ]
            }"#,
        );
        let steps = extract_steps(&info.analyzed_instructions, info.instructions.as_deref());
        assert_eq!(steps, vec!["Chop.".to_string(), "Boil.".to_string()]);
    }

    #[test]
    fn instructions_blob_is_a_single_step_fallback() {
        let info = parse(
            r#"{"id": 7, "title": "Soup", "instructions": "Just boil everything."}"#,
        );
        let steps = extract_steps(&info.analyzed_instructions, info.instructions.as_deref());
        assert_eq!(steps, vec!["Just boil everything.".to_string()]);
    }

    #[test]
    fn no_instruction_source_means_empty_steps() {
        let info = parse(r#"{"id": 7, "title": "Soup", "instructions": "  "}"#);
        let steps = extract_steps(&info.analyzed_instructions, info.instructions.as_deref());
        assert!(steps.is_empty());
    }

    #[test]
    fn ingredient_display_strings_prefer_original() {
        let info = parse(
            r#"{
                "id": 7,
                "title": "Soup",
                "extendedIngredients": [
                    {"original": "2 ripe tomatoes", "name": "tomato"},
                    {"name": "basil"}
                ]
            }"#,
        );
        let names: Vec<String> = info
            .extended_ingredients
            .into_iter()
            .filter_map(|i| i.original.or(i.name))
            .collect();
        assert_eq!(names, vec!["2 ripe tomatoes".to_string(), "basil".to_string()]);
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let client = SpoonacularClient::new(None).unwrap();
        let err = client.require_key().unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }
}
