use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::ApiError;
use crate::recipes::repo::Recipe;

/// Request body for `POST /save_recipe`. The canonical shape is the
/// optional-owner variant: `user_id` may be absent, and `id` (the provider's
/// recipe id, kept as `source_id`) is likewise optional.
#[derive(Debug, Deserialize)]
pub struct SaveRecipeRequest {
    pub user_id: Option<i64>,
    pub id: Option<i64>,
    pub title: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub steps: Option<Vec<String>>,
    pub image: Option<String>,
}

/// Validated save input handed to the repository.
#[derive(Debug, Clone)]
pub struct SaveRecipeInput {
    pub user_id: Option<i64>,
    pub source_id: Option<i64>,
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub image_url: String,
}

impl SaveRecipeRequest {
    /// Presence check only; the first missing required field is named in
    /// the error.
    pub fn validate(self) -> Result<SaveRecipeInput, ApiError> {
        let title = self
            .title
            .ok_or_else(|| missing("title"))?;
        let ingredients = self.ingredients.ok_or_else(|| missing("ingredients"))?;
        let steps = self.steps.ok_or_else(|| missing("steps"))?;
        let image_url = self.image.ok_or_else(|| missing("image"))?;

        Ok(SaveRecipeInput {
            user_id: self.user_id,
            source_id: self.id,
            title,
            ingredients,
            steps,
            image_url,
        })
    }
}

fn missing(name: &str) -> ApiError {
    ApiError::Validation(format!("Missing required field: {name}"))
}

#[derive(Debug, Serialize)]
pub struct SaveRecipeResponse {
    pub success: bool,
    pub message: String,
    pub recipe_id: i64,
}

#[derive(Debug, Serialize)]
pub struct RecipeListResponse {
    pub success: bool,
    pub recipes: Vec<SavedRecipe>,
}

/// One saved recipe as returned by `GET /user/{id}/recipes`.
#[derive(Debug, Serialize)]
pub struct SavedRecipe {
    pub id: i64,
    pub source_id: Option<i64>,
    pub title: String,
    pub image: Option<String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Recipe> for SavedRecipe {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            source_id: recipe.source_id,
            title: recipe.title,
            image: recipe.image_url,
            ingredients: recipe.ingredients.0,
            steps: recipe.steps.0,
            created_at: recipe.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> SaveRecipeRequest {
        SaveRecipeRequest {
            user_id: Some(1),
            id: Some(716429),
            title: Some("Pasta".into()),
            ingredients: Some(vec!["pasta".into(), "garlic".into()]),
            steps: Some(vec!["Boil.".into()]),
            image: Some("https://img.example/pasta.jpg".into()),
        }
    }

    #[test]
    fn owner_and_source_id_are_optional() {
        let mut req = full_request();
        req.user_id = None;
        req.id = None;
        let input = req.validate().unwrap();
        assert!(input.user_id.is_none());
        assert!(input.source_id.is_none());
        assert_eq!(input.title, "Pasta");
    }

    #[test]
    fn first_missing_required_field_is_named() {
        let mut req = full_request();
        req.ingredients = None;
        req.image = None;
        let err = req.validate().unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: ingredients");
    }

    #[test]
    fn missing_image_is_reported() {
        let mut req = full_request();
        req.image = None;
        let err = req.validate().unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: image");
    }
}
