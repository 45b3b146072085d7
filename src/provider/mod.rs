mod client;
mod dto;
pub mod handlers;

use async_trait::async_trait;
use axum::Router;

use crate::error::ApiError;
use crate::state::AppState;

pub use client::SpoonacularClient;
pub use dto::{RecipeDetail, RecipeSummary, SearchRequest};

/// Outbound gateway to the third-party recipe API. Behind a trait so
/// handlers can be exercised against a fake.
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Up to 50 candidates ranked by ingredient overlap.
    async fn search_by_ingredients(
        &self,
        ingredients: &[String],
    ) -> Result<Vec<RecipeSummary>, ApiError>;

    async fn recipe_detail(&self, recipe_id: i64) -> Result<RecipeDetail, ApiError>;
}

pub fn router() -> Router<AppState> {
    handlers::routes()
}
