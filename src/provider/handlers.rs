use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::{get, post},
    Json, Router,
};
use rand::seq::SliceRandom;
use tracing::instrument;

use crate::error::ApiError;
use crate::provider::dto::{RecipeDetail, RecipeSummary, SearchRequest};
use crate::state::AppState;

const SEARCH_RESULT_COUNT: usize = 3;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/search_recipes", post(search_recipes))
        .route("/recipes/:id", get(recipe_detail))
}

#[instrument(skip(state, payload))]
pub async fn search_recipes(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Vec<RecipeSummary>>, ApiError> {
    let Json(body) = payload
        .map_err(|_| ApiError::Validation("ingredients must be a list of strings".into()))?;

    let ingredients = body
        .ingredients
        .filter(|list| !list.is_empty())
        .ok_or_else(|| ApiError::Validation("ingredients must be a non-empty list".into()))?;

    let candidates = state.provider.search_by_ingredients(&ingredients).await?;
    Ok(Json(sample_candidates(candidates)))
}

#[instrument(skip(state))]
pub async fn recipe_detail(
    State(state): State<AppState>,
    recipe_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<RecipeDetail>, ApiError> {
    let Path(recipe_id) =
        recipe_id.map_err(|_| ApiError::Validation("recipe id must be an integer".into()))?;
    let detail = state.provider.recipe_detail(recipe_id).await?;
    Ok(Json(detail))
}

/// Pick up to three candidates uniformly at random without replacement;
/// fewer than three come back as-is.
fn sample_candidates(candidates: Vec<RecipeSummary>) -> Vec<RecipeSummary> {
    if candidates.len() <= SEARCH_RESULT_COUNT {
        return candidates;
    }
    let mut rng = rand::thread_rng();
    candidates
        .choose_multiple(&mut rng, SEARCH_RESULT_COUNT)
        .cloned()
        .collect()
}
