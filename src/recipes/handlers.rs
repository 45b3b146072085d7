use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::recipes::{
    dto::{RecipeListResponse, SaveRecipeRequest, SaveRecipeResponse, SavedRecipe},
    repo::Recipe,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/save_recipe", post(save_recipe))
        .route("/user/:id/recipes", get(list_user_recipes))
}

#[instrument(skip(state, payload))]
pub async fn save_recipe(
    State(state): State<AppState>,
    payload: Result<Json<SaveRecipeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SaveRecipeResponse>), ApiError> {
    let Json(body) =
        payload.map_err(|e| ApiError::Validation(format!("invalid request body: {e}")))?;
    let input = body.validate()?;

    let mut tx = state.db.begin().await?;
    let recipe_id = Recipe::insert(&mut tx, &input).await?;
    tx.commit().await?;

    info!(recipe_id, user_id = ?input.user_id, "recipe saved");
    Ok((
        StatusCode::CREATED,
        Json(SaveRecipeResponse {
            success: true,
            message: "Recipe saved successfully".into(),
            recipe_id,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_user_recipes(
    State(state): State<AppState>,
    user_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<RecipeListResponse>, ApiError> {
    let Path(user_id) =
        user_id.map_err(|_| ApiError::Validation("user id must be an integer".into()))?;
    let recipes = Recipe::list_by_user(&state.db, user_id).await?;
    Ok(Json(RecipeListResponse {
        success: true,
        recipes: recipes.into_iter().map(SavedRecipe::from).collect(),
    }))
}
