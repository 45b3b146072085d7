use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use time::OffsetDateTime;

use crate::recipes::dto::SaveRecipeInput;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: i64,
    pub source_id: Option<i64>,
    pub title: String,
    pub image_url: Option<String>,
    pub ingredients: Json<Vec<String>>,
    pub steps: Json<Vec<String>>,
    pub user_id: Option<i64>,
    pub created_at: OffsetDateTime,
}

impl Recipe {
    /// Insert a saved recipe inside the caller's transaction; ingredient and
    /// step lists land in JSONB columns.
    pub async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        input: &SaveRecipeInput,
    ) -> sqlx::Result<i64> {
        sqlx::query_scalar(
            r#"
            INSERT INTO recipes (source_id, title, image_url, ingredients, steps, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(input.source_id)
        .bind(&input.title)
        .bind(&input.image_url)
        .bind(Json(&input.ingredients))
        .bind(Json(&input.steps))
        .bind(input.user_id)
        .fetch_one(&mut **tx)
        .await
    }

    /// All recipes saved by one user, oldest first for a stable order.
    pub async fn list_by_user(db: &PgPool, user_id: i64) -> sqlx::Result<Vec<Recipe>> {
        sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, source_id, title, image_url, ingredients, steps, user_id, created_at
            FROM recipes
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }
}
