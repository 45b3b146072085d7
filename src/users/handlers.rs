use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, instrument, warn};

use crate::error::ApiError;
use crate::state::AppState;
use crate::users::{
    dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest, RegisterResponse},
    password::{hash_password, verify_password},
    repo::User,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let Json(body) =
        payload.map_err(|e| ApiError::Validation(format!("invalid request body: {e}")))?;
    let (username, email, password) = body.validate()?;
    let email = email.trim().to_lowercase();

    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }

    // Fail closed: if the uniqueness probe itself faults, treat the name
    // as taken rather than risking a duplicate insert.
    let taken = match User::exists(&state.db, &username, &email).await {
        Ok(taken) => taken,
        Err(e) => {
            error!(error = %e, "uniqueness probe failed, treating as taken");
            true
        }
    };
    if taken {
        warn!(username = %username, "username or email already registered");
        return Err(ApiError::Conflict("Username or email already exists".into()));
    }

    let hash = hash_password(&password)?;

    let mut tx = state.db.begin().await?;
    let user = User::create(&mut tx, &username, &email, &hash).await?;
    tx.commit().await?;

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "User registered successfully".into(),
            user_id: user.id,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(body) =
        payload.map_err(|e| ApiError::Validation(format!("invalid request body: {e}")))?;
    let (username, password) = body.validate()?;

    let user = User::find_by_username(&state.db, &username)
        .await?
        .ok_or_else(|| {
            warn!(username = %username, "login unknown username");
            ApiError::Auth("Invalid username or password".into())
        })?;

    if !verify_password(&password, &user.password_hash)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::Auth("Invalid username or password".into()));
    }

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".into(),
        user: PublicUser::from(user),
    }))
}
