use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::ApiError;
use crate::users::repo::User;

/// Request body for `POST /register`. Fields are optional at the serde
/// layer so a missing field produces a 400 naming it, not a framework
/// rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<(String, String, String), ApiError> {
        let username = require(self.username, "username")?;
        let email = require(self.email, "email")?;
        let password = require(self.password, "password")?;
        Ok((username, email, password))
    }
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn validate(self) -> Result<(String, String), ApiError> {
        let username = require(self.username, "username")?;
        let password = require(self.password, "password")?;
        Ok((username, password))
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

fn require(field: Option<String>, name: &str) -> Result<String, ApiError> {
    field
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ApiError::Validation(format!("Missing required field: {name}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_names_the_first_missing_field() {
        let body = RegisterRequest {
            username: Some("ana".into()),
            email: None,
            password: Some("p1".into()),
        };
        let err = body.validate().unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: email");
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let body = LoginRequest {
            username: Some("   ".into()),
            password: Some("p1".into()),
        };
        let err = body.validate().unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: username");
    }

    #[test]
    fn complete_register_body_passes() {
        let body = RegisterRequest {
            username: Some("ana".into()),
            email: Some("a@x.com".into()),
            password: Some("p1".into()),
        };
        let (username, email, password) = body.validate().unwrap();
        assert_eq!((username.as_str(), email.as_str(), password.as_str()), ("ana", "a@x.com", "p1"));
    }
}
