use axum::{extract::State, http::StatusCode, Json};
use na_core::{Error, Result, User};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::auth::{hash_password, verify_password, AuthUser};
use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::AppState;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Emails are compared case-insensitively, so they are stored lowercased.
fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(Error::Validation("a valid email address is required".to_string())),
    }
}

async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::External(e.into()))
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let email = normalize_email(&credentials.email)?;
    if credentials.password.is_empty() {
        return Err(Error::Validation("password must not be empty".to_string()).into());
    }

    let password = credentials.password;
    let hashed = blocking(move || hash_password(&password)).await??;
    let user = state.storage.create_user(&email, &hashed).await?;

    info!("Registered user {}", user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> ApiResult<Json<TokenResponse>> {
    let email = normalize_email(&credentials.email)
        .map_err(|_| ApiError::unauthorized(INVALID_CREDENTIALS))?;
    let user = state
        .storage
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::unauthorized(INVALID_CREDENTIALS))?;

    let password = credentials.password;
    let hashed = user.hashed_password.clone();
    if !blocking(move || verify_password(&password, &hashed)).await? {
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    }

    let access_token = state.tokens.create_token(user.id)?;
    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> ApiResult<Json<User>> {
    state
        .storage
        .get_user(auth.user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::unauthorized("Could not validate credentials"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alice@Example.COM ").unwrap(), "alice@example.com");
        assert!(matches!(normalize_email("alice"), Err(Error::Validation(_))));
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("alice@").is_err());
        assert!(normalize_email("").is_err());
    }
}
