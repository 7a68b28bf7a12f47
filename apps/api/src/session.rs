//! Session lookup. Sessions are issued by the identity provider, which
//! writes `session:{token}` → user id into Redis; this service only reads.

use anyhow::anyhow;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use axum_extra::extract::CookieJar;
use redis::AsyncCommands;
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "session_token";
const SESSION_KEY_PREFIX: &str = "session:";

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the user id bound to `token`, if the session exists.
    async fn resolve(&self, token: &str) -> Result<Option<String>, AppError>;
}

pub struct RedisSessionStore {
    client: redis::Client,
}

impl RedisSessionStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn resolve(&self, token: &str) -> Result<Option<String>, AppError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| anyhow!("Redis connection failed: {e}"))?;

        let user_id = conn
            .get::<_, Option<String>>(format!("{SESSION_KEY_PREFIX}{token}"))
            .await
            .map_err(|e| anyhow!("Session lookup failed: {e}"))?;

        Ok(user_id)
    }
}

/// The authenticated caller. Extracting it rejects with 401 when the request
/// carries no known session token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts).ok_or(AppError::Unauthorized)?;

        match state.sessions.resolve(&token).await? {
            Some(user_id) => Ok(CurrentUser { user_id }),
            None => {
                warn!("Unknown session token, authentication denied");
                Err(AppError::Unauthorized)
            }
        }
    }
}

/// Bearer token first, then the session cookie.
fn session_token(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    CookieJar::from_headers(&parts.headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}
