//! Bearer validation — resolves an `Authorization` header to an access
//! token record, and the `/oauth/userinfo` endpoint built on it.
//!
//! `validate_bearer` is a pure function of (header, store, now); its only
//! side effect is lazy eviction of the expired token it just rejected, so
//! calling it on every request cannot accumulate dead entries.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::auth::token::AccessToken;
use crate::errors::OAuthError;
use crate::store::credentials::CredentialStore;
use crate::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Resolve a raw `Authorization` header value to a live access token.
///
/// Expired tokens are evicted by the store lookup and rejected exactly
/// like unknown ones.
pub fn validate_bearer(
    header: Option<&str>,
    store: &CredentialStore,
    now: DateTime<Utc>,
) -> Result<AccessToken, OAuthError> {
    let raw = header.ok_or(OAuthError::MissingBearer)?;
    let token = raw
        .strip_prefix(BEARER_PREFIX)
        .ok_or(OAuthError::MissingBearer)?;

    store.get_token(token, now).ok_or(OAuthError::InvalidToken)
}

#[derive(Debug, Serialize)]
pub struct UserinfoResponse {
    pub sub: String,
    pub name: String,
    pub email: Option<String>,
    pub organization_id: String,
    pub scope: String,
}

/// GET /oauth/userinfo — identity of the organization behind a bearer token.
///
/// `name` is the brand profile's display name when one exists; the gateway
/// holds no user directory, so `email` is always null.
pub async fn userinfo(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<UserinfoResponse>, OAuthError> {
    let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let token = validate_bearer(header, &state.credentials, Utc::now())?;

    let name = state
        .brand
        .get_brand_profile(&token.organization_id)
        .await
        .map_err(OAuthError::Internal)?
        .map(|p| p.name)
        .unwrap_or_else(|| token.organization_id.clone());

    Ok(Json(UserinfoResponse {
        sub: token.organization_id.clone(),
        name,
        email: None,
        organization_id: token.organization_id,
        scope: token.scope,
    }))
}

// ── Tests ──────────────────────────────────────────────────────
