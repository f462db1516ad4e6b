//! Token exchange — the `authorization_code` grant.
//!
//! Validation order is fixed: grant type, field presence, code lookup,
//! expiry, client/redirect bindings. The code is consumed atomically before
//! any binding check, so a matched-but-failed exchange burns it and two
//! concurrent exchanges of the same code produce exactly one token.

use std::sync::Arc;

use axum::extract::State;
use axum::{Form, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::token::{AccessToken, ACCESS_TOKEN_TTL_SECS};
use crate::errors::OAuthError;
use crate::store::credentials::CredentialStore;
use crate::AppState;

/// Form body of `POST /oauth/token`. Every field is optional at the type
/// level so missing fields surface as `invalid_request`, not a framework
/// rejection.
#[derive(Debug, Deserialize)]
pub struct TokenExchangeRequest {
    pub grant_type: Option<String>,
    pub code: Option<String>,
    pub redirect_uri: Option<String>,
    pub client_id: Option<String>,
    /// Accepted but not validated — this is a public-client flow; see the
    /// design notes before wiring in a secret check.
    #[allow(dead_code)]
    pub client_secret: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub refresh_token: String,
    pub scope: String,
}

/// POST /oauth/token — exchange a one-time authorization code for tokens.
pub async fn token_exchange(
    State(state): State<Arc<AppState>>,
    Form(req): Form<TokenExchangeRequest>,
) -> Result<Json<TokenResponse>, OAuthError> {
    exchange(&state.credentials, req, Utc::now()).map(Json)
}

/// Core of the exchange, a pure function of (store, request, now).
pub fn exchange(
    store: &CredentialStore,
    req: TokenExchangeRequest,
    now: DateTime<Utc>,
) -> Result<TokenResponse, OAuthError> {
    if req.grant_type.as_deref() != Some("authorization_code") {
        return Err(OAuthError::UnsupportedGrantType);
    }

    let code = require(req.code, "code is required")?;
    let redirect_uri = require(req.redirect_uri, "redirect_uri is required")?;
    let client_id = require(req.client_id, "client_id is required")?;

    // Atomic remove-and-return: one-time use is enforced here, before any
    // other check, so concurrent exchanges admit a single winner.
    let granted = store.take_code(&code).ok_or(OAuthError::InvalidGrant)?;

    // Expiry first, bindings second. Both report invalid_grant, so the
    // ordering is about not validating bindings against a dead code, not
    // about what the caller can observe.
    if now >= granted.expires_at {
        tracing::debug!(client_id = %client_id, "rejected expired authorization code");
        return Err(OAuthError::InvalidGrant);
    }

    if granted.client_id != client_id || granted.redirect_uri != redirect_uri {
        tracing::warn!(
            organization_id = %granted.organization_id,
            "authorization code presented with mismatched client bindings"
        );
        return Err(OAuthError::InvalidGrant);
    }

    let token = AccessToken::mint(&granted, now);
    tracing::info!(
        organization_id = %token.organization_id,
        client_id = %token.client_id,
        "access token issued"
    );
    let response = TokenResponse {
        access_token: token.token.clone(),
        token_type: "Bearer",
        expires_in: ACCESS_TOKEN_TTL_SECS,
        refresh_token: token.refresh_token.clone(),
        scope: token.scope.clone(),
    };
    store.insert_token(token);

    Ok(response)
}

fn require(field: Option<String>, desc: &'static str) -> Result<String, OAuthError> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(OAuthError::InvalidRequest(desc)),
    }
}

// ── Tests ──────────────────────────────────────────────────────
