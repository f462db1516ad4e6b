//! Credential models and opaque token minting.
//!
//! Access and refresh tokens are 32 random bytes from the OS CSPRNG,
//! hex-encoded behind a type prefix (`bht_` access, `bhr_` refresh) so a
//! leaked string is identifiable without being guessable.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::store::ttl::Expires;

pub const ACCESS_TOKEN_PREFIX: &str = "bht_";
pub const REFRESH_TOKEN_PREFIX: &str = "bhr_";

/// Fixed access-token lifetime, reported as `expires_in`.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 3600;

/// One-time credential minted by the authorization endpoint, bound to the
/// organization, client, and redirect URI it was issued for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationCode {
    pub code: String,
    pub organization_id: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub scope: String,
    pub expires_at: DateTime<Utc>,
}

impl Expires for AuthorizationCode {
    fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// Bearer credential presented on every userinfo / MCP call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub token: String,
    pub organization_id: String,
    pub client_id: String,
    pub scope: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Mint a fresh access/refresh token pair carrying the bindings of a
    /// consumed authorization code.
    pub fn mint(code: &AuthorizationCode, now: DateTime<Utc>) -> Self {
        Self {
            token: mint_opaque(ACCESS_TOKEN_PREFIX),
            organization_id: code.organization_id.clone(),
            client_id: code.client_id.clone(),
            scope: code.scope.clone(),
            refresh_token: mint_opaque(REFRESH_TOKEN_PREFIX),
            expires_at: now + Duration::seconds(ACCESS_TOKEN_TTL_SECS),
        }
    }
}

impl Expires for AccessToken {
    fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// 32 bytes from the OS CSPRNG, hex-encoded behind `prefix`.
pub fn mint_opaque(prefix: &str) -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    format!("{}{}", prefix, hex::encode(bytes))
}

// ── Tests ──────────────────────────────────────────────────────
