//! Credential store — outstanding authorization codes and issued access
//! tokens, two independent TTL maps.
//!
//! Process-local by design: a multi-instance deployment needs these maps
//! replaced with a shared store that supports an atomic compare-and-delete
//! for code consumption. The `take_code` contract here is what such a
//! backend must preserve.

use chrono::{DateTime, Utc};

use crate::auth::token::{AccessToken, AuthorizationCode};
use crate::store::ttl::TtlMap;

pub struct CredentialStore {
    codes: TtlMap<AuthorizationCode>,
    tokens: TtlMap<AccessToken>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self {
            codes: TtlMap::new(),
            tokens: TtlMap::new(),
        }
    }

    /// Record a freshly issued authorization code. Called by the
    /// authorization endpoint (an external collaborator) and by the demo
    /// seeding path.
    pub fn issue_code(&self, code: AuthorizationCode) {
        self.codes.insert(code.code.clone(), code);
    }

    /// Consume an authorization code. Exactly one caller gets the record,
    /// expired or not — the exchange flow checks the deadline after
    /// consumption so a matched-but-failed exchange still burns the code.
    pub fn take_code(&self, code: &str) -> Option<AuthorizationCode> {
        self.codes.take(code)
    }

    pub fn insert_token(&self, token: AccessToken) {
        self.tokens.insert(token.token.clone(), token);
    }

    /// Resolve a bearer token string, lazily evicting it when expired.
    pub fn get_token(&self, token: &str, now: DateTime<Utc>) -> Option<AccessToken> {
        self.tokens.get(token, now)
    }

    /// Drop expired entries from both maps.
    pub fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        self.codes.evict_expired(now) + self.tokens.evict_expired(now)
    }

    pub fn outstanding_codes(&self) -> usize {
        self.codes.len()
    }

    pub fn issued_tokens(&self) -> usize {
        self.tokens.len()
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ──────────────────────────────────────────────────────
