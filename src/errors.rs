use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors on the OAuth surface (`/oauth/token`, `/oauth/userinfo`).
///
/// Rendered as RFC 6749 `{error, error_description}` bodies. Expired,
/// unknown, consumed, and mismatched codes all collapse to `invalid_grant`,
/// and expired tokens are indistinguishable from unknown ones — the error
/// taxonomy deliberately leaks nothing about credential lifecycle.
#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("unsupported grant type")]
    UnsupportedGrantType,

    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),

    #[error("invalid grant")]
    InvalidGrant,

    #[error("missing or malformed Authorization header")]
    MissingBearer,

    #[error("invalid or expired access token")]
    InvalidToken,

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for OAuthError {
    fn into_response(self) -> Response {
        let (status, error, description) = match &self {
            OAuthError::UnsupportedGrantType => (
                StatusCode::BAD_REQUEST,
                "unsupported_grant_type",
                "only the authorization_code grant type is supported".to_string(),
            ),
            OAuthError::InvalidRequest(desc) => {
                (StatusCode::BAD_REQUEST, "invalid_request", desc.to_string())
            }
            OAuthError::InvalidGrant => (
                StatusCode::BAD_REQUEST,
                "invalid_grant",
                "authorization code is invalid, expired, or already used".to_string(),
            ),
            OAuthError::MissingBearer => (
                StatusCode::UNAUTHORIZED,
                "invalid_request",
                "missing or malformed Authorization header".to_string(),
            ),
            OAuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "invalid_token",
                "access token is invalid or expired".to_string(),
            ),
            OAuthError::Internal(e) => {
                tracing::error!("internal error on OAuth surface: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "server_error",
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error,
            "error_description": description,
        }));

        (status, body).into_response()
    }
}

/// Errors on the MCP surface (`/mcp/call`).
///
/// Rendered as `{success: false, error}`. Unknown tool names are a
/// contract violation between client and server versions and map to 500;
/// a missing brand profile is an ordinary 404.
#[derive(Debug, Error)]
pub enum McpError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("No brand profile found for this organization")]
    ProfileNotFound,

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("{0}")]
    InvalidArguments(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<OAuthError> for McpError {
    fn from(err: OAuthError) -> Self {
        match err {
            OAuthError::Internal(e) => McpError::Internal(e),
            other => McpError::Unauthorized(other.to_string()),
        }
    }
}

impl IntoResponse for McpError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            McpError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            McpError::ProfileNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            McpError::UnknownTool(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            McpError::InvalidArguments(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            McpError::Internal(e) => {
                tracing::error!("internal error on MCP surface: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": message,
        }));

        (status, body).into_response()
    }
}
