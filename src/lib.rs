//! BrandHub Gateway — OAuth2 authorization-code exchange, bearer
//! validation, and MCP tool dispatch for multi-tenant brand data.
//!
//! The router built here is the whole HTTP surface; integration tests
//! drive it directly with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;
pub mod mcp;
pub mod store;

use store::brand::BrandStore;
use store::credentials::CredentialStore;

/// Shared application state passed to handlers.
pub struct AppState {
    pub credentials: CredentialStore,
    pub brand: Arc<dyn BrandStore>,
    pub config: config::Config,
}

/// Build the full gateway router.
pub fn router(state: Arc<AppState>) -> Router {
    let dashboard_origin = state.config.dashboard_origin.clone();

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route("/oauth/token", post(auth::exchange::token_exchange))
        .route("/oauth/userinfo", get(auth::bearer::userinfo))
        .route("/mcp/call", post(mcp::handlers::call_tool))
        .route("/mcp/capabilities", get(mcp::handlers::capabilities))
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer({
            use axum::http::{HeaderName, Method};
            use tower_http::cors::AllowOrigin;
            CorsLayer::new()
                .allow_origin(AllowOrigin::predicate(move |origin, _| {
                    let origin_str = origin.to_str().unwrap_or("");
                    origin_str == dashboard_origin
                        || origin_str.starts_with("http://localhost:")
                        || origin_str.starts_with("http://127.0.0.1:")
                }))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([
                    HeaderName::from_static("content-type"),
                    HeaderName::from_static("authorization"),
                    HeaderName::from_static("x-request-id"),
                ])
        })
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(axum::middleware::from_fn(security_headers_middleware))
}

/// Middleware: injects a unique X-Request-Id into every response.
/// This allows clients to correlate errors with gateway logs.
async fn request_id_middleware(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let req_id = uuid::Uuid::new_v4().to_string();
    let mut resp = next.run(req).await;
    if let Ok(val) = axum::http::HeaderValue::from_str(&req_id) {
        resp.headers_mut().insert("x-request-id", val);
    }
    resp
}

/// Middleware: injects security headers into every response. Token and
/// userinfo responses must never be cached or embedded.
async fn security_headers_middleware(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let mut resp = next.run(req).await;
    let headers = resp.headers_mut();

    headers.insert("X-Content-Type-Options", "nosniff".parse().unwrap());
    headers.insert("X-Frame-Options", "DENY".parse().unwrap());
    headers.insert("Cache-Control", "no-store".parse().unwrap());
    headers.insert("Referrer-Policy", "no-referrer".parse().unwrap());
    headers.remove("Server");

    resp
}
