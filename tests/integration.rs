//! End-to-end tests for the OAuth exchange → bearer validation → MCP
//! dispatch flow, driving the full router in-process with
//! `tower::ServiceExt::oneshot` — no network, no external services.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use brandhub::auth::token::AuthorizationCode;
use brandhub::config::Config;
use brandhub::store::brand::{BrandProfileRecord, MemoryBrandStore};
use brandhub::store::credentials::CredentialStore;
use brandhub::{router, AppState};

fn test_config() -> Config {
    Config {
        port: 0,
        dashboard_origin: "http://localhost:3000".into(),
        auth_code_ttl_secs: 600,
    }
}

/// Router + state with one organization (`O1`) holding a brand profile and
/// one outstanding authorization code (`C1`) bound to
/// `(client=X, redirect=R1, scope=S)`.
fn app() -> (Router, Arc<AppState>) {
    let credentials = CredentialStore::new();
    credentials.issue_code(AuthorizationCode {
        code: "C1".into(),
        organization_id: "O1".into(),
        client_id: "X".into(),
        redirect_uri: "https://r1.example/cb".into(),
        scope: "S".into(),
        expires_at: Utc::now() + Duration::seconds(600),
    });

    let brand = MemoryBrandStore::new();
    brand.put_profile(BrandProfileRecord {
        organization_id: "O1".into(),
        name: "Acme Coffee".into(),
        tagline: "Wake up to better mornings".into(),
        purpose: "Our elevator pitch is simple: great coffee, zero waste".into(),
        key_messages: vec!["Freshly roasted every week".into()],
        ..Default::default()
    });

    let state = Arc::new(AppState {
        credentials,
        brand: Arc::new(brand),
        config: test_config(),
    });
    (router(state.clone()), state)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn exchange_request(code: &str, client_id: &str, redirect_uri: &str) -> Request<Body> {
    let body = format!(
        "grant_type=authorization_code&code={}&client_id={}&redirect_uri={}",
        code,
        client_id,
        urlencode(redirect_uri)
    );
    Request::post("/oauth/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn urlencode(s: &str) -> String {
    s.replace(':', "%3A").replace('/', "%2F")
}

fn bearer_get(path: &str, token: &str) -> Request<Body> {
    Request::get(path)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

fn tool_call(token: &str, body: Value) -> Request<Body> {
    Request::post("/mcp/call")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ── OAuth flow ─────────────────────────────────────────────────

#[tokio::test]
async fn test_full_code_to_userinfo_flow() {
    let (app, _) = app();

    // Exchange C1 for a token.
    let (status, body) = send(&app, exchange_request("C1", "X", "https://r1.example/cb")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);
    assert_eq!(body["scope"], "S");
    let token = body["access_token"].as_str().unwrap().to_string();
    assert!(token.starts_with("bht_"));
    assert!(body["refresh_token"].as_str().unwrap().starts_with("bhr_"));

    // The token resolves to O1 on userinfo.
    let (status, body) = send(&app, bearer_get("/oauth/userinfo", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sub"], "O1");
    assert_eq!(body["organization_id"], "O1");
    assert_eq!(body["scope"], "S");
    assert_eq!(body["name"], "Acme Coffee");

    // Re-exchanging the consumed code fails.
    let (status, body) = send(&app, exchange_request("C1", "X", "https://r1.example/cb")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_grant");
}

#[tokio::test]
async fn test_exchange_rejects_bad_grant_type_and_missing_fields() {
    let (app, _) = app();

    let req = Request::post("/oauth/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("grant_type=client_credentials&code=C1"))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unsupported_grant_type");

    let req = Request::post("/oauth/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("grant_type=authorization_code&code=C1"))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
    assert!(body["error_description"].is_string());
}

#[tokio::test]
async fn test_exchange_rejects_mismatched_bindings() {
    let (app, _) = app();

    let (status, body) = send(&app, exchange_request("C1", "Y", "https://r1.example/cb")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_grant");

    // The matched-but-failed exchange consumed the code.
    let (status, body) = send(&app, exchange_request("C1", "X", "https://r1.example/cb")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_grant");
}

#[tokio::test]
async fn test_expired_code_rejected_and_removed() {
    let (app, state) = app();
    state.credentials.issue_code(AuthorizationCode {
        code: "OLD".into(),
        organization_id: "O1".into(),
        client_id: "X".into(),
        redirect_uri: "https://r1.example/cb".into(),
        scope: "S".into(),
        expires_at: Utc::now() - Duration::seconds(1),
    });

    let (status, body) = send(&app, exchange_request("OLD", "X", "https://r1.example/cb")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_grant");

    // Gone from the store, not lingering as "expired".
    assert!(state.credentials.take_code("OLD").is_none());
}

#[tokio::test]
async fn test_userinfo_auth_failures() {
    let (app, _) = app();

    let req = Request::get("/oauth/userinfo").body(Body::empty()).unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_request");

    let (status, body) = send(&app, bearer_get("/oauth/userinfo", "bht_unknown")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");
}

// ── MCP dispatch ───────────────────────────────────────────────

async fn obtain_token(app: &Router) -> String {
    let (status, body) = send(app, exchange_request("C1", "X", "https://r1.example/cb")).await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_tool_call_success() {
    let (app, _) = app();
    let token = obtain_token(&app).await;

    let (status, body) = send(
        &app,
        tool_call(&token, json!({ "tool": { "name": "get_brand_summary" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["tool"], "get_brand_summary");
    assert_eq!(body["result"]["name"], "Acme Coffee");
}

#[tokio::test]
async fn test_tool_call_requires_bearer() {
    let (app, _) = app();

    let req = Request::post("/mcp/call")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "tool": { "name": "get_brand_summary" } }).to_string(),
        ))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_missing_profile_vs_unknown_tool() {
    let (app, state) = app();
    let token = obtain_token(&app).await;

    // Unknown tool on an organization that does have a profile: 500.
    let (status, body) = send(
        &app,
        tool_call(&token, json!({ "tool": { "name": "get_brand_secrets" } })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Unknown tool: get_brand_secrets");

    // Known tool on an organization with no profile: 404, distinct.
    state.credentials.issue_code(AuthorizationCode {
        code: "C2".into(),
        organization_id: "O2".into(),
        client_id: "X".into(),
        redirect_uri: "https://r1.example/cb".into(),
        scope: "S".into(),
        expires_at: Utc::now() + Duration::seconds(600),
    });
    let (_, body) = send(&app, exchange_request("C2", "X", "https://r1.example/cb")).await;
    let orphan_token = body["access_token"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        tool_call(&orphan_token, json!({ "tool": { "name": "get_brand_summary" } })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_search_over_http() {
    let (app, _) = app();
    let token = obtain_token(&app).await;

    // "pitch" only appears in the purpose field.
    let (status, body) = send(
        &app,
        tool_call(
            &token,
            json!({ "tool": { "name": "search", "arguments": { "query": "pitch" } } }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let results = body["result"]["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["type"], "purpose");

    // An empty query is an error, not a full dump.
    let (status, body) = send(
        &app,
        tool_call(
            &token,
            json!({ "tool": { "name": "search", "arguments": { "query": "" } } }),
        ),
    )
    .await;
    assert_ne!(status, StatusCode::OK);
    assert_eq!(body["error"], "Search query is required");
}

#[tokio::test]
async fn test_capabilities_needs_no_auth() {
    let (app, _) = app();

    let req = Request::get("/mcp/capabilities")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tools"].as_array().unwrap().len(), 8);
    assert_eq!(body["endpoints"]["call"], "/mcp/call");
}

// ── Response hygiene ───────────────────────────────────────────

#[tokio::test]
async fn test_responses_carry_request_id_and_no_store() {
    let (app, _) = app();

    let req = Request::get("/healthz").body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    assert_eq!(resp.headers()["cache-control"], "no-store");
    assert_eq!(resp.headers()["x-content-type-options"], "nosniff");
}
