//! MCP HTTP surface: tool invocation and unauthenticated capability
//! discovery.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::auth::bearer::validate_bearer;
use crate::errors::McpError;
use crate::mcp::tools::{self, ToolName};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ToolCallRequest {
    pub tool: ToolCall,
}

#[derive(Debug, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

/// POST /mcp/call — authenticate the bearer, then dispatch the named tool
/// against that organization's brand data.
pub async fn call_tool(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<ToolCallRequest>,
) -> Result<Json<Value>, McpError> {
    let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let token = validate_bearer(header, &state.credentials, Utc::now())?;

    // Unknown names never reach the dispatch table.
    let tool = ToolName::from_str(&req.tool.name)
        .map_err(|_| McpError::UnknownTool(req.tool.name.clone()))?;

    tracing::debug!(
        organization_id = %token.organization_id,
        tool = tool.as_str(),
        "dispatching MCP tool call"
    );

    let result = tools::dispatch(
        state.brand.as_ref(),
        &token.organization_id,
        tool,
        &req.tool.arguments,
    )
    .await?;

    Ok(Json(json!({
        "success": true,
        "tool": tool.as_str(),
        "result": result,
    })))
}

/// GET /mcp/capabilities — static tool list and endpoint map for client
/// bootstrapping. No auth: clients call this before they hold a token.
pub async fn capabilities() -> Json<Value> {
    Json(json!({
        "name": "brandhub-mcp",
        "version": env!("CARGO_PKG_VERSION"),
        "tools": ToolName::ALL.iter().map(|t| t.as_str()).collect::<Vec<_>>(),
        "endpoints": {
            "token": "/oauth/token",
            "userinfo": "/oauth/userinfo",
            "call": "/mcp/call",
            "capabilities": "/mcp/capabilities",
        },
    }))
}

// ── Tests ──────────────────────────────────────────────────────
