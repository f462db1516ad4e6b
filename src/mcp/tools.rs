//! Tool dispatcher — the fixed set of read-only brand-data projections
//! exposed to MCP clients.
//!
//! Tool names form a closed enum; unrecognized names are rejected at the
//! boundary as a contract violation before any data is touched. Every tool
//! loads the organization's brand profile first, so "no profile" (404) is
//! cleanly distinct from "unknown tool" (500).

use std::str::FromStr;

use serde_json::{json, Map, Value};

use crate::errors::McpError;
use crate::store::brand::{BrandProfileRecord, BrandStore};

/// The closed capability set. Adding a tool means adding a variant, a name
/// mapping, and a projection arm — nothing is dispatched by raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    GetBrandProfile,
    GetBrandPersonas,
    GetBrandVoices,
    GetBrandSummary,
    GetBrandVoiceGuide,
    GetTargetAudience,
    Search,
    Fetch,
}

impl ToolName {
    pub const ALL: [ToolName; 8] = [
        ToolName::GetBrandProfile,
        ToolName::GetBrandPersonas,
        ToolName::GetBrandVoices,
        ToolName::GetBrandSummary,
        ToolName::GetBrandVoiceGuide,
        ToolName::GetTargetAudience,
        ToolName::Search,
        ToolName::Fetch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::GetBrandProfile => "get_brand_profile",
            ToolName::GetBrandPersonas => "get_brand_personas",
            ToolName::GetBrandVoices => "get_brand_voices",
            ToolName::GetBrandSummary => "get_brand_summary",
            ToolName::GetBrandVoiceGuide => "get_brand_voice_guide",
            ToolName::GetTargetAudience => "get_target_audience",
            ToolName::Search => "search",
            ToolName::Fetch => "fetch",
        }
    }
}

impl FromStr for ToolName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

/// Execute a tool for an already-authenticated organization.
pub async fn dispatch(
    brand: &dyn BrandStore,
    organization_id: &str,
    tool: ToolName,
    arguments: &Map<String, Value>,
) -> Result<Value, McpError> {
    // Every tool is a projection of the brand profile; without one there
    // is nothing to project.
    let profile = brand
        .get_brand_profile(organization_id)
        .await
        .map_err(McpError::Internal)?
        .ok_or(McpError::ProfileNotFound)?;

    match tool {
        ToolName::GetBrandProfile => Ok(project_profile(&profile)),
        ToolName::GetBrandSummary => Ok(json!({
            "name": profile.name,
            "tagline": profile.tagline,
            "purpose": profile.purpose,
            "values": non_blank(&profile.values),
        })),
        ToolName::GetBrandPersonas => {
            let personas = brand
                .get_personas(organization_id)
                .await
                .map_err(McpError::Internal)?;
            Ok(json!({
                "personas": personas
                    .iter()
                    .map(|p| json!({
                        "id": p.id,
                        "name": p.name,
                        "description": p.description,
                        "goals": non_blank(&p.goals),
                        "pain_points": non_blank(&p.pain_points),
                    }))
                    .collect::<Vec<_>>(),
            }))
        }
        ToolName::GetBrandVoices => {
            let voices = brand
                .get_brand_voices(organization_id)
                .await
                .map_err(McpError::Internal)?;
            Ok(json!({ "voices": project_voices(&voices) }))
        }
        ToolName::GetBrandVoiceGuide => {
            let voices = brand
                .get_brand_voices(organization_id)
                .await
                .map_err(McpError::Internal)?;
            Ok(json!({
                "name": profile.name,
                "personality_traits": non_blank(&profile.personality_traits),
                "voices": project_voices(&voices),
            }))
        }
        ToolName::GetTargetAudience => Ok(json!({
            "name": profile.name,
            "target_audience": profile.target_audience,
        })),
        ToolName::Search => search(&profile, arguments),
        ToolName::Fetch => fetch(&profile, arguments),
    }
}

fn project_profile(profile: &BrandProfileRecord) -> Value {
    json!({
        "name": profile.name,
        "tagline": profile.tagline,
        "purpose": profile.purpose,
        "elevator_pitch": profile.elevator_pitch,
        "mission": profile.mission,
        "values": non_blank(&profile.values),
        "personality_traits": non_blank(&profile.personality_traits),
        "key_messages": non_blank(&profile.key_messages),
        "competitors": non_blank(&profile.competitors),
        "target_audience": profile.target_audience,
    })
}

fn project_voices(voices: &[crate::store::brand::VoiceRecord]) -> Vec<Value> {
    voices
        .iter()
        .map(|v| {
            json!({
                "id": v.id,
                "name": v.name,
                "description": v.description,
                "tone": v.tone,
                "dos": non_blank(&v.dos),
                "donts": non_blank(&v.donts),
            })
        })
        .collect()
}

/// Case-insensitive substring search over tagline, purpose, and each key
/// message, in that order. Results preserve source order; key messages
/// carry their source index.
fn search(profile: &BrandProfileRecord, arguments: &Map<String, Value>) -> Result<Value, McpError> {
    let query = arguments
        .get("query")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| McpError::InvalidArguments("Search query is required".to_string()))?
        .to_lowercase();

    let mut results = Vec::new();

    if profile.tagline.to_lowercase().contains(&query) {
        results.push(json!({ "type": "tagline", "content": profile.tagline }));
    }
    if profile.purpose.to_lowercase().contains(&query) {
        results.push(json!({ "type": "purpose", "content": profile.purpose }));
    }
    for (index, message) in profile.key_messages.iter().enumerate() {
        if !message.trim().is_empty() && message.to_lowercase().contains(&query) {
            results.push(json!({
                "type": "key_message",
                "content": message,
                "index": index,
            }));
        }
    }

    Ok(json!({ "results": results }))
}

/// Single-resource lookup by `type`. Only `brand_profile` is backed by a
/// real projection; other types return an inert acknowledgement without
/// querying data. TODO: back persona/voice types with real projections or
/// reject them outright once the client contract settles.
fn fetch(profile: &BrandProfileRecord, arguments: &Map<String, Value>) -> Result<Value, McpError> {
    let resource_type = arguments
        .get("type")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| McpError::InvalidArguments("Fetch type is required".to_string()))?;

    match resource_type {
        "brand_profile" => Ok(json!({
            "type": "brand_profile",
            "resource": project_profile(profile),
        })),
        other => Ok(json!({
            "type": other,
            "message": format!("Fetch request for '{}' received", other),
        })),
    }
}

/// Drop empty-string placeholders the wizard UI leaves in list fields.
fn non_blank(values: &[String]) -> Vec<&String> {
    values.iter().filter(|v| !v.trim().is_empty()).collect()
}

// ── Tests ──────────────────────────────────────────────────────
