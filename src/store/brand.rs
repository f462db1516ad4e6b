//! Brand data collaborator — the read-only seam to the brand/persona/voice
//! storage layer.
//!
//! The gateway never writes brand data; it projects it. Production wires a
//! real backend behind `BrandStore`; `MemoryBrandStore` backs tests and the
//! demo seed.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Full brand profile record as stored by the CRUD layer. List fields may
/// contain empty-string placeholders left behind by the wizard UI; the
/// dispatcher filters those out at projection time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrandProfileRecord {
    pub organization_id: String,
    pub name: String,
    pub tagline: String,
    pub purpose: String,
    pub elevator_pitch: String,
    pub mission: String,
    pub values: Vec<String>,
    pub personality_traits: Vec<String>,
    pub key_messages: Vec<String>,
    pub competitors: Vec<String>,
    pub target_audience: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub goals: Vec<String>,
    pub pain_points: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tone: String,
    pub dos: Vec<String>,
    pub donts: Vec<String>,
}

/// Read-only access to one organization's brand data.
#[async_trait]
pub trait BrandStore: Send + Sync {
    async fn get_brand_profile(
        &self,
        organization_id: &str,
    ) -> anyhow::Result<Option<BrandProfileRecord>>;

    async fn get_personas(&self, organization_id: &str) -> anyhow::Result<Vec<PersonaRecord>>;

    async fn get_brand_voices(&self, organization_id: &str) -> anyhow::Result<Vec<VoiceRecord>>;
}

/// In-memory implementation for tests and local demo runs.
#[derive(Default)]
pub struct MemoryBrandStore {
    profiles: DashMap<String, BrandProfileRecord>,
    personas: DashMap<String, Vec<PersonaRecord>>,
    voices: DashMap<String, Vec<VoiceRecord>>,
}

impl MemoryBrandStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_profile(&self, profile: BrandProfileRecord) {
        self.profiles
            .insert(profile.organization_id.clone(), profile);
    }

    pub fn put_personas(&self, organization_id: &str, personas: Vec<PersonaRecord>) {
        self.personas.insert(organization_id.to_string(), personas);
    }

    pub fn put_voices(&self, organization_id: &str, voices: Vec<VoiceRecord>) {
        self.voices.insert(organization_id.to_string(), voices);
    }
}

#[async_trait]
impl BrandStore for MemoryBrandStore {
    async fn get_brand_profile(
        &self,
        organization_id: &str,
    ) -> anyhow::Result<Option<BrandProfileRecord>> {
        Ok(self.profiles.get(organization_id).map(|p| p.clone()))
    }

    async fn get_personas(&self, organization_id: &str) -> anyhow::Result<Vec<PersonaRecord>> {
        Ok(self
            .personas
            .get(organization_id)
            .map(|p| p.clone())
            .unwrap_or_default())
    }

    async fn get_brand_voices(&self, organization_id: &str) -> anyhow::Result<Vec<VoiceRecord>> {
        Ok(self
            .voices
            .get(organization_id)
            .map(|v| v.clone())
            .unwrap_or_default())
    }
}

// ── Tests ──────────────────────────────────────────────────────
