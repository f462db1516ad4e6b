use std::net::SocketAddr;
use std::sync::Arc;

use chrono::{Duration, Utc};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use brandhub::auth::token::AuthorizationCode;
use brandhub::store::brand::{
    BrandProfileRecord, MemoryBrandStore, PersonaRecord, VoiceRecord,
};
use brandhub::store::credentials::CredentialStore;
use brandhub::{cli, config, router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "brandhub=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = config::load()?;
    let args = cli::Cli::parse();

    let result = match args.command {
        Some(cli::Commands::Serve { port, seed_demo }) => run_server(cfg, port, seed_demo).await,
        None => {
            let port = cfg.port;
            run_server(cfg, port, false).await
        }
    };

    if let Err(ref e) = result {
        eprintln!("Error: {:?}", e);
    }
    result
}

async fn run_server(cfg: config::Config, port: u16, seed_demo: bool) -> anyhow::Result<()> {
    let credentials = CredentialStore::new();
    let brand = MemoryBrandStore::new();

    if seed_demo {
        seed_demo_data(&credentials, &brand, cfg.auth_code_ttl_secs);
    }

    let state = Arc::new(AppState {
        credentials,
        brand: Arc::new(brand),
        config: cfg,
    });

    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("BrandHub gateway listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load a demo organization, profile, and authorization code so the full
/// code → token → tool-call flow can be exercised locally.
fn seed_demo_data(credentials: &CredentialStore, brand: &MemoryBrandStore, code_ttl_secs: i64) {
    let org = "demo-org";

    brand.put_profile(BrandProfileRecord {
        organization_id: org.into(),
        name: "Acme Coffee".into(),
        tagline: "Wake up to better mornings".into(),
        purpose: "Make great coffee accessible without waste".into(),
        elevator_pitch: "Great coffee, zero waste, delivered weekly".into(),
        mission: "Roast responsibly".into(),
        values: vec!["Quality".into(), "Sustainability".into()],
        personality_traits: vec!["Warm".into(), "Direct".into()],
        key_messages: vec![
            "Freshly roasted every week".into(),
            "Carbon-neutral delivery".into(),
        ],
        competitors: vec!["BigBean".into()],
        target_audience: "Urban commuters who care about sourcing".into(),
    });
    brand.put_personas(
        org,
        vec![PersonaRecord {
            id: "p1".into(),
            name: "Busy Commuter".into(),
            description: "Grabs coffee on the way to work".into(),
            goals: vec!["Fast service".into()],
            pain_points: vec!["Long queues".into()],
        }],
    );
    brand.put_voices(
        org,
        vec![VoiceRecord {
            id: "v1".into(),
            name: "Friendly Barista".into(),
            description: "Warm and direct".into(),
            tone: "casual".into(),
            dos: vec!["Use first names".into()],
            donts: vec!["Jargon".into()],
        }],
    );

    let code = AuthorizationCode {
        code: "demo_code".into(),
        organization_id: org.into(),
        client_id: "demo-client".into(),
        redirect_uri: "http://localhost:3000/callback".into(),
        scope: "brand:read".into(),
        expires_at: Utc::now() + Duration::seconds(code_ttl_secs),
    };
    credentials.issue_code(code);

    tracing::info!(
        organization_id = org,
        "demo data seeded; exchange code 'demo_code' with client_id \
         'demo-client' and redirect_uri 'http://localhost:3000/callback'"
    );
}
