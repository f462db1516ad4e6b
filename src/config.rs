use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Dashboard origin allowed by CORS. Localhost origins are always
    /// allowed for development.
    pub dashboard_origin: String,
    /// Lifetime of authorization codes issued by the demo seed, in seconds.
    /// Set via BRANDHUB_CODE_TTL_SECS. Default: 600.
    pub auth_code_ttl_secs: i64,
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    Ok(Config {
        port: std::env::var("BRANDHUB_PORT")
            .unwrap_or_else(|_| "8090".into())
            .parse()
            .unwrap_or(8090),
        dashboard_origin: std::env::var("DASHBOARD_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        auth_code_ttl_secs: std::env::var("BRANDHUB_CODE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(600),
    })
}
