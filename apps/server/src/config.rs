use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use ecollecto_catalog_api::ClientConfig;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// `None` keeps the tariff table until the process restarts.
    pub tariff_ttl: Option<Duration>,
    pub catalog: ClientConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("ECOLLECTO_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8088".to_string())
            .parse()
            .context("Invalid ECOLLECTO_LISTEN_ADDR")?;
        let cors_allow = parse_origins(
            &std::env::var("ECOLLECTO_CORS_ALLOW_ORIGINS").unwrap_or_else(|_| "*".into()),
        );
        let timeout_ms: u64 = std::env::var("ECOLLECTO_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let tariff_ttl = std::env::var("ECOLLECTO_TARIFF_TTL_SECS")
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        let catalog = ClientConfig::from_env().context("Invalid catalog API configuration")?;

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            tariff_ttl,
            catalog,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
