use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

const DEFAULT_DATABASE_URL: &str = "sqlite://movietrack.db?mode=rwc";
const DEFAULT_API_PREFIX: &str = "/api";
const DEFAULT_API_URL: &str = "http://localhost:3000/api";

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub api_prefix: String,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let api_prefix = normalize_prefix(
            &std::env::var("API_PREFIX").unwrap_or_else(|_| DEFAULT_API_PREFIX.to_string()),
        );

        let request_timeout_secs: u64 =
            std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|s| s.parse().ok()).unwrap_or(30);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            api_prefix,
            request_timeout: Duration::from_secs(request_timeout_secs.max(1)),
        })
    }
}

/// Connection settings for [`crate::client::MovieClient`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), timeout: Duration::from_secs(10) }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads `MOVIETRACK_API_URL` and `MOVIETRACK_CLIENT_TIMEOUT_SECS`
    /// through `lookup`, falling back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("MOVIETRACK_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let timeout_secs: u64 = lookup("MOVIETRACK_CLIENT_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        Self::new(base_url).with_timeout(Duration::from_secs(timeout_secs.max(1)))
    }
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() { String::new() } else { format!("/{trimmed}") }
}
