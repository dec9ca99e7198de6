use anyhow::Result;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upstreams: UpstreamConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

/// The two fixed search backends being compared, plus the request tuning
/// shared by both sides.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Base `api.php` URL for the left (baseline) backend.
    pub left_url: String,
    /// Base `api.php` URL for the right (experimental) backend.
    pub right_url: String,
    /// Max results requested per search list (generator and direct).
    pub search_limit: u32,
    /// Namespace both searches are constrained to (6 = File:).
    pub search_namespace: u32,
    /// Requested thumbnail width in pixels.
    pub thumb_width: u32,
    /// Per-upstream-call timeout in seconds.
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            upstreams: UpstreamConfig {
                left_url: env::var("UPSTREAM_LEFT_URL").unwrap_or_else(|_| {
                    "https://commons-defaults-relforge.wmflabs.org/w/api.php".to_string()
                }),
                right_url: env::var("UPSTREAM_RIGHT_URL").unwrap_or_else(|_| {
                    "https://commons-img-qual-relforge.wmflabs.org/w/api.php".to_string()
                }),
                search_limit: env::var("SEARCH_LIMIT")
                    .unwrap_or_else(|_| "20".to_string())
                    .parse()?,
                search_namespace: env::var("SEARCH_NAMESPACE")
                    .unwrap_or_else(|_| "6".to_string())
                    .parse()?,
                thumb_width: env::var("THUMB_WIDTH")
                    .unwrap_or_else(|_| "600".to_string())
                    .parse()?,
                timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()?,
            },
        })
    }
}
