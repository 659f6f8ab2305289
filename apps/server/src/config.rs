use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

/// Per-client request budget applied to every `/api` route.
#[derive(Clone, Debug)]
pub struct RateLimitConfig {
    /// Requests allowed per window. Zero disables rate limiting.
    pub max_requests: u32,
    pub window: Duration,
    /// Key clients on `X-Forwarded-For` / `Forwarded` instead of the peer
    /// address. Only for deployments behind a proxy that sets those headers.
    pub trust_proxy: bool,
}

impl RateLimitConfig {
    pub fn disabled() -> Self {
        Self {
            max_requests: 0,
            window: Duration::from_secs(900),
            trust_proxy: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.max_requests > 0 && !self.window.is_zero()
    }
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    /// Raw `FT_JWT_SECRET`; a random secret is generated when absent.
    pub jwt_secret: Option<String>,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub rate_limit: RateLimitConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("FT_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3001".to_string())
            .parse()
            .context("Invalid FT_LISTEN_ADDR")?;
        let db_path = std::env::var("FT_DB_PATH").unwrap_or_else(|_| "./db/fintrack.db".into());
        let jwt_secret = std::env::var("FT_JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let cors_allow = std::env::var("FT_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("FT_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let max_requests: u32 = std::env::var("FT_RATE_LIMIT_MAX")
            .unwrap_or_else(|_| "100".into())
            .parse()
            .context("Invalid FT_RATE_LIMIT_MAX")?;
        let window_secs: u64 = std::env::var("FT_RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| "900".into())
            .parse()
            .context("Invalid FT_RATE_LIMIT_WINDOW_SECS")?;
        let trust_proxy = std::env::var("FT_TRUST_PROXY")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Ok(Self {
            listen_addr,
            db_path,
            jwt_secret,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            rate_limit: RateLimitConfig {
                max_requests,
                window: Duration::from_secs(window_secs),
                trust_proxy,
            },
        })
    }
}
