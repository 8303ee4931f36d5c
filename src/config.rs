//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

/// Signing secret used when `JWT_SECRET` is unset. Startup logs a warning.
pub const DEV_JWT_SECRET: &str = "inventory-api-dev-secret";

/// Upper bound for every lifetime and interval setting, in seconds (ten years).
pub const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// TTL in seconds applied to every inventory cache entry
    pub cache_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// HS256 secret for access and refresh tokens
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    pub access_token_ttl: u64,
    /// Refresh token lifetime in seconds
    pub refresh_token_ttl: u64,
    /// Whether `/update/:pk` demands a bearer token
    pub update_requires_auth: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 300)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `JWT_SECRET` - Token signing secret (default: development secret)
    /// - `ACCESS_TOKEN_TTL` - Access token lifetime (default: 300)
    /// - `REFRESH_TOKEN_TTL` - Refresh token lifetime (default: 86400)
    /// - `UPDATE_REQUIRES_AUTH` - Require auth on update (default: false);
    ///   accepts `1/0`, `true/false`, `yes/no`, `on/off` in any case
    ///
    /// Lifetimes and the cleanup interval are capped at [`MAX_TTL_SECS`].
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            cache_ttl: parse_secs("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            cleanup_interval: parse_secs("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            jwt_secret: env::var("JWT_SECRET")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.jwt_secret),
            access_token_ttl: parse_secs("ACCESS_TOKEN_TTL").unwrap_or(defaults.access_token_ttl),
            refresh_token_ttl: parse_secs("REFRESH_TOKEN_TTL")
                .unwrap_or(defaults.refresh_token_ttl),
            update_requires_auth: parse_flag("UPDATE_REQUIRES_AUTH")
                .unwrap_or(defaults.update_requires_auth),
        }
    }

    /// Cache TTL as a `Duration`.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// True when the signing secret is the built-in development value.
    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn parse_secs(name: &str) -> Option<u64> {
    parse_var::<u64>(name).map(|secs| {
        if secs > MAX_TTL_SECS {
            warn!(var = name, secs, max = MAX_TTL_SECS, "value capped");
        }
        secs.min(MAX_TTL_SECS)
    })
}

fn parse_flag(name: &str) -> Option<bool> {
    let raw = env::var(name).ok()?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            warn!(var = name, value = %raw, "unrecognized boolean, using default");
            None
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            max_entries: 1000,
            cache_ttl: 300,
            cleanup_interval: 1,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            access_token_ttl: 300,
            refresh_token_ttl: 86_400,
            update_requires_auth: false,
        }
    }
}
