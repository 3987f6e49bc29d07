//! Configuration loader for the `resilience-hub` backend service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). By consolidating configuration logic here, we
//! avoid scattering `env::var` calls throughout the codebase.
use std::{env, net::SocketAddr, time::Duration};

use anyhow::{anyhow, bail, Result};
use axum::http::HeaderValue;

/// Parse an optional environment variable into `$ty`, falling back to a default.
macro_rules! parse_env {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.trim().parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Read an optional string environment variable, treating blank values as unset.
macro_rules! optional_env {
    ($var_name:expr) => {
        env::var($var_name).ok().filter(|v| !v.trim().is_empty())
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Address the HTTP server binds to.
    pub host: String,

    /// TCP port the HTTP server listens on.
    pub port: u16,

    /// Browser origin allowed by the CORS layer.
    pub cors_origin: HeaderValue,

    /// Period of the global sensor ticker.
    pub tick_interval: Duration,

    /// Region that receives the food-security and community streams.
    pub default_region: String,

    /// Bound of each connection's outbound event queue.
    pub client_buffer: usize,

    /// Database connection string, consumed only by external seeding tools.
    pub db_url: Option<String>,

    /// Third-party weather API key, consumed only by the dashboard UI.
    pub weather_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            cors_origin: HeaderValue::from_static("http://localhost:3000"),
            tick_interval: Duration::from_secs(8),
            default_region: "durban".to_string(),
            client_buffer: 64,
            db_url: None,
            weather_api_key: None,
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `HOST` – bind address (default: `0.0.0.0`)
/// - `PORT` – listen port (default: 5000)
/// - `CORS_ORIGIN` – allowed origin (default: `http://localhost:3000`)
/// - `TICK_INTERVAL_SECS` – ticker period in seconds (default: 8)
/// - `DEFAULT_REGION` – region for auxiliary streams (default: `durban`)
/// - `CLIENT_BUFFER` – per-connection queue bound (default: 64)
/// - `DATABASE_URL` – connection string for seeding tools
/// - `WEATHER_API_KEY` – key for the UI weather page
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let defaults = Config::default();

    let host = optional_env!("HOST").unwrap_or(defaults.host);
    let port = parse_env!("PORT", u16, defaults.port);
    let tick_secs = parse_env!("TICK_INTERVAL_SECS", u64, defaults.tick_interval.as_secs());
    let client_buffer = parse_env!("CLIENT_BUFFER", usize, defaults.client_buffer);
    let default_region = optional_env!("DEFAULT_REGION").unwrap_or(defaults.default_region);

    let cors_origin = match optional_env!("CORS_ORIGIN") {
        Some(origin) => HeaderValue::from_str(origin.trim())
            .map_err(|e| anyhow!("Invalid CORS_ORIGIN '{}': {}", origin, e))?,
        None => defaults.cors_origin,
    };

    if tick_secs == 0 {
        bail!("TICK_INTERVAL_SECS must be greater than zero");
    }
    if client_buffer == 0 {
        bail!("CLIENT_BUFFER must be greater than zero");
    }

    Ok(Config {
        host,
        port,
        cors_origin,
        tick_interval: Duration::from_secs(tick_secs),
        default_region,
        client_buffer,
        db_url: optional_env!("DATABASE_URL"),
        weather_api_key: optional_env!("WEATHER_API_KEY"),
    })
}

impl Config {
    /// Resolve `HOST` and `PORT` to the address the server binds to.
    ///
    /// `HOST` may be a hostname (`localhost`), an IPv4 literal, or a bare
    /// IPv6 literal (`::`). The first resolved address wins.
    pub async fn resolve_bind_addr(&self) -> Result<SocketAddr> {
        // ---
        tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|e| anyhow!("Cannot resolve HOST '{}': {}", self.host, e))?
            .next()
            .ok_or_else(|| anyhow!("HOST '{}' resolved to no addresses", self.host))
    }

    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks the database password and the weather API key while showing
    /// all other values that were loaded.
    pub fn log_config(&self) {
        // ---
        let masked_db_url = self
            .db_url
            .as_deref()
            .map_or_else(|| "<unset>".to_string(), mask_db_url);
        let masked_key = self
            .weather_api_key
            .as_deref()
            .map_or_else(|| "<unset>".to_string(), mask_secret);

        tracing::info!("Configuration loaded:");
        tracing::info!("  HOST               : {}", self.host);
        tracing::info!("  PORT               : {}", self.port);
        tracing::info!("  CORS_ORIGIN        : {:?}", self.cors_origin);
        tracing::info!("  TICK_INTERVAL_SECS : {}", self.tick_interval.as_secs());
        tracing::info!("  DEFAULT_REGION     : {}", self.default_region);
        tracing::info!("  CLIENT_BUFFER      : {}", self.client_buffer);
        tracing::info!("  DATABASE_URL       : {}", masked_db_url);
        tracing::info!("  WEATHER_API_KEY    : {}", masked_key);
    }
}

/// Replace the password segment of a connection string with `****`.
fn mask_db_url(db_url: &str) -> String {
    // ---
    if let Some(at_pos) = db_url.rfind('@') {
        if let Some(colon_pos) = db_url[..at_pos].rfind(':') {
            // `scheme://host@...` has no password, only the scheme colon
            if !db_url[colon_pos..].starts_with("://") {
                return format!("{}:****{}", &db_url[..colon_pos], &db_url[at_pos..]);
            }
        }
    }
    db_url.to_string()
}

fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}****")
}
