//! # yc-config
//!
//! Layered runtime configuration: built-in defaults, then an optional `.env`
//! file, then `YELPCAMP_*` environment variables (`__` separates sections,
//! e.g. `YELPCAMP_SERVER__PORT=8080`).

use std::collections::HashMap;

use config::{Config, Environment};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Shortest accepted session secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("session.secret must be at least {MIN_SECRET_LEN} bytes long")]
    WeakSecret,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Directory served under `/static`
    pub static_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// sqlx connection string, e.g. `sqlite:yelp_camp.db`
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize)]
pub struct SessionSettings {
    /// HMAC key for session cookies
    #[serde(deserialize_with = "deserialize_secret")]
    pub secret: SecretString,
    pub cookie_name: String,
    /// Unread flash messages are dropped after this many seconds
    pub flash_ttl_secs: u64,
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        log::info!("Loaded environment from {}", path.display());
    }
}

/// Defaults overlaid with `YELPCAMP_*` variables. When `vars` is given it
/// replaces the process environment.
fn layered(vars: Option<HashMap<String, String>>) -> Result<Config, ConfigError> {
    let env = Environment::with_prefix("YELPCAMP")
        .prefix_separator("_")
        .separator("__")
        .source(vars);

    Ok(Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 3000)?
        .set_default("server.static_dir", "public")?
        .set_default("database.url", "sqlite:yelp_camp.db")?
        .set_default("database.max_connections", 5)?
        .set_default("session.cookie_name", "yelpcamp.sid")?
        .set_default("session.flash_ttl_secs", 600)?
        .add_source(env)
        .build()?)
}

impl Settings {
    /// Loads `.env` (if any) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_env(None)
    }

    pub fn from_env(vars: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let settings: Settings = layered(vars)?.try_deserialize()?;

        if settings.session.secret.expose_secret().len() < MIN_SECRET_LEN {
            return Err(ConfigError::WeakSecret);
        }
        Ok(settings)
    }

    /// `host:port` for the HTTP listener.
    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}

impl DatabaseSettings {
    /// Database section only; tools that never serve HTTP need no secret.
    pub fn load() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_env(None)
    }

    pub fn from_env(vars: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        Ok(layered(vars)?.get::<DatabaseSettings>("database")?)
    }
}
