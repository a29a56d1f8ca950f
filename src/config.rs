use axum_extra::extract::cookie::Key;
use base64::Engine;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AppError;

/// Environment variables with this prefix override the defaults,
/// e.g. `INTERNHUB_DATABASE_URL`.
pub const ENV_PREFIX: &str = "INTERNHUB_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    /// Base64 of at least 64 random bytes. Sessions do not survive a restart without it.
    pub cookie_secret: Option<String>,
    /// Drop the `Secure` attribute from the session cookie (plain-http development).
    pub insecure_cookie: bool,
    pub max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:internhub.sqlite".to_string(),
            listen_addr: "0.0.0.0:3000".to_string(),
            loglevel: "info".to_string(),
            cookie_secret: None,
            insecure_cookie: false,
            max_connections: 5,
        }
    }
}

impl Config {
    /// Defaults, overridden by `INTERNHUB_*` environment variables.
    pub fn load() -> Result<Self, AppError> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| AppError::Config(e.to_string()))
    }

    /// Key used to encrypt and authenticate the session cookie.
    pub fn cookie_key(&self) -> Result<Key, AppError> {
        let Some(secret) = self.cookie_secret.as_deref() else {
            warn!("cookie_secret not configured; generated an ephemeral key");
            return Ok(Key::generate());
        };
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(secret.trim())
            .map_err(|e| AppError::Config(format!("cookie_secret is not valid base64: {e}")))?;
        Key::try_from(bytes.as_slice()).map_err(|_| {
            AppError::Config("cookie_secret must decode to at least 64 bytes".to_string())
        })
    }
}
