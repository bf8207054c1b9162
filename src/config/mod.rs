//! Configuration management.
//!
//! Settings are layered, later layers winning:
//!
//! 1. built-in defaults
//! 2. an optional TOML file (see [`file_config`])
//! 3. `UNSPLASH_MCP__<SECTION>__<KEY>` environment variables,
//!    e.g. `UNSPLASH_MCP__SERVER__REST_PORT=9000`
//! 4. the conventional `UNSPLASH_ACCESS_KEY`, `HOST` and `PORT` variables

mod file_config;

pub use config::ConfigError;
pub use file_config::{
    config_file_candidates, find_config_file, CONFIG_DIR_NAME, CONFIG_FILE_NAME,
    LOCAL_CONFIG_FILE,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::unsplash::{Credentials, ACCESS_KEY_ENV, UNSPLASH_API_BASE};
use crate::utils::{validate_api_base, ValidationError};

/// Prefix for structured environment overrides
pub const ENV_PREFIX: &str = "UNSPLASH_MCP";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream API settings
    #[serde(default)]
    pub unsplash: UnsplashConfig,

    /// Listener settings for HTTP mode
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Check values that deserialization alone cannot
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_api_base(&self.unsplash.api_base)?;
        Ok(())
    }
}

/// Upstream API settings
#[derive(Clone, Serialize, Deserialize)]
pub struct UnsplashConfig {
    /// Client-ID access key
    #[serde(default)]
    pub access_key: Option<String>,

    /// Base URL of the Unsplash API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Deadline for one search, request and body read included
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UnsplashConfig {
    fn default() -> Self {
        Self {
            access_key: None,
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl UnsplashConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::from_option(self.access_key.clone())
    }
}

impl fmt::Debug for UnsplashConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnsplashConfig")
            .field("access_key", &self.credentials())
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_api_base() -> String {
    UNSPLASH_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

/// Listener settings for HTTP mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    /// Port for the MCP streamable HTTP endpoint
    #[serde(default = "default_port")]
    pub port: u16,

    /// Port for the REST fallback (`/search`, `/health`)
    #[serde(default = "default_rest_port")]
    pub rest_port: u16,

    /// Name reported by `/health`
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            rest_port: default_rest_port(),
            service_name: default_service_name(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_rest_port() -> u16 {
    9999
}

fn default_service_name() -> String {
    "unsplash-mcp-server".to_string()
}

/// Load configuration from an optional file plus the environment.
///
/// A `path` that does not exist is an error; use [`find_config_file`] to
/// probe the default locations first.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .set_override_option("unsplash.access_key", non_empty_env(ACCESS_KEY_ENV))?
        .set_override_option("server.host", non_empty_env("HOST"))?
        .set_override_option("server.port", non_empty_env("PORT"))?
        .build()?;

    settings.try_deserialize()
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
