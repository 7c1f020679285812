//! Configuration layer: typed settings with layered precedence (files → env).
//!
//! Sources, lowest precedence first:
//! - `config/default.{toml,yaml,json}` (optional)
//! - `vitrina.{toml,yaml,json}` in the working directory (optional)
//! - an explicit file, e.g. from `VITRINA_CONFIG_FILE` (required if given)
//! - environment variables `VITRINA__SECTION__KEY`, e.g. `VITRINA__CACHE__DEFAULT_TTL_MS`

use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use vitrina_cache::CacheConfig;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "vitrina";
const ENV_PREFIX: &str = "VITRINA";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8890;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Validated settings for the server binary.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub cache: CacheConfig,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    /// Directiva por defecto de `EnvFilter`; `RUST_LOG` tiene prioridad.
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    server: RawServerSettings,
    cache: RawCacheSettings,
    logging: RawLoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawServerSettings {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCacheSettings {
    default_ttl_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
}

/// Load settings using the configured precedence.
pub fn load(config_file: Option<&Path>) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    Settings::from_config(builder.build()?)
}

impl Settings {
    /// Validates an already-built [`Config`].
    pub fn from_config(config: Config) -> Result<Self, LoadError> {
        let raw: RawSettings = config.try_deserialize()?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let host = raw.server.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = raw.server.port.unwrap_or(DEFAULT_PORT);
        // IP literal sin corchetes: "127.0.0.1" o "::1"
        let ip = host
            .parse::<IpAddr>()
            .map_err(|e| LoadError::invalid("server.host", format!("{host}: {e}")))?;
        let addr = SocketAddr::new(ip, port);

        let cache = CacheConfig::from_ttl_millis(raw.cache.default_ttl_ms)
            .map_err(|e| LoadError::invalid("cache.default_ttl_ms", e.to_string()))?;

        let level = raw
            .logging
            .level
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        EnvFilter::try_new(&level).map_err(|e| LoadError::invalid("logging.level", e.to_string()))?;

        Ok(Self {
            server: ServerSettings { addr },
            cache,
            logging: LoggingSettings { level },
        })
    }
}
