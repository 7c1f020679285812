//! Cache configuration.

use std::time::Duration;

use vitrina_core::{Result, VitrinaError};

/// TTL por defecto: 5 minutos.
pub const DEFAULT_TTL: Duration = Duration::from_millis(300_000);

/// Intervalo fijo del barrido de entries expiradas: 10 minutos.
pub const SWEEP_INTERVAL: Duration = Duration::from_millis(600_000);

/// Configuracion del cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL aplicado cuando `set` no recibe uno explicito.
    pub default_ttl: Duration,
    /// Periodo del sweeper en background.
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            sweep_interval: SWEEP_INTERVAL,
        }
    }
}

impl CacheConfig {
    /// Builds the configuration from the optional `default_ttl_ms` setting.
    ///
    /// An absent setting falls back to [`DEFAULT_TTL`]; zero is rejected.
    ///
    /// ```
    /// use std::time::Duration;
    /// use vitrina_cache::CacheConfig;
    ///
    /// let config = CacheConfig::from_ttl_millis(None).unwrap();
    /// assert_eq!(config.default_ttl, Duration::from_millis(300_000));
    /// assert!(CacheConfig::from_ttl_millis(Some(0)).is_err());
    /// ```
    pub fn from_ttl_millis(ttl_ms: Option<u64>) -> Result<Self> {
        match ttl_ms {
            None => Ok(Self::default()),
            Some(0) => Err(VitrinaError::validation_error(
                "cache.default_ttl_ms",
                "must be greater than zero",
            )),
            Some(ms) => Ok(Self::default().with_default_ttl(Duration::from_millis(ms))),
        }
    }

    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Overrides the sweep period. Production code keeps [`SWEEP_INTERVAL`].
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}
