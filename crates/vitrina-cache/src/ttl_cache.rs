//! In-process TTL cache.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock, duration_to_millis};
use crate::config::CacheConfig;
use crate::metrics::{CacheMetrics, EvictionReason};
use crate::store::{ExpiryStore, Lookup};

/// Snapshot diagnostico del cache.
///
/// Puede incluir entries ya expiradas que todavia no fueron leidas ni barridas.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub keys: Vec<String>,
}

/// Cache de resultados de queries con expiracion por entry.
///
/// Los valores se guardan como `Arc<V>` y nunca se clonan. Cada operacion
/// toma el lock una sola vez y termina antes de soltarlo, asi que las
/// operaciones quedan totalmente ordenadas.
///
/// # Examples
///
/// ```
/// use vitrina_cache::{CacheConfig, TtlCache};
///
/// let cache: TtlCache<Vec<u32>> = TtlCache::new(CacheConfig::default());
/// cache.set("admin:Role:1:10::::", vec![1, 2, 3]);
///
/// let hit = cache.get("admin:Role:1:10::::").unwrap();
/// assert_eq!(*hit, vec![1, 2, 3]);
/// assert!(cache.get("admin:Role:2:10::::").is_none());
/// ```
pub struct TtlCache<V> {
    pub(crate) store: Arc<Mutex<ExpiryStore<V>>>,
    pub(crate) config: CacheConfig,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) metrics: CacheMetrics,
}

impl<V> Clone for TtlCache<V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
            clock: Arc::clone(&self.clock),
            metrics: self.metrics.clone(),
        }
    }
}

impl<V> TtlCache<V> {
    /// Crea un cache con reloj monotonic del sistema.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Crea un cache con una fuente de tiempo inyectada.
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Arc::new(Mutex::new(ExpiryStore::default())),
            config,
            clock,
            metrics: CacheMetrics::new(),
        }
    }

    /// Obtiene un valor si existe y sigue vivo.
    ///
    /// Una entry expirada se elimina en el momento (expiracion lazy).
    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        if key.is_empty() {
            return None;
        }

        let start = Instant::now();
        let now = self.clock.now_millis();
        let (lookup, size) = {
            let mut store = self.store.lock();
            let lookup = store.lookup(key, now);
            (lookup, store.len())
        };

        let result = match lookup {
            Lookup::Hit(value) => {
                self.metrics.record_hit();
                Some(value)
            },
            Lookup::Miss => {
                self.metrics.record_miss();
                None
            },
            Lookup::Expired => {
                self.metrics.record_miss();
                self.metrics.record_evictions(EvictionReason::Expired, 1);
                self.metrics.update_entry_count(size);
                None
            },
        };

        self.metrics
            .record_operation_duration("get", start.elapsed());
        result
    }

    /// Inserta con el TTL por defecto.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Arc<V>>) {
        self.set_with_ttl(key, value, self.config.default_ttl);
    }

    /// Inserta con un TTL explicito, sobrescribiendo cualquier entry previa.
    ///
    /// Un TTL menor a un milisegundo usa el TTL por defecto. Las keys vacias
    /// se descartan.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: impl Into<Arc<V>>, ttl: Duration) {
        let key = key.into();
        if key.is_empty() {
            warn!("Ignoring cache write with an empty key");
            return;
        }

        let mut ttl_ms = duration_to_millis(ttl);
        if ttl_ms == 0 {
            debug!(key = %key, "Zero TTL replaced by the default TTL");
            ttl_ms = duration_to_millis(self.config.default_ttl).max(1);
        }

        let start = Instant::now();
        let now = self.clock.now_millis();
        // Sobrescribir no cuenta como eviction
        let size = {
            let mut store = self.store.lock();
            store.insert(key, value.into(), now, ttl_ms);
            store.len()
        };

        self.metrics.update_entry_count(size);
        self.metrics
            .record_operation_duration("set", start.elapsed());
    }

    /// Elimina una entry. Retorna si existia (viva o expirada).
    pub fn delete(&self, key: &str) -> bool {
        let (removed, size) = {
            let mut store = self.store.lock();
            let removed = store.remove(key).is_some();
            (removed, store.len())
        };

        if removed {
            self.metrics.record_evictions(EvictionReason::Manual, 1);
            self.metrics.update_entry_count(size);
        }
        removed
    }

    /// Vacia el cache. Retorna cuantas entries habia.
    pub fn clear(&self) -> usize {
        let count = self.store.lock().clear();

        self.metrics.record_evictions(EvictionReason::Cleared, count);
        self.metrics.update_entry_count(0);
        debug!(count, "Cache cleared");
        count
    }

    /// Elimina todas y solo las entries cuya edad supera su propio TTL.
    ///
    /// Es el unico mecanismo que libera entries que nunca se vuelven a leer.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now_millis();
        let (removed, size) = {
            let mut store = self.store.lock();
            let removed = store.purge_expired(now);
            (removed, store.len())
        };

        self.metrics.record_evictions(EvictionReason::Swept, removed);
        self.metrics.update_entry_count(size);
        removed
    }

    /// Numero de entries residentes, incluidas las expiradas no barridas.
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Indica si la key tiene una entry viva, sin modificar el cache.
    pub fn contains_key(&self, key: &str) -> bool {
        let now = self.clock.now_millis();
        self.store.lock().contains_live(key, now)
    }

    /// Snapshot de tamano y keys, solo para diagnostico.
    pub fn stats(&self) -> CacheStats {
        let store = self.store.lock();
        CacheStats {
            size: store.len(),
            keys: store.keys(),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    /// Obtiene el valor o lo calcula con `init` y lo guarda.
    ///
    /// El lock no se mantiene durante `init`: dos misses concurrentes sobre la
    /// misma key pueden ejecutar `init` ambos, y gana la ultima escritura.
    pub async fn get_or_insert_with<F, Fut>(&self, key: &str, init: F) -> Arc<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        if let Some(cached) = self.get(key) {
            return cached;
        }

        let value = Arc::new(init().await);
        self.set(key, Arc::clone(&value));
        value
    }

    /// Igual que [`get_or_insert_with`](Self::get_or_insert_with), pero los
    /// errores de `init` se propagan y no se cachean.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: &str, init: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(cached) = self.get(key) {
            return Ok(cached);
        }

        let value = Arc::new(init().await?);
        self.set(key, Arc::clone(&value));
        Ok(value)
    }
}
