//! Cache invalidation with regex pattern matching.
//!
//! Patterns are applied as given: no escaping is performed, so a literal
//! containing regex metacharacters can match more (or fewer) keys than
//! intended. Use [`vitrina_core::admin_resource_pattern`] to build anchored,
//! escaped patterns for admin resources.

use regex::Regex;
use tracing::debug;
use vitrina_core::{Result, VitrinaError};

use crate::metrics::EvictionReason;
use crate::ttl_cache::TtlCache;

/// Resultado de una operacion de invalidacion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationResult {
    /// Numero de entries invalidadas.
    pub count: usize,
    /// Patrones aplicados.
    pub patterns: Vec<String>,
}

impl<V> TtlCache<V> {
    /// Elimina todas las entries cuya key coincide con el regex dado.
    ///
    /// Retorna cuantas se eliminaron. Un regex invalido no elimina nada.
    ///
    /// # Examples
    ///
    /// ```
    /// use vitrina_cache::{CacheConfig, TtlCache};
    ///
    /// let cache: TtlCache<u32> = TtlCache::new(CacheConfig::default());
    /// cache.set("admin:Role:1", 1);
    /// cache.set("admin:Role:2", 2);
    /// cache.set("admin:User:1", 3);
    ///
    /// assert_eq!(cache.delete_pattern("^admin:Role:").unwrap(), 2);
    /// assert!(cache.get("admin:User:1").is_some());
    /// assert!(cache.delete_pattern("admin:(").is_err());
    /// ```
    pub fn delete_pattern(&self, pattern: &str) -> Result<usize> {
        let regex = Regex::new(pattern).map_err(|e| {
            debug!(pattern = %pattern, error = %e, "Invalid invalidation pattern");
            VitrinaError::invalid_pattern(pattern, e)
        })?;

        Ok(self.delete_matching(&regex))
    }

    /// Igual que [`delete_pattern`](Self::delete_pattern) con un regex ya compilado.
    pub fn delete_matching(&self, regex: &Regex) -> usize {
        let (count, size) = {
            let mut store = self.store.lock();
            let count = store.remove_where(|key| regex.is_match(key));
            (count, store.len())
        };

        self.metrics.record_evictions(EvictionReason::Pattern, count);
        self.metrics.update_entry_count(size);

        debug!(
            pattern = %regex.as_str(),
            count = count,
            "Cache entries invalidated by pattern"
        );
        count
    }

    /// Invalida multiples patrones a la vez.
    ///
    /// Todos los patrones se compilan antes de eliminar nada: si alguno es
    /// invalido, el cache queda intacto.
    pub fn delete_patterns<S: AsRef<str>>(&self, patterns: &[S]) -> Result<InvalidationResult> {
        let compiled = patterns
            .iter()
            .map(|p| {
                Regex::new(p.as_ref()).map_err(|e| VitrinaError::invalid_pattern(p.as_ref(), e))
            })
            .collect::<Result<Vec<_>>>()?;

        // Una sola seccion critica para todos los patrones
        let (count, size) = {
            let mut store = self.store.lock();
            let count = store.remove_where(|key| compiled.iter().any(|re| re.is_match(key)));
            (count, store.len())
        };

        self.metrics.record_evictions(EvictionReason::Pattern, count);
        self.metrics.update_entry_count(size);

        let patterns: Vec<String> = patterns.iter().map(|p| p.as_ref().to_string()).collect();
        debug!(
            patterns = ?patterns,
            count = count,
            "Cache entries invalidated by patterns"
        );

        Ok(InvalidationResult { count, patterns })
    }
}
