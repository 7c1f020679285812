//! Entry map plus an ordered expiry index.
//!
//! The index holds exactly one `(expires_at, key)` record per resident
//! entry. Lazy expiry on read and the periodic purge both use the same
//! deadline, and the purge only walks the expired prefix of the index.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// One cached value and the moment it was stored.
#[derive(Debug)]
pub(crate) struct CacheEntry<V> {
    pub(crate) value: Arc<V>,
    pub(crate) stored_at: u64,
    pub(crate) ttl: u64,
}

impl<V> CacheEntry<V> {
    pub(crate) fn expires_at(&self) -> u64 {
        self.stored_at.saturating_add(self.ttl)
    }

    /// Live iff `now - stored_at <= ttl`.
    pub(crate) fn is_expired_at(&self, now: u64) -> bool {
        now > self.expires_at()
    }
}

/// Outcome of a lookup.
pub(crate) enum Lookup<V> {
    Hit(Arc<V>),
    Miss,
    /// The entry existed but was stale and has been removed.
    Expired,
}

#[derive(Debug)]
pub(crate) struct ExpiryStore<V> {
    entries: HashMap<String, CacheEntry<V>>,
    expiry_index: BTreeSet<(u64, String)>,
}

impl<V> Default for ExpiryStore<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            expiry_index: BTreeSet::new(),
        }
    }
}

impl<V> ExpiryStore<V> {
    /// Inserts or overwrites. Returns the replaced entry, if any.
    pub(crate) fn insert(
        &mut self,
        key: String,
        value: Arc<V>,
        now: u64,
        ttl: u64,
    ) -> Option<CacheEntry<V>> {
        let replaced = self.remove(&key);
        let entry = CacheEntry {
            value,
            stored_at: now,
            ttl,
        };
        self.expiry_index.insert((entry.expires_at(), key.clone()));
        self.entries.insert(key, entry);
        replaced
    }

    pub(crate) fn lookup(&mut self, key: &str, now: u64) -> Lookup<V> {
        let expired = match self.entries.get(key) {
            None => return Lookup::Miss,
            Some(entry) => entry.is_expired_at(now),
        };

        if expired {
            self.remove(key);
            return Lookup::Expired;
        }
        Lookup::Hit(Arc::clone(&self.entries[key].value))
    }

    /// Liveness check without side effects.
    pub(crate) fn contains_live(&self, key: &str, now: u64) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired_at(now))
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.expiry_index
            .remove(&(entry.expires_at(), key.to_string()));
        Some(entry)
    }

    /// Removes every resident key accepted by `predicate`, live or expired.
    pub(crate) fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        let doomed: Vec<String> = self
            .entries
            .keys()
            .filter(|key| predicate(key.as_str()))
            .cloned()
            .collect();

        for key in &doomed {
            self.remove(key);
        }
        doomed.len()
    }

    /// Removes all and only the entries expired at `now`.
    pub(crate) fn purge_expired(&mut self, now: u64) -> usize {
        let mut removed = 0;
        while let Some((expires_at, _)) = self.expiry_index.first() {
            if *expires_at >= now {
                break;
            }
            if let Some((_, key)) = self.expiry_index.pop_first() {
                self.entries.remove(&key);
                removed += 1;
            }
        }
        removed
    }

    pub(crate) fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.expiry_index.clear();
        count
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    #[cfg(test)]
    pub(crate) fn index_len(&self) -> usize {
        self.expiry_index.len()
    }
}
