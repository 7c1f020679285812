//! Vitrina Cache - in-process TTL cache for admin and catalog queries.
//!
//! Consumers look a key up with [`TtlCache::get`], run the real query on a
//! miss and store the result with [`TtlCache::set`]. Mutation handlers
//! invalidate whole families of cached pages with
//! [`TtlCache::delete_pattern`]. Expired entries are dropped lazily on read
//! and by a background sweep started with [`TtlCache::start_sweeper`].
//!
//! There is no size bound: memory is reclaimed only through TTL expiry,
//! the sweep and explicit deletes.

pub mod clock;
pub mod config;
pub mod invalidation;
pub mod metrics;
mod store;
pub mod sweeper;
pub mod ttl_cache;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CacheConfig, DEFAULT_TTL, SWEEP_INTERVAL};
pub use invalidation::InvalidationResult;
pub use metrics::{CacheMetrics, EvictionReason, register_cache_metrics};
pub use sweeper::SweepHandle;
pub use ttl_cache::{CacheStats, TtlCache};
