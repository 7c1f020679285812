//! Vitrina Core - Error taxonomy and canonical query keys
//!
//! This crate provides the foundational types shared by the Vitrina cache
//! and its consumers: the error hierarchy and the structured query keys
//! that admin and catalog handlers use to address cached results.

pub mod error;
pub mod query;

pub use error::{Result, VitrinaError};
pub use query::{
    AdminQuery, CacheKey, CatalogQuery, SortDirection, admin_resource_pattern, catalog_pattern,
    generate_admin_key, generate_catalog_key,
};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
