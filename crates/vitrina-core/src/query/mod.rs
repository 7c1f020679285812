//! Canonical cache keys for admin and catalog queries.
//!
//! A key is a namespace tag followed by an ordered tuple of query
//! dimensions, joined with `:`. Each segment is percent-encoded, so the
//! delimiter never appears inside a segment and two different queries can
//! not produce the same key. Absent optional dimensions become an empty
//! segment: `None` and `Some("")` key identically.
//!
//! ```
//! use vitrina_core::generate_catalog_key;
//!
//! let a = generate_catalog_key(1, 24, None, Some("Marca"), None, None, None, Some("precio_asc"));
//! let b = generate_catalog_key(1, 24, Some(""), Some("Marca"), None, None, None, Some("precio_asc"));
//! assert_eq!(a, b);
//! assert_eq!(a, "catalog:1:24::Marca::::precio_asc");
//! ```

mod admin;
mod catalog;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use admin::AdminQuery;
pub use catalog::CatalogQuery;

/// Separador entre segmentos de una key.
pub const KEY_DELIMITER: char = ':';

/// Namespace de las queries del panel de administracion.
pub const ADMIN_NAMESPACE: &str = "admin";

/// Namespace de las queries del catalogo publico.
pub const CATALOG_NAMESPACE: &str = "catalog";

/// Something that can be addressed in the cache by a canonical string key.
pub trait CacheKey {
    /// Returns the canonical key. Equal queries always return equal keys.
    fn cache_key(&self) -> String;
}

/// Sort direction for admin list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the key of an admin list query.
///
/// Wrapper over [`AdminQuery::cache_key`] for call sites that already hold
/// the individual dimensions.
pub fn generate_admin_key(
    resource: &str,
    page: u32,
    page_size: u32,
    search: Option<&str>,
    filters: Option<&Value>,
    sort_field: Option<&str>,
    sort_dir: Option<SortDirection>,
) -> String {
    AdminQuery {
        resource: resource.to_string(),
        page,
        page_size,
        search: search.map(String::from),
        filters: filters.cloned(),
        sort_field: sort_field.map(String::from),
        sort_dir,
    }
    .cache_key()
}

/// Builds the key of a catalog listing query.
#[allow(clippy::too_many_arguments)]
pub fn generate_catalog_key(
    page: u32,
    page_size: u32,
    q: Option<&str>,
    brand: Option<&str>,
    category: Option<&str>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    sort: Option<&str>,
) -> String {
    CatalogQuery {
        page,
        page_size,
        q: q.map(String::from),
        brand: brand.map(String::from),
        category: category.map(String::from),
        min_price,
        max_price,
        sort: sort.map(String::from),
    }
    .cache_key()
}

/// Regex matching every cached page of one admin resource.
///
/// The resource segment is escaped, so `Role` does not match
/// `admin:RoleGroup:...`.
///
/// ```
/// use vitrina_core::{admin_resource_pattern, generate_admin_key};
///
/// let pattern = regex::Regex::new(&admin_resource_pattern("Role")).unwrap();
/// assert!(pattern.is_match(&generate_admin_key("Role", 1, 10, None, None, None, None)));
/// assert!(!pattern.is_match(&generate_admin_key("RoleGroup", 1, 10, None, None, None, None)));
/// ```
pub fn admin_resource_pattern(resource: &str) -> String {
    format!(
        "^{}{}{}{}",
        ADMIN_NAMESPACE,
        KEY_DELIMITER,
        regex::escape(&encode_segment(resource)),
        KEY_DELIMITER
    )
}

/// Regex matching every cached catalog page.
pub fn catalog_pattern() -> String {
    format!("^{}{}", CATALOG_NAMESPACE, KEY_DELIMITER)
}

/// Joins a namespace and its segments into one key.
pub(crate) fn join_segments<I>(namespace: &str, segments: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut key = String::from(namespace);
    for segment in segments {
        key.push(KEY_DELIMITER);
        key.push_str(&segment);
    }
    key
}

/// Percent-encodes one segment so it cannot contain the delimiter.
pub(crate) fn encode_segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// `None` y `Some("")` producen el mismo segmento vacio.
pub(crate) fn optional_segment(raw: Option<&str>) -> String {
    raw.map(encode_segment).unwrap_or_default()
}

pub(crate) fn number_segment(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Canonical encoding of a filter object: object keys sorted at every
/// level. `null` and `{}` are the same as no filter.
pub(crate) fn filters_segment(filters: Option<&Value>) -> String {
    match filters {
        None | Some(Value::Null) => String::new(),
        Some(Value::Object(map)) if map.is_empty() => String::new(),
        Some(value) => encode_segment(&canonicalize(value).to_string()),
    }
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<&String, Value> =
                map.iter().map(|(k, v)| (k, canonicalize(v))).collect();
            Value::Object(
                sorted
                    .into_iter()
                    .map(|(k, v)| (k.clone(), v))
                    .collect(),
            )
        },
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}
