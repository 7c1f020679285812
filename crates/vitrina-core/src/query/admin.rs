//! Admin list query keys.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    ADMIN_NAMESPACE, CacheKey, SortDirection, encode_segment, filters_segment, join_segments,
    optional_segment,
};
use crate::error::Result;

/// Query dimensions of an admin resource listing.
///
/// # Examples
///
/// ```
/// use vitrina_core::{AdminQuery, CacheKey, SortDirection};
///
/// let query = AdminQuery::new("Role", 2, 25)
///     .search("gerente")
///     .sort("name", SortDirection::Asc);
///
/// assert_eq!(query.cache_key(), "admin:Role:2:25:gerente::name:asc");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminQuery {
    /// Nombre del recurso (modelo) administrado.
    pub resource: String,
    pub page: u32,
    pub page_size: u32,
    pub search: Option<String>,
    /// Objeto de filtros arbitrario; se serializa de forma canonica.
    pub filters: Option<Value>,
    pub sort_field: Option<String>,
    pub sort_dir: Option<SortDirection>,
}

impl Default for AdminQuery {
    fn default() -> Self {
        Self {
            resource: String::new(),
            page: 1,
            page_size: 10,
            search: None,
            filters: None,
            sort_field: None,
            sort_dir: None,
        }
    }
}

impl AdminQuery {
    pub fn new(resource: impl Into<String>, page: u32, page_size: u32) -> Self {
        Self {
            resource: resource.into(),
            page,
            page_size,
            ..Self::default()
        }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn filters(mut self, filters: Value) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Sets the filters from any serializable filter struct.
    pub fn with_filters<T: Serialize>(mut self, filters: &T) -> Result<Self> {
        self.filters = Some(serde_json::to_value(filters)?);
        Ok(self)
    }

    pub fn sort(mut self, field: impl Into<String>, dir: SortDirection) -> Self {
        self.sort_field = Some(field.into());
        self.sort_dir = Some(dir);
        self
    }
}

impl CacheKey for AdminQuery {
    fn cache_key(&self) -> String {
        join_segments(
            ADMIN_NAMESPACE,
            [
                encode_segment(&self.resource),
                self.page.to_string(),
                self.page_size.to_string(),
                optional_segment(self.search.as_deref()),
                filters_segment(self.filters.as_ref()),
                optional_segment(self.sort_field.as_deref()),
                self.sort_dir
                    .map(|d| d.as_str().to_string())
                    .unwrap_or_default(),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_produce_empty_segments() {
        let key = AdminQuery::new("User", 1, 10).cache_key();
        assert_eq!(key, "admin:User:1:10::::");
    }

    #[test]
    fn test_search_is_encoded() {
        let key = AdminQuery::new("User", 1, 10).search("a:b c").cache_key();
        assert_eq!(key, "admin:User:1:10:a%3Ab%20c:::");
    }

    #[test]
    fn test_with_filters_from_struct() {
        #[derive(Serialize)]
        struct Filtros {
            activo: bool,
        }

        let from_struct = AdminQuery::new("User", 1, 10)
            .with_filters(&Filtros { activo: true })
            .unwrap();
        let from_value = AdminQuery::new("User", 1, 10).filters(json!({"activo": true}));

        assert_eq!(from_struct.cache_key(), from_value.cache_key());
    }

    #[test]
    fn test_different_pages_do_not_collide() {
        let a = AdminQuery::new("User", 1, 10).cache_key();
        let b = AdminQuery::new("User", 11, 0).cache_key();
        assert_ne!(a, b);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let query: AdminQuery = serde_json::from_value(json!({"resource": "Role"})).unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 10);
        assert_eq!(query.cache_key(), "admin:Role:1:10::::");
    }

    #[test]
    fn test_json_payload_filters_are_objects() {
        let query: AdminQuery = serde_json::from_value(json!({
            "resource": "User",
            "page": 2,
            "filters": {"rol": "admin", "activo": true},
            "sort_field": "email",
            "sort_dir": "desc"
        }))
        .unwrap();

        let built = AdminQuery::new("User", 2, 10)
            .filters(json!({"activo": true, "rol": "admin"}))
            .sort("email", SortDirection::Desc);

        assert!(query.filters.as_ref().is_some_and(|f| f.is_object()));
        assert_eq!(query.cache_key(), built.cache_key());
    }
}
