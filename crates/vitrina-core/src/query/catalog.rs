//! Catalog listing query keys.

use serde::{Deserialize, Serialize};

use super::{CATALOG_NAMESPACE, CacheKey, join_segments, number_segment, optional_segment};

/// Query dimensions of a public catalog listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogQuery {
    pub page: u32,
    pub page_size: u32,
    /// Texto libre de busqueda.
    pub q: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Criterio de orden, p.ej. `precio_asc`.
    pub sort: Option<String>,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 24,
            q: None,
            brand: None,
            category: None,
            min_price: None,
            max_price: None,
            sort: None,
        }
    }
}

impl CatalogQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            ..Self::default()
        }
    }

    pub fn q(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

impl CacheKey for CatalogQuery {
    fn cache_key(&self) -> String {
        join_segments(
            CATALOG_NAMESPACE,
            [
                self.page.to_string(),
                self.page_size.to_string(),
                optional_segment(self.q.as_deref()),
                optional_segment(self.brand.as_deref()),
                optional_segment(self.category.as_deref()),
                number_segment(self.min_price),
                number_segment(self.max_price),
                optional_segment(self.sort.as_deref()),
            ],
        )
    }
}
