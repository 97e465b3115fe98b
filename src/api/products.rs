//! Public catalogue endpoints.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Page, Product, ProductFilter};

impl ApiClient {
    /// One page of the storefront grid for `filter`.
    pub async fn products_page(
        &self,
        filter: &ProductFilter,
        page: u32,
        size: u32,
    ) -> Result<Page<Product>, ApiError> {
        self.get(&filter.page_path(page, size), false).await
    }

    pub async fn product(&self, id: i64) -> Result<Product, ApiError> {
        self.get(&format!("/products/{}", id), false).await
    }
}
