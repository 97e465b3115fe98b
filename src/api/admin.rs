//! `/admin` endpoints. The backend rejects these for non-admin tokens.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{AdminStats, Order, Product, ProductPayload, ProductSaved, User};

impl ApiClient {
    pub async fn admin_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get("/admin/products", true).await
    }

    pub async fn admin_product(&self, id: i64) -> Result<Product, ApiError> {
        self.get(&format!("/admin/products/{}", id), true).await
    }

    pub async fn create_product(&self, payload: &ProductPayload) -> Result<ProductSaved, ApiError> {
        self.post("/admin/products", payload, true).await
    }

    pub async fn update_product(&self, id: i64, payload: &ProductPayload) -> Result<ProductSaved, ApiError> {
        self.put(&format!("/admin/products/{}", id), payload).await
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/admin/products/{}", id)).await?;
        Ok(())
    }

    pub async fn admin_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get("/admin/orders", true).await
    }

    pub async fn admin_users(&self) -> Result<Vec<User>, ApiError> {
        self.get("/admin/users", true).await
    }

    pub async fn admin_stats(&self) -> Result<AdminStats, ApiError> {
        self.get("/admin/stats", true).await
    }
}
