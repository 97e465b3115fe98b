//! `/cart` endpoints. Every call is user-scoped.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{AddToCartRequest, CartItem, MessageResponse, UpdateQuantityRequest};

impl ApiClient {
    pub async fn cart(&self) -> Result<Vec<CartItem>, ApiError> {
        self.get("/cart", true).await
    }

    pub async fn add_to_cart(&self, product_id: i64, quantity: u32) -> Result<MessageResponse, ApiError> {
        let body = AddToCartRequest {
            product_id,
            quantity,
        };
        self.post("/cart", &body, true).await
    }

    pub async fn update_cart_item(&self, item_id: i64, quantity: u32) -> Result<MessageResponse, ApiError> {
        self.put(&format!("/cart/{}", item_id), &UpdateQuantityRequest { quantity })
            .await
    }

    pub async fn remove_cart_item(&self, item_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/cart/{}", item_id)).await?;
        Ok(())
    }
}
