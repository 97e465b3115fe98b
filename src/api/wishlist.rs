//! `/wishlist` endpoints.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{AddToWishlistRequest, MessageResponse, WishlistItem};

impl ApiClient {
    pub async fn wishlist(&self) -> Result<Vec<WishlistItem>, ApiError> {
        self.get("/wishlist", true).await
    }

    pub async fn add_to_wishlist(&self, product_id: i64) -> Result<MessageResponse, ApiError> {
        self.post("/wishlist", &AddToWishlistRequest { product_id }, true)
            .await
    }

    pub async fn remove_wishlist_item(&self, item_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/wishlist/{}", item_id)).await?;
        Ok(())
    }
}
