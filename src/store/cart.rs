use tracing::info;

use super::{CachePolicy, ListCache};
use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::models::{cart_badge_count, cart_subtotal, CartItem};
use crate::routes::Route;

pub struct CartService {
    api: ApiClient,
    cache: ListCache<CartItem>,
}

impl CartService {
    pub fn new(api: ApiClient) -> Self {
        Self::with_policy(api, CachePolicy::default())
    }

    pub fn with_policy(api: ApiClient, policy: CachePolicy) -> Self {
        Self {
            api,
            cache: ListCache::new("cart", policy),
        }
    }

    /// Items from the last fetch, if the cache is valid.
    pub fn cached(&self) -> Option<Vec<CartItem>> {
        self.cache.get()
    }

    /// Fetch the authoritative cart and replace the cached copy.
    pub async fn load(&self) -> ClientResult<Vec<CartItem>> {
        self.api.session().require_auth(&Route::Cart.path())?;
        let items = self.api.cart().await?;
        self.cache.replace(items.clone());
        Ok(items)
    }

    pub async fn add(&self, product_id: i64, quantity: i64) -> ClientResult<Vec<CartItem>> {
        let quantity = validate_quantity(quantity)?;
        self.api
            .session()
            .require_auth(&Route::ProductDetail(product_id).path())?;

        self.api.add_to_cart(product_id, quantity).await?;
        info!(product_id, quantity, "Added to cart");
        self.refetch().await
    }

    /// Set an item's quantity. Anything below 1 is refused before a request
    /// is built.
    pub async fn update_quantity(&self, item_id: i64, quantity: i64) -> ClientResult<Vec<CartItem>> {
        let quantity = validate_quantity(quantity)?;
        self.api.session().require_auth(&Route::Cart.path())?;

        self.api.update_cart_item(item_id, quantity).await?;
        self.refetch().await
    }

    pub async fn remove(&self, item_id: i64) -> ClientResult<Vec<CartItem>> {
        self.api.session().require_auth(&Route::Cart.path())?;

        self.api.remove_cart_item(item_id).await?;
        self.refetch().await
    }

    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    pub(crate) async fn refetch(&self) -> ClientResult<Vec<CartItem>> {
        let api = &self.api;
        Ok(self.cache.after_mutation(|| api.cart()).await?)
    }

    /// Badge value for the cached cart, zero when nothing is cached.
    pub fn badge_count(&self) -> u32 {
        self.cache.get().map(|items| cart_badge_count(&items)).unwrap_or(0)
    }

    pub fn subtotal(&self) -> f64 {
        self.cache.get().map(|items| cart_subtotal(&items)).unwrap_or(0.0)
    }
}

pub(crate) fn validate_quantity(quantity: i64) -> ClientResult<u32> {
    if quantity < 1 {
        return Err(ClientError::validation("Quantity must be at least 1"));
    }
    u32::try_from(quantity).map_err(|_| ClientError::validation("Quantity is too large"))
}
