use tracing::{info, warn};

use super::{CachePolicy, CartService, ListCache};
use crate::api::ApiClient;
use crate::error::{ApiError, ClientError, ClientResult};
use crate::models::WishlistItem;
use crate::routes::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// Result of moving a wishlist entry into the cart.
///
/// The move is two requests with no compensation: when the cart add
/// succeeds and the wishlist removal fails, the product sits in both lists
/// and `wishlist_removal` carries the failure.
#[derive(Debug)]
pub struct MoveOutcome {
    pub wishlist: Vec<WishlistItem>,
    pub wishlist_removal: Result<(), ApiError>,
}

impl MoveOutcome {
    pub fn fully_moved(&self) -> bool {
        self.wishlist_removal.is_ok()
    }
}

pub struct WishlistService {
    api: ApiClient,
    cache: ListCache<WishlistItem>,
}

impl WishlistService {
    pub fn new(api: ApiClient) -> Self {
        Self::with_policy(api, CachePolicy::default())
    }

    pub fn with_policy(api: ApiClient, policy: CachePolicy) -> Self {
        Self {
            api,
            cache: ListCache::new("wishlist", policy),
        }
    }

    pub fn cached(&self) -> Option<Vec<WishlistItem>> {
        self.cache.get()
    }

    pub async fn load(&self) -> ClientResult<Vec<WishlistItem>> {
        self.api.session().require_auth(&Route::Wishlist.path())?;
        let items = self.api.wishlist().await?;
        self.cache.replace(items.clone());
        Ok(items)
    }

    pub async fn add(&self, product_id: i64) -> ClientResult<Vec<WishlistItem>> {
        self.api
            .session()
            .require_auth(&Route::ProductDetail(product_id).path())?;

        self.api.add_to_wishlist(product_id).await?;
        info!(product_id, "Added to wishlist");
        self.refetch().await
    }

    pub async fn remove(&self, item_id: i64) -> ClientResult<Vec<WishlistItem>> {
        self.api.session().require_auth(&Route::Wishlist.path())?;

        self.api.remove_wishlist_item(item_id).await?;
        self.refetch().await
    }

    /// Product-page heart button: remove the product's entry if present,
    /// otherwise add it. Membership is read from a fresh wishlist fetch.
    pub async fn toggle(&self, product_id: i64) -> ClientResult<ToggleOutcome> {
        self.api
            .session()
            .require_auth(&Route::ProductDetail(product_id).path())?;

        let current = self.api.wishlist().await?;
        match find_entry(&current, product_id) {
            Some(item_id) => {
                self.api.remove_wishlist_item(item_id).await?;
                self.refetch().await?;
                Ok(ToggleOutcome::Removed)
            }
            None => {
                self.api.add_to_wishlist(product_id).await?;
                self.refetch().await?;
                Ok(ToggleOutcome::Added)
            }
        }
    }

    /// Whether the product is in the cached wishlist.
    pub fn contains(&self, product_id: i64) -> bool {
        self.cache
            .get()
            .map(|items| find_entry(&items, product_id).is_some())
            .unwrap_or(false)
    }

    /// Add the entry's product to the cart, then delete the entry.
    ///
    /// A failed cart add stops the move before anything else is sent. When
    /// the removal failed and the refetch afterwards fails too, the removal
    /// error is returned so the duplicate is not hidden.
    pub async fn move_to_cart(&self, item: &WishlistItem, cart: &CartService) -> ClientResult<MoveOutcome> {
        self.api.session().require_auth(&Route::Wishlist.path())?;

        self.api.add_to_cart(item.product.id, 1).await?;

        let wishlist_removal = self.api.remove_wishlist_item(item.id).await;
        if let Err(e) = &wishlist_removal {
            warn!(
                item_id = item.id,
                product_id = item.product.id,
                error = %e,
                "Moved to cart but wishlist entry was not removed"
            );
        }

        let refetched = async {
            let wishlist = self.refetch().await?;
            cart.refetch().await?;
            Ok::<_, ClientError>(wishlist)
        }
        .await;

        match (refetched, wishlist_removal) {
            (Ok(wishlist), wishlist_removal) => Ok(MoveOutcome {
                wishlist,
                wishlist_removal,
            }),
            (Err(refetch_error), Err(removal)) => {
                warn!(
                    item_id = item.id,
                    error = %refetch_error,
                    "Refetch failed after a partial move"
                );
                Err(removal.into())
            }
            (Err(refetch_error), Ok(())) => Err(refetch_error),
        }
    }

    pub fn badge_count(&self) -> usize {
        self.cache.get().map(|items| items.len()).unwrap_or(0)
    }

    async fn refetch(&self) -> ClientResult<Vec<WishlistItem>> {
        let api = &self.api;
        Ok(self.cache.after_mutation(|| api.wishlist()).await?)
    }
}

fn find_entry(items: &[WishlistItem], product_id: i64) -> Option<i64> {
    items
        .iter()
        .find(|item| item.product.id == product_id)
        .map(|item| item.id)
}
