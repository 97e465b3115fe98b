//! User-scoped collections: cart and wishlist.
//!
//! Mutations never patch the local copy. After the server accepts a
//! mutation the cached list is invalidated and fetched again, once, through
//! [`ListCache::after_mutation`]; a rejected mutation leaves the cache and
//! the network alone.

mod cart;
mod wishlist;

pub use cart::CartService;
pub use wishlist::{MoveOutcome, ToggleOutcome, WishlistService};

use parking_lot::RwLock;
use std::future::Future;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::cart_badge_count;

/// How a cached list reacts to a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Drop the local copy and fetch the authoritative list again
    #[default]
    InvalidateAndRefetch,
}

/// Last fetched copy of a server-owned list. `None` means "must refetch".
#[derive(Debug)]
pub struct ListCache<T> {
    name: &'static str,
    policy: CachePolicy,
    items: RwLock<Option<Vec<T>>>,
}

impl<T: Clone> ListCache<T> {
    pub fn new(name: &'static str, policy: CachePolicy) -> Self {
        Self {
            name,
            policy,
            items: RwLock::new(None),
        }
    }

    pub fn get(&self) -> Option<Vec<T>> {
        self.items.read().clone()
    }

    pub fn replace(&self, items: Vec<T>) {
        *self.items.write() = Some(items);
    }

    pub fn invalidate(&self) {
        *self.items.write() = None;
    }

    pub fn is_valid(&self) -> bool {
        self.items.read().is_some()
    }

    /// Apply the policy after the server accepted a mutation.
    pub async fn after_mutation<F, Fut>(&self, refetch: F) -> Result<Vec<T>, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, ApiError>>,
    {
        match self.policy {
            CachePolicy::InvalidateAndRefetch => {
                self.invalidate();
                debug!(list = self.name, "Refetching after mutation");
                let items = refetch().await.map_err(|e| {
                    warn!(list = self.name, error = %e, "Refetch after mutation failed");
                    e
                })?;
                self.replace(items.clone());
                Ok(items)
            }
        }
    }
}

/// Counts shown in the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavBadges {
    /// Sum of cart quantities
    pub cart: u32,
    /// Number of wishlist entries
    pub wishlist: usize,
}

impl NavBadges {
    /// The wishlist badge is hidden when empty; the cart badge always shows.
    pub fn wishlist_visible(&self) -> bool {
        self.wishlist > 0
    }

    /// Fetch both counts. Logged out or any failure reads as zero.
    pub async fn fetch(api: &ApiClient) -> Self {
        if !api.session().is_authenticated() {
            return Self::default();
        }

        let (cart, wishlist) = tokio::join!(api.cart(), api.wishlist());
        let cart = match cart {
            Ok(items) => cart_badge_count(&items),
            Err(e) => {
                debug!(error = %e, "Cart badge defaults to zero");
                0
            }
        };
        let wishlist = match wishlist {
            Ok(items) => items.len(),
            Err(e) => {
                debug!(error = %e, "Wishlist badge defaults to zero");
                0
            }
        };
        Self { cart, wishlist }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_after_mutation_refetches_once() {
        let cache: ListCache<u32> = ListCache::new("cart", CachePolicy::default());
        cache.replace(vec![1]);
        let calls = AtomicUsize::new(0);

        let items = cache
            .after_mutation(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec![1, 2])
            })
            .await
            .unwrap();

        assert_eq!(items, vec![1, 2]);
        assert_eq!(cache.get(), Some(vec![1, 2]));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_refetch_leaves_cache_invalid() {
        let cache: ListCache<u32> = ListCache::new("wishlist", CachePolicy::default());
        cache.replace(vec![1]);

        let result = cache
            .after_mutation(|| async { Err(ApiError::network()) })
            .await;

        assert!(result.is_err());
        assert!(!cache.is_valid());
    }

    #[tokio::test]
    async fn test_logged_out_badges_are_zero() {
        let api = ApiClient::with_client(
            "http://127.0.0.1:9/api",
            reqwest::Client::new(),
            crate::session::SessionContext::in_memory(),
        );
        let badges = NavBadges::fetch(&api).await;
        assert_eq!(badges, NavBadges::default());
        assert!(!badges.wishlist_visible());
    }
}
