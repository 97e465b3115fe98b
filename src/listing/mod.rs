//! Paginated product listing.
//!
//! [`Paginator`] owns the page counter, the last-page flag and the load
//! guard for one grid. Filter changes always go through
//! [`Paginator::reset_and_load`], which also bumps a generation counter so a
//! page requested under an older filter is dropped when it lands.

mod search;

pub use search::SearchInput;

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{Page, Product, ProductFilter, SortOrder};

/// Where pages come from. The API client is the production source.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(
        &self,
        filter: &ProductFilter,
        page: u32,
        size: u32,
    ) -> Result<Page<Product>, ApiError>;
}

#[async_trait]
impl PageSource for ApiClient {
    async fn fetch_page(
        &self,
        filter: &ProductFilter,
        page: u32,
        size: u32,
    ) -> Result<Page<Product>, ApiError> {
        self.products_page(filter, page, size).await
    }
}

/// What a load call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// First page fetched; displayed results were replaced
    Replaced { count: usize },
    /// Next page fetched and appended
    Appended { count: usize },
    /// Guard refused: no successful first page yet, already on the last
    /// page, or a fetch is in flight
    Skipped,
    /// A newer reset superseded this fetch; its result was discarded
    Stale,
}

/// Point-in-time copy of the listing state for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSnapshot {
    pub filter: ProductFilter,
    pub items: Vec<Product>,
    pub current_page: u32,
    pub page_size: u32,
    pub is_last_page: bool,
    pub is_loading: bool,
    pub loaded: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
struct ListingState {
    filter: ProductFilter,
    items: Vec<Product>,
    current_page: u32,
    is_last_page: bool,
    is_loading: bool,
    loaded: bool,
    error: Option<String>,
    generation: u64,
}

pub struct Paginator {
    source: Arc<dyn PageSource>,
    page_size: u32,
    state: Mutex<ListingState>,
}

impl std::fmt::Debug for Paginator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("page_size", &self.page_size)
            .field("state", &*self.state.lock())
            .finish()
    }
}

impl Paginator {
    pub fn new(source: Arc<dyn PageSource>, page_size: u32) -> Self {
        Self::with_filter(source, page_size, ProductFilter::default())
    }

    pub fn with_filter(source: Arc<dyn PageSource>, page_size: u32, filter: ProductFilter) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
            state: Mutex::new(ListingState {
                filter,
                items: Vec::new(),
                current_page: 0,
                is_last_page: false,
                is_loading: false,
                loaded: false,
                error: None,
                generation: 0,
            }),
        }
    }

    pub fn snapshot(&self) -> ListingSnapshot {
        let state = self.state.lock();
        ListingSnapshot {
            filter: state.filter.clone(),
            items: state.items.clone(),
            current_page: state.current_page,
            page_size: self.page_size,
            is_last_page: state.is_last_page,
            is_loading: state.is_loading,
            loaded: state.loaded,
            error: state.error.clone(),
        }
    }

    pub fn filter(&self) -> ProductFilter {
        self.state.lock().filter.clone()
    }

    /// Zero the counter and fetch page 0, replacing the displayed results.
    ///
    /// Always runs, even while another fetch is in flight; that fetch is
    /// then reported as [`LoadOutcome::Stale`].
    pub async fn reset_and_load(&self) -> Result<LoadOutcome, ApiError> {
        let (filter, generation) = {
            let mut state = self.state.lock();
            state.generation += 1;
            state.current_page = 0;
            state.is_last_page = false;
            state.is_loading = true;
            (state.filter.clone(), state.generation)
        };

        debug!(generation, "Reloading product listing");
        let result = self.source.fetch_page(&filter, 0, self.page_size).await;

        let mut state = self.state.lock();
        if state.generation != generation {
            return Ok(LoadOutcome::Stale);
        }
        state.is_loading = false;
        state.loaded = true;

        match result {
            Ok(page) => {
                let count = page.content.len();
                state.items = page.content;
                state.is_last_page = page.last;
                state.error = None;
                Ok(LoadOutcome::Replaced { count })
            }
            Err(e) => {
                warn!(error = %e, "Failed to load products");
                state.items.clear();
                state.error = Some(e.message.clone());
                Err(e)
            }
        }
    }

    /// Fetch the next page and append it. No-op on the last page, while a
    /// fetch is in flight, or until a reset has shown page 0.
    pub async fn load_more(&self) -> Result<LoadOutcome, ApiError> {
        let (filter, generation, page) = {
            let mut state = self.state.lock();
            let first_page_shown = state.loaded && state.error.is_none();
            if !first_page_shown || state.is_last_page || state.is_loading {
                return Ok(LoadOutcome::Skipped);
            }
            state.is_loading = true;
            state.current_page += 1;
            (state.filter.clone(), state.generation, state.current_page)
        };

        debug!(page, "Loading more products");
        let result = self.source.fetch_page(&filter, page, self.page_size).await;

        let mut state = self.state.lock();
        if state.generation != generation {
            return Ok(LoadOutcome::Stale);
        }
        state.is_loading = false;

        match result {
            Ok(next) => {
                let count = next.content.len();
                state.items.extend(next.content);
                state.is_last_page = next.last;
                state.error = None;
                Ok(LoadOutcome::Appended { count })
            }
            Err(e) => {
                warn!(page, error = %e, "Failed to load more products");
                // the same page is requested again on the next attempt
                state.current_page -= 1;
                Err(e)
            }
        }
    }

    pub async fn set_filter(&self, filter: ProductFilter) -> Result<LoadOutcome, ApiError> {
        self.state.lock().filter = filter;
        self.reset_and_load().await
    }

    pub async fn set_search(&self, search: &str) -> Result<LoadOutcome, ApiError> {
        let mut filter = self.filter();
        filter.search = Some(search.to_string()).filter(|s| !s.trim().is_empty());
        self.set_filter(filter).await
    }

    pub async fn set_category(&self, category: Option<&str>) -> Result<LoadOutcome, ApiError> {
        let mut filter = self.filter();
        filter.category = category.map(str::to_string);
        self.set_filter(filter).await
    }

    pub async fn set_sort(&self, sort: Option<SortOrder>) -> Result<LoadOutcome, ApiError> {
        let mut filter = self.filter();
        filter.sort = sort;
        self.set_filter(filter).await
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeCatalogue;
    use super::*;
    use std::sync::atomic::Ordering;

    fn paginator(catalogue: &Arc<FakeCatalogue>) -> Paginator {
        Paginator::new(catalogue.clone(), 12)
    }

    #[tokio::test]
    async fn test_load_more_stops_at_last_page() {
        let catalogue = Arc::new(FakeCatalogue::with_products(30));
        let listing = paginator(&catalogue);

        assert_eq!(
            listing.reset_and_load().await.unwrap(),
            LoadOutcome::Replaced { count: 12 }
        );
        assert_eq!(
            listing.load_more().await.unwrap(),
            LoadOutcome::Appended { count: 12 }
        );
        assert_eq!(
            listing.load_more().await.unwrap(),
            LoadOutcome::Appended { count: 6 }
        );
        for _ in 0..5 {
            assert_eq!(listing.load_more().await.unwrap(), LoadOutcome::Skipped);
        }

        let snapshot = listing.snapshot();
        assert_eq!(snapshot.items.len(), 30);
        assert!(snapshot.is_last_page);
        assert_eq!(catalogue.request_count(), 3);
        let pages: Vec<u32> = catalogue.requests.lock().iter().map(|(_, p)| *p).collect();
        assert_eq!(pages, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_overlapping_load_more_is_refused() {
        let catalogue = Arc::new(FakeCatalogue::with_products(40));
        let listing = paginator(&catalogue);
        listing.reset_and_load().await.unwrap();

        let (a, b) = tokio::join!(listing.load_more(), listing.load_more());
        let outcomes = [a.unwrap(), b.unwrap()];
        assert!(outcomes.contains(&LoadOutcome::Skipped));
        assert!(outcomes.contains(&LoadOutcome::Appended { count: 12 }));
        assert_eq!(catalogue.request_count(), 2);
    }

    #[tokio::test]
    async fn test_filter_change_resets_to_first_page() {
        let catalogue = Arc::new(FakeCatalogue::with_products(30));
        let listing = paginator(&catalogue);
        listing.reset_and_load().await.unwrap();
        listing.load_more().await.unwrap();

        listing.set_search("shirt").await.unwrap();

        let snapshot = listing.snapshot();
        assert_eq!(snapshot.current_page, 0);
        assert_eq!(snapshot.items.len(), 12);
        let (filter, page) = catalogue.requests.lock().last().cloned().unwrap();
        assert_eq!(page, 0);
        assert_eq!(filter.search.as_deref(), Some("shirt"));
    }

    #[tokio::test]
    async fn test_reset_during_load_discards_stale_page() {
        let catalogue = Arc::new(FakeCatalogue::with_products(30));
        let listing = paginator(&catalogue);
        listing.reset_and_load().await.unwrap();

        let (more, reset) = tokio::join!(listing.load_more(), listing.set_category(Some("MEN")));
        assert_eq!(more.unwrap(), LoadOutcome::Stale);
        assert_eq!(reset.unwrap(), LoadOutcome::Replaced { count: 12 });

        let snapshot = listing.snapshot();
        assert_eq!(snapshot.items.len(), 12);
        assert!(!snapshot.is_loading);
    }

    #[tokio::test]
    async fn test_load_more_waits_for_first_page() {
        let catalogue = Arc::new(FakeCatalogue::with_products(30));
        let listing = paginator(&catalogue);

        assert_eq!(listing.load_more().await.unwrap(), LoadOutcome::Skipped);
        assert_eq!(catalogue.request_count(), 0);

        catalogue.failures_left.store(1, Ordering::SeqCst);
        assert!(listing.reset_and_load().await.is_err());
        assert_eq!(listing.load_more().await.unwrap(), LoadOutcome::Skipped);

        listing.reset_and_load().await.unwrap();
        let pages: Vec<u32> = catalogue.requests.lock().iter().map(|(_, p)| *p).collect();
        assert_eq!(pages, vec![0, 0]);
        assert_eq!(listing.snapshot().items[0].id, 1);
    }

    #[tokio::test]
    async fn test_failed_load_more_can_be_retried() {
        let catalogue = Arc::new(FakeCatalogue::with_products(30));
        let listing = paginator(&catalogue);
        listing.reset_and_load().await.unwrap();

        catalogue.failures_left.store(1, Ordering::SeqCst);
        assert!(listing.load_more().await.is_err());
        assert_eq!(listing.snapshot().current_page, 0);

        assert_eq!(
            listing.load_more().await.unwrap(),
            LoadOutcome::Appended { count: 12 }
        );
        let pages: Vec<u32> = catalogue.requests.lock().iter().map(|(_, p)| *p).collect();
        assert_eq!(pages, vec![0, 1, 1]);
    }

    #[tokio::test]
    async fn test_failed_first_load_records_error() {
        let catalogue = Arc::new(FakeCatalogue::with_products(3));
        catalogue.failures_left.store(1, Ordering::SeqCst);
        let listing = paginator(&catalogue);

        assert!(listing.reset_and_load().await.is_err());
        let snapshot = listing.snapshot();
        assert_eq!(snapshot.error.as_deref(), Some("Request failed"));
        assert!(snapshot.loaded);
        assert!(!snapshot.is_loading);
    }
}
