use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use super::Paginator;
use crate::debounce::Debouncer;

/// Free-text search box bound to a listing.
///
/// Typing reloads the listing once the input has been quiet for the
/// debounce delay. Submitting reloads immediately and drops any pending
/// keystroke reload.
#[derive(Debug)]
pub struct SearchInput {
    listing: Arc<Paginator>,
    debouncer: Debouncer,
}

impl SearchInput {
    pub fn new(listing: Arc<Paginator>, delay: Duration) -> Self {
        Self {
            listing,
            debouncer: Debouncer::new(delay),
        }
    }

    pub fn on_input(&self, text: &str) {
        let listing = self.listing.clone();
        let text = text.to_string();
        self.debouncer.call(async move {
            if let Err(e) = listing.set_search(&text).await {
                warn!(error = %e, "Search reload failed");
            }
        });
    }

    pub async fn on_submit(&self, text: &str) {
        self.debouncer.cancel();
        if let Err(e) = self.listing.set_search(text).await {
            warn!(error = %e, "Search reload failed");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
