//! Admin panel: dashboard counters, resource tables, product editing.
//!
//! Every table is fetched whole when its tab opens and again after each
//! mutation made from it.

mod form;

pub use form::ProductForm;

use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::models::{AdminStats, Order, Product, User};

/// Where the dashboard numbers came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsSource {
    /// Counted from the three admin lists
    Lists,
    /// Read from `/admin/stats` after a list fetch failed
    Aggregate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub products: u64,
    pub users: u64,
    pub orders: u64,
    pub sales: f64,
    pub pending_orders: Option<u64>,
    pub low_stock_products: Option<u64>,
    pub source: StatsSource,
}

impl DashboardStats {
    pub fn from_lists(products: &[Product], users: &[User], orders: &[Order]) -> Self {
        Self {
            products: products.len() as u64,
            users: users.len() as u64,
            orders: orders.len() as u64,
            sales: orders.iter().map(|order| order.total_amount).sum(),
            pending_orders: None,
            low_stock_products: None,
            source: StatsSource::Lists,
        }
    }

    pub fn from_aggregate(stats: &AdminStats) -> Self {
        Self {
            products: stats.total_products,
            users: stats.total_users,
            orders: stats.total_orders,
            sales: stats.total_revenue.unwrap_or(0.0),
            pending_orders: stats.pending_orders,
            low_stock_products: stats.low_stock_products,
            source: StatsSource::Aggregate,
        }
    }
}

/// Product table after a mutation, plus the refreshed counters when they
/// could be loaded.
#[derive(Debug, Clone)]
pub struct ProductsRefresh {
    pub products: Vec<Product>,
    pub stats: Option<DashboardStats>,
}

#[derive(Debug, Clone)]
pub struct AdminPanel {
    api: ApiClient,
}

impl AdminPanel {
    /// Open the panel. Without an admin session this is a redirect to login
    /// that returns to the dashboard.
    pub fn open(api: ApiClient) -> ClientResult<Self> {
        api.session().require_admin()?;
        Ok(Self { api })
    }

    /// Counters for the dashboard cards.
    ///
    /// The three lists are fetched concurrently and all of them are awaited.
    /// If any failed, the aggregate stats endpoint is used instead.
    pub async fn dashboard_stats(&self) -> ClientResult<DashboardStats> {
        let (products, users, orders) = tokio::join!(
            self.api.admin_products(),
            self.api.admin_users(),
            self.api.admin_orders()
        );

        match (products, users, orders) {
            (Ok(products), Ok(users), Ok(orders)) => {
                Ok(DashboardStats::from_lists(&products, &users, &orders))
            }
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                warn!(error = %e, "Dashboard list fetch failed, using aggregate stats");
                let stats = self.api.admin_stats().await?;
                Ok(DashboardStats::from_aggregate(&stats))
            }
        }
    }

    pub async fn products(&self) -> ClientResult<Vec<Product>> {
        Ok(self.api.admin_products().await?)
    }

    pub async fn product(&self, id: i64) -> ClientResult<Product> {
        Ok(self.api.admin_product(id).await?)
    }

    /// Load a product into the edit form.
    pub async fn edit_form(&self, id: i64) -> ClientResult<ProductForm> {
        let product = self.product(id).await?;
        Ok(ProductForm::from_product(&product))
    }

    /// Create or update from the form: an id means PUT, none means POST.
    pub async fn save_product(&self, form: &ProductForm) -> ClientResult<ProductsRefresh> {
        let id = form.product_id()?;
        let payload = form.to_payload()?;

        match id {
            Some(id) => {
                self.api.update_product(id, &payload).await?;
                info!(product_id = id, "Product updated");
            }
            None => {
                self.api.create_product(&payload).await?;
                info!(name = %payload.name, "Product created");
            }
        }
        self.refresh_products().await
    }

    pub async fn delete_product(&self, id: i64) -> ClientResult<ProductsRefresh> {
        self.api.delete_product(id).await?;
        info!(product_id = id, "Product deleted");
        self.refresh_products().await
    }

    pub async fn orders(&self) -> ClientResult<Vec<Order>> {
        Ok(self.api.admin_orders().await?)
    }

    pub async fn users(&self) -> ClientResult<Vec<User>> {
        Ok(self.api.admin_users().await?)
    }

    /// Analytics tab: the aggregate endpoint only, no fallback.
    pub async fn analytics(&self) -> ClientResult<AdminStats> {
        Ok(self.api.admin_stats().await?)
    }

    async fn refresh_products(&self) -> ClientResult<ProductsRefresh> {
        let products = self.products().await?;
        let stats = match self.dashboard_stats().await {
            Ok(stats) => Some(stats),
            Err(e) => {
                warn!(error = %e, "Dashboard counters not refreshed");
                None
            }
        };
        Ok(ProductsRefresh { products, stats })
    }
}
