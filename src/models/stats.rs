//! Admin dashboard aggregate statistics.

use serde::{Deserialize, Serialize};

/// Body of `GET /admin/stats`. Missing fields read as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    #[serde(default)]
    pub total_products: u64,
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default)]
    pub total_revenue: Option<f64>,
    #[serde(default)]
    pub pending_orders: Option<u64>,
    #[serde(default)]
    pub low_stock_products: Option<u64>,
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}
