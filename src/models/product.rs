//! Product catalogue models and listing query parameters.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Nullable on the backend; `null` reads as an empty string
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    pub price: f64,
    /// Not range-checked by the backend, so it can be zero or negative
    #[serde(default)]
    pub stock_qty: i64,
    #[serde(default)]
    pub gender_tag: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock_qty > 0
    }

    /// Upper bound of the quantity selector; never below 1.
    pub fn max_quantity(&self) -> u32 {
        u32::try_from(self.stock_qty.max(1)).unwrap_or(u32::MAX)
    }

    /// Clamp a requested quantity to what the detail page lets a shopper pick.
    pub fn clamp_quantity(&self, requested: u32) -> u32 {
        requested.clamp(1, self.max_quantity())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Pagination envelope returned by `GET /products?page=..&size=..`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total_elements: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    pub last: bool,
    #[serde(default)]
    pub first: Option<bool>,
}

/// Sort orders understood by the product listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "priceAsc")]
    PriceAsc,
    #[serde(rename = "priceDesc")]
    PriceDesc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::PriceAsc => "priceAsc",
            SortOrder::PriceDesc => "priceDesc",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "priceAsc" | "price-asc" | "asc" => Ok(SortOrder::PriceAsc),
            "priceDesc" | "price-desc" | "desc" => Ok(SortOrder::PriceDesc),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

/// Filter state of the storefront grid. Any change to it resets pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub gender: Option<String>,
    pub sort: Option<SortOrder>,
}

impl ProductFilter {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Build the `/products?...` path for one page of this filter.
    pub fn page_path(&self, page: u32, size: u32) -> String {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(search) = non_blank(&self.search) {
            params.push(("search", search));
        }
        if let Some(category) = non_blank(&self.category) {
            params.push(("category", category));
        }
        if let Some(gender) = non_blank(&self.gender) {
            params.push(("gender", gender));
        }
        if let Some(sort) = self.sort {
            params.push(("sort", sort.as_str().to_string()));
        }
        params.push(("page", page.to_string()));
        params.push(("size", size.to_string()));

        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("/products?{}", query)
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Body for admin create/update. Presence of an id elsewhere selects PUT vs POST.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub stock_qty: i64,
    pub gender_tag: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductSaved {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub product: Option<Product>,
}
