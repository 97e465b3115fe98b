use crate::error::{ClientError, ClientResult};
use crate::models::{Product, ProductPayload};

/// Product modal fields as typed. Only the numeric fields are checked
/// locally; everything else is left to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub stock_qty: String,
    pub gender_tag: String,
    pub image_url: String,
}

impl ProductForm {
    /// Prefill for editing an existing product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: Some(product.id.to_string()),
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            category: product.category.clone(),
            price: product.price.to_string(),
            stock_qty: product.stock_qty.to_string(),
            gender_tag: product.gender_tag.clone().unwrap_or_default(),
            image_url: product.image_url.clone().unwrap_or_default(),
        }
    }

    /// Existing product id; a blank id field means "create".
    pub fn product_id(&self) -> ClientResult<Option<i64>> {
        match self.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<i64>()
                .map(Some)
                .map_err(|_| ClientError::validation(format!("Invalid product id: {}", raw))),
        }
    }

    pub fn to_payload(&self) -> ClientResult<ProductPayload> {
        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| ClientError::validation("Price must be a number"))?;
        let stock_qty = self
            .stock_qty
            .trim()
            .parse::<i64>()
            .map_err(|_| ClientError::validation("Stock quantity must be a whole number"))?;

        Ok(ProductPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            price,
            stock_qty,
            gender_tag: self.gender_tag.clone(),
            image_url: self.image_url.clone(),
        })
    }
}
