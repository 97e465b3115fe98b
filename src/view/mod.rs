//! Typed view models.
//!
//! Each page's data is mapped into plain structs here, so rendering is a
//! separate concern and the mapping is testable without a terminal.

use crate::format::{format_date, format_price, image_or_placeholder};
use crate::listing::ListingSnapshot;
use crate::models::{cart_badge_count, cart_subtotal, CartItem, Order, PaymentStatus, Product, User, WishlistItem};
use crate::routes::Route;

pub const NO_PRODUCTS_MESSAGE: &str = "No products found";
pub const MISSING: &str = "--";

#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: String,
    pub image: String,
    pub in_stock: bool,
    pub link: Route,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: or_missing(&product.category),
            price: format_price(product.price),
            image: image_or_placeholder(product.image_url.as_deref(), &product.name),
            in_stock: product.in_stock(),
            link: Route::ProductDetail(product.id),
        }
    }
}

fn or_missing(value: &str) -> String {
    if value.trim().is_empty() {
        MISSING.to_string()
    } else {
        value.to_string()
    }
}

/// What the storefront grid shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductGrid {
    Loading,
    /// First load came back with nothing; not an error
    Empty,
    Error(String),
    Items {
        cards: Vec<ProductCard>,
        load_more_visible: bool,
    },
}

impl ProductGrid {
    pub fn from_snapshot(snapshot: &ListingSnapshot) -> Self {
        if snapshot.items.is_empty() {
            if !snapshot.loaded || snapshot.is_loading {
                return ProductGrid::Loading;
            }
            return match &snapshot.error {
                Some(message) => ProductGrid::Error(message.clone()),
                None => ProductGrid::Empty,
            };
        }

        ProductGrid::Items {
            cards: snapshot.items.iter().map(ProductCard::from).collect(),
            load_more_visible: !snapshot.is_last_page,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item_id: i64,
    pub product_id: i64,
    pub name: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
    /// Upper bound of the quantity selector
    pub max_quantity: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub subtotal: String,
    pub badge: u32,
}

impl CartView {
    pub fn new(items: &[CartItem]) -> Self {
        let lines = items
            .iter()
            .map(|item| CartLine {
                item_id: item.id,
                product_id: item.product.id,
                name: item.product.name.clone(),
                unit_price: format_price(item.product.price),
                quantity: item.quantity,
                line_total: format_price(item.line_total()),
                max_quantity: item.product.max_quantity(),
            })
            .collect();
        Self {
            lines,
            subtotal: format_price(cart_subtotal(items)),
            badge: cart_badge_count(items),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WishlistCard {
    pub item_id: i64,
    pub product: ProductCard,
}

impl From<&WishlistItem> for WishlistCard {
    fn from(item: &WishlistItem) -> Self {
        Self {
            item_id: item.id,
            product: ProductCard::from(&item.product),
        }
    }
}

/// Payment status pill on admin order rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentBadge {
    pub status: PaymentStatus,
    /// Raw status as sent, `PENDING` when absent
    pub label: String,
}

impl PaymentBadge {
    pub fn for_order(order: &Order) -> Self {
        Self {
            status: order.payment_status(),
            label: order
                .payment_status
                .clone()
                .unwrap_or_else(|| PaymentStatus::Pending.as_str().to_string()),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self.status {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Pending => "pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub id: i64,
    pub customer: String,
    pub total: String,
    pub status: String,
    pub payment: PaymentBadge,
    pub payment_id: String,
    pub date: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            customer: order
                .user
                .as_ref()
                .and_then(|user| user.email.clone())
                .unwrap_or_else(|| MISSING.to_string()),
            total: format_price(order.total_amount),
            status: order.status.clone(),
            payment: PaymentBadge::for_order(order),
            payment_id: order.payment_id.clone().unwrap_or_else(|| MISSING.to_string()),
            date: order.created_at.as_deref().map(format_date).unwrap_or_default(),
        }
    }
}

/// Order card in the profile's history.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCard {
    pub id: i64,
    pub date: String,
    pub status: String,
    pub status_class: String,
    pub items: Vec<String>,
    pub total: String,
}

impl From<&Order> for OrderCard {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            date: order.created_at.as_deref().map(format_date).unwrap_or_default(),
            status: order.status.clone(),
            status_class: format!("status-{}", order.status.to_lowercase()),
            items: order
                .items
                .iter()
                .map(|item| format!("{} × {}", item.product.name, item.quantity))
                .collect(),
            total: format_price(order.total_amount),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock_qty: i64,
    pub gender_tag: String,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: or_missing(&product.category),
            price: format_price(product.price),
            stock_qty: product.stock_qty,
            gender_tag: product.gender_tag.clone().unwrap_or_else(|| MISSING.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub joined: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
            joined: user.created_at.as_deref().map(format_date).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProductFilter, UserSummary};

    fn product(id: i64) -> Product {
        Product {
            id,
            name: format!("Tee {}", id),
            description: None,
            category: "KIDS".to_string(),
            price: 299.0,
            stock_qty: 0,
            gender_tag: None,
            image_url: None,
            created_at: None,
        }
    }

    #[test]
    fn test_uncategorised_product_shows_placeholder() {
        let mut p = product(3);
        p.category = String::new();
        p.stock_qty = -2;
        assert_eq!(ProductCard::from(&p).category, MISSING);
        assert!(!ProductCard::from(&p).in_stock);
        assert_eq!(ProductRow::from(&p).stock_qty, -2);
    }

    fn snapshot(items: Vec<Product>, is_last_page: bool) -> ListingSnapshot {
        ListingSnapshot {
            filter: ProductFilter::default(),
            items,
            current_page: 0,
            page_size: 12,
            is_last_page,
            is_loading: false,
            loaded: true,
            error: None,
        }
    }

    #[test]
    fn test_full_page_shows_load_more() {
        let grid = ProductGrid::from_snapshot(&snapshot((1..=12).map(product).collect(), false));
        match grid {
            ProductGrid::Items {
                cards,
                load_more_visible,
            } => {
                assert_eq!(cards.len(), 12);
                assert!(load_more_visible);
            }
            other => panic!("unexpected grid: {:?}", other),
        }
    }

    #[test]
    fn test_empty_first_page_is_not_an_error() {
        assert_eq!(ProductGrid::from_snapshot(&snapshot(vec![], true)), ProductGrid::Empty);

        let mut failed = snapshot(vec![], false);
        failed.error = Some("Request failed".to_string());
        assert_eq!(
            ProductGrid::from_snapshot(&failed),
            ProductGrid::Error("Request failed".to_string())
        );

        let mut fresh = snapshot(vec![], false);
        fresh.loaded = false;
        assert_eq!(ProductGrid::from_snapshot(&fresh), ProductGrid::Loading);
    }

    #[test]
    fn test_payment_badge_classes() {
        let mut order = Order {
            id: 9,
            user: Some(UserSummary {
                id: Some(1),
                name: None,
                email: Some("asha@example.com".to_string()),
            }),
            items: Vec::new(),
            total_amount: 998.0,
            status: "CREATED".to_string(),
            payment_status: None,
            payment_id: None,
            created_at: Some("2024-05-01T10:00:00".to_string()),
        };

        let row = OrderRow::from(&order);
        assert_eq!(row.payment.css_class(), "pending");
        assert_eq!(row.payment.label, "PENDING");
        assert_eq!(row.payment_id, "--");
        assert_eq!(row.customer, "asha@example.com");
        assert_eq!(row.date, "01 May 2024");

        order.payment_status = Some("PAID".to_string());
        assert_eq!(PaymentBadge::for_order(&order).css_class(), "paid");
        order.payment_status = Some("FAILED".to_string());
        assert_eq!(PaymentBadge::for_order(&order).css_class(), "failed");
        order.payment_status = Some("REFUNDED".to_string());
        let badge = PaymentBadge::for_order(&order);
        assert_eq!(badge.css_class(), "pending");
        assert_eq!(badge.label, "REFUNDED");
    }

    #[test]
    fn test_cart_view_totals() {
        let items = vec![CartItem {
            id: 3,
            product: Product {
                price: 450.0,
                stock_qty: 4,
                ..product(1)
            },
            quantity: 2,
        }];
        let view = CartView::new(&items);
        assert_eq!(view.subtotal, "₹900.00");
        assert_eq!(view.badge, 2);
        assert_eq!(view.lines[0].line_total, "₹900.00");
        assert_eq!(view.lines[0].max_quantity, 4);
    }
}
