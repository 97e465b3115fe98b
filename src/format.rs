//! Display helpers shared by the view models and the CLI.

use chrono::{DateTime, NaiveDateTime};

pub const CURRENCY_SYMBOL: &str = "₹";

/// Fixed glyph and two decimals, no grouping or locale rules.
pub fn format_price(amount: f64) -> String {
    format!("{}{:.2}", CURRENCY_SYMBOL, amount)
}

/// Gateway amounts are in paise.
pub fn format_paise(amount: u64) -> String {
    format_price(amount as f64 / 100.0)
}

pub fn placeholder_image(text: &str) -> String {
    format!(
        "https://via.placeholder.com/400x500?text={}",
        urlencoding::encode(text)
    )
}

/// Product image, or the placeholder when none is set.
pub fn image_or_placeholder(image_url: Option<&str>, text: &str) -> String {
    match image_url.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => url.to_string(),
        None => placeholder_image(text),
    }
}

/// Cut to `max_len` characters, ending in `...` when shortened.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Backend timestamps come as RFC 3339 or as a zoneless `LocalDateTime`.
/// Anything unparsable is shown as received.
pub fn format_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d %b %Y").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%d %b %Y").to_string();
    }
    raw.to_string()
}
