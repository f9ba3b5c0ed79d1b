/// Pure views of the cart: badge label, list view-model and text summary

use crate::cart_data::Cart;
use crate::config::StorefrontConfig;

/// One rendered cart line
#[derive(Debug, Clone, PartialEq)]
pub struct CartRow {
    pub name: String,
    pub qty: u32,
    pub price: f64,
    pub line_total: f64,
}

/// What the cart view shows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartView {
    pub rows: Vec<CartRow>,
    pub total: f64,
    pub is_empty: bool,
}

/// Format a number the way the page's JavaScript prints it: shortest
/// round-trip digits, exponent form from 1e21 up and below 1e-6.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{:e}", value);
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        };
    }

    value.to_string()
}

/// "Кошик (N)" where N counts units, not lines
pub fn badge_label(cart: &Cart, config: &StorefrontConfig) -> String {
    format!("{} ({})", config.cart_label, cart.total_quantity())
}

pub fn cart_view(cart: &Cart) -> CartView {
    if cart.is_empty() {
        return CartView {
            rows: Vec::new(),
            total: 0.0,
            is_empty: true,
        };
    }

    let rows: Vec<CartRow> = cart
        .items
        .iter()
        .map(|item| CartRow {
            name: item.name.clone(),
            qty: item.qty,
            price: item.price,
            line_total: item.line_total(),
        })
        .collect();
    let total = rows.iter().fold(0.0, |total, row| total + row.line_total);

    CartView {
        rows,
        total,
        is_empty: false,
    }
}

/// Plain-text order summary shared by export and buy:
///
/// ```text
/// A x 2 — 10₴ each
///
/// Разом: 20₴
/// ```
pub fn cart_text(cart: &Cart, config: &StorefrontConfig) -> String {
    if cart.is_empty() {
        return config.empty_cart.clone();
    }

    let mut lines: Vec<String> = cart
        .items
        .iter()
        .map(|item| {
            format!(
                "{} x {} — {}{} each",
                item.name,
                item.qty,
                format_number(item.price),
                config.currency
            )
        })
        .collect();
    lines.push(String::new());
    lines.push(format!(
        "{}: {}{}",
        config.total_label,
        format_number(cart.total()),
        config.currency
    ));

    lines.join("\n")
}
