/// Data structures for the storefront cart
use serde::{Deserialize, Deserializer, Serialize};

/// One product line in the cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub name: String,
    #[serde(default)]
    pub qty: u32,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: f64,
}

impl CartItem {
    pub fn new(name: String, price: f64) -> CartItem {
        CartItem {
            name,
            qty: 1,
            price: sanitize_price(price),
        }
    }

    /// price × qty
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.qty)
    }
}

/// The whole persisted cart, stored as a bare JSON array
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Increment the line named `name`, or append a new line with qty 1.
    pub fn add_product(&mut self, name: &str, price: f64) {
        match self.items.iter_mut().find(|item| item.name == name) {
            Some(item) => item.qty = item.qty.saturating_add(1),
            None => self.items.push(CartItem::new(name.to_string(), price)),
        }
    }

    /// Number of units across all lines (the badge count)
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |total, item| total.saturating_add(u64::from(item.qty)))
    }

    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .fold(0.0, |total, item| total + item.line_total())
    }
}

/// Missing, negative or non-finite prices count as free.
pub fn sanitize_price(price: f64) -> f64 {
    if price.is_finite() && price > 0.0 {
        price
    } else {
        0.0
    }
}

fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let price = Option::<f64>::deserialize(deserializer)?;
    Ok(price.map(sanitize_price).unwrap_or(0.0))
}
