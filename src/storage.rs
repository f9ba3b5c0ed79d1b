/// Cart persistence over a string key-value slot (window.localStorage in the browser)

use crate::cart_data::Cart;
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("failed to serialize cart: {0}")]
    Serialize(String),
    #[error("failed to write storage: {0}")]
    Write(String),
}

/// Minimal string slot storage the cart needs
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Browser `window.localStorage`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()
            .ok_or(StorageError::Unavailable)?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

/// In-process storage, used where no browser storage exists
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The cart as stored under a single key. Nothing is cached: every
/// operation re-reads the slot.
#[derive(Debug)]
pub struct CartStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> CartStore<S> {
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        CartStore {
            backend,
            key: key.into(),
        }
    }

    /// Missing or corrupt data reads as an empty cart.
    pub fn read_cart(&self) -> Cart {
        let Some(raw) = self.backend.get(&self.key) else {
            return Cart::new();
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable cart in '{}': {}", self.key, e);
            Cart::new()
        })
    }

    pub fn write_cart(&self, cart: &Cart) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(cart).map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.backend.set(&self.key, &json)
    }

    pub fn add_product(&self, name: &str, price: f64) -> Result<Cart, StorageError> {
        let mut cart = self.read_cart();
        cart.add_product(name, price);
        self.write_cart(&cart)?;
        log::debug!("Added '{}' to cart ({} units)", name, cart.total_quantity());
        Ok(cart)
    }

    pub fn clear_cart(&self) -> Result<(), StorageError> {
        self.write_cart(&Cart::new())?;
        log::debug!("Cart cleared");
        Ok(())
    }
}
