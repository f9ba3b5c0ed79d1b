/// Storefront Cart - shopping cart widget for the storefront page
/// Built with Rust + WASM + Yew

mod cart_data;
mod checkout;
mod config;
mod export;
mod storage;
mod summary;
pub mod ui;

pub use cart_data::{Cart, CartItem};
pub use checkout::{CheckoutError, is_valid_email, mailto_url, prepare_order};
pub use config::StorefrontConfig;
pub use export::{Downloader, ExportError, ExportOutcome, FolderWriter, export_summary};
pub use storage::{CartStore, KeyValueStore, LocalStorage, MemoryStore, StorageError};
pub use summary::{CartRow, CartView, badge_label, cart_text, cart_view, format_number};

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

thread_local! {
    // Config of the most recently mounted storefront
    static ACTIVE_CONFIG: RefCell<StorefrontConfig> = RefCell::new(StorefrontConfig::default());
}

fn remember_config(config: &StorefrontConfig) {
    ACTIVE_CONFIG.with(|active| *active.borrow_mut() = config.clone());
}

fn active_config() -> StorefrontConfig {
    ACTIVE_CONFIG.with(|active| active.borrow().clone())
}

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Wire the cart into the current page with the default labels
#[wasm_bindgen]
pub fn start_storefront() -> Result<(), JsValue> {
    mount(StorefrontConfig::default())
}

// Same as `start_storefront`, overriding any subset of the labels
#[wasm_bindgen]
pub fn start_storefront_with(config: JsValue) -> Result<(), JsValue> {
    let config: StorefrontConfig = if config.is_null() || config.is_undefined() {
        StorefrontConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid storefront config: {}", e)))?
    };
    mount(config)
}

// Text summary of the stored cart, as exported and mailed, using the
// storage key and labels of the mounted storefront
#[wasm_bindgen]
pub fn cart_summary() -> String {
    let config = active_config();
    let store = CartStore::new(LocalStorage, config.storage_key.clone());
    cart_text(&store.read_cart(), &config)
}

fn mount(config: StorefrontConfig) -> Result<(), JsValue> {
    remember_config(&config);
    ui::page::mount(config)
        .map(|_| ())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
