/// Storefront page wiring: binds the static page elements to the cart

use crate::checkout::{ensure_not_empty, prepare_order};
use crate::config::StorefrontConfig;
use crate::export::{ExportOutcome, export_summary};
use crate::storage::{CartStore, LocalStorage};
use crate::summary::{badge_label, cart_text, cart_view, format_number};
use crate::ui::cart_list::{CartList, CartListProps};
use crate::ui::files::{BlobDownloader, PickedFolder};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, MouseEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    Window,
};
use yew::AppHandle;

const HIDDEN: &str = "hidden";

#[derive(Debug, Error)]
pub enum PageError {
    #[error("no browser window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for PageError {
    fn from(e: JsValue) -> Self {
        PageError::Js(format!("{:?}", e))
    }
}

/// Shared state behind every click handler
pub struct Storefront {
    config: StorefrontConfig,
    store: CartStore<LocalStorage>,
    window: Window,
    document: Document,
    mounted_list: RefCell<Option<AppHandle<CartList>>>,
}

impl Storefront {
    pub fn new(config: StorefrontConfig) -> Result<Rc<Self>, PageError> {
        let window = web_sys::window().ok_or(PageError::NoWindow)?;
        let document = window.document().ok_or(PageError::NoDocument)?;
        let store = CartStore::new(LocalStorage, config.storage_key.clone());

        Ok(Rc::new(Storefront {
            config,
            store,
            window,
            document,
            mounted_list: RefCell::new(None),
        }))
    }

    fn find(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn find_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log::error!("alert failed: {:?}", e);
        }
    }

    pub fn update_cart_button(&self) {
        if let Some(button) = self.find(".cart-btn") {
            let cart = self.store.read_cart();
            button.set_text_content(Some(&badge_label(&cart, &self.config)));
        }
    }

    pub fn render_cart_list(&self) {
        let view = cart_view(&self.store.read_cart());

        if let Some(total) = self.find(".total-amount") {
            total.set_text_content(Some(&format_number(view.total)));
        }

        let props = CartListProps {
            view,
            currency: self.config.currency.clone().into(),
            empty_message: self.config.empty_cart.clone().into(),
        };

        let mut mounted = self.mounted_list.borrow_mut();
        match mounted.as_mut() {
            Some(handle) => handle.update(props),
            None => {
                let Some(root) = self.find(".cart-list") else {
                    log::error!("Cannot render cart: no .cart-list element on the page");
                    return;
                };
                root.set_inner_html("");
                *mounted = Some(yew::Renderer::<CartList>::with_root_and_props(root, props).render());
            }
        }
    }

    pub fn add_product(&self, name: &str, price: f64) {
        if let Err(e) = self.store.add_product(name, price) {
            log::error!("Failed to save cart: {}", e);
        }
        self.update_cart_button();
    }

    pub fn clear_cart(&self) {
        if let Err(e) = self.store.clear_cart() {
            log::error!("Failed to clear cart: {}", e);
        }
        self.update_cart_button();
        self.render_cart_list();
    }

    fn set_hidden(element: Option<Element>, hidden: bool) {
        if let Some(element) = element {
            let classes = element.class_list();
            let result = if hidden {
                classes.add_1(HIDDEN)
            } else {
                classes.remove_1(HIDDEN)
            };
            if let Err(e) = result {
                log::error!("Failed to toggle view: {:?}", e);
            }
        }
    }

    pub fn show_cart_view(&self) {
        Self::set_hidden(self.find_by_id("main-view"), true);
        Self::set_hidden(self.find_by_id("cart-view"), false);
        self.render_cart_list();
    }

    pub fn hide_cart_view(&self) {
        Self::set_hidden(self.find_by_id("cart-view"), true);
        Self::set_hidden(self.find_by_id("main-view"), false);
    }

    pub fn buy(&self) {
        let cart = self.store.read_cart();
        if let Err(e) = ensure_not_empty(&cart) {
            self.alert(e.message(&self.config));
            return;
        }

        let email = self
            .window
            .prompt_with_message(&self.config.email_prompt)
            .unwrap_or_else(|e| {
                log::error!("prompt failed: {:?}", e);
                None
            });

        match prepare_order(&cart, email.as_deref(), &self.config) {
            Ok(mailto) => {
                log::info!("Opening mail client for order of {} units", cart.total_quantity());
                if let Err(e) = self.window.location().set_href(&mailto) {
                    log::error!("Failed to open mail client: {:?}", e);
                }
            }
            Err(e) => {
                log::debug!("Order aborted: {}", e);
                self.alert(e.message(&self.config));
            }
        }
    }

    pub async fn export(&self) {
        let contents = cart_text(&self.store.read_cart(), &self.config);
        let folder = PickedFolder::detect();

        match export_summary(
            &self.config.export_file_name,
            &contents,
            folder.as_ref(),
            &BlobDownloader,
        )
        .await
        {
            Ok(ExportOutcome::SavedToFolder) => self.alert(&self.config.export_saved),
            Ok(ExportOutcome::Downloaded) => {}
            Err(e) => log::error!("Export failed: {}", e),
        }
    }
}

/// Read `(name, price)` off the product card around an add-to-cart button.
fn product_details(button: &Element, default_name: &str) -> (String, f64) {
    let product = button.closest(".product").ok().flatten();

    let name = product
        .as_ref()
        .and_then(|p| p.query_selector("h2").ok().flatten())
        .and_then(|h| h.text_content());
    let price = product
        .as_ref()
        .and_then(|p| p.get_attribute("data-price"));

    (
        product_name(name.as_deref(), default_name),
        parse_price(price.as_deref()),
    )
}

pub fn product_name(heading: Option<&str>, default_name: &str) -> String {
    match heading.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => default_name.to_string(),
    }
}

/// `parseFloat` semantics: the longest numeric prefix wins, anything else is 0.
pub fn parse_price(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return 0.0;
    };
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first().copied(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return 0.0;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end).copied(), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().unwrap_or(0.0)
}

fn on_click<F>(target: &Element, handler: F) -> Result<(), PageError>
where
    F: FnMut(MouseEvent) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

fn scroll_to_center(element: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

fn wire_add_to_cart(page: &Rc<Storefront>) -> Result<(), PageError> {
    let buttons = page.document.query_selector_all(".add-to-cart")?;

    for index in 0..buttons.length() {
        let Some(button) = buttons
            .get(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };

        let page = page.clone();
        let source = button.clone();
        on_click(&button, move |_| {
            let (name, price) = product_details(&source, &page.config.default_product_name);
            page.add_product(&name, price);
        })?;
    }

    Ok(())
}

fn wire_cart_buttons(page: &Rc<Storefront>) -> Result<(), PageError> {
    if let Some(button) = page.find(".cart-btn") {
        let page = page.clone();
        on_click(&button, move |e| {
            e.prevent_default();
            page.show_cart_view();
        })?;
    }

    if let Some(button) = page.find(".exit-btn") {
        let page = page.clone();
        on_click(&button, move |_| page.hide_cart_view())?;
    }

    if let Some(button) = page.find(".clear-btn") {
        let page = page.clone();
        on_click(&button, move |_| page.clear_cart())?;
    }

    if let Some(button) = page.find(".export-btn") {
        let page = page.clone();
        on_click(&button, move |_| {
            let page = page.clone();
            spawn_local(async move {
                page.export().await;
            });
        })?;
    }

    if let Some(button) = page.find(".buy-btn") {
        let page = page.clone();
        on_click(&button, move |_| page.buy())?;
    }

    Ok(())
}

fn wire_workers_panel(page: &Rc<Storefront>) -> Result<(), PageError> {
    let Some(panel) = page.find_by_id("workers-tab") else {
        return Ok(());
    };

    if let Some(button) = page.find(".workers-btn") {
        let panel = panel.clone();
        on_click(&button, move |_| {
            Storefront::set_hidden(Some(panel.clone()), false);
            scroll_to_center(&panel);
        })?;
    }

    if let Some(button) = page.find(".workers-close") {
        let panel = panel.clone();
        on_click(&button, move |_| Storefront::set_hidden(Some(panel.clone()), true))?;
    }

    if let Some(button) = page.find(".workers-scroll") {
        on_click(&button, move |_| scroll_to_center(&panel))?;
    }

    Ok(())
}

/// Attach every handler and show the current badge count.
pub fn mount(config: StorefrontConfig) -> Result<Rc<Storefront>, PageError> {
    let page = Storefront::new(config)?;

    wire_add_to_cart(&page)?;
    wire_cart_buttons(&page)?;
    wire_workers_panel(&page)?;
    page.update_cart_button();

    log::info!("Storefront cart ready");
    Ok(page)
}
