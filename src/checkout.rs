/// Buy flow: email validation and the mailto: hand-off

use crate::cart_data::Cart;
use crate::config::StorefrontConfig;
use crate::summary::cart_text;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));

/// Characters `encodeURIComponent` leaves untouched
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("email prompt cancelled")]
    Cancelled,
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

impl CheckoutError {
    /// Text shown to the shopper in the alert dialog
    pub fn message<'a>(&self, config: &'a StorefrontConfig) -> &'a str {
        match self {
            CheckoutError::EmptyCart => &config.empty_cart,
            CheckoutError::Cancelled => &config.cancelled,
            CheckoutError::InvalidEmail(_) => &config.invalid_email,
        }
    }
}

pub fn ensure_not_empty(cart: &Cart) -> Result<(), CheckoutError> {
    if cart.is_empty() {
        Err(CheckoutError::EmptyCart)
    } else {
        Ok(())
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

pub fn mailto_url(email: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        encode_component(email),
        encode_component(subject),
        encode_component(body)
    )
}

/// Turn the prompt answer into the mailto: URL to navigate to.
///
/// `email` is `None` when the prompt was dismissed.
pub fn prepare_order(
    cart: &Cart,
    email: Option<&str>,
    config: &StorefrontConfig,
) -> Result<String, CheckoutError> {
    ensure_not_empty(cart)?;

    let email = match email {
        Some(email) if !email.is_empty() => email,
        _ => return Err(CheckoutError::Cancelled),
    };

    if !is_valid_email(email) {
        return Err(CheckoutError::InvalidEmail(email.to_string()));
    }

    Ok(mailto_url(email, &config.mail_subject, &cart_text(cart, config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_product("A", 10.0);
        cart.add_product("A", 10.0);
        cart
    }

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("x@y.com"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(is_valid_email("покупець@пошта.укр"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("notanemail"));
        assert!(!is_valid_email("x@y"));
        assert!(!is_valid_email("x y@z.com"));
        assert!(!is_valid_email("@y.com"));
        assert!(!is_valid_email("x@@y.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_email_regex_compiled_once() {
        assert_eq!(LazyLock::force(&EMAIL).as_str(), EMAIL_PATTERN);
        assert!(is_valid_email("x@y.com"));
        assert!(is_valid_email("x@y.com"));
    }

    #[test]
    fn test_encode_component_matches_browser() {
        assert_eq!(encode_component("x@y.com"), "x%40y.com");
        assert_eq!(encode_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_component("-_.!~*'()"), "-_.!~*'()");
    }

    #[test]
    fn test_prepare_order() {
        let url = prepare_order(&create_test_cart(), Some("x@y.com"), &StorefrontConfig::default())
            .unwrap();

        assert_eq!(
            url,
            "mailto:x%40y.com\
             ?subject=%D0%97%D0%B0%D0%BC%D0%BE%D0%B2%D0%BB%D0%B5%D0%BD%D0%BD%D1%8F%20%D0%B7%20Vovajon\
             &body=A%20x%202%20%E2%80%94%2010%E2%82%B4%20each%0A%0A%D0%A0%D0%B0%D0%B7%D0%BE%D0%BC%3A%2020%E2%82%B4"
        );
    }

    #[test]
    fn test_prepare_order_rejects_invalid_email() {
        let result = prepare_order(&create_test_cart(), Some("notanemail"), &StorefrontConfig::default());

        assert_eq!(result, Err(CheckoutError::InvalidEmail("notanemail".to_string())));
    }

    #[test]
    fn test_prepare_order_cancelled() {
        let config = StorefrontConfig::default();

        assert_eq!(prepare_order(&create_test_cart(), None, &config), Err(CheckoutError::Cancelled));
        assert_eq!(prepare_order(&create_test_cart(), Some(""), &config), Err(CheckoutError::Cancelled));
    }

    #[test]
    fn test_prepare_order_empty_cart() {
        let result = prepare_order(&Cart::new(), Some("x@y.com"), &StorefrontConfig::default());

        assert_eq!(result, Err(CheckoutError::EmptyCart));
    }

    #[test]
    fn test_error_messages() {
        let config = StorefrontConfig::default();

        assert_eq!(CheckoutError::EmptyCart.message(&config), "Кошик порожній");
        assert_eq!(CheckoutError::Cancelled.message(&config), "Скасовано");
        assert_eq!(
            CheckoutError::InvalidEmail("x".to_string()).message(&config),
            "Невірний формат пошти"
        );
    }
}
