/// Page configuration: storage key, labels and dialog texts
use serde::{Deserialize, Serialize};

/// Everything the storefront page shows or names.
///
/// Every field has a default, so a host page can override a single label
/// from JavaScript (`start_storefront_with({ currency: "$" })`) and keep the
/// rest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct StorefrontConfig {
    pub storage_key: String,
    pub currency: String,
    pub cart_label: String,
    pub empty_cart: String,
    pub total_label: String,
    pub default_product_name: String,
    pub export_file_name: String,
    pub export_saved: String,
    pub mail_subject: String,
    pub email_prompt: String,
    pub cancelled: String,
    pub invalid_email: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        StorefrontConfig {
            storage_key: "vovajon_cart_v1".to_string(),
            currency: "₴".to_string(),
            cart_label: "Кошик".to_string(),
            empty_cart: "Кошик порожній".to_string(),
            total_label: "Разом".to_string(),
            default_product_name: "Товар".to_string(),
            export_file_name: "cart_summary.txt".to_string(),
            export_saved: "Файл \"cart_summary.txt\" створено в обраній папці.".to_string(),
            mail_subject: "Замовлення з Vovajon".to_string(),
            email_prompt: "Введіть вашу електронну пошту для отримання підтвердження:".to_string(),
            cancelled: "Скасовано".to_string(),
            invalid_email: "Невірний формат пошти".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: StorefrontConfig =
            serde_json::from_str(r#"{"currency":"$","storageKey":"shop"}"#).unwrap();

        assert_eq!(config.currency, "$");
        assert_eq!(config.storage_key, "shop");
        assert_eq!(config.empty_cart, "Кошик порожній");
        assert_eq!(config.export_file_name, "cart_summary.txt");
    }

    #[test]
    fn test_empty_object_is_default() {
        let config: StorefrontConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config, StorefrontConfig::default());
    }
}
