//! Storefront settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cart::CART_STORAGE_KEY;
use crate::checkout::DEFAULT_LOCATION_TIMEOUT;
use crate::notice::DEFAULT_NOTICE_DELAY;

/// Settings for one storefront. Every field has a default, so a partial
/// file is enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Shown in the order message header.
    #[serde(default = "default_store_name")]
    pub store_name: String,

    /// WhatsApp number orders are sent to, with country code.
    #[serde(default = "default_whatsapp_phone")]
    pub whatsapp_phone: String,

    #[serde(default = "default_pix_key")]
    pub pix_key: String,

    /// Path or URL of the static PIX QR image.
    #[serde(default = "default_pix_qr_image")]
    pub pix_qr_image: String,

    /// Local storage key for the cart.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default = "default_location_timeout_ms")]
    pub location_timeout_ms: u64,

    /// How long confirmation banners stay up.
    #[serde(default = "default_notice_delay_ms")]
    pub notice_delay_ms: u64,

    #[serde(default = "default_maps_base_url")]
    pub maps_base_url: String,
}

impl StorefrontConfig {
    pub fn location_timeout(&self) -> Duration {
        Duration::from_millis(self.location_timeout_ms)
    }

    pub fn notice_delay(&self) -> Duration {
        Duration::from_millis(self.notice_delay_ms)
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            store_name: default_store_name(),
            whatsapp_phone: default_whatsapp_phone(),
            pix_key: default_pix_key(),
            pix_qr_image: default_pix_qr_image(),
            storage_key: default_storage_key(),
            location_timeout_ms: default_location_timeout_ms(),
            notice_delay_ms: default_notice_delay_ms(),
            maps_base_url: default_maps_base_url(),
        }
    }
}

fn default_store_name() -> String {
    "Doce Presente".to_string()
}

fn default_whatsapp_phone() -> String {
    "+5591900000000".to_string()
}

fn default_pix_key() -> String {
    "pedidos@docepresente.com.br".to_string()
}

fn default_pix_qr_image() -> String {
    "/img/qrpix.png".to_string()
}

fn default_storage_key() -> String {
    CART_STORAGE_KEY.to_string()
}

fn default_location_timeout_ms() -> u64 {
    DEFAULT_LOCATION_TIMEOUT.as_millis() as u64
}

fn default_notice_delay_ms() -> u64 {
    DEFAULT_NOTICE_DELAY.as_millis() as u64
}

fn default_maps_base_url() -> String {
    "https://www.google.com/maps".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: StorefrontConfig =
            serde_json::from_str(r#"{"store_name": "Doces da Vó"}"#).unwrap();
        assert_eq!(config.store_name, "Doces da Vó");
        assert_eq!(config.storage_key, "carrinhoPascoa");
        assert_eq!(config.location_timeout(), Duration::from_secs(15));
        assert_eq!(config.notice_delay(), Duration::from_secs(2));
    }
}
