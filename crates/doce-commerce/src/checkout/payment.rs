//! Payment methods and PIX details.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::StorefrontConfig;
use crate::notice::TransientNotice;

/// How the customer will pay on delivery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Pix,
    Card,
    /// An id this storefront does not know; carried through as given.
    Other(String),
}

impl PaymentMethod {
    /// Methods offered at checkout, in display order.
    pub const OFFERED: [PaymentMethod; 3] = [PaymentMethod::Cash, PaymentMethod::Pix, PaymentMethod::Card];

    pub fn from_id(id: &str) -> Self {
        match id {
            "dinheiro" => PaymentMethod::Cash,
            "pix" => PaymentMethod::Pix,
            "cartao" => PaymentMethod::Card,
            other => PaymentMethod::Other(other.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            PaymentMethod::Cash => "dinheiro",
            PaymentMethod::Pix => "pix",
            PaymentMethod::Card => "cartao",
            PaymentMethod::Other(id) => id,
        }
    }

    /// Label used in the order message. Unknown ids are upper-cased.
    pub fn label(&self) -> String {
        match self {
            PaymentMethod::Cash => "Dinheiro".to_string(),
            PaymentMethod::Pix => "PIX".to_string(),
            PaymentMethod::Card => "Cartão".to_string(),
            PaymentMethod::Other(id) => id.to_uppercase(),
        }
    }

    /// Check if nothing usable was chosen.
    pub fn is_blank(&self) -> bool {
        self.id().trim().is_empty()
    }
}

impl From<String> for PaymentMethod {
    fn from(id: String) -> Self {
        PaymentMethod::from_id(&id)
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        method.id().to_string()
    }
}

/// What the customer needs to pay by PIX.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixDetails {
    pub key: String,
    /// Reference to the static QR code image.
    pub qr_image: String,
}

impl PixDetails {
    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self {
            key: config.pix_key.clone(),
            qr_image: config.pix_qr_image.clone(),
        }
    }
}

/// Clipboard write failure.
#[derive(Debug, Error)]
#[error("Clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

/// System clipboard.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Banner text after a successful copy.
pub const PIX_COPIED_NOTICE: &str = "Chave PIX copiada!";

/// Copy the PIX key and flash a confirmation.
///
/// A failed copy is only logged. Returns whether the key was copied.
pub async fn copy_pix_key(
    clipboard: &dyn Clipboard,
    pix: &PixDetails,
    notice: &TransientNotice,
) -> bool {
    match clipboard.write_text(&pix.key).await {
        Ok(()) => {
            notice.show(PIX_COPIED_NOTICE);
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to copy PIX key");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_labels() {
        assert_eq!(PaymentMethod::from_id("dinheiro").label(), "Dinheiro");
        assert_eq!(PaymentMethod::from_id("pix").label(), "PIX");
        assert_eq!(PaymentMethod::from_id("cartao").label(), "Cartão");
        assert_eq!(PaymentMethod::from_id("boleto").label(), "BOLETO");
    }

    #[test]
    fn test_serializes_as_id() {
        let json = serde_json::to_string(&PaymentMethod::Card).unwrap();
        assert_eq!(json, "\"cartao\"");
        let back: PaymentMethod = serde_json::from_str("\"vale\"").unwrap();
        assert_eq!(back, PaymentMethod::Other("vale".to_string()));
    }

    #[test]
    fn test_blank_other_is_blank() {
        assert!(PaymentMethod::from_id("").is_blank());
        assert!(!PaymentMethod::Cash.is_blank());
    }

    #[derive(Default)]
    struct RecordingClipboard {
        written: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Clipboard for RecordingClipboard {
        async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            self.written.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    struct DeniedClipboard;

    #[async_trait]
    impl Clipboard for DeniedClipboard {
        async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError("permission denied".to_string()))
        }
    }

    fn pix() -> PixDetails {
        PixDetails::from_config(&StorefrontConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_shows_notice() {
        let clipboard = RecordingClipboard::default();
        let notice = TransientNotice::default();

        assert!(copy_pix_key(&clipboard, &pix(), &notice).await);
        assert_eq!(*clipboard.written.lock().unwrap(), vec![pix().key]);
        assert_eq!(notice.current().as_deref(), Some(PIX_COPIED_NOTICE));
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_failure_is_quiet() {
        let notice = TransientNotice::default();
        assert!(!copy_pix_key(&DeniedClipboard, &pix(), &notice).await);
        assert!(!notice.is_visible());
    }
}
