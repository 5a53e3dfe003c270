//! Checkout form state and submission.

use std::time::Duration;

use crate::cart::Cart;
use crate::checkout::location::{request_location, LocationError, LocationProvider};
use crate::checkout::{Coordinates, CustomerInfo, Order, PaymentMethod};
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// Notice shown when neither an address nor a location was given.
pub const MISSING_DESTINATION_NOTICE: &str =
    "Por favor, informe o endereço ou compartilhe sua localização";

/// Fields checked on submit, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutField {
    Name,
    Phone,
    Payment,
    Destination,
}

impl CheckoutField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutField::Name => "name",
            CheckoutField::Phone => "phone",
            CheckoutField::Payment => "payment method",
            CheckoutField::Destination => "address or location",
        }
    }
}

/// The checkout form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Checkout {
    pub customer: CustomerInfo,
    pub payment: PaymentMethod,
    /// Retryable inline notice about the destination.
    #[serde(skip)]
    location_notice: Option<String>,
}

impl Checkout {
    /// Empty form; payment defaults to cash.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.customer.name = name.into();
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.customer.phone = phone.into();
    }

    /// Set the delivery address; a non-blank one replaces a shared location.
    pub fn set_address(&mut self, address: impl Into<String>) {
        self.customer.set_address(address);
        if self.customer.has_destination() {
            self.location_notice = None;
        }
    }

    /// Use a shared location instead of a typed address.
    pub fn set_location(&mut self, location: Coordinates) {
        self.customer.set_location(location);
        self.location_notice = None;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.customer.set_notes(notes);
    }

    pub fn set_payment(&mut self, payment: PaymentMethod) {
        self.payment = payment;
    }

    /// Current destination notice, if any.
    pub fn location_notice(&self) -> Option<&str> {
        self.location_notice.as_deref()
    }

    /// Ask for the device position and store it on success.
    ///
    /// A failure leaves the form untouched apart from a retryable notice.
    pub async fn locate(
        &mut self,
        provider: Option<&dyn LocationProvider>,
        timeout: Duration,
    ) -> Result<Coordinates, LocationError> {
        self.location_notice = None;
        match request_location(provider, timeout).await {
            Ok(coords) => {
                self.set_location(coords);
                Ok(coords)
            }
            Err(e) => {
                tracing::debug!(error = %e, "location request failed");
                self.location_notice = Some(e.notice());
                Err(e)
            }
        }
    }

    /// Every required field still missing, in check order.
    pub fn missing_fields(&self) -> Vec<CheckoutField> {
        let mut missing = Vec::new();
        if self.customer.name.trim().is_empty() {
            missing.push(CheckoutField::Name);
        }
        if self.customer.phone.trim().is_empty() {
            missing.push(CheckoutField::Phone);
        }
        if self.payment.is_blank() {
            missing.push(CheckoutField::Payment);
        }
        if !self.customer.has_destination() {
            missing.push(CheckoutField::Destination);
        }
        missing
    }

    /// Validate the form against `cart` and build the order.
    ///
    /// The first problem found wins: empty cart, then name, phone, payment
    /// and destination.
    pub fn submit(&mut self, cart: &Cart) -> Result<Order, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        if let Some(field) = self.missing_fields().first() {
            if *field == CheckoutField::Destination {
                self.location_notice = Some(MISSING_DESTINATION_NOTICE.to_string());
            }
            return Err(CommerceError::CheckoutIncomplete(field.as_str().to_string()));
        }

        let order = Order {
            items: cart.items().to_vec(),
            customer: self.customer.clone(),
            payment: self.payment.clone(),
            created_at: current_timestamp(),
        };
        tracing::debug!(
            lines = order.items.len(),
            total = %order.total(),
            payment = order.payment.id(),
            "order submitted"
        );
        Ok(order)
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
