//! Checkout module.
//!
//! Customer details, payment choice, the checkout form and the order
//! message handed off to WhatsApp.

mod customer;
mod flow;
mod location;
mod order;
mod payment;

pub use customer::{Coordinates, CustomerInfo};
pub use flow::{Checkout, CheckoutField, MISSING_DESTINATION_NOTICE};
pub use location::{request_location, LocationError, LocationProvider, DEFAULT_LOCATION_TIMEOUT};
pub use order::{whatsapp_link, Order};
pub use payment::{
    copy_pix_key, Clipboard, ClipboardError, PaymentMethod, PixDetails, PIX_COPIED_NOTICE,
};
