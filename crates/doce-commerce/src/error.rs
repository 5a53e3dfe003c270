//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Size label not offered for the product.
    #[error("Size {size:?} is not offered for {product}")]
    InvalidSize { product: String, size: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Configurator action not valid in its current state.
    #[error("Invalid configurator transition: {0}")]
    InvalidConfiguratorState(String),

    /// A package layout only allows a limited number of distinct fillings.
    #[error("This package allows at most {cap} different fillings")]
    FillingCapReached { cap: usize },

    /// Checkout cannot be submitted with an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Checkout incomplete.
    #[error("Checkout incomplete: missing {0}")]
    CheckoutIncomplete(String),

    /// Outbound chat link could not be built.
    #[error("Invalid link: {0}")]
    InvalidLink(String),

    /// Cache error.
    #[error("Cache error: {0}")]
    CacheError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<doce_cache::CacheError> for CommerceError {
    fn from(e: doce_cache::CacheError) -> Self {
        CommerceError::CacheError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
