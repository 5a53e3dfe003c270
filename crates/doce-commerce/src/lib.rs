//! Storefront core for the Doce Presente bakery.
//!
//! This crate holds everything a storefront session needs short of rendering:
//!
//! - **Catalog**: cakes, stuffed pastries and the Easter egg building blocks
//! - **Cart**: line items that merge by identity, persisted on every change
//! - **Configurator**: single eggs and multi-unit egg packages, one unit at a time
//! - **Checkout**: customer details, payment, PIX, and the WhatsApp order message
//!
//! # Example
//!
//! ```rust
//! use doce_cache::Cache;
//! use doce_commerce::prelude::*;
//!
//! let catalog = Catalog::builtin()?;
//! let mut store = CartStore::restore(Cache::in_memory(), CART_STORAGE_KEY, None);
//!
//! let cake = catalog.cake(ProductId::new(1)).expect("cake on the menu");
//! store.add_item(LineItem::product(ProductKind::Cake, cake, "400ml", 2)?)?;
//! store.add_item(LineItem::product(ProductKind::Cake, cake, "400ml", 1)?)?;
//! assert_eq!(store.total().display(), "R$ 54.00");
//!
//! let mut checkout = Checkout::new();
//! checkout.set_name("Ana");
//! checkout.set_phone("91988887777");
//! checkout.set_address("Rua das Flores, 10");
//! let order = checkout.submit(store.cart())?;
//!
//! let config = StorefrontConfig::default();
//! let link = whatsapp_link(&config.whatsapp_phone, &order.message(&config))?;
//! assert_eq!(link.host_str(), Some("wa.me"));
//! # Ok::<(), CommerceError>(())
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod configurator;
pub mod notice;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::StorefrontConfig;
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::notice::TransientNotice;

    // Catalog
    pub use crate::catalog::{
        Catalog, EggFilling, EggPackage, EggShell, EggSize, KitConfiguration, PackageLayout,
        Product, ProductKind,
    };

    // Cart
    pub use crate::cart::{
        Cart, CartSource, CartStore, ItemCategory, LineItem, LineItemSink, SizeLabel,
        UnitSelection, CART_STORAGE_KEY,
    };

    // Configurator
    pub use crate::configurator::{ConfiguratorState, EggConfigurator, FillingOption, Transition};

    // Checkout
    pub use crate::checkout::{
        copy_pix_key, request_location, whatsapp_link, Checkout, Clipboard, Coordinates,
        CustomerInfo, LocationError, LocationProvider, Order, PaymentMethod, PixDetails,
    };
}
