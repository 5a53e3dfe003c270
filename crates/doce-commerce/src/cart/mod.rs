//! Shopping cart module.
//!
//! Contains the cart, its line items, and the store that persists it.

mod cart;
mod store;

pub use cart::{
    items_total, Cart, EggDetails, ItemCategory, LineItem, SizeLabel, UnitSelection,
    MAX_QUANTITY_PER_ITEM,
};
pub use store::{CartSource, CartStore, CART_STORAGE_KEY};

use crate::error::CommerceError;
use crate::ids::LineItemId;

/// Anything finished line items can be dropped into.
pub trait LineItemSink {
    fn add_item(&mut self, item: LineItem) -> Result<LineItemId, CommerceError>;
}

impl LineItemSink for Cart {
    fn add_item(&mut self, item: LineItem) -> Result<LineItemId, CommerceError> {
        Cart::add_item(self, item)
    }
}
