//! Cart persisted to local storage.

use doce_cache::{Cache, MemoryStore, Store};

use crate::cart::{Cart, LineItem, LineItemSink};
use crate::error::CommerceError;
use crate::ids::LineItemId;
use crate::money::Money;

/// Storage key the cart lives under.
pub const CART_STORAGE_KEY: &str = "carrinhoPascoa";

/// Where the cart was restored from at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartSource {
    /// Snapshot found in local storage.
    LocalStorage,
    /// Snapshot carried in from another view.
    Carried,
    /// Nothing usable; started empty.
    Empty,
}

/// The single authoritative cart: in-memory state written through to a
/// store on every mutation.
///
/// ```rust
/// use doce_cache::Cache;
/// use doce_commerce::cart::{CartSource, CartStore};
///
/// let store = CartStore::restore(Cache::in_memory(), "carrinhoPascoa", None);
/// assert_eq!(store.source(), CartSource::Empty);
/// assert!(store.cart().is_empty());
/// ```
#[derive(Debug)]
pub struct CartStore<S: Store = MemoryStore> {
    cart: Cart,
    cache: Cache<S>,
    key: String,
    source: CartSource,
}

impl<S: Store> CartStore<S> {
    /// Restore the cart.
    ///
    /// Local storage wins over the carried snapshot; an unreadable snapshot
    /// is logged and skipped, and with nothing usable the cart starts empty.
    /// Never fails.
    pub fn restore(cache: Cache<S>, key: impl Into<String>, carried: Option<&str>) -> Self {
        let key = key.into();

        let (cart, source) = match Self::read_local(&cache, &key) {
            Some(cart) => (cart, CartSource::LocalStorage),
            None => match carried.and_then(Self::read_carried) {
                Some(cart) => (cart, CartSource::Carried),
                None => (Cart::new(), CartSource::Empty),
            },
        };

        tracing::debug!(?source, lines = cart.unique_item_count(), "cart restored");
        Self {
            cart,
            cache,
            key,
            source,
        }
    }

    fn read_local(cache: &Cache<S>, key: &str) -> Option<Cart> {
        match cache.get_raw(key) {
            Ok(Some(text)) => match Cart::from_json(&text) {
                Ok(cart) => Some(cart),
                Err(e) => {
                    tracing::warn!(key, error = %e, "stored cart is unreadable, ignoring it");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "could not read stored cart");
                None
            }
        }
    }

    fn read_carried(text: &str) -> Option<Cart> {
        match Cart::from_json(text) {
            Ok(cart) => Some(cart),
            Err(e) => {
                tracing::warn!(error = %e, "carried cart is unreadable, ignoring it");
                None
            }
        }
    }

    /// Where the cart came from at startup.
    pub fn source(&self) -> CartSource {
        self.source
    }

    /// Current cart contents.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add an item, merging with an existing line of the same id.
    pub fn add_item(&mut self, item: LineItem) -> Result<LineItemId, CommerceError> {
        let id = self.cart.add_item(item)?;
        self.persist();
        Ok(id)
    }

    /// Remove a line; missing ids are ignored.
    pub fn remove_item(&mut self, id: &LineItemId) -> bool {
        let removed = self.cart.remove_item(id);
        if removed {
            self.persist();
        }
        removed
    }

    /// Set a line's quantity; zero or less removes it.
    pub fn update_quantity(&mut self, id: &LineItemId, quantity: i64) -> Result<bool, CommerceError> {
        let changed = self.cart.update_quantity(id, quantity)?;
        if changed {
            self.persist();
        }
        Ok(changed)
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Cart total.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// JSON snapshot for carrying the cart to another view.
    pub fn snapshot(&self) -> Result<String, CommerceError> {
        self.cart.to_json()
    }

    /// Borrow the backing cache.
    pub fn cache(&self) -> &Cache<S> {
        &self.cache
    }

    /// Write the cart through. A failed write is logged; the in-memory cart
    /// stays authoritative for the session.
    fn persist(&mut self) {
        if let Err(e) = self.cache.set(&self.key, &self.cart) {
            tracing::warn!(key = %self.key, error = %e, "failed to persist cart");
        }
    }
}

impl<S: Store> LineItemSink for CartStore<S> {
    fn add_item(&mut self, item: LineItem) -> Result<LineItemId, CommerceError> {
        CartStore::add_item(self, item)
    }
}
