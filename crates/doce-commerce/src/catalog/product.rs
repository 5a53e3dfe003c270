//! Cake and pastry products.

use crate::ids::ProductId;
use crate::money::{self, Money};
use serde::{Deserialize, Serialize};

/// Which shelf of the menu a product sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// Cake in a jar.
    Cake,
    /// Stuffed pastry.
    StuffedPastry,
}

impl ProductKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductKind::Cake => "cake",
            ProductKind::StuffedPastry => "pastry",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cake" | "bolo" => Some(ProductKind::Cake),
            "pastry" | "stuffed_pastry" => Some(ProductKind::StuffedPastry),
            _ => None,
        }
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Catalog identifier (unique within its kind).
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Short description for the menu.
    #[serde(default)]
    pub description: String,
    /// Unit price, whatever the size.
    #[serde(with = "money::decimal")]
    pub price: Money,
    /// Size labels offered (e.g., "400ml"); may be empty.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Image reference.
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Size preselected on the menu: the first one listed.
    pub fn default_size(&self) -> Option<&str> {
        self.sizes.first().map(String::as_str)
    }

    /// Check whether `size` is one of this product's sizes.
    ///
    /// Products without sizes accept only the empty label.
    pub fn offers_size(&self, size: &str) -> bool {
        if self.sizes.is_empty() {
            return size.is_empty();
        }
        self.sizes.iter().any(|s| s == size)
    }
}
