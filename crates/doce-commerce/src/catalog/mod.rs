//! Product catalog module.
//!
//! Read-only accessors over the static menu: cakes, pastries and the Easter
//! egg building blocks. Egg lookups never fail; an unknown id resolves to a
//! placeholder record so callers can keep rendering through a transient bad
//! id.

mod egg;
mod product;

pub use egg::{EggFilling, EggPackage, EggShell, EggSize, KitConfiguration, KitLayouts, PackageLayout};
pub use product::{Product, ProductKind};

use std::borrow::Cow;

use crate::error::CommerceError;
use crate::ids::{EggSizeId, FillingId, PackageId, ProductId, ShellId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// Name shown for records that could not be found.
pub const PLACEHOLDER_NAME: &str = "Indisponível";

/// A catalog record that can stand in for a missing one.
pub trait CatalogEntry: Clone {
    type Id: Copy + PartialEq;

    fn entry_id(&self) -> Self::Id;

    /// Record with id 0, placeholder name and zero price.
    fn placeholder() -> Self;
}

impl CatalogEntry for EggShell {
    type Id = ShellId;

    fn entry_id(&self) -> ShellId {
        self.id
    }

    fn placeholder() -> Self {
        EggShell {
            id: ShellId::PLACEHOLDER,
            name: PLACEHOLDER_NAME.to_string(),
            description: String::new(),
        }
    }
}

impl CatalogEntry for EggFilling {
    type Id = FillingId;

    fn entry_id(&self) -> FillingId {
        self.id
    }

    fn placeholder() -> Self {
        EggFilling {
            id: FillingId::PLACEHOLDER,
            name: PLACEHOLDER_NAME.to_string(),
            description: String::new(),
        }
    }
}

impl CatalogEntry for EggSize {
    type Id = EggSizeId;

    fn entry_id(&self) -> EggSizeId {
        self.id
    }

    fn placeholder() -> Self {
        EggSize {
            id: EggSizeId::PLACEHOLDER,
            name: PLACEHOLDER_NAME.to_string(),
            weight_grams: None,
            price: Money::default(),
        }
    }
}

impl CatalogEntry for EggPackage {
    type Id = PackageId;

    fn entry_id(&self) -> PackageId {
        self.id
    }

    fn placeholder() -> Self {
        EggPackage {
            id: PackageId::PLACEHOLDER,
            name: PLACEHOLDER_NAME.to_string(),
            description: String::new(),
            unit_count: 0,
            price: Money::default(),
            max_distinct_fillings: None,
            kit: None,
        }
    }
}

fn find_or_placeholder<T: CatalogEntry>(entries: &[T], id: T::Id) -> Cow<'_, T> {
    match entries.iter().find(|e| e.entry_id() == id) {
        Some(entry) => Cow::Borrowed(entry),
        None => Cow::Owned(T::placeholder()),
    }
}

/// The whole static menu.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    #[serde(default)]
    pub cakes: Vec<Product>,
    #[serde(default)]
    pub pastries: Vec<Product>,
    #[serde(default)]
    pub shells: Vec<EggShell>,
    #[serde(default)]
    pub fillings: Vec<EggFilling>,
    #[serde(default)]
    pub sizes: Vec<EggSize>,
    #[serde(default)]
    pub packages: Vec<EggPackage>,
}

impl Catalog {
    /// Parse a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        tracing::debug!(
            cakes = catalog.cakes.len(),
            pastries = catalog.pastries.len(),
            shells = catalog.shells.len(),
            fillings = catalog.fillings.len(),
            sizes = catalog.sizes.len(),
            packages = catalog.packages.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// The menu shipped with the crate.
    pub fn builtin() -> Result<Self, CommerceError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Look up a shell, falling back to a placeholder.
    pub fn shell(&self, id: ShellId) -> Cow<'_, EggShell> {
        find_or_placeholder(&self.shells, id)
    }

    /// Look up a filling, falling back to a placeholder.
    pub fn filling(&self, id: FillingId) -> Cow<'_, EggFilling> {
        find_or_placeholder(&self.fillings, id)
    }

    /// Look up a single-egg size, falling back to a placeholder.
    pub fn size(&self, id: EggSizeId) -> Cow<'_, EggSize> {
        find_or_placeholder(&self.sizes, id)
    }

    /// Look up a package, falling back to a placeholder.
    pub fn package(&self, id: PackageId) -> Cow<'_, EggPackage> {
        find_or_placeholder(&self.packages, id)
    }

    /// Look up a cake or pastry.
    pub fn product(&self, kind: ProductKind, id: ProductId) -> Option<&Product> {
        let shelf = match kind {
            ProductKind::Cake => &self.cakes,
            ProductKind::StuffedPastry => &self.pastries,
        };
        shelf.iter().find(|p| p.id == id)
    }

    /// Look up a cake.
    pub fn cake(&self, id: ProductId) -> Option<&Product> {
        self.product(ProductKind::Cake, id)
    }

    /// Look up a stuffed pastry.
    pub fn pastry(&self, id: ProductId) -> Option<&Product> {
        self.product(ProductKind::StuffedPastry, id)
    }

    /// Shell preselected for new eggs.
    pub fn default_shell_id(&self) -> ShellId {
        self.shells.first().map(|s| s.id).unwrap_or_default()
    }

    /// Filling preselected for new eggs.
    pub fn default_filling_id(&self) -> FillingId {
        self.fillings.first().map(|f| f.id).unwrap_or_default()
    }
}
