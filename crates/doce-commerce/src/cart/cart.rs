//! Cart and line item types.

use std::fmt;

use crate::catalog::{EggFilling, EggPackage, EggShell, EggSize, Product, ProductKind};
use crate::error::CommerceError;
use crate::ids::{generate_token, FillingId, LineItemId, ShellId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// Shelf a line item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Cake,
    Pastry,
    Egg,
}

impl ItemCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Cake => "cake",
            ItemCategory::Pastry => "pastry",
            ItemCategory::Egg => "egg",
        }
    }
}

impl From<ProductKind> for ItemCategory {
    fn from(kind: ProductKind) -> Self {
        match kind {
            ProductKind::Cake => ItemCategory::Cake,
            ProductKind::StuffedPastry => ItemCategory::Pastry,
        }
    }
}

/// Size shown next to a line item: a weight or a free label like "400ml".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeLabel {
    Grams(u32),
    Label(String),
}

impl SizeLabel {
    pub fn is_empty(&self) -> bool {
        matches!(self, SizeLabel::Label(s) if s.is_empty())
    }
}

impl Default for SizeLabel {
    fn default() -> Self {
        SizeLabel::Label(String::new())
    }
}

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeLabel::Grams(grams) => write!(f, "{}g", grams),
            SizeLabel::Label(label) => f.write_str(label),
        }
    }
}

/// Shell and filling picked for one egg of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSelection {
    pub shell: ShellId,
    pub filling: FillingId,
    pub shell_name: String,
    pub filling_name: String,
}

impl UnitSelection {
    pub fn new(shell: &EggShell, filling: &EggFilling) -> Self {
        Self {
            shell: shell.id,
            filling: filling.id,
            shell_name: shell.name.clone(),
            filling_name: filling.name.clone(),
        }
    }
}

/// Egg configuration carried by an egg line item.
///
/// Single eggs fill the shell/filling fields; packages fill `units`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EggDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<ShellId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filling: Option<FillingId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filling_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<UnitSelection>,
}

impl EggDetails {
    /// Check if these details describe a multi-unit package.
    pub fn is_package(&self) -> bool {
        !self.units.is_empty()
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Derived identifier; equal ids merge.
    pub id: LineItemId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: i64,
    /// Size or weight label.
    #[serde(default)]
    pub size: SizeLabel,
    /// Shelf the item came from.
    pub category: ItemCategory,
    /// Egg configuration, for eggs only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<EggDetails>,
}

impl LineItem {
    /// Line item for a cake or pastry in the given size.
    ///
    /// The id combines shelf, product and size, so the same product in the
    /// same size always merges.
    pub fn product(
        kind: ProductKind,
        product: &Product,
        size: &str,
        quantity: i64,
    ) -> Result<Self, CommerceError> {
        if !product.offers_size(size) {
            return Err(CommerceError::InvalidSize {
                product: product.name.clone(),
                size: size.to_string(),
            });
        }
        let category = ItemCategory::from(kind);
        Ok(Self {
            id: LineItemId::new(format!("{}-{}-{}", category.as_str(), product.id, size)),
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            size: SizeLabel::Label(size.to_string()),
            category,
            details: None,
        })
    }

    /// Line item for a single egg; the id combines size, shell and filling.
    pub fn single_egg(
        size: &EggSize,
        shell: &EggShell,
        filling: &EggFilling,
        quantity: i64,
    ) -> Self {
        // Unweighed sizes are named by the size itself; no extra label.
        let label = size.weight_grams.map(SizeLabel::Grams).unwrap_or_default();
        Self {
            id: LineItemId::new(format!("egg-{}-{}-{}", size.id, shell.id, filling.id)),
            name: size.name.clone(),
            unit_price: size.price,
            quantity,
            size: label,
            category: ItemCategory::Egg,
            details: Some(EggDetails {
                shell: Some(shell.id),
                filling: Some(filling.id),
                shell_name: Some(shell.name.clone()),
                filling_name: Some(filling.name.clone()),
                units: Vec::new(),
            }),
        }
    }

    /// Line item for a fully configured package.
    ///
    /// Each package gets a fresh token in its id: two packages never merge,
    /// even with identical units.
    pub fn egg_package(package: &EggPackage, units: Vec<UnitSelection>) -> Self {
        let count = units.len();
        let label = if count == 1 {
            "1 ovo".to_string()
        } else {
            format!("{} ovos", count)
        };
        Self {
            id: LineItemId::new(format!("package-{}-{}", package.id, generate_token())),
            name: package.name.clone(),
            unit_price: package.price,
            quantity: 1,
            size: SizeLabel::Label(label),
            category: ItemCategory::Egg,
            details: Some(EggDetails {
                units,
                ..EggDetails::default()
            }),
        }
    }

    /// unit_price * quantity.
    pub fn subtotal(&self) -> Money {
        Money::new(
            self.unit_price.amount_cents.saturating_mul(self.quantity),
            self.unit_price.currency,
        )
    }

    /// Per-unit choices when this is a package.
    pub fn units(&self) -> &[UnitSelection] {
        self.details
            .as_ref()
            .map(|d| d.units.as_slice())
            .unwrap_or(&[])
    }
}

fn validate_quantity(quantity: i64) -> Result<(), CommerceError> {
    if quantity <= 0 {
        return Err(CommerceError::InvalidQuantity(quantity));
    }
    if quantity > MAX_QUANTITY_PER_ITEM {
        return Err(CommerceError::QuantityExceedsLimit(
            quantity,
            MAX_QUANTITY_PER_ITEM,
        ));
    }
    Ok(())
}

/// A shopping cart: line items unique by id, in insertion order.
///
/// Serializes as a bare JSON array of line items.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from untrusted items (e.g., restored from storage).
    ///
    /// Items with a non-positive quantity or a foreign currency are dropped;
    /// repeated ids are merged.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.unit_price.currency != Currency::default() {
                tracing::warn!(id = %item.id, currency = %item.unit_price.currency, "dropping item with foreign currency");
                continue;
            }
            let id = item.id.clone();
            if let Err(e) = cart.add_item(item) {
                tracing::warn!(%id, error = %e, "dropping invalid restored item");
            }
        }
        cart
    }

    /// Parse a cart from its JSON array form.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let items: Vec<LineItem> = serde_json::from_str(json)?;
        Ok(Self::from_items(items))
    }

    /// Serialize as a JSON array.
    pub fn to_json(&self) -> Result<String, CommerceError> {
        Ok(serde_json::to_string(&self.items)?)
    }

    /// Add an item to the cart.
    ///
    /// An item whose id is already present increments that line's quantity.
    ///
    /// Returns an error if:
    /// - Quantity is not positive
    /// - The resulting quantity would exceed MAX_QUANTITY_PER_ITEM
    pub fn add_item(&mut self, item: LineItem) -> Result<LineItemId, CommerceError> {
        validate_quantity(item.quantity)?;

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            let new_quantity = existing
                .quantity
                .checked_add(item.quantity)
                .ok_or(CommerceError::Overflow)?;
            validate_quantity(new_quantity)?;
            existing.quantity = new_quantity;
            tracing::debug!(id = %existing.id, quantity = new_quantity, "merged cart line");
            return Ok(existing.id.clone());
        }

        let id = item.id.clone();
        tracing::debug!(%id, quantity = item.quantity, "added cart line");
        self.items.push(item);
        Ok(id)
    }

    /// Update item quantity.
    ///
    /// If quantity is <= 0, removes the item.
    pub fn update_quantity(
        &mut self,
        line_item_id: &LineItemId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity <= 0 {
            return Ok(self.remove_item(line_item_id));
        }
        validate_quantity(quantity)?;

        if let Some(item) = self.items.iter_mut().find(|i| &i.id == line_item_id) {
            item.quantity = quantity;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Remove an item from the cart. Missing ids are ignored.
    pub fn remove_item(&mut self, line_item_id: &LineItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != line_item_id);
        self.items.len() < len_before
    }

    /// Clear all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Get number of lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an item by ID.
    pub fn get_item(&self, line_item_id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == line_item_id)
    }

    /// Sum of unit_price * quantity over all lines.
    pub fn total(&self) -> Money {
        items_total(&self.items)
    }
}

/// Saturating sum of line subtotals, in the store currency.
///
/// Shared by the cart and by submitted orders so both always agree.
pub fn items_total(items: &[LineItem]) -> Money {
    let cents = items
        .iter()
        .fold(0_i64, |acc, i| acc.saturating_add(i.subtotal().amount_cents));
    Money::new(cents, Currency::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{EggSizeId, PackageId, ProductId};

    fn cake() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Bolo de Ninho com Nutella".to_string(),
            description: String::new(),
            price: Money::brl(1800),
            sizes: vec!["400ml".to_string(), "250ml".to_string()],
            image: String::new(),
        }
    }

    fn shell(id: u32, name: &str) -> EggShell {
        EggShell {
            id: ShellId::new(id),
            name: name.to_string(),
            description: String::new(),
        }
    }

    fn filling(id: u32, name: &str) -> EggFilling {
        EggFilling {
            id: FillingId::new(id),
            name: name.to_string(),
            description: String::new(),
        }
    }

    fn size() -> EggSize {
        EggSize {
            id: EggSizeId::new(1),
            name: "Ovo de Colher 250g".to_string(),
            weight_grams: Some(250),
            price: Money::brl(3990),
        }
    }

    #[test]
    fn test_same_product_and_size_merges() {
        let mut cart = Cart::new();
        let first = cart
            .add_item(LineItem::product(ProductKind::Cake, &cake(), "400ml", 2).unwrap())
            .unwrap();
        let second = cart
            .add_item(LineItem::product(ProductKind::Cake, &cake(), "400ml", 1).unwrap())
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(cart.unique_item_count(), 1);
        let line = cart.get_item(&first).unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.subtotal(), Money::brl(5400));
        assert_eq!(line.subtotal().display(), "R$ 54.00");
    }

    #[test]
    fn test_different_size_is_separate_line() {
        let mut cart = Cart::new();
        cart.add_item(LineItem::product(ProductKind::Cake, &cake(), "400ml", 1).unwrap())
            .unwrap();
        cart.add_item(LineItem::product(ProductKind::Cake, &cake(), "250ml", 1).unwrap())
            .unwrap();
        assert_eq!(cart.unique_item_count(), 2);
    }

    #[test]
    fn test_same_id_different_shelf_does_not_merge() {
        let mut cart = Cart::new();
        let pastry = Product {
            sizes: vec!["400ml".to_string()],
            ..cake()
        };
        cart.add_item(LineItem::product(ProductKind::Cake, &cake(), "400ml", 1).unwrap())
            .unwrap();
        cart.add_item(
            LineItem::product(ProductKind::StuffedPastry, &pastry, "400ml", 1).unwrap(),
        )
        .unwrap();
        assert_eq!(cart.unique_item_count(), 2);
    }

    #[test]
    fn test_unknown_size_rejected() {
        let result = LineItem::product(ProductKind::Cake, &cake(), "2l", 1);
        assert!(matches!(result, Err(CommerceError::InvalidSize { .. })));
    }

    #[test]
    fn test_single_egg_merges_on_same_combination() {
        let mut cart = Cart::new();
        let leite = shell(1, "Ao Leite");
        let ninho = filling(2, "Ninho");
        let maracuja = filling(3, "Maracujá");

        cart.add_item(LineItem::single_egg(&size(), &leite, &ninho, 1))
            .unwrap();
        cart.add_item(LineItem::single_egg(&size(), &leite, &ninho, 2))
            .unwrap();
        cart.add_item(LineItem::single_egg(&size(), &leite, &maracuja, 1))
            .unwrap();

        assert_eq!(cart.unique_item_count(), 2);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.items()[0].size, SizeLabel::Grams(250));
    }

    #[test]
    fn test_unweighed_egg_has_no_size_label() {
        let truffle = EggSize {
            id: EggSizeId::new(3),
            name: "Ovo Trufado".to_string(),
            weight_grams: None,
            price: Money::brl(5490),
        };
        let item = LineItem::single_egg(&truffle, &shell(3, "Branco"), &filling(1, "Brigadeiro"), 1);
        assert!(item.size.is_empty());
        assert_eq!(item.name, "Ovo Trufado");
    }

    #[test]
    fn test_restored_foreign_currency_line_dropped() {
        let brl = LineItem::product(ProductKind::Cake, &cake(), "400ml", 1).unwrap();
        let mut usd = LineItem::product(ProductKind::Cake, &cake(), "250ml", 1).unwrap();
        usd.unit_price = Money::new(1800, Currency::USD);

        let json = serde_json::to_string(&vec![brl.clone(), usd]).unwrap();
        let cart = Cart::from_json(&json).unwrap();
        assert_eq!(cart.items(), &[brl]);
    }

    #[test]
    fn test_packages_never_merge() {
        let package = EggPackage {
            id: PackageId::new(2),
            name: "Trio de Ovinhos".to_string(),
            description: String::new(),
            unit_count: 1,
            price: Money::brl(5990),
            max_distinct_fillings: None,
            kit: None,
        };
        let units = vec![UnitSelection::new(&shell(1, "Ao Leite"), &filling(1, "Brigadeiro"))];

        let mut cart = Cart::new();
        cart.add_item(LineItem::egg_package(&package, units.clone()))
            .unwrap();
        cart.add_item(LineItem::egg_package(&package, units)).unwrap();
        assert_eq!(cart.unique_item_count(), 2);
        assert_eq!(cart.items()[0].size.to_string(), "1 ovo");
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(LineItem::product(ProductKind::Cake, &cake(), "400ml", 1).unwrap())
            .unwrap();
        let before = cart.clone();

        assert!(!cart.remove_item(&LineItemId::new("does-not-exist")));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_total_is_sum_of_subtotals() {
        let mut cart = Cart::new();
        cart.add_item(LineItem::product(ProductKind::Cake, &cake(), "400ml", 2).unwrap())
            .unwrap();
        cart.add_item(LineItem::single_egg(
            &size(),
            &shell(1, "Ao Leite"),
            &filling(1, "Brigadeiro"),
            3,
        ))
        .unwrap();

        let expected: i64 = cart
            .items()
            .iter()
            .map(|i| i.unit_price.amount_cents * i.quantity)
            .sum();
        assert_eq!(cart.total().amount_cents, expected);
        assert_eq!(cart.total(), Money::brl(2 * 1800 + 3 * 3990));
        assert_eq!(Cart::new().total(), Money::brl(0));
    }

    #[test]
    fn test_quantity_validation() {
        let mut cart = Cart::new();
        let zero = LineItem::product(ProductKind::Cake, &cake(), "400ml", 0).unwrap();
        assert!(matches!(
            cart.add_item(zero),
            Err(CommerceError::InvalidQuantity(0))
        ));

        let big = LineItem::product(ProductKind::Cake, &cake(), "400ml", MAX_QUANTITY_PER_ITEM)
            .unwrap();
        cart.add_item(big).unwrap();
        let one_more = LineItem::product(ProductKind::Cake, &cake(), "400ml", 1).unwrap();
        assert!(matches!(
            cart.add_item(one_more),
            Err(CommerceError::QuantityExceedsLimit(..))
        ));
        assert_eq!(cart.item_count(), MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        let id = cart
            .add_item(LineItem::product(ProductKind::Cake, &cake(), "400ml", 1).unwrap())
            .unwrap();

        assert!(cart.update_quantity(&id, 5).unwrap());
        assert_eq!(cart.item_count(), 5);

        assert!(cart.update_quantity(&id, 0).unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_json_roundtrip_and_sanitizing() {
        let mut cart = Cart::new();
        cart.add_item(LineItem::product(ProductKind::Cake, &cake(), "400ml", 2).unwrap())
            .unwrap();
        let json = cart.to_json().unwrap();
        assert!(json.starts_with('['));
        assert_eq!(Cart::from_json(&json).unwrap(), cart);

        let mut bad = LineItem::product(ProductKind::Cake, &cake(), "250ml", 1).unwrap();
        bad.quantity = -4;
        let restored = Cart::from_items(vec![cart.items()[0].clone(), bad]);
        assert_eq!(restored.unique_item_count(), 1);
    }
}
