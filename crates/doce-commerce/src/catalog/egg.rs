//! Easter egg catalog records: shells, fillings, single sizes and packages.

use crate::ids::{EggSizeId, FillingId, PackageId, ShellId};
use crate::money::{self, Money};
use serde::{Deserialize, Serialize};

/// Outer chocolate of an egg.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EggShell {
    pub id: ShellId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Inner flavor of an egg.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EggFilling {
    pub id: FillingId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A single egg size on the menu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EggSize {
    pub id: EggSizeId,
    pub name: String,
    /// Weight in grams, when the size is sold by weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_grams: Option<u32>,
    #[serde(with = "money::decimal")]
    pub price: Money,
}

/// Unit count and filling rule for one way of assembling a package.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageLayout {
    /// Number of eggs configured one by one.
    pub unit_count: u32,
    /// Upper bound on distinct fillings across all units, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distinct_fillings: Option<usize>,
}

/// Which of the confectioner kit's layouts the customer picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KitConfiguration {
    /// Several small eggs.
    #[default]
    Compact,
    /// One large egg.
    Large,
}

impl KitConfiguration {
    pub fn as_str(&self) -> &'static str {
        match self {
            KitConfiguration::Compact => "compact",
            KitConfiguration::Large => "large",
        }
    }
}

/// The two layouts of a confectioner kit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct KitLayouts {
    pub compact: PackageLayout,
    pub large: PackageLayout,
}

/// A multi-unit egg product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EggPackage {
    pub id: PackageId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Units in the default layout.
    pub unit_count: u32,
    #[serde(with = "money::decimal")]
    pub price: Money,
    /// Filling cap of the default layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distinct_fillings: Option<usize>,
    /// Present on the confectioner kit only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kit: Option<KitLayouts>,
}

impl EggPackage {
    /// Check whether this package offers the compact/large choice.
    pub fn is_kit(&self) -> bool {
        self.kit.is_some()
    }

    /// Resolve the layout to configure.
    ///
    /// `configuration` only matters for kits; other packages always use
    /// their default layout.
    pub fn layout(&self, configuration: KitConfiguration) -> PackageLayout {
        match (&self.kit, configuration) {
            (Some(kit), KitConfiguration::Compact) => kit.compact,
            (Some(kit), KitConfiguration::Large) => kit.large,
            (None, _) => PackageLayout {
                unit_count: self.unit_count,
                max_distinct_fillings: self.max_distinct_fillings,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kit() -> EggPackage {
        EggPackage {
            id: PackageId::new(1),
            name: "Kit Confeiteiro".to_string(),
            description: String::new(),
            unit_count: 5,
            price: Money::brl(7490),
            max_distinct_fillings: None,
            kit: Some(KitLayouts {
                compact: PackageLayout {
                    unit_count: 5,
                    max_distinct_fillings: Some(2),
                },
                large: PackageLayout {
                    unit_count: 1,
                    max_distinct_fillings: None,
                },
            }),
        }
    }

    #[test]
    fn test_kit_layouts() {
        let package = kit();
        assert!(package.is_kit());

        let compact = package.layout(KitConfiguration::Compact);
        assert_eq!(compact.unit_count, 5);
        assert_eq!(compact.max_distinct_fillings, Some(2));

        let large = package.layout(KitConfiguration::Large);
        assert_eq!(large.unit_count, 1);
        assert_eq!(large.max_distinct_fillings, None);
    }

    #[test]
    fn test_plain_package_ignores_configuration() {
        let package = EggPackage {
            kit: None,
            unit_count: 3,
            ..kit()
        };
        assert_eq!(
            package.layout(KitConfiguration::Large),
            PackageLayout {
                unit_count: 3,
                max_distinct_fillings: None
            }
        );
    }

    #[test]
    fn test_deserialize_without_kit() {
        let json = r#"{"id": 2, "name": "Trio", "unit_count": 3, "price": 59.9}"#;
        let package: EggPackage = serde_json::from_str(json).unwrap();
        assert!(!package.is_kit());
        assert_eq!(package.price, Money::brl(5990));
    }
}
