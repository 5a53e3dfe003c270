//! Newtype IDs for type-safe identifiers.
//!
//! Using newtypes prevents accidentally mixing up different ID types,
//! e.g., passing a ShellId where a FillingId is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate numeric catalog ID structs.
///
/// Catalog records are addressed by small integers in the static data.
/// Id `0` is reserved for placeholder records.
macro_rules! define_catalog_id {
    ($name:ident) => {
        /// A catalog identifier.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Placeholder id used by fallback records.
            pub const PLACEHOLDER: Self = Self(0);

            /// Create a new ID from its number.
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the numeric value.
            pub const fn get(&self) -> u32 {
                self.0
            }

            /// Check if this is the placeholder id.
            pub const fn is_placeholder(&self) -> bool {
                self.0 == 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }
    };
}

define_catalog_id!(ProductId);
define_catalog_id!(ShellId);
define_catalog_id!(FillingId);
define_catalog_id!(EggSizeId);
define_catalog_id!(PackageId);

/// Derived cart line identifier.
///
/// Built from the product identity and selection (see
/// [`crate::cart::LineItem`]) so that adding the same configuration twice
/// lands on the same line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(String);

impl LineItemId {
    /// Create a new ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for LineItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LineItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for LineItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Generate a unique token using timestamp and a process-wide counter.
///
/// Used to keep every finalized egg package on its own cart line.
pub fn generate_token() -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let counter = COUNTER.fetch_add(1, Ordering::SeqCst);

    format!("{:x}{:04x}", timestamp, counter & 0xffff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_id_creation() {
        let id = ShellId::new(3);
        assert_eq!(id.get(), 3);
        assert!(!id.is_placeholder());
        assert!(ShellId::PLACEHOLDER.is_placeholder());
    }

    #[test]
    fn test_catalog_id_serializes_as_number() {
        let json = serde_json::to_string(&FillingId::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: FillingId = serde_json::from_str("7").unwrap();
        assert_eq!(back, FillingId::new(7));
    }

    #[test]
    fn test_token_generation() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_line_item_id_display() {
        let id = LineItemId::new("cake-1-400ml");
        assert_eq!(format!("{}", id), "cake-1-400ml");
        assert_eq!(id.as_str(), "cake-1-400ml");
    }
}
