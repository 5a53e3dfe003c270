//! Typed key-value storage for the Doce Presente storefront.
//!
//! Plays the part of the browser's local storage: a flat map of string keys
//! to JSON text, with automatic (de)serialization on top.
//!
//! # Example
//!
//! ```rust
//! use doce_cache::Cache;
//!
//! let mut cache = Cache::in_memory();
//! cache.set("carrinhoPascoa", &vec!["bolo"]).unwrap();
//!
//! let cart: Option<Vec<String>> = cache.get("carrinhoPascoa").unwrap();
//! assert_eq!(cart, Some(vec!["bolo".to_string()]));
//!
//! cache.delete("carrinhoPascoa").unwrap();
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, MemoryStore, Store};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, MemoryStore, Store};
}
