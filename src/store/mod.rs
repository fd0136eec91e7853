//! # Storage Layer
//!
//! This module defines the storage abstraction for cesta plus the
//! [`ProductStore`] state container built on top of it. The [`Backend`]
//! trait lets the store run against different persistence targets.
//!
//! ## Design Rationale
//!
//! Persistence is abstracted behind a plain key-value trait to:
//! - Enable **testing** with `MemoryBackend` (no filesystem needed)
//! - Allow **future backends** (browser storage, database) without touching
//!   store logic
//! - Keep the store **decoupled** from where the JSON actually lands
//!
//! ## Implementations
//!
//! - [`fs::FileBackend`]: Production file-based storage, one `<key>.json`
//!   file per key under a data directory
//! - [`memory::MemoryBackend`]: In-memory storage for testing, with
//!   simulated write failures
//!
//! ## Persisted Layout
//!
//! Three keys, each holding a JSON-encoded array:
//!
//! ```text
//! products         → catalog (ordered Product array)
//! cart             → cart (ordered Product array)
//! customCategories → user-added category names (string array)
//! ```
//!
//! Predefined category names are never written; they are re-seeded on every
//! load and union-merged with the custom subset.

use crate::error::Result;

pub mod fs;
pub mod memory;
pub mod product_store;

pub use product_store::ProductStore;

/// Key holding the catalog.
pub const CATALOG_KEY: &str = "products";
/// Key holding the cart.
pub const CART_KEY: &str = "cart";
/// Key holding the user-added category names.
pub const CUSTOM_CATEGORIES_KEY: &str = "customCategories";

/// Abstract interface for raw key-value I/O.
///
/// Values are JSON strings; encoding and decoding happen in the store, the
/// backend only moves opaque text. Methods take `&self` so in-memory
/// implementations can use interior mutability and file-based ones stay
/// stateless.
pub trait Backend {
    /// Read the raw value stored under `key`.
    /// Returns `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write the raw value for `key`.
    /// Must be atomic for durable backends so readers never observe a
    /// partial value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
