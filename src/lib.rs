//! # Cesta Architecture
//!
//! Cesta is a **UI-agnostic shopping-list engine**. It owns the product
//! catalog, the cart, the category registry and the derived search view;
//! rendering, input handling and notifications belong to whatever front-end
//! sits on top of it.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Presentation (not in this crate)                           │
//! │  - Forms, lists, modals, clipboard, toasts                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store layer (store/product_store.rs)                       │
//! │  - ProductStore<B>: catalog, cart, categories, search view  │
//! │  - All mutations; recomputes derived state synchronously    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage layer (store/)                                     │
//! │  - Abstract Backend trait (string keys, JSON values)        │
//! │  - FileBackend (production), MemoryBackend (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Persistence Is a Cache
//!
//! The in-memory state held by [`store::ProductStore`] is the source of
//! truth. Backend writes are best-effort: a failed write is logged and
//! swallowed, never propagated, and a missing or malformed value on load
//! falls back to an empty collection. No store operation returns an error
//! to its caller.
//!
//! ## Derived State
//!
//! The filtered catalog view is recomputed after every catalog or
//! search-term change and is never mutated on its own, so it can always be
//! read without staleness checks.
//!
//! ## Module Overview
//!
//! - [`store`]: The storage abstraction and the [`store::ProductStore`]
//!   state container, the entry point for all operations
//! - [`model`]: Core data types (`Product`, `ProductDraft`, `WeightUnit`,
//!   `CartUpdate`)
//! - [`categories`]: Category registry (predefined + user-added names)
//! - [`summary`]: Plain-text cart summary rendering
//! - [`config`]: Formatting configuration
//! - [`error`]: Error types

pub mod categories;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod summary;
