//! Core storage module
//!
//! This module contains the store abstraction and the components built on it:
//! - `traits` - The `AsyncStore` trait shared by every backing store
//! - `memory_store` - In-memory `AsyncStore` implementation
//! - `batch` - Concurrent multi-key lookup
//! - `memoize` - Function memoization backed by a store

pub mod batch;
pub mod memoize;
pub mod memory_store;
pub mod traits;

pub use batch::get_all;
pub use memoize::{memoize, Memoized};
pub use memory_store::{create_store, MemoryStore};
pub use traits::AsyncStore;
