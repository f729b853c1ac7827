//! Promised Store Library
//! # Overview
//!
//! This library provides asynchronous building blocks around a key-value store:
//! a store with an asynchronous interface, concurrent batch lookup, function
//! memoization backed by a store, and a sequential pipeline that retries each
//! stage a bounded number of times.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Error types (`StoreError`, `WaterfallError`)
//! - [`core`] - Store components:
//!   - [`core::traits`] - The `AsyncStore` abstraction
//!   - [`core::memory_store`] - In-memory store implementation
//!   - [`core::batch`] - All-or-nothing concurrent lookup of many keys
//!   - [`core::memoize`] - At-most-once computation per input, cached in a store
//! - [`pipeline`] - Waterfall execution:
//!   - [`pipeline::policy`] - Retry limit and delay
//!   - [`pipeline::waterfall`] - Stage chaining and execution
//! - [`lazy`] - Single-pass lazy filter/map over generated sequences
//!
//! # Failure Model
//!
//! - **Missing keys**: `get` and `delete` fail with `StoreError::MissingKey`.
//!   A batch lookup fails as a whole if any key is missing. The memoizer treats
//!   a missing key as a cache miss and computes the value instead.
//! - **Exhausted stages**: a waterfall stage that fails on every attempt halts
//!   the waterfall with `WaterfallError::StageExhausted`.

// Module declarations
pub mod core;
pub mod lazy;
pub mod pipeline;
pub mod types;

pub use self::core::{create_store, get_all, memoize, AsyncStore, MemoryStore, Memoized};
pub use lazy::{lazy_filter, lazy_map, Producer};
pub use pipeline::{boxed_stage, run_waterfall, BoxedStage, RetryPolicy, Waterfall};
pub use types::{StoreError, WaterfallError};
