//! Types module
//!
//! Contains the error types shared by the store, the memoizer and the
//! waterfall pipeline.

pub mod error;

pub use error::{StoreError, WaterfallError};
