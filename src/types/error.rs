//! Error types for store access and retrying pipelines
//!
//! # Error Categories
//!
//! - **Store Errors**: a key has no associated value (`MissingKey`)
//! - **Pipeline Errors**: a waterfall stage ran out of attempts

use thiserror::Error;

/// Error returned by [`AsyncStore`](crate::core::traits::AsyncStore) operations
///
/// There is no distinct "empty" value in a store: an absent key and a failed
/// lookup are the same thing to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The key is not present in the store
    ///
    /// Returned by `get` and `delete`. The memoizer treats it as a cache miss.
    #[error("missing key")]
    MissingKey,
}

/// Error returned when a waterfall halts
///
/// Once this is returned no later stage has been invoked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaterfallError {
    /// A stage failed on every attempt its retry budget allowed
    #[error("stage {stage} failed after {attempts} attempts: {last_error}")]
    StageExhausted {
        /// Zero-based index of the failing stage (0 is the producer)
        stage: usize,
        /// Number of attempts made before giving up
        attempts: u32,
        /// `Display` of the error returned by the final attempt
        last_error: String,
    },
}

impl WaterfallError {
    /// Create a StageExhausted error
    pub fn stage_exhausted(stage: usize, attempts: u32, last_error: impl ToString) -> Self {
        WaterfallError::StageExhausted {
            stage,
            attempts,
            last_error: last_error.to_string(),
        }
    }

    /// Index of the stage that halted the waterfall
    pub fn stage(&self) -> usize {
        match self {
            WaterfallError::StageExhausted { stage, .. } => *stage,
        }
    }
}
