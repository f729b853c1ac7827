//! Retrying sequential pipelines
//!
//! This module provides the waterfall executor and its retry configuration:
//! - `policy` - Attempt limit and delay shared by every stage of a chain
//! - `retry` - The bounded retry loop for one stage
//! - `waterfall` - Chain construction and execution

pub mod policy;
pub mod retry;
pub mod waterfall;

pub use policy::RetryPolicy;
pub use waterfall::{boxed_stage, run_waterfall, BoxedStage, Waterfall};
