//! Bounded retry of a single pipeline stage

use std::fmt::Display;
use std::future::Future;

use tracing::{debug, error, warn};

use super::policy::RetryPolicy;
use crate::types::WaterfallError;

/// Run `attempt` until it succeeds or the policy's attempts are used up
///
/// Waits `policy.delay()` after every failed attempt except the last; a zero
/// delay retries without touching the timer. The attempt counter starts from
/// zero on every call, so stages never share a budget.
///
/// # Arguments
///
/// * `policy` - Attempt limit and delay
/// * `stage` - Index of the stage, reported in logs and in the error
/// * `attempt` - Produces a fresh future for each try
///
/// # Returns
///
/// * `Ok(T)` - The value of the first successful attempt
/// * `Err(WaterfallError::StageExhausted)` - If every attempt failed
pub async fn retry_stage<T, E, F, Fut>(
    policy: &RetryPolicy,
    stage: usize,
    mut attempt: F,
) -> Result<T, WaterfallError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempts = 0;
    loop {
        attempts += 1;
        match attempt().await {
            Ok(value) => {
                debug!(stage, attempts, "stage succeeded");
                return Ok(value);
            }
            Err(err) if attempts >= policy.max_attempts() => {
                error!(stage, attempts, error = %err, "stage exhausted its retries");
                return Err(WaterfallError::stage_exhausted(stage, attempts, err));
            }
            Err(err) => {
                warn!(stage, attempt = attempts, error = %err, "stage failed, retrying");
            }
        }
        if !policy.delay().is_zero() {
            tokio::time::sleep(policy.delay()).await;
        }
    }
}
