//! Sequential pipeline with per-stage bounded retry
//!
//! A [`Waterfall`] threads one value through a chain of asynchronous stages.
//! The first stage is a producer that takes no input; every later stage takes
//! the previous stage's result. Each stage gets its own retry budget from the
//! chain's [`RetryPolicy`].
//!
//! # Ordering
//!
//! Stages run strictly one after another: stage N+1 is never invoked before
//! stage N has succeeded. When a stage exhausts its budget the whole waterfall
//! fails and no later stage runs.
//!
//! # Example
//!
//! ```
//! use promised_store::Waterfall;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let result = Waterfall::new(|| async { Ok::<_, String>(1) })
//!         .then(|x| async move { Ok::<_, String>(x + 1) })
//!         .then(|x| async move { Ok::<_, String>(x * 2) })
//!         .run()
//!         .await;
//!     assert_eq!(result, Ok(4));
//! }
//! ```

use std::fmt::Display;
use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;

use super::policy::RetryPolicy;
use super::retry::retry_stage;
use crate::types::WaterfallError;

/// The chain built so far, run with the policy chosen at `run` time
type Chain<T> =
    Box<dyn FnOnce(RetryPolicy) -> BoxFuture<'static, Result<T, WaterfallError>> + Send>;

/// A type-erased stage for homogeneous chains passed to [`run_waterfall`]
pub type BoxedStage<T, E> = Box<dyn FnMut(T) -> BoxFuture<'static, Result<T, E>> + Send>;

/// A chain of stages ending in a value of type `T`
///
/// Built with [`Waterfall::new`] and [`Waterfall::then`]. Nothing runs until
/// [`Waterfall::run`] is awaited.
pub struct Waterfall<T> {
    chain: Chain<T>,
    stages: usize,
    policy: RetryPolicy,
}

impl<T> std::fmt::Debug for Waterfall<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Waterfall")
            .field("stages", &self.stages)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<T> Waterfall<T>
where
    T: Send + 'static,
{
    /// Start a chain with a producer stage
    ///
    /// The producer is retried like any other stage.
    pub fn new<P, Fut, E>(mut producer: P) -> Self
    where
        P: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        Self {
            chain: Box::new(move |policy: RetryPolicy| {
                async move { retry_stage(&policy, 0, &mut producer).await }.boxed()
            }),
            stages: 1,
            policy: RetryPolicy::default(),
        }
    }

    /// Append a stage that consumes the current result
    ///
    /// Each attempt of `stage` receives its own clone of the previous result.
    pub fn then<U, S, Fut, E>(self, mut stage: S) -> Waterfall<U>
    where
        T: Clone,
        U: Send + 'static,
        S: FnMut(T) -> Fut + Send + 'static,
        Fut: Future<Output = Result<U, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let index = self.stages;
        let previous = self.chain;

        Waterfall {
            chain: Box::new(move |policy: RetryPolicy| {
                async move {
                    let input = previous(policy).await?;
                    retry_stage(&policy, index, move || stage(input.clone())).await
                }
                .boxed()
            }),
            stages: index + 1,
            policy: self.policy,
        }
    }

    /// Use `policy` for every stage in the chain
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Number of stages, including the producer
    pub fn stage_count(&self) -> usize {
        self.stages
    }

    /// Run every stage in order and return the last stage's result
    ///
    /// # Returns
    ///
    /// * `Ok(T)` - The result of the final stage
    /// * `Err(WaterfallError::StageExhausted)` - If any stage failed on every
    ///   attempt; later stages were not invoked
    pub async fn run(self) -> Result<T, WaterfallError> {
        (self.chain)(self.policy).await
    }
}

/// Box a stage closure for use with [`run_waterfall`]
pub fn boxed_stage<T, E, S, Fut>(mut stage: S) -> BoxedStage<T, E>
where
    S: FnMut(T) -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    Box::new(move |input| stage(input).boxed())
}

/// Run a producer followed by a list of stages that all carry the same type
///
/// With an empty `stages` list only the producer runs and its result is
/// returned directly.
pub async fn run_waterfall<T, E, P, Fut>(
    policy: RetryPolicy,
    producer: P,
    stages: Vec<BoxedStage<T, E>>,
) -> Result<T, WaterfallError>
where
    T: Clone + Send + 'static,
    E: Display + Send + 'static,
    P: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    stages
        .into_iter()
        .fold(
            Waterfall::new(producer).with_policy(policy),
            |waterfall, stage| waterfall.then(stage),
        )
        .run()
        .await
}
