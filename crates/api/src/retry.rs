use anyhow::Result;
use extract::{AnnotatedSentence, Annotator, EngineError};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::RetryConfig;

pub struct RetryPolicy {
    max_retries: usize,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: usize, initial_backoff_ms: u64, max_backoff_ms: u64) -> Self {
        Self {
            max_retries,
            initial_backoff: Duration::from_millis(initial_backoff_ms),
            max_backoff: Duration::from_millis(max_backoff_ms),
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(
            config.max_retries,
            config.initial_backoff_ms,
            config.max_backoff_ms,
        )
    }

    /// Run `operation`, retrying with exponential backoff while `should_retry`
    /// accepts the error. Any other error is returned at once.
    pub async fn retry_if<F, Fut, T, E, P>(
        &self,
        operation_name: &str,
        mut operation: F,
        should_retry: P,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
        E: std::fmt::Display,
        P: Fn(&E) -> bool,
    {
        let mut attempt = 0;
        let mut backoff = self.initial_backoff;

        loop {
            let err = match operation().await {
                Ok(value) => {
                    if attempt > 0 {
                        info!(operation = operation_name, retries = attempt, "Recovered after retrying");
                    }
                    return Ok(value);
                }
                Err(err) => err,
            };

            if !should_retry(&err) {
                return Err(err);
            }
            if attempt >= self.max_retries {
                warn!(operation = operation_name, retries = attempt, error = %err, "Giving up");
                return Err(err);
            }

            warn!(
                operation = operation_name,
                attempt = attempt + 1,
                backoff_ms = backoff.as_millis(),
                error = %err,
                "Transient failure, retrying"
            );
            sleep(backoff).await;
            backoff = (backoff * 2).min(self.max_backoff);
            attempt += 1;
        }
    }
}

/// Annotator wrapper that retries engine calls failing with a transient
/// [`EngineError`]. Anything else, such as an undecodable body, is returned
/// on the first attempt.
pub struct RetryingAnnotator<A> {
    inner: A,
    policy: RetryPolicy,
}

impl<A: Annotator> RetryingAnnotator<A> {
    pub fn new(inner: A, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

fn is_transient(err: &anyhow::Error) -> bool {
    err.chain()
        .any(|cause| cause.downcast_ref::<EngineError>().is_some_and(EngineError::is_transient))
}

impl<A: Annotator> Annotator for RetryingAnnotator<A> {
    async fn annotate(&self, text: &str) -> Result<AnnotatedSentence> {
        self.policy
            .retry_if("annotate", || self.inner.annotate(text), is_transient)
            .await
    }

    async fn health(&self) -> Result<()> {
        self.inner.health().await
    }
}
