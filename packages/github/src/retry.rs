//! Explicit retry policy with capped exponential backoff.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// How many times to try a request and how long to wait in between.
///
/// The delay after the `n`-th failed attempt is `initial_delay * 2^(n-1)`,
/// clamped to `[initial_delay, max_delay]`. There is no jitter, so the
/// schedule never decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1), Duration::from_secs(8))
    }
}

impl RetryPolicy {
    /// `max_attempts` counts the initial attempt and is never less than one.
    #[must_use]
    pub fn new(max_attempts: u32, initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            max_delay: max_delay.max(initial_delay),
        }
    }

    /// A policy that retries without sleeping.
    #[must_use]
    pub fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO, Duration::ZERO)
    }

    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay slept after the `attempt`-th failure (1-based).
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.initial_delay
            .saturating_mul(1 << exponent)
            .clamp(self.initial_delay, self.max_delay)
    }

    /// Run `operation` until it succeeds, fails with an error `is_retryable`
    /// rejects, or the attempt budget is spent. The last error is returned
    /// unchanged.
    ///
    /// `operation` receives the 1-based attempt number.
    ///
    /// # Errors
    ///
    /// * The error of the final attempt made.
    pub async fn run<T, E, F, Fut, P>(&self, mut operation: F, is_retryable: P) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: Display,
    {
        let mut attempt = 1;
        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_attempts && is_retryable(&e) => {
                    let delay = self.delay_after(attempt);
                    log::warn!(
                        "Attempt {attempt}/{} failed: {e}; retrying in {delay:?}",
                        self.max_attempts
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
