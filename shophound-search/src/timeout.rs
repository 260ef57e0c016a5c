//! Deadline guard for provider calls.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// Returned when a guarded operation exceeded its deadline.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Operation exceeded {deadline_ms} ms deadline")]
pub struct TimeoutError {
    /// The deadline that was exceeded, in milliseconds.
    pub deadline_ms: u128,
}

/// Races `future` against `deadline`.
///
/// If the timer fires first the future is dropped and its eventual result
/// discarded. The orchestrator applies this independently to each provider
/// call, so total wall time is bounded by the slowest provider, not the sum.
///
/// # Errors
/// - `TimeoutError` - The future did not complete within `deadline`
pub async fn with_deadline<F>(future: F, deadline: Duration) -> Result<F::Output, TimeoutError>
where
    F: Future,
{
    tokio::time::timeout(deadline, future)
        .await
        .map_err(|_| TimeoutError {
            deadline_ms: deadline.as_millis(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fast_operation_completes() {
        let result = with_deadline(async { 42 }, Duration::from_millis(100)).await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_operation_times_out() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            42
        };
        let result = with_deadline(slow, Duration::from_millis(100)).await;
        assert_eq!(result, Err(TimeoutError { deadline_ms: 100 }));
    }
}
