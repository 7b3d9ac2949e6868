//! Bounded retry for transient storage failures. Connection-level errors
//! (pool timeouts, broken sockets) are retried with exponential backoff;
//! everything else surfaces immediately.

use std::future::Future;
use std::time::Duration;

use eyre::Result;
use tracing::warn;

pub const MAX_ATTEMPTS: u32 = 3;
const BASE_BACKOFF_MS: u64 = 50;

pub fn is_transient(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) | sqlx::Error::WorkerCrashed
    )
}

fn is_transient_report(report: &eyre::Report) -> bool {
    report
        .downcast_ref::<sqlx::Error>()
        .map_or(false, is_transient)
}

/// Runs `operation` up to [`MAX_ATTEMPTS`] times, backing off between
/// transient failures. The final error is returned unchanged.
pub async fn with_retry<T, F, Fut>(name: &str, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt: u32 = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt < MAX_ATTEMPTS && is_transient_report(&error) => {
                let backoff = Duration::from_millis(BASE_BACKOFF_MS << attempt);
                warn!(
                    "{} hit transient storage error (attempt {}/{}), retrying in {:?}: {}",
                    name, attempt, MAX_ATTEMPTS, backoff, error
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
