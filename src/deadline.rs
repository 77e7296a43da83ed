use std::future::Future;
use std::time::Duration;

/// Races `operation` against a deadline.
///
/// Returns `Some(output)` if the operation settles first, `None` if the timer
/// wins. On expiry the future is dropped, which is the cancellation: whatever
/// the operation had in flight is released best-effort, and the decided
/// outcome is unaffected.
pub async fn race<F>(timeout: Duration, operation: F) -> Option<F::Output>
where
    F: Future,
{
    tokio::time::timeout(timeout, operation).await.ok()
}
