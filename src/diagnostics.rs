//! Scoped suppression of diagnostic output
//!
//! Fetching a page can emit warnings (disambiguation notices, HTML parse
//! noise) that would clutter progress output. [`silenced`] runs a future with
//! a no-op `tracing` dispatcher. The dispatcher is swapped in for each poll
//! and the previous one is restored when the poll returns, so the caller's
//! logging is untouched on success, on error and if the future is dropped.

use std::future::Future;
use tracing::instrument::{WithDispatch, WithSubscriber};
use tracing::subscriber::NoSubscriber;

/// Wraps `future` so that nothing it logs reaches the active subscriber
///
/// # Example
///
/// ```
/// use philosophy_crawler::diagnostics::silenced;
///
/// # async fn example() {
/// let value = silenced(async {
///     tracing::warn!("never shown");
///     42
/// })
/// .await;
/// assert_eq!(value, 42);
/// # }
/// ```
pub fn silenced<F: Future>(future: F) -> WithDispatch<F> {
    future.with_subscriber(NoSubscriber::default())
}
