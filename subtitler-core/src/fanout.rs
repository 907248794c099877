//! Fan-out / fan-in over independent tasks
//!
//! Used for both the provider-level search fan-out and per-row comment
//! enrichment. Each task runs on its own tokio task; a panic in one is
//! logged and leaves a hole in the output without touching its siblings.

use std::future::Future;

use tokio::task::JoinSet;

/// Run every future concurrently and wait for all of them.
///
/// The output has one slot per input, in input order, independent of
/// completion order. A slot is `None` when its task panicked or was
/// cancelled. Dropping the returned future aborts the tasks still running.
pub async fn join_isolated<F, T>(tasks: Vec<F>) -> Vec<Option<T>>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(tasks.len()).collect();
    let mut set = JoinSet::new();

    for (index, task) in tasks.into_iter().enumerate() {
        set.spawn(async move { (index, task.await) });
    }

    while let Some(joined) = set.join_next().await {
        match joined {
            Ok((index, value)) => slots[index] = Some(value),
            Err(e) if e.is_cancelled() => tracing::debug!("Fan-out task cancelled"),
            Err(e) => tracing::error!(error = %e, "Fan-out task panicked"),
        }
    }

    slots
}
