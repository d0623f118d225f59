//! Bounded-parallelism batch runner
//!
//! Runs one task per work item on the tokio runtime, with a semaphore
//! capping how many are active at once. Every item is attempted exactly
//! once; a task panic is absorbed into that item's outcome and never aborts
//! the rest of the batch.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Outcome types that can absorb a worker failure the task itself could not
/// report
pub trait BatchOutcome {
    /// Build the outcome recorded when a worker panics or is lost
    fn panicked(detail: String) -> Self;
}

/// Run `make_task` once per item with at most `jobs` tasks active at a time
///
/// Results are returned in input order once every item has been attempted.
/// `jobs` is clamped to at least 1; an empty input completes immediately.
pub async fn run_bounded<I, T, F, Fut>(jobs: usize, items: Vec<I>, make_task: F) -> Vec<T>
where
    I: Send + 'static,
    T: BatchOutcome + Send + 'static,
    F: Fn(I) -> Fut,
    Fut: Future<Output = T> + Send + 'static,
{
    if items.is_empty() {
        return Vec::new();
    }

    let semaphore = Arc::new(Semaphore::new(jobs.max(1)));
    let handles: Vec<_> = items
        .into_iter()
        .map(|item| {
            let semaphore = Arc::clone(&semaphore);
            let task = make_task(item);
            tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire().await else {
                    return T::panicked("semaphore closed unexpectedly".to_string());
                };
                task.await
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.unwrap_or_else(|e| T::panicked(e.to_string())));
    }

    results
}
