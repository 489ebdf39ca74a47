//! Fixed-size worker pool with static partitioning
//!
//! Work is split round-robin by index: worker `i` of `n` handles items
//! `i, i + n, i + 2n, ...` in ascending order. There is no work stealing and
//! no shared result buffer; callers that aggregate results across workers
//! must synchronize their own accumulator.

use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;

/// Run `work_fn` over `items` with a fixed number of concurrent workers
///
/// Spawns `worker_count` tasks (clamped to at least 1) and awaits them all
/// before returning — join/barrier semantics. `work_fn` receives each item's
/// original index along with the item, so callers can key results back to
/// input positions.
///
/// A panic inside `work_fn` takes down only the worker it happened on; the
/// remaining items of that worker's partition are skipped, sibling workers
/// run to completion, and the panic is logged rather than propagated.
///
/// Empty `items` spawns `worker_count` workers that each do zero iterations.
pub async fn run_partitioned<T, F, Fut>(worker_count: usize, items: Vec<T>, work_fn: F)
where
    T: Clone + Send + Sync + 'static,
    F: Fn(usize, T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let worker_count = worker_count.max(1);
    let items = Arc::new(items);
    let work_fn = Arc::new(work_fn);

    let mut workers = Vec::with_capacity(worker_count);
    for worker in 0..worker_count {
        let items = Arc::clone(&items);
        let work_fn = Arc::clone(&work_fn);
        workers.push(tokio::spawn(async move {
            let mut index = worker;
            while index < items.len() {
                work_fn(index, items[index].clone()).await;
                index += worker_count;
            }
        }));
    }

    for (worker, joined) in join_all(workers).await.into_iter().enumerate() {
        if let Err(e) = joined {
            tracing::error!(worker, error = %e, "worker terminated abnormally");
        }
    }
}
