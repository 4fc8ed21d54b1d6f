//! Scoped worker pool for the per-entry solver phases.
//!
//! Work items are read-only snapshots, so workers share nothing mutable;
//! each produces a local result and the caller merges them in input order,
//! keeping every run deterministic regardless of thread count.

use std::num::NonZeroUsize;
use std::thread;

/// Number of workers to use: the configured override, else available
/// parallelism, else 1.
pub(crate) fn worker_count(configured: Option<usize>) -> usize {
    match configured {
        Some(n) => n.max(1),
        None => thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1),
    }
}

/// Apply `f` to every item, fanning out across `workers` scoped threads,
/// and return the results in input order.
///
/// Items are dealt round-robin by index; each worker builds `(index, result)`
/// pairs and the join step reassembles them positionally, so the output is
/// identical to a serial map.
pub(crate) fn parallel_map<T, R, F>(items: &[T], workers: usize, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    if workers <= 1 || items.len() <= 1 {
        return items.iter().map(&f).collect();
    }
    let workers = workers.min(items.len());
    let mut indexed: Vec<Option<R>> = Vec::with_capacity(items.len());
    indexed.resize_with(items.len(), || None);

    let chunks: Vec<Vec<(usize, &T)>> = {
        let mut chunks: Vec<Vec<(usize, &T)>> = vec![Vec::new(); workers];
        for (i, item) in items.iter().enumerate() {
            chunks[i % workers].push((i, item));
        }
        chunks
    };

    let collected: Vec<Vec<(usize, R)>> = thread::scope(|scope| {
        let handles: Vec<_> = chunks
            .into_iter()
            .map(|chunk| {
                let f = &f;
                scope.spawn(move || {
                    chunk
                        .into_iter()
                        .map(|(i, item)| (i, f(item)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(results) => results,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });
    for (i, result) in collected.into_iter().flatten() {
        indexed[i] = Some(result);
    }
    indexed.into_iter().flatten().collect()
}
