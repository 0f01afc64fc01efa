//! Fixed-size worker pool over a shared queue

use futures::future::join_all;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::future::Future;
use tracing::trace;

/// Runs a batch of items through a fixed number of cooperative workers
///
/// Each worker repeatedly pops the next item from a shared queue and awaits
/// the handler before taking another one, so at most `workers` handlers are
/// pending at any time. With one worker items are handled strictly in input
/// order. Workers run on the calling task; nothing is spawned.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    /// Create a pool with `workers` workers (at least one)
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// A single worker: sequential processing
    pub fn sequential() -> Self {
        Self::new(1)
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Handle every item and return the outputs in input order
    ///
    /// The handler receives the item's index in the input alongside the item.
    pub async fn run<I, T, F, Fut>(&self, items: Vec<I>, handler: F) -> Vec<T>
    where
        F: Fn(usize, I) -> Fut,
        Fut: Future<Output = T>,
    {
        let total = items.len();
        if total == 0 {
            return Vec::new();
        }

        let queue: Mutex<VecDeque<(usize, I)>> =
            Mutex::new(items.into_iter().enumerate().collect());
        let results: Mutex<Vec<(usize, T)>> = Mutex::new(Vec::with_capacity(total));
        let worker_count = self.workers.min(total);

        let workers = (0..worker_count).map(|worker_id| {
            let queue = &queue;
            let results = &results;
            let handler = &handler;
            async move {
                loop {
                    let next = queue.lock().pop_front();
                    let Some((index, item)) = next else {
                        break;
                    };
                    trace!(worker_id, index, "worker picked item");
                    let output = handler(index, item).await;
                    results.lock().push((index, output));
                }
            }
        });
        join_all(workers).await;

        let mut results = results.into_inner();
        results.sort_by_key(|(index, _)| *index);
        results.into_iter().map(|(_, output)| output).collect()
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::sequential()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_outputs_follow_input_order() {
        let pool = WorkerPool::new(4);
        let items: Vec<u64> = (0..20).collect();

        let outputs = pool
            .run(items, |_, item| async move {
                // Later items finish first
                tokio::time::sleep(Duration::from_millis(20 - item)).await;
                item * 2
            })
            .await;

        assert_eq!(outputs, (0..20).map(|i| i * 2).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_never_exceeds_worker_count() {
        let pool = WorkerPool::new(3);
        let active = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        pool.run((0..12).collect::<Vec<_>>(), |_, _item: i32| {
            let active = &active;
            let peak = &peak;
            async move {
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                active.fetch_sub(1, Ordering::SeqCst);
            }
        })
        .await;

        assert_eq!(peak.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_sequential_handles_in_order() {
        let pool = WorkerPool::sequential();
        let seen = Mutex::new(Vec::new());

        pool.run(vec!["a", "b", "c"], |index, item| {
            let seen = &seen;
            async move {
                seen.lock().push((index, item));
            }
        })
        .await;

        assert_eq!(seen.into_inner(), vec![(0, "a"), (1, "b"), (2, "c")]);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let outputs: Vec<i32> = WorkerPool::new(5)
            .run(Vec::<i32>::new(), |_, i| async move { i })
            .await;
        assert!(outputs.is_empty());
    }
}
