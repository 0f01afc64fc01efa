//! Concurrency primitives for endpoint calls
//!
//! - [`PermitPool`] is the process-wide counting permit that bounds how many
//!   generation, embedding and judge requests are in flight at once.
//! - [`WorkerPool`] drives a batch of items through a fixed number of workers
//!   pulling from a shared queue. Generation and both evaluators use it, so
//!   their throughput depends only on the worker count and the permit pool.

mod permits;
mod worker_pool;

pub use permits::{PermitGuard, PermitPool};
pub use worker_pool::WorkerPool;
