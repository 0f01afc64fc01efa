//! Shared counting permit for in-flight requests

use crate::error::{Redsm5Error, Redsm5Result};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, trace};

/// Counting permit pool shared by every clone
///
/// Cloning is cheap and all clones draw from the same permits, so a pool
/// created once in the pipeline context bounds the whole process.
#[derive(Debug, Clone)]
pub struct PermitPool {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// A held permit; released when dropped
#[derive(Debug)]
pub struct PermitGuard {
    _permit: OwnedSemaphorePermit,
}

impl PermitPool {
    /// Create a pool with `capacity` permits
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Wait for a permit
    ///
    /// Waiting longer than a few milliseconds is logged at debug level.
    pub async fn acquire(&self) -> Redsm5Result<PermitGuard> {
        let start = Instant::now();
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| Redsm5Error::other(format!("Permit pool closed: {}", e)))?;

        let waited = start.elapsed();
        if waited > Duration::from_millis(5) {
            debug!(
                waited_ms = waited.as_millis() as u64,
                in_flight = self.in_flight(),
                "waited for request permit"
            );
        } else {
            trace!(in_flight = self.in_flight(), "acquired request permit");
        }

        Ok(PermitGuard { _permit: permit })
    }

    /// Take a permit only if one is free right now
    pub fn try_acquire(&self) -> Option<PermitGuard> {
        self.semaphore
            .clone()
            .try_acquire_owned()
            .ok()
            .map(|permit| PermitGuard { _permit: permit })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Permits currently free
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Permits currently held
    pub fn in_flight(&self) -> usize {
        self.capacity.saturating_sub(self.available())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_permits_are_shared_between_clones() {
        let pool = PermitPool::new(2);
        let other = pool.clone();

        let _a = pool.acquire().await.unwrap();
        let _b = other.acquire().await.unwrap();

        assert_eq!(pool.in_flight(), 2);
        assert!(other.try_acquire().is_none());
    }

    #[tokio::test]
    async fn test_release_on_drop() {
        let pool = PermitPool::new(1);
        {
            let _guard = pool.acquire().await.unwrap();
            assert_eq!(pool.available(), 0);
        }
        assert_eq!(pool.available(), 1);
        assert!(pool.try_acquire().is_some());
    }

    #[tokio::test]
    async fn test_zero_capacity_is_raised_to_one() {
        let pool = PermitPool::new(0);
        assert_eq!(pool.capacity(), 1);
        assert!(pool.try_acquire().is_some());
    }

    #[tokio::test]
    async fn test_acquire_waits_for_release() {
        let pool = PermitPool::new(1);
        let guard = pool.acquire().await.unwrap();

        let waiter = {
            let pool = pool.clone();
            tokio::spawn(async move {
                let _guard = pool.acquire().await.unwrap();
                true
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());
        drop(guard);
        assert!(waiter.await.unwrap());
    }
}
