//! Graceful shutdown coordination.
//!
//! A [`ShutdownSignal`] is cloned into every task that should stop when
//! the server does; the [`ConnectionTracker`] counts in-flight
//! connections so shutdown can wait for them to drain.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// A cloneable signal used to trigger and await graceful shutdown.
///
/// # Example
///
/// ```rust
/// use alexandria_server::ShutdownSignal;
///
/// let shutdown = ShutdownSignal::new();
/// assert!(!shutdown.is_triggered());
/// shutdown.trigger();
/// assert!(shutdown.is_triggered());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    inner: Arc<ShutdownInner>,
}

#[derive(Debug, Default)]
struct ShutdownInner {
    triggered: AtomicBool,
    notify: Notify,
}

impl ShutdownSignal {
    /// Creates a new, untriggered signal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a signal that triggers on SIGINT or SIGTERM.
    #[must_use]
    pub fn with_os_signals() -> Self {
        let signal = Self::new();
        let trigger = signal.clone();

        tokio::spawn(async move {
            let ctrl_c = tokio::signal::ctrl_c();

            #[cfg(unix)]
            {
                let mut sigterm = tokio::signal::unix::signal(
                    tokio::signal::unix::SignalKind::terminate(),
                )
                .expect("failed to install SIGTERM handler");

                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }

            #[cfg(not(unix))]
            {
                let _ = ctrl_c.await;
            }

            trigger.trigger();
        });

        signal
    }

    /// Triggers shutdown. Idempotent.
    pub fn trigger(&self) {
        self.inner.triggered.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    /// Whether shutdown has been triggered.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.inner.triggered.load(Ordering::SeqCst)
    }

    /// Waits until shutdown is triggered.
    pub async fn wait(&self) {
        loop {
            let notified = self.inner.notify.notified();
            if self.is_triggered() {
                return;
            }
            notified.await;
        }
    }
}

/// Counts in-flight connections so shutdown can wait for them.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTracker {
    inner: Arc<TrackerInner>,
}

#[derive(Debug, Default)]
struct TrackerInner {
    active: AtomicUsize,
    notify: Notify,
}

impl ConnectionTracker {
    /// Creates a tracker with no active connections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connection; the returned token releases it on drop.
    #[must_use]
    pub fn acquire(&self) -> ConnectionToken {
        self.inner.active.fetch_add(1, Ordering::SeqCst);
        ConnectionToken {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Number of currently active connections.
    #[must_use]
    pub fn active(&self) -> usize {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// Waits until all connections have drained.
    pub async fn drained(&self) {
        loop {
            let notified = self.inner.notify.notified();
            if self.active() == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// Token representing one active connection.
#[derive(Debug)]
pub struct ConnectionToken {
    inner: Arc<TrackerInner>,
}

impl Drop for ConnectionToken {
    fn drop(&mut self) {
        if self.inner.active.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.inner.notify.notify_waiters();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_releases_waiters() {
        let shutdown = ShutdownSignal::new();
        let waiter = shutdown.clone();

        let handle = tokio::spawn(async move { waiter.wait().await });
        shutdown.trigger();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("waiter should be released")
            .unwrap();
    }

    #[tokio::test]
    async fn test_wait_after_trigger_returns_immediately() {
        let shutdown = ShutdownSignal::new();
        shutdown.trigger();
        tokio::time::timeout(Duration::from_millis(100), shutdown.wait())
            .await
            .expect("already triggered");
    }

    #[tokio::test]
    async fn test_tracker_drains() {
        let tracker = ConnectionTracker::new();
        let token = tracker.acquire();
        assert_eq!(tracker.active(), 1);

        let waiter = tracker.clone();
        let handle = tokio::spawn(async move { waiter.drained().await });

        drop(token);
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("tracker should drain")
            .unwrap();
        assert_eq!(tracker.active(), 0);
    }

    #[tokio::test]
    async fn test_tracker_drained_when_empty() {
        let tracker = ConnectionTracker::new();
        tokio::time::timeout(Duration::from_millis(100), tracker.drained())
            .await
            .expect("no connections to drain");
    }
}
