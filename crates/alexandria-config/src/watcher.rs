//! File watching for rebuild triggers.
//!
//! Document builds are driven by configuration activation and change
//! events, never by individual HTTP requests. The [`ChangeWatcher`]
//! monitors the configuration file and the static baseline document and
//! emits one coalesced [`ChangeEvent`] per burst of filesystem activity:
//! changes landing within the debounce window collapse into a single
//! event, so concurrent triggers produce at most one follow-up rebuild.
//!
//! # Example
//!
//! ```no_run
//! use alexandria_config::ChangeWatcher;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut watcher = ChangeWatcher::builder()
//!     .with_debounce(Duration::from_millis(500))
//!     .watch_path("alexandria.toml")
//!     .watch_path("openapi.yaml")
//!     .build()?;
//!
//! while let Some(event) = watcher.next_change().await {
//!     tracing::info!(paths = ?event.paths, "configuration changed, rebuilding");
//!     // trigger a document rebuild here
//! }
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::ConfigError;

/// A coalesced batch of filesystem changes.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    /// The distinct paths that changed within the debounce window.
    pub paths: Vec<PathBuf>,
}

/// Builder for [`ChangeWatcher`].
#[derive(Debug, Default)]
pub struct ChangeWatcherBuilder {
    paths: Vec<PathBuf>,
    debounce: Option<Duration>,
}

impl ChangeWatcherBuilder {
    /// Add a path to watch. Directories are watched recursively.
    #[must_use]
    pub fn watch_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Set the debounce window. Defaults to 500 ms.
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = Some(debounce);
        self
    }

    /// Start watching.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::WatchError` if the underlying watcher cannot
    /// be created or a path cannot be watched.
    pub fn build(self) -> Result<ChangeWatcher, ConfigError> {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            match res {
                Ok(event) => {
                    if matches!(
                        event.kind,
                        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                    ) {
                        for path in event.paths {
                            // Receiver dropped means the watcher is shutting down.
                            let _ = tx.send(path);
                        }
                    }
                }
                Err(e) => tracing::warn!(error = %e, "file watcher error"),
            }
        })?;

        for path in &self.paths {
            let mode = if path.is_dir() {
                RecursiveMode::Recursive
            } else {
                RecursiveMode::NonRecursive
            };
            watcher.watch(path, mode)?;
        }

        Ok(ChangeWatcher {
            _watcher: watcher,
            rx,
            debounce: self.debounce.unwrap_or(Duration::from_millis(500)),
        })
    }
}

/// Watches configured paths and yields coalesced change events.
pub struct ChangeWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::UnboundedReceiver<PathBuf>,
    debounce: Duration,
}

impl std::fmt::Debug for ChangeWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeWatcher")
            .field("debounce", &self.debounce)
            .finish_non_exhaustive()
    }
}

impl ChangeWatcher {
    /// Create a new watcher builder.
    #[must_use]
    pub fn builder() -> ChangeWatcherBuilder {
        ChangeWatcherBuilder::default()
    }

    /// Wait for the next batch of changes.
    ///
    /// Blocks until at least one change arrives, then keeps draining
    /// changes that land within the debounce window and returns them all
    /// as one event. Returns `None` once the watcher has shut down.
    pub async fn next_change(&mut self) -> Option<ChangeEvent> {
        let first = self.rx.recv().await?;
        let mut paths = vec![first];

        let deadline = tokio::time::sleep(self.debounce);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                () = &mut deadline => break,
                more = self.rx.recv() => match more {
                    Some(path) => {
                        if !paths.contains(&path) {
                            paths.push(path);
                        }
                    }
                    None => break,
                },
            }
        }

        Some(ChangeEvent { paths })
    }
}
