//! Document publication.
//!
//! A build produces a fresh immutable document off to the side; the
//! publisher then swaps a single shared reference under a lock held only
//! for the swap instant. Serving threads read the current document
//! without ever blocking on a build in progress. Both serializations are
//! rendered once at publish time; serving is never a rebuild.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use alexandria_model::{Document, DocumentFormat, ModelResult};

use crate::build::{BuildPhase, DocumentBuilder};
use crate::error::BuildError;

/// An immutable, fully rendered build result.
#[derive(Debug)]
pub struct PublishedDocument {
    document: Document,
    yaml: String,
    json: String,
}

impl PublishedDocument {
    /// Render a document into its published form.
    pub fn render(document: Document) -> ModelResult<Self> {
        let yaml = document.render(DocumentFormat::Yaml)?;
        let json = document.render(DocumentFormat::Json)?;
        Ok(Self { document, yaml, json })
    }

    /// The assembled document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The pre-rendered body for the given format.
    #[must_use]
    pub fn body(&self, format: DocumentFormat) -> &str {
        match format {
            DocumentFormat::Yaml => &self.yaml,
            DocumentFormat::Json => &self.json,
        }
    }
}

/// Outcome of a rebuild request.
#[derive(Debug)]
pub enum RebuildOutcome {
    /// A fresh document was built and published.
    Published(Arc<PublishedDocument>),
    /// Document assembly is disabled by configuration; nothing was built.
    Disabled,
    /// Another rebuild was already running; this trigger was queued and
    /// will be honored by at most one follow-up build.
    Coalesced,
}

/// Holds the currently published document and serializes rebuilds.
///
/// At most one build executes at a time. Triggers arriving while a build
/// is running coalesce into at most one follow-up build. Readers of
/// [`current`](Self::current) never block on a build.
#[derive(Debug)]
pub struct DocumentPublisher {
    current: RwLock<Option<Arc<PublishedDocument>>>,
    build_gate: Mutex<()>,
    pending: AtomicBool,
    phase: RwLock<BuildPhase>,
}

impl Default for DocumentPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentPublisher {
    /// Create a publisher with nothing published.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
            build_gate: Mutex::new(()),
            pending: AtomicBool::new(false),
            phase: RwLock::new(BuildPhase::Idle),
        }
    }

    /// The currently published document, if any build has ever succeeded.
    #[must_use]
    pub fn current(&self) -> Option<Arc<PublishedDocument>> {
        self.current.read().clone()
    }

    /// Whether any build has ever published.
    #[must_use]
    pub fn has_published(&self) -> bool {
        self.current.read().is_some()
    }

    /// The phase the most recent build reached.
    #[must_use]
    pub fn phase(&self) -> BuildPhase {
        *self.phase.read()
    }

    /// Trigger a rebuild from the given builder.
    ///
    /// If another rebuild is in flight the trigger is queued: the running
    /// rebuild will notice it and run one follow-up build, so any number
    /// of concurrent triggers collapse into at most one extra build. On
    /// failure the previously published document stays in place; there is
    /// no automatic retry beyond honoring already queued triggers.
    ///
    /// # Errors
    ///
    /// Returns the `BuildError` of the last attempted build.
    pub fn rebuild(&self, builder: &DocumentBuilder) -> Result<RebuildOutcome, BuildError> {
        if !builder.is_enabled() {
            tracing::debug!("document assembly disabled, skipping rebuild");
            return Ok(RebuildOutcome::Disabled);
        }

        let Some(_gate) = self.build_gate.try_lock() else {
            self.pending.store(true, Ordering::SeqCst);
            tracing::debug!("rebuild already in flight, trigger coalesced");
            return Ok(RebuildOutcome::Coalesced);
        };

        loop {
            self.pending.store(false, Ordering::SeqCst);
            let result = self.run_build(builder);

            // A trigger that arrived during this build is a fresh
            // configuration-change event; honor it with one more cycle.
            if self.pending.load(Ordering::SeqCst) {
                if let Err(e) = &result {
                    tracing::error!(error = %e, "build failed, retrying for queued trigger");
                }
                continue;
            }

            return result.map(RebuildOutcome::Published);
        }
    }

    fn run_build(&self, builder: &DocumentBuilder) -> Result<Arc<PublishedDocument>, BuildError> {
        let outcome = builder
            .build_observed(|phase| *self.phase.write() = phase)
            .and_then(|document| PublishedDocument::render(document).map_err(BuildError::Render));

        match outcome {
            Ok(published) => {
                let published = Arc::new(published);
                *self.current.write() = Some(Arc::clone(&published));
                *self.phase.write() = BuildPhase::Published;
                tracing::info!("document published");
                Ok(published)
            }
            Err(e) => {
                *self.phase.write() = BuildPhase::Failed;
                tracing::error!(error = %e, "build failed, retaining previously published document");
                Err(e)
            }
        }
    }
}
