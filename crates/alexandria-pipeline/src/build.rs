//! The document build pipeline.
//!
//! One build runs the fixed sequence load → scan → merge → read → filter
//! and produces a fresh [`Document`]. Hook configuration is passed in
//! explicitly rather than read from ambient state, so builds are
//! side-effect-free outside the designated trigger path.

use alexandria_config::AlexandriaConfig;
use alexandria_model::{Document, EndpointMeta};

use crate::error::{BuildError, HookKind};
use crate::hooks::HookRegistry;
use crate::merge::{merge_documents, MergePolicy};
use crate::scan::{scan_endpoints, ScanScope};
use crate::static_spec::StaticSpec;

/// Phase of a build cycle.
///
/// Per build: `Idle → Loading → Scanning → Merging → Reading → Filtering
/// → Published`. Any failure before `Published` transitions to `Failed`,
/// leaving the prior published document (if one exists) as the
/// still-served artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    /// No build has started.
    Idle,
    /// Reading the static baseline document.
    Loading,
    /// Scanning registered endpoints.
    Scanning,
    /// Merging static and scanned sources.
    Merging,
    /// Running the model reader hook.
    Reading,
    /// Running the filter hook.
    Filtering,
    /// The build completed and its document is published.
    Published,
    /// The build failed; the prior document (if any) is still served.
    Failed,
}

impl std::fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BuildPhase::Idle => "idle",
            BuildPhase::Loading => "loading",
            BuildPhase::Scanning => "scanning",
            BuildPhase::Merging => "merging",
            BuildPhase::Reading => "reading",
            BuildPhase::Filtering => "filtering",
            BuildPhase::Published => "published",
            BuildPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Assembles documents from the configured sources.
///
/// # Example
///
/// ```
/// use alexandria_config::AlexandriaConfig;
/// use alexandria_pipeline::DocumentBuilder;
///
/// let builder = DocumentBuilder::new(AlexandriaConfig::default());
/// let document = builder.build().unwrap();
/// assert_eq!(document.info.title, "Generated API");
/// ```
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    config: AlexandriaConfig,
    endpoints: Vec<EndpointMeta>,
    hooks: HookRegistry,
    policy: MergePolicy,
}

impl DocumentBuilder {
    /// Create a builder for the given configuration.
    #[must_use]
    pub fn new(config: AlexandriaConfig) -> Self {
        Self {
            config,
            endpoints: Vec::new(),
            hooks: HookRegistry::new(),
            policy: MergePolicy::default(),
        }
    }

    /// Set the registered endpoints available to the scanner.
    #[must_use]
    pub fn endpoints(mut self, endpoints: Vec<EndpointMeta>) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Add one registered endpoint.
    #[must_use]
    pub fn endpoint(mut self, endpoint: EndpointMeta) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Set the hook registry the configured hook names resolve against.
    #[must_use]
    pub fn hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    /// Override the merge precedence policy.
    #[must_use]
    pub fn merge_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The configuration this builder assembles from.
    #[must_use]
    pub fn config(&self) -> &AlexandriaConfig {
        &self.config
    }

    /// Whether document assembly is enabled at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.document.enabled
    }

    /// Run one build cycle and return the assembled document.
    ///
    /// # Errors
    ///
    /// Returns `BuildError` on any build-fatal failure; per-endpoint scan
    /// problems are recovered inside the scan phase.
    pub fn build(&self) -> Result<Document, BuildError> {
        self.build_observed(|_| {})
    }

    /// Run one build cycle, reporting each phase transition to the
    /// observer as it is entered.
    pub fn build_observed(
        &self,
        mut observer: impl FnMut(BuildPhase),
    ) -> Result<Document, BuildError> {
        observer(BuildPhase::Loading);
        let static_doc = StaticSpec::from_config(&self.config.document)
            .load()?
            .unwrap_or_default();

        observer(BuildPhase::Scanning);
        let scanned = if self.config.scan.enabled {
            scan_endpoints(&self.endpoints, &ScanScope::from_config(&self.config.scan))
        } else {
            tracing::debug!("annotation scan disabled");
            indexmap::IndexMap::new()
        };

        observer(BuildPhase::Merging);
        let merged = merge_documents(static_doc, scanned, self.policy)?;

        observer(BuildPhase::Reading);
        let read = self.hooks.run(
            HookKind::ModelReader,
            self.config.hooks.model_reader.as_deref(),
            merged,
        )?;

        observer(BuildPhase::Filtering);
        let filtered =
            self.hooks
                .run(HookKind::Filter, self.config.hooks.filter.as_deref(), read)?;

        tracing::info!(paths = filtered.paths.len(), "document assembled");
        Ok(filtered)
    }
}
