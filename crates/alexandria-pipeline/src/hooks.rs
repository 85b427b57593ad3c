//! Pluggable document transforms.
//!
//! The model reader and filter hooks share one capability: take the
//! current in-memory document and return either a mutated document or an
//! error. Implementations are registered in an explicit [`HookRegistry`]
//! under string names and resolved by configured name at each build; no
//! reflection-style discovery is involved. No document state persists in
//! a hook across builds.

use std::collections::HashMap;
use std::sync::Arc;

use alexandria_model::Document;

use crate::error::{BoxError, HookError, HookKind};

/// A pluggable document transform.
///
/// The only entry point: `(Document) -> Document | Error`. Closures with
/// that shape implement the trait directly.
///
/// # Example
///
/// ```
/// use alexandria_model::Document;
/// use alexandria_pipeline::{BoxError, HookRegistry};
///
/// fn describe(mut doc: Document) -> Result<Document, BoxError> {
///     doc.info.description = Some("Generated".to_string());
///     Ok(doc)
/// }
///
/// let mut registry = HookRegistry::new();
/// registry.register("router-model-reader", describe);
/// assert!(registry.contains("router-model-reader"));
/// ```
pub trait DocumentHook: Send + Sync {
    /// Transform the document.
    fn apply(&self, document: Document) -> Result<Document, BoxError>;
}

impl<F> DocumentHook for F
where
    F: Fn(Document) -> Result<Document, BoxError> + Send + Sync,
{
    fn apply(&self, document: Document) -> Result<Document, BoxError> {
        self(document)
    }
}

/// Registry mapping configured hook names to implementations.
#[derive(Default, Clone)]
pub struct HookRegistry {
    hooks: HashMap<String, Arc<dyn DocumentHook>>,
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("names", &self.hooks.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl HookRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook under a name, replacing any previous registration.
    pub fn register(&mut self, name: impl Into<String>, hook: impl DocumentHook + 'static) {
        self.hooks.insert(name.into(), Arc::new(hook));
    }

    /// Whether a hook is registered under the given name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.hooks.contains_key(name)
    }

    /// Resolve a hook by name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Arc<dyn DocumentHook>> {
        self.hooks.get(name).cloned()
    }

    /// Run the named hook of the given kind over the document.
    ///
    /// A `None` name is a pass-through. A configured name that resolves
    /// to nothing is a fatal configuration error.
    ///
    /// # Errors
    ///
    /// Returns `HookError::Unresolved` for an unknown name and
    /// `HookError::Failed` when the hook itself errors.
    pub fn run(
        &self,
        kind: HookKind,
        name: Option<&str>,
        document: Document,
    ) -> Result<Document, HookError> {
        let Some(name) = name else {
            return Ok(document);
        };

        let hook = self.resolve(name).ok_or_else(|| HookError::Unresolved {
            kind,
            name: name.to_string(),
        })?;

        tracing::debug!(kind = %kind, name = %name, "running hook");
        hook.apply(document).map_err(|source| HookError::Failed {
            kind,
            name: name.to_string(),
            source,
        })
    }
}
