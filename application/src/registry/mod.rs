//! Provider registry
//!
//! Holds the constructed provider bindings keyed by provider id.

use crate::ports::completion_provider::CompletionProvider;
use std::collections::HashMap;
use std::sync::Arc;

/// Provider bindings keyed by id.
///
/// Populated once while the orchestrator is assembled; afterwards it is only
/// read, so one `Arc<ProviderRegistry>` is shared by every concurrent
/// dispatch without locking. Providers without credentials are simply never
/// registered.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn CompletionProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `binding` under `id`, replacing any previous binding.
    pub fn register(&mut self, id: impl Into<String>, binding: Arc<dyn CompletionProvider>) {
        self.providers.insert(id.into(), binding);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, id: impl Into<String>, binding: Arc<dyn CompletionProvider>) -> Self {
        self.register(id, binding);
        self
    }

    pub fn get(&self, id: &str) -> Option<Arc<dyn CompletionProvider>> {
        self.providers.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.providers.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.providers.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.ids())
            .finish()
    }
}
