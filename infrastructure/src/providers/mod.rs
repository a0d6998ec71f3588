//! Vendor bindings for the completion provider port.
//!
//! One binding per [`ProviderKind`]. [`build_registry`] turns the provider
//! settings into a [`ProviderRegistry`], leaving out every provider that has
//! no credential.

pub mod anthropic;
pub mod google;
pub(crate) mod http;
pub mod huggingface;
pub mod openai;

pub use anthropic::AnthropicProvider;
pub use google::GoogleProvider;
pub use huggingface::HuggingFaceProvider;
pub use openai::OpenAiProvider;

use raincloud_application::{CompletionProvider, ProviderError, ProviderRegistry};
use raincloud_domain::{ProviderKind, ProviderSettings, ProvidersConfig};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Sampling temperature sent when a request carries none.
pub(crate) const DEFAULT_TEMPERATURE: f32 = 0.7;

pub(crate) fn require_api_key(id: &str, settings: &ProviderSettings) -> Result<String, ProviderError> {
    settings
        .api_key
        .as_deref()
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ProviderError::new(id, "no API key configured"))
}

/// Construct the binding for `settings.kind`, registered as `id`.
pub fn create_provider(
    id: &str,
    settings: &ProviderSettings,
) -> Result<Arc<dyn CompletionProvider>, ProviderError> {
    let settings = settings.clone();
    Ok(match settings.kind {
        ProviderKind::Anthropic => Arc::new(AnthropicProvider::new(id, settings)?),
        ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(id, settings)?),
        ProviderKind::HuggingFace => Arc::new(HuggingFaceProvider::new(id, settings)?),
        ProviderKind::Google => Arc::new(GoogleProvider::new(id, settings)?),
    })
}

/// Build the registry from configured providers.
///
/// Providers without a credential are skipped with an info line, not an error;
/// members naming them fall through to their next fallback.
pub fn build_registry(config: &ProvidersConfig) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();

    for (id, settings) in config {
        if !settings.has_credentials() {
            info!("Skipping provider {}: no credentials", id);
            continue;
        }
        match create_provider(id, settings) {
            Ok(binding) => {
                debug!("Registered provider {} ({}, {})", id, settings.kind, settings.model);
                registry.register(id.clone(), binding);
            }
            Err(e) => warn!("Could not initialize provider {}: {}", id, e),
        }
    }

    info!("{} provider(s) available: {}", registry.len(), registry.ids().join(", "));
    registry
}
