//! Direct Response use case
//!
//! A single completion from one named provider, bypassing the board.

use crate::config::BoardSettings;
use crate::error::BoardError;
use crate::registry::ProviderRegistry;
use raincloud_domain::{CompletionRequest, CompletionResponse, Query};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{info, warn};

/// System prompt used for every direct response.
pub const DIRECT_SYSTEM_PROMPT: &str =
    "You are Claude, a helpful AI assistant. Provide clear, accurate, and thoughtful responses.";

/// Sampling temperature used for every direct response.
pub const DIRECT_TEMPERATURE: f32 = 0.7;

/// Input for the DirectResponse use case
#[derive(Debug, Clone)]
pub struct DirectResponseInput {
    pub query: Query,
    /// Provider id; the configured default when `None`
    pub provider: Option<String>,
}

impl DirectResponseInput {
    pub fn new(query: Query) -> Self {
        Self {
            query,
            provider: None,
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }
}

pub struct DirectResponseUseCase {
    providers: Arc<ProviderRegistry>,
    settings: BoardSettings,
}

impl DirectResponseUseCase {
    pub fn new(providers: Arc<ProviderRegistry>, settings: BoardSettings) -> Self {
        Self {
            providers,
            settings,
        }
    }

    /// Ask the provider directly.
    ///
    /// Unlike a board discussion, provider failures are returned to the
    /// caller. No health check is made and no fallback is tried.
    pub async fn execute(&self, input: DirectResponseInput) -> Result<CompletionResponse, BoardError> {
        let provider_id = input
            .provider
            .unwrap_or_else(|| self.settings.default_provider.clone());

        let provider = self
            .providers
            .get(&provider_id)
            .ok_or_else(|| BoardError::UnknownProvider(provider_id.clone()))?;

        info!("Direct response from {}", provider_id);

        let request = CompletionRequest::with_system_prompt(DIRECT_SYSTEM_PROMPT, input.query.content())
            .with_temperature(DIRECT_TEMPERATURE);

        match timeout(self.settings.call_timeout, provider.complete(&request)).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                warn!("Direct response from {} timed out", provider_id);
                Err(BoardError::Timeout {
                    provider: provider_id,
                    seconds: self.settings.call_timeout.as_secs(),
                })
            }
        }
    }
}
