//! Completion provider port
//!
//! Defines the single capability every backend binding implements.

use async_trait::async_trait;
use raincloud_domain::{CompletionRequest, CompletionResponse};
use thiserror::Error;
use tracing::debug;

/// Failure of one provider call: network, HTTP status or payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{provider}: {message}")]
pub struct ProviderError {
    pub message: String,
    /// Id of the provider that failed
    pub provider: String,
    /// Vendor-specific error code or type, when the vendor sent one
    pub code: Option<String>,
    /// HTTP status, when a response was received
    pub status: Option<u16>,
}

impl ProviderError {
    pub fn new(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            provider: provider.into(),
            code: None,
            status: None,
        }
    }

    pub fn with_code(mut self, code: Option<String>) -> Self {
        self.code = code;
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// A backend completion service
///
/// This port defines how the application layer talks to vendors.
/// Bindings (adapters) live in the infrastructure layer; one per vendor.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Registry id of this binding (e.g. "anthropic")
    fn id(&self) -> &str;

    /// Issue one completion
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError>;

    /// Whether the provider currently answers.
    ///
    /// Default implementation sends a minimal low-token probe through
    /// [`complete`](Self::complete); any error counts as unhealthy.
    async fn health_check(&self) -> bool {
        match self.complete(&CompletionRequest::health_probe()).await {
            Ok(_) => true,
            Err(e) => {
                debug!("Health probe failed for {}: {}", self.id(), e);
                false
            }
        }
    }
}
