//! Application layer for raincloud
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod ports;
pub mod registry;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::{BoardSettings, DEFAULT_DIRECT_PROVIDER};
pub use error::BoardError;
pub use orchestrator::BoardOrchestrator;
pub use ports::{
    completion_provider::{CompletionProvider, ProviderError},
    progress::{NoProgress, ProgressNotifier},
};
pub use registry::ProviderRegistry;
pub use use_cases::check_providers::ProviderHealth;
pub use use_cases::direct_response::{DIRECT_SYSTEM_PROMPT, DIRECT_TEMPERATURE};
pub use use_cases::dispatch::{DispatchError, DispatchOutcome, Dispatcher};
pub use use_cases::discuss_query::{DiscussQueryInput, DiscussQueryUseCase};
