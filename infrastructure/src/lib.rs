//! Infrastructure layer for raincloud
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: vendor provider bindings and configuration
//! file loading.

pub mod config;
pub mod providers;

// Re-export commonly used types
pub use config::{
    BoardConfig, ConfigLoader, ConfigValidationError, FileBoardConfig, FileConfig,
    FileMemberConfig, FileOutputConfig, FileProviderConfig,
};
pub use providers::{
    AnthropicProvider, GoogleProvider, HuggingFaceProvider, OpenAiProvider, build_registry,
    create_provider,
};
