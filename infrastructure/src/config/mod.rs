//! Configuration file loading for raincloud
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `RAINCLOUD_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./raincloud.toml` or `./.raincloud.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/raincloud/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    BoardConfig, ConfigValidationError, FileBoardConfig, FileConfig, FileMemberConfig,
    FileOutputConfig, FileProviderConfig, default_board, default_providers,
};
pub use loader::ConfigLoader;
