//! Application configuration types.

mod board_settings;

pub use board_settings::{BoardSettings, DEFAULT_DIRECT_PROVIDER};
