//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into the typed board
//! configuration once validated.

mod board;
mod members;
mod output;
mod providers;

pub use board::FileBoardConfig;
pub use members::{FileMemberConfig, default_board};
pub use output::FileOutputConfig;
pub use providers::{FileProviderConfig, default_providers};

use raincloud_application::BoardSettings;
use raincloud_domain::{MemberRegistry, OutputFormat, ProvidersConfig};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("board.max_concurrent_agents must be at least 1")]
    InvalidConcurrency,

    #[error("{0} cannot be 0")]
    InvalidTimeout(String),

    #[error("board.cost_per_token must be a finite, non-negative number")]
    InvalidCost,

    #[error("at least one board member is required")]
    NoMembers,

    #[error("board member id cannot be empty")]
    EmptyMemberId,

    #[error("duplicate board member id: {0}")]
    DuplicateMember(String),

    #[error("member {member}: temperature {value} is outside [0, 2]")]
    InvalidTemperature { member: String, value: f32 },

    #[error("member {member}: provider {provider} is not declared under [providers]")]
    UndeclaredProvider { member: String, provider: String },

    #[error("provider {provider}: {message}")]
    InvalidProvider { provider: String, message: String },
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Dispatch and reporting settings
    pub board: FileBoardConfig,
    /// Board members, in configuration order
    pub members: Vec<FileMemberConfig>,
    /// Provider bindings keyed by id
    pub providers: BTreeMap<String, FileProviderConfig>,
    /// Output settings
    pub output: FileOutputConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            board: FileBoardConfig::default(),
            members: default_board(),
            providers: default_providers(),
            output: FileOutputConfig::default(),
        }
    }
}

/// Validated, typed configuration.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub members: MemberRegistry,
    pub settings: BoardSettings,
    pub providers: ProvidersConfig,
    pub output_format: OutputFormat,
    pub color: bool,
}

impl FileConfig {
    /// Check the whole configuration, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.board.max_concurrent_agents == 0 {
            return Err(ConfigValidationError::InvalidConcurrency);
        }
        if self.board.call_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout(
                "board.call_timeout_seconds".to_string(),
            ));
        }
        let cost = self.board.cost_per_token;
        if !cost.is_finite() || cost < 0.0 {
            return Err(ConfigValidationError::InvalidCost);
        }

        for (id, provider) in &self.providers {
            provider
                .resolve_kind(id)
                .map_err(|message| ConfigValidationError::InvalidProvider {
                    provider: id.clone(),
                    message,
                })?;
            if provider.timeout_seconds == 0 {
                return Err(ConfigValidationError::InvalidTimeout(format!(
                    "providers.{}.timeout_seconds",
                    id
                )));
            }
        }

        if self.members.is_empty() {
            return Err(ConfigValidationError::NoMembers);
        }

        let mut seen = HashSet::new();
        for member in &self.members {
            if member.id.trim().is_empty() {
                return Err(ConfigValidationError::EmptyMemberId);
            }
            if !seen.insert(member.id.as_str()) {
                return Err(ConfigValidationError::DuplicateMember(member.id.clone()));
            }
            if !(0.0..=2.0).contains(&member.temperature) {
                return Err(ConfigValidationError::InvalidTemperature {
                    member: member.id.clone(),
                    value: member.temperature,
                });
            }
            if let Some(provider) = member
                .provider_ids()
                .find(|p| !self.providers.contains_key(*p))
            {
                return Err(ConfigValidationError::UndeclaredProvider {
                    member: member.id.clone(),
                    provider: provider.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Validate, then convert into typed configuration. API keys are read
    /// from the process environment.
    pub fn into_board_config(self) -> Result<BoardConfig, ConfigValidationError> {
        self.validate()?;

        let mut providers = ProvidersConfig::new();
        for (id, provider) in &self.providers {
            let settings = provider.to_settings(id).map_err(|message| {
                ConfigValidationError::InvalidProvider {
                    provider: id.clone(),
                    message,
                }
            })?;
            providers.insert(id.clone(), settings);
        }

        Ok(BoardConfig {
            members: MemberRegistry::new(self.members.iter().map(FileMemberConfig::to_member).collect()),
            settings: self.board.to_settings(),
            providers,
            output_format: self.output.format.unwrap_or_default(),
            color: self.output.color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.providers.len(), 4);
        assert_eq!(config.members.len(), 7);
    }

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[board]
max_concurrent_agents = 2
call_timeout_seconds = 30

[[members]]
id = "ceo"
name = "Alex"
role = "CEO"
system_prompt = "You are the CEO."
preferred_provider = "anthropic"
priority = 1

[[members]]
id = "cfo"
name = "Dana"
role = "CFO"
system_prompt = "You are the CFO."
preferred_provider = "openai"
fallback_providers = ["anthropic"]
temperature = 0.3
priority = 2

[providers.anthropic]
model = "claude-sonnet-4-5-20250929"

[providers.openai]
kind = "openai"

[output]
format = "json"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.board.max_concurrent_agents, 2);
        assert_eq!(config.members.len(), 2);
        assert_eq!(config.members[1].fallback_providers, vec!["anthropic"]);
        assert_eq!(config.providers.len(), 2);

        let typed = config.into_board_config().unwrap();
        assert_eq!(typed.members.len(), 2);
        assert_eq!(typed.members.priority_of("cfo"), 2);
        assert_eq!(typed.output_format, OutputFormat::Json);
        assert_eq!(typed.settings.max_concurrent_agents, 2);
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let mut config = FileConfig::default();
        config.board.max_concurrent_agents = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidConcurrency)
        );
    }

    #[test]
    fn test_rejects_unusable_cost_rate() {
        for cost in [-0.5, f64::NAN, f64::INFINITY] {
            let mut config = FileConfig::default();
            config.board.cost_per_token = cost;
            assert_eq!(config.validate(), Err(ConfigValidationError::InvalidCost));
        }

        let mut config = FileConfig::default();
        config.board.cost_per_token = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_duplicate_member() {
        let mut config = FileConfig::default();
        let duplicate = config.members[0].clone();
        config.members.push(duplicate);
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::DuplicateMember("chairman".to_string()))
        );
    }

    #[test]
    fn test_rejects_undeclared_fallback() {
        let mut config = FileConfig::default();
        config.members[1].fallback_providers.push("bedrock".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::UndeclaredProvider { ref provider, .. }) if provider == "bedrock"
        ));
    }

    #[test]
    fn test_rejects_unknown_provider_kind() {
        let mut config = FileConfig::default();
        config
            .providers
            .insert("groq".to_string(), FileProviderConfig::default());
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidProvider { .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_temperature() {
        let mut config = FileConfig::default();
        config.members[2].temperature = 2.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTemperature { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_board() {
        let config = FileConfig {
            members: vec![],
            ..FileConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigValidationError::NoMembers));
    }
}
