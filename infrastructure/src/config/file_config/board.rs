//! Board configuration from TOML (`[board]` section)

use raincloud_application::{BoardSettings, DEFAULT_DIRECT_PROVIDER};
use raincloud_domain::{DEFAULT_ALWAYS_INCLUDE_ROLE, DEFAULT_COST_PER_TOKEN};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBoardConfig {
    /// Batch size for member calls (default: 3)
    pub max_concurrent_agents: usize,
    /// Deadline for each health check and completion call (default: 60)
    pub call_timeout_seconds: u64,
    /// Flat rate for the estimated cost (default: 0.000001)
    pub cost_per_token: f64,
    /// Provider for direct responses (default: "anthropic")
    pub default_provider: String,
    /// Role always consulted first in relevant mode; empty disables it
    pub always_include_role: String,
}

impl Default for FileBoardConfig {
    fn default() -> Self {
        Self {
            max_concurrent_agents: 3,
            call_timeout_seconds: 60,
            cost_per_token: DEFAULT_COST_PER_TOKEN,
            default_provider: DEFAULT_DIRECT_PROVIDER.to_string(),
            always_include_role: DEFAULT_ALWAYS_INCLUDE_ROLE.to_string(),
        }
    }
}

impl FileBoardConfig {
    pub fn to_settings(&self) -> BoardSettings {
        let role = self.always_include_role.trim();
        BoardSettings::default()
            .with_max_concurrent_agents(self.max_concurrent_agents)
            .with_call_timeout(Duration::from_secs(self.call_timeout_seconds))
            .with_cost_per_token(self.cost_per_token)
            .with_default_provider(&self.default_provider)
            .with_always_include_role((!role.is_empty()).then(|| role.to_string()))
    }
}
