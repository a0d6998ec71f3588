//! Board settings - dispatch and reporting parameters.
//!
//! [`BoardSettings`] groups the static parameters that control how a
//! discussion is dispatched and totalled. These are application-layer
//! concerns, validated once when configuration is loaded.

use raincloud_domain::{DEFAULT_ALWAYS_INCLUDE_ROLE, DEFAULT_COST_PER_TOKEN, SelectionPolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Provider used by direct responses when the caller names none.
pub const DEFAULT_DIRECT_PROVIDER: &str = "anthropic";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSettings {
    /// Batch size: the most member calls outstanding at once.
    /// Also caps relevant-mode candidates.
    pub max_concurrent_agents: usize,
    /// Deadline for each health probe and each completion call.
    pub call_timeout: Duration,
    /// Flat rate used for the estimated discussion cost.
    pub cost_per_token: f64,
    /// Provider for direct responses when none is named.
    pub default_provider: String,
    /// Role always consulted first in relevant mode.
    pub always_include_role: Option<String>,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            max_concurrent_agents: 3,
            call_timeout: Duration::from_secs(60),
            cost_per_token: DEFAULT_COST_PER_TOKEN,
            default_provider: DEFAULT_DIRECT_PROVIDER.to_string(),
            always_include_role: Some(DEFAULT_ALWAYS_INCLUDE_ROLE.to_string()),
        }
    }
}

impl BoardSettings {
    // ==================== Builder Methods ====================

    /// Set the batch size (clamped to at least 1).
    pub fn with_max_concurrent_agents(mut self, max: usize) -> Self {
        self.max_concurrent_agents = max.max(1);
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_cost_per_token(mut self, rate: f64) -> Self {
        self.cost_per_token = rate;
        self
    }

    pub fn with_default_provider(mut self, provider: impl Into<String>) -> Self {
        self.default_provider = provider.into();
        self
    }

    pub fn with_always_include_role(mut self, role: Option<String>) -> Self {
        self.always_include_role = role;
        self
    }

    /// Selector inputs derived from these settings, with the default keyword table.
    pub fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy::new(self.max_concurrent_agents)
            .with_always_include_role(self.always_include_role.clone())
    }
}
