//! Board member entity

use serde::{Deserialize, Serialize};

/// A configured board member (Entity)
///
/// Each member answers in character, using its own system prompt and
/// sampling temperature, through its preferred provider or one of its
/// fallbacks. Lower `priority` values are reported first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMember {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub expertise: String,
    pub system_prompt: String,
    pub preferred_provider: String,
    #[serde(default)]
    pub fallback_providers: Vec<String>,
    pub temperature: f32,
    pub priority: u32,
}

impl BoardMember {
    /// Create a member with no fallbacks, temperature 0.7 and priority 99.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        role: impl Into<String>,
        preferred_provider: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: role.into(),
            expertise: String::new(),
            system_prompt: String::new(),
            preferred_provider: preferred_provider.into(),
            fallback_providers: Vec::new(),
            temperature: 0.7,
            priority: 99,
        }
    }

    pub fn with_expertise(mut self, expertise: impl Into<String>) -> Self {
        self.expertise = expertise.into();
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_fallbacks<I, S>(mut self, providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback_providers = providers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Provider ids in the order they should be tried: preferred first,
    /// then the fallbacks as listed.
    pub fn provider_chain(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.preferred_provider.as_str())
            .chain(self.fallback_providers.iter().map(String::as_str))
    }
}

impl std::fmt::Display for BoardMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.role)
    }
}
