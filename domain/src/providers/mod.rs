//! Provider configuration types (provider-neutral, serde-free).
//!
//! These types define the shape of provider settings without depending
//! on any serialization format (TOML, JSON, etc.).

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Backend vendor a provider binding talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Anthropic,
    OpenAi,
    HuggingFace,
    Google,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::OpenAi => "openai",
            ProviderKind::HuggingFace => "huggingface",
            ProviderKind::Google => "google",
        }
    }

    /// Environment variable conventionally holding this vendor's API key.
    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::HuggingFace => "HUGGINGFACE_API_KEY",
            ProviderKind::Google => "GOOGLE_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "claude-sonnet-4-5-20250929",
            ProviderKind::OpenAi => "gpt-4o",
            ProviderKind::HuggingFace => "meta-llama/Llama-3.3-70B-Instruct",
            ProviderKind::Google => "gemini-2.0-flash-exp",
        }
    }

    /// Default endpoint. For Hugging Face this is a prefix the model id is
    /// appended to; for Google the `:generateContent` path is appended.
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "https://api.anthropic.com/v1/messages",
            ProviderKind::OpenAi => "https://api.openai.com/v1/chat/completions",
            ProviderKind::HuggingFace => "https://api-inference.huggingface.co/models/",
            ProviderKind::Google => "https://generativelanguage.googleapis.com/v1beta/models",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            "openai" => Ok(ProviderKind::OpenAi),
            "huggingface" | "hf" => Ok(ProviderKind::HuggingFace),
            "google" | "gemini" => Ok(ProviderKind::Google),
            _ => Err(format!("Unknown provider kind: {}", s)),
        }
    }
}

/// Connection settings for one provider binding.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    /// Resolved credential; bindings without one are not constructed.
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    /// Transport-level deadline for one HTTP exchange
    pub timeout: Duration,
    /// Retries for connection failures before any response was received
    pub max_retries: u32,
    /// Default output-token cap when a request carries none
    pub max_tokens: u32,
}

impl ProviderSettings {
    /// Vendor defaults with no credential.
    pub fn for_kind(kind: ProviderKind) -> Self {
        Self {
            kind,
            api_key: None,
            model: kind.default_model().to_string(),
            endpoint: kind.default_endpoint().to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 0,
            max_tokens: match kind {
                ProviderKind::HuggingFace => 1024,
                _ => 4096,
            },
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Whether a non-empty credential is available.
    pub fn has_credentials(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Provider id → settings, ordered by id.
pub type ProvidersConfig = BTreeMap<String, ProviderSettings>;
