//! Provider configuration from TOML (`[providers.<id>]` tables)

use raincloud_domain::{ProviderKind, ProviderSettings};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// One provider binding. Unset fields take the vendor defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Vendor kind; defaults to the table key (e.g. `[providers.openai]`)
    pub kind: Option<String>,
    /// Environment variable holding the API key (default: vendor convention)
    pub api_key_env: Option<String>,
    /// Direct API key (not recommended, use the env var instead)
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    /// HTTP deadline for one exchange (default: 60)
    pub timeout_seconds: u64,
    /// Retries for connection failures (default: 0)
    pub max_retries: u32,
    pub max_tokens: Option<u32>,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            kind: None,
            api_key_env: None,
            api_key: None,
            model: None,
            endpoint: None,
            timeout_seconds: 60,
            max_retries: 0,
            max_tokens: None,
        }
    }
}

impl FileProviderConfig {
    fn for_kind(kind: ProviderKind) -> Self {
        Self {
            kind: Some(kind.as_str().to_string()),
            ..Self::default()
        }
    }

    /// Vendor kind declared for the table `id`.
    pub fn resolve_kind(&self, id: &str) -> Result<ProviderKind, String> {
        self.kind.as_deref().unwrap_or(id).parse()
    }

    /// Variable the API key is read from.
    pub fn key_env(&self, kind: ProviderKind) -> String {
        self.api_key_env
            .clone()
            .unwrap_or_else(|| kind.default_api_key_env().to_string())
    }

    /// Typed settings, reading the key through `lookup` when none is inline.
    pub fn to_settings_with(
        &self,
        id: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<ProviderSettings, String> {
        let kind = self.resolve_kind(id)?;
        let mut settings = ProviderSettings::for_kind(kind)
            .with_timeout(Duration::from_secs(self.timeout_seconds))
            .with_max_retries(self.max_retries);

        if let Some(model) = &self.model {
            settings = settings.with_model(model);
        }
        if let Some(endpoint) = &self.endpoint {
            settings = settings.with_endpoint(endpoint);
        }
        if let Some(max_tokens) = self.max_tokens {
            settings.max_tokens = max_tokens;
        }

        let key = self
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| lookup(&self.key_env(kind)));
        if let Some(key) = key {
            settings = settings.with_api_key(key);
        }
        Ok(settings)
    }

    /// Typed settings, reading the key from the process environment.
    pub fn to_settings(&self, id: &str) -> Result<ProviderSettings, String> {
        self.to_settings_with(id, |var| std::env::var(var).ok())
    }
}

/// The four built-in provider entries, keyed by vendor name.
pub fn default_providers() -> BTreeMap<String, FileProviderConfig> {
    [
        ProviderKind::Anthropic,
        ProviderKind::OpenAi,
        ProviderKind::HuggingFace,
        ProviderKind::Google,
    ]
    .into_iter()
    .map(|kind| (kind.as_str().to_string(), FileProviderConfig::for_kind(kind)))
    .collect()
}
