//! OpenAI Chat Completions binding.

use super::http::{JsonEndpoint, malformed, nested_error, token_count};
use super::{DEFAULT_TEMPERATURE, require_api_key};
use async_trait::async_trait;
use raincloud_application::{CompletionProvider, ProviderError};
use raincloud_domain::{CompletionRequest, CompletionResponse, ProviderSettings, TokenUsage};
use serde_json::{Value, json};
use std::time::Instant;
use tracing::debug;

pub struct OpenAiProvider {
    id: String,
    settings: ProviderSettings,
    api_key: String,
    endpoint: JsonEndpoint,
}

impl OpenAiProvider {
    pub fn new(id: impl Into<String>, settings: ProviderSettings) -> Result<Self, ProviderError> {
        let id = id.into();
        let api_key = require_api_key(&id, &settings)?;
        let endpoint = JsonEndpoint::new(&id, &settings, |body| nested_error(body, "code"))?;
        Ok(Self {
            id,
            settings,
            api_key,
            endpoint,
        })
    }
}

pub(crate) fn build_body(settings: &ProviderSettings, request: &CompletionRequest) -> Value {
    json!({
        "model": request.model.as_deref().unwrap_or(&settings.model),
        "messages": request.messages,
        "temperature": request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        "max_tokens": request.max_tokens.unwrap_or(settings.max_tokens),
    })
}

pub(crate) fn parse_reply(
    provider: &str,
    fallback_model: &str,
    reply: &Value,
) -> Result<(String, String, TokenUsage), ProviderError> {
    let content = reply["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| malformed(provider, "choices[0].message.content"))?
        .to_string();

    let model = reply["model"].as_str().unwrap_or(fallback_model).to_string();
    let usage = &reply["usage"];
    let mut tokens = TokenUsage::new(
        token_count(&usage["prompt_tokens"]),
        token_count(&usage["completion_tokens"]),
    );
    if let Some(total) = usage["total_tokens"].as_u64() {
        tokens.total_tokens = total;
    }
    Ok((content, model, tokens))
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let start = Instant::now();
        let body = build_body(&self.settings, request);
        debug!("OpenAI request: model={}", body["model"]);

        let headers = [("authorization", format!("Bearer {}", self.api_key))];
        let reply = self.endpoint.post(&self.settings.endpoint, &headers, &body).await?;
        let (content, model, usage) = parse_reply(&self.id, &self.settings.model, &reply)?;

        Ok(CompletionResponse {
            content,
            model,
            usage,
            provider: self.id.clone(),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}
