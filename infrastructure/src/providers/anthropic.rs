//! Anthropic Messages API binding.

use super::http::{JsonEndpoint, malformed, nested_error, token_count};
use super::{DEFAULT_TEMPERATURE, require_api_key};
use async_trait::async_trait;
use raincloud_application::{CompletionProvider, ProviderError};
use raincloud_domain::{CompletionRequest, CompletionResponse, ProviderSettings, TokenUsage};
use serde_json::{Value, json};
use std::time::Instant;
use tracing::debug;

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    id: String,
    settings: ProviderSettings,
    api_key: String,
    endpoint: JsonEndpoint,
}

impl AnthropicProvider {
    pub fn new(id: impl Into<String>, settings: ProviderSettings) -> Result<Self, ProviderError> {
        let id = id.into();
        let api_key = require_api_key(&id, &settings)?;
        let endpoint = JsonEndpoint::new(&id, &settings, |body| nested_error(body, "type"))?;
        Ok(Self {
            id,
            settings,
            api_key,
            endpoint,
        })
    }
}

/// Request body; system turns move to the top-level `system` field.
pub(crate) fn build_body(settings: &ProviderSettings, request: &CompletionRequest) -> Value {
    let messages: Vec<Value> = request
        .conversation()
        .map(|m| json!({ "role": m.role, "content": m.content }))
        .collect();

    let mut body = json!({
        "model": request.model.as_deref().unwrap_or(&settings.model),
        "max_tokens": request.max_tokens.unwrap_or(settings.max_tokens),
        "temperature": request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        "messages": messages,
    });
    if let Some(system) = request.system_text() {
        body["system"] = Value::String(system);
    }
    body
}

/// Text blocks, resolved model and usage from a Messages API reply.
pub(crate) fn parse_reply(
    provider: &str,
    fallback_model: &str,
    reply: &Value,
) -> Result<(String, String, TokenUsage), ProviderError> {
    let blocks = reply["content"]
        .as_array()
        .ok_or_else(|| malformed(provider, "content"))?;

    let content: String = blocks
        .iter()
        .filter(|b| b["type"].as_str().unwrap_or("text") == "text")
        .filter_map(|b| b["text"].as_str())
        .collect();

    let model = reply["model"].as_str().unwrap_or(fallback_model).to_string();
    let usage = TokenUsage::new(
        token_count(&reply["usage"]["input_tokens"]),
        token_count(&reply["usage"]["output_tokens"]),
    );
    Ok((content, model, usage))
}

#[async_trait]
impl CompletionProvider for AnthropicProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let start = Instant::now();
        let body = build_body(&self.settings, request);
        debug!("Anthropic request: model={}", body["model"]);

        let headers = [
            ("x-api-key", self.api_key.clone()),
            ("anthropic-version", ANTHROPIC_VERSION.to_string()),
        ];
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

#[cfg(test)]
mod tests {
    use super::*;
    use raincloud_domain::{Message, ProviderKind};

    fn settings() -> ProviderSettings {
        ProviderSettings::for_kind(ProviderKind::Anthropic).with_api_key("sk-ant-test")
    }

    #[test]
    fn test_body_moves_system_prompt() {
        let request = CompletionRequest::with_system_prompt("You are the CTO.", "Scale plan?")
            .with_temperature(0.4);
        let body = build_body(&settings(), &request);

        assert_eq!(body["system"], "You are the CTO.");
        assert_eq!(body["temperature"], json!(0.4f32));
        assert_eq!(body["max_tokens"], 4096);
        assert_eq!(body["model"], "claude-sonnet-4-5-20250929");
        assert_eq!(
            body["messages"],
            json!([{ "role": "user", "content": "Scale plan?" }])
        );
    }

    #[test]
    fn test_body_without_system_and_with_overrides() {
        let request = CompletionRequest::new(vec![
            Message::user("hi"),
            Message::assistant("hello"),
            Message::user("again"),
        ])
        .with_max_tokens(10)
        .with_model("claude-haiku");
        let body = build_body(&settings(), &request);

        assert!(body.get("system").is_none());
        assert_eq!(body["max_tokens"], 10);
        assert_eq!(body["model"], "claude-haiku");
        assert_eq!(body["temperature"], json!(0.7f32));
        assert_eq!(body["messages"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_parse_reply() {
        let reply = json!({
            "id": "msg_1",
            "type": "message",
            "model": "claude-sonnet-4-5-20250929",
            "content": [
                {"type": "text", "text": "Grow "},
                {"type": "text", "text": "carefully."}
            ],
            "usage": {"input_tokens": 12, "output_tokens": 30}
        });
        let (content, model, usage) = parse_reply("anthropic", "fallback", &reply).unwrap();
        assert_eq!(content, "Grow carefully.");
        assert_eq!(model, "claude-sonnet-4-5-20250929");
        assert_eq!(usage.total_tokens, 42);
    }

    #[test]
    fn test_parse_reply_without_content() {
        let err = parse_reply("anthropic", "m", &json!({"usage": {}})).unwrap_err();
        assert_eq!(err.message, "malformed response: missing content");
        assert!(err.status.is_none());
    }

    #[test]
    fn test_new_requires_key() {
        let settings = ProviderSettings::for_kind(ProviderKind::Anthropic);
        assert!(AnthropicProvider::new("anthropic", settings).is_err());
        assert_eq!(
            AnthropicProvider::new("claude", self::settings()).unwrap().id(),
            "claude"
        );
    }
}
