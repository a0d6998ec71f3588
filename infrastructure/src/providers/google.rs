//! Google Gemini `generateContent` binding.

use super::http::{JsonEndpoint, malformed, nested_error, token_count};
use super::{DEFAULT_TEMPERATURE, require_api_key};
use async_trait::async_trait;
use raincloud_application::{CompletionProvider, ProviderError};
use raincloud_domain::{CompletionRequest, CompletionResponse, ProviderSettings, Role, TokenUsage};
use serde_json::{Value, json};
use std::time::Instant;
use tracing::debug;

pub struct GoogleProvider {
    id: String,
    settings: ProviderSettings,
    api_key: String,
    endpoint: JsonEndpoint,
}

impl GoogleProvider {
    pub fn new(id: impl Into<String>, settings: ProviderSettings) -> Result<Self, ProviderError> {
        let id = id.into();
        let api_key = require_api_key(&id, &settings)?;
        let endpoint = JsonEndpoint::new(&id, &settings, |body| nested_error(body, "status"))?;
        Ok(Self {
            id,
            settings,
            api_key,
            endpoint,
        })
    }
}

pub(crate) fn generate_url(endpoint: &str, model: &str) -> String {
    format!("{}/{}:generateContent", endpoint.trim_end_matches('/'), model)
}

pub(crate) fn build_body(settings: &ProviderSettings, request: &CompletionRequest) -> Value {
    let contents: Vec<Value> = request
        .conversation()
        .map(|m| {
            let role = match m.role {
                Role::Assistant => "model",
                _ => "user",
            };
            json!({ "role": role, "parts": [{ "text": m.content }] })
        })
        .collect();

    let mut body = json!({
        "contents": contents,
        "generationConfig": {
            "temperature": request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            "maxOutputTokens": request.max_tokens.unwrap_or(settings.max_tokens),
        }
    });
    if let Some(system) = request.system_text() {
        body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
    }
    body
}

pub(crate) fn parse_reply(
    provider: &str,
    fallback_model: &str,
    reply: &Value,
) -> Result<(String, String, TokenUsage), ProviderError> {
    let parts = reply["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| malformed(provider, "candidates[0].content.parts"))?;
    let content: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();

    let model = reply["modelVersion"]
        .as_str()
        .unwrap_or(fallback_model)
        .to_string();
    let meta = &reply["usageMetadata"];
    let mut usage = TokenUsage::new(
        token_count(&meta["promptTokenCount"]),
        token_count(&meta["candidatesTokenCount"]),
    );
    if let Some(total) = meta["totalTokenCount"].as_u64() {
        usage.total_tokens = total;
    }
    Ok((content, model, usage))
}

#[async_trait]
impl CompletionProvider for GoogleProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let start = Instant::now();
        let model = request.model.as_deref().unwrap_or(&self.settings.model);
        let url = generate_url(&self.settings.endpoint, model);
        let body = build_body(&self.settings, request);
        debug!("Gemini request: model={}", model);

        let headers = [("x-goog-api-key", self.api_key.clone())];
        let reply = self.endpoint.post(&url, &headers, &body).await?;
        let (content, model, usage) = parse_reply(&self.id, model, &reply)?;

        Ok(CompletionResponse {
            content,
            model,
            usage,
            provider: self.id.clone(),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}
