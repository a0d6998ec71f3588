//! Hugging Face Inference API binding.
//!
//! The inference endpoint takes a single prompt string, so turns are
//! rendered with chat markers and token usage is estimated from length.

use super::http::{JsonEndpoint, malformed};
use super::{DEFAULT_TEMPERATURE, require_api_key};
use async_trait::async_trait;
use raincloud_application::{CompletionProvider, ProviderError};
use raincloud_domain::{CompletionRequest, CompletionResponse, Message, ProviderSettings, Role, TokenUsage};
use serde_json::{Value, json};
use std::time::Instant;
use tracing::debug;

const TOP_P: f64 = 0.95;

pub struct HuggingFaceProvider {
    id: String,
    settings: ProviderSettings,
    api_key: String,
    endpoint: JsonEndpoint,
}

impl HuggingFaceProvider {
    pub fn new(id: impl Into<String>, settings: ProviderSettings) -> Result<Self, ProviderError> {
        let id = id.into();
        let api_key = require_api_key(&id, &settings)?;
        let endpoint = JsonEndpoint::new(&id, &settings, |body| {
            (
                body["error"].as_str().map(str::to_string),
                body["error_type"].as_str().map(str::to_string),
            )
        })?;
        Ok(Self {
            id,
            settings,
            api_key,
            endpoint,
        })
    }
}

/// Model URL: a trailing `/` marks the endpoint as a prefix for the model id.
pub(crate) fn model_url(endpoint: &str, model: &str) -> String {
    if endpoint.ends_with('/') {
        format!("{}{}", endpoint, model)
    } else {
        endpoint.to_string()
    }
}

pub(crate) fn render_prompt(messages: &[Message]) -> String {
    let mut prompt = String::new();
    for message in messages {
        let marker = match message.role {
            Role::System => "<|system|>",
            Role::User => "<|user|>",
            Role::Assistant => "<|assistant|>",
        };
        prompt.push_str(marker);
        prompt.push('\n');
        prompt.push_str(&message.content);
        prompt.push_str("\n\n");
    }
    prompt.push_str("<|assistant|>\n");
    prompt
}

pub(crate) fn build_body(settings: &ProviderSettings, request: &CompletionRequest) -> Value {
    json!({
        "inputs": render_prompt(&request.messages),
        "parameters": {
            "max_new_tokens": request.max_tokens.unwrap_or(settings.max_tokens),
            "temperature": request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            "top_p": TOP_P,
            "return_full_text": false,
        }
    })
}

/// Rough token estimate: one token per four characters, rounded up.
pub(crate) fn estimate_tokens(chars: usize) -> u64 {
    chars.div_ceil(4) as u64
}

/// Generated text from either the list or the single-object reply shape.
pub(crate) fn parse_reply(provider: &str, prompt: &str, reply: &Value) -> Result<(String, TokenUsage), ProviderError> {
    let generated = match reply {
        Value::Array(items) => items.first().and_then(|item| item["generated_text"].as_str()),
        other => other["generated_text"].as_str(),
    }
    .ok_or_else(|| malformed(provider, "generated_text"))?;

    let prompt_chars = prompt.chars().count();
    let generated_chars = generated.chars().count();
    let usage = TokenUsage {
        prompt_tokens: estimate_tokens(prompt_chars),
        completion_tokens: estimate_tokens(generated_chars),
        total_tokens: estimate_tokens(prompt_chars + generated_chars),
    };
    Ok((generated.trim().to_string(), usage))
}

#[async_trait]
impl CompletionProvider for HuggingFaceProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let start = Instant::now();
        let model = request.model.as_deref().unwrap_or(&self.settings.model);
        let url = model_url(&self.settings.endpoint, model);
        let body = build_body(&self.settings, request);
        debug!("Hugging Face request: {}", url);

        let headers = [("authorization", format!("Bearer {}", self.api_key))];
        let reply = self.endpoint.post(&url, &headers, &body).await?;
        let prompt = body["inputs"].as_str().unwrap_or_default();
        let (content, usage) = parse_reply(&self.id, prompt, &reply)?;

        Ok(CompletionResponse {
            content,
            model: model.to_string(),
            usage,
            provider: self.id.clone(),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raincloud_domain::ProviderKind;

    #[test]
    fn test_render_prompt() {
        let prompt = render_prompt(&[Message::system("Be brief."), Message::user("Hi")]);
        assert_eq!(prompt, "<|system|>\nBe brief.\n\n<|user|>\nHi\n\n<|assistant|>\n");
    }

    #[test]
    fn test_model_url() {
        assert_eq!(
            model_url("https://api-inference.huggingface.co/models/", "meta-llama/Llama-3.3-70B-Instruct"),
            "https://api-inference.huggingface.co/models/meta-llama/Llama-3.3-70B-Instruct"
        );
        assert_eq!(model_url("http://localhost:8080/generate", "x"), "http://localhost:8080/generate");
    }

    #[test]
    fn test_body_parameters() {
        let settings = ProviderSettings::for_kind(ProviderKind::HuggingFace);
        let body = build_body(&settings, &CompletionRequest::with_system_prompt("s", "u"));
        assert_eq!(body["parameters"]["max_new_tokens"], 1024);
        assert_eq!(body["parameters"]["top_p"], 0.95);
        assert_eq!(body["parameters"]["return_full_text"], false);
    }

    #[test]
    fn test_parse_both_reply_shapes() {
        let (content, usage) =
            parse_reply("huggingface", "abcdefgh", &json!([{"generated_text": "  Yes.  "}])).unwrap();
        assert_eq!(content, "Yes.");
        // Estimates count the untrimmed text
        assert_eq!(usage.prompt_tokens, 2);
        assert_eq!(usage.completion_tokens, 2);
        assert_eq!(usage.total_tokens, 4);

        let (content, _) =
            parse_reply("huggingface", "", &json!({"generated_text": "No"})).unwrap();
        assert_eq!(content, "No");

        assert!(parse_reply("huggingface", "", &json!([])).is_err());
    }
}
