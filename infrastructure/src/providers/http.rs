//! Shared JSON-over-HTTPS transport for the vendor bindings.

use raincloud_application::ProviderError;
use raincloud_domain::ProviderSettings;
use reqwest::Client;
use serde_json::Value;
use std::fmt::Display;
use std::time::Duration;
use tracing::{debug, warn};

/// Wait before the first connection retry; doubles on each further attempt.
pub(crate) const DEFAULT_BASE_BACKOFF: Duration = Duration::from_secs(1);

/// Extracts `(message, code)` from a vendor error body.
pub(crate) type ErrorExtractor = fn(&Value) -> (Option<String>, Option<String>);

/// A configured client for one provider binding.
pub(crate) struct JsonEndpoint {
    client: Client,
    provider: String,
    max_retries: u32,
    base_backoff: Duration,
    extract_error: ErrorExtractor,
}

impl JsonEndpoint {
    pub(crate) fn new(
        provider: &str,
        settings: &ProviderSettings,
        extract_error: ErrorExtractor,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ProviderError::new(provider, format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            provider: provider.to_string(),
            max_retries: settings.max_retries,
            base_backoff: DEFAULT_BASE_BACKOFF,
            extract_error,
        })
    }

    /// POST `body` and return the decoded JSON reply.
    ///
    /// Only connection failures are retried; once a response has been
    /// received its status decides the outcome.
    pub(crate) async fn post(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        body: &Value,
    ) -> Result<Value, ProviderError> {
        let response = retry_connect(
            &self.provider,
            self.max_retries,
            self.base_backoff,
            reqwest::Error::is_connect,
            || {
                let mut builder = self.client.post(url).json(body);
                for (name, value) in headers {
                    builder = builder.header(*name, value);
                }
                builder.send()
            },
        )
        .await
        .map_err(|e| ProviderError::new(&self.provider, format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            debug!("{} returned {}: {}", self.provider, status, text);
            return Err(self.status_error(status.as_u16(), status.canonical_reason(), &text));
        }

        response.json::<Value>().await.map_err(|e| {
            ProviderError::new(&self.provider, format!("invalid response body: {}", e))
        })
    }

    fn status_error(&self, status: u16, reason: Option<&str>, text: &str) -> ProviderError {
        let (message, code) = serde_json::from_str::<Value>(text)
            .map(|body| (self.extract_error)(&body))
            .unwrap_or((None, None));

        let message = message.unwrap_or_else(|| match reason {
            Some(reason) => format!("HTTP {} {}", status, reason),
            None => format!("HTTP {}", status),
        });

        ProviderError::new(&self.provider, message)
            .with_code(code)
            .with_status(status)
    }
}

/// Run `send` until it succeeds, retrying errors `is_connect` accepts at
/// most `max_retries` times with exponential backoff.
pub(crate) async fn retry_connect<T, E, F, Fut>(
    provider: &str,
    max_retries: u32,
    base_backoff: Duration,
    is_connect: impl Fn(&E) -> bool,
    mut send: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 0;
    let mut backoff = base_backoff;
    loop {
        match send().await {
            Ok(value) => return Ok(value),
            Err(e) if is_connect(&e) && attempt < max_retries => {
                attempt += 1;
                warn!(
                    "{}: connection failed ({}), retry {}/{} in {:?}",
                    provider, e, attempt, max_retries, backoff
                );
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
            Err(e) => return Err(e),
        }
    }
}

/// `error.message` plus the string at `error.<code_field>`.
pub(crate) fn nested_error(body: &Value, code_field: &str) -> (Option<String>, Option<String>) {
    let error = &body["error"];
    (
        error["message"].as_str().map(str::to_string),
        error[code_field].as_str().map(str::to_string),
    )
}

/// Missing-field error for a reply that decoded but lacks `what`.
pub(crate) fn malformed(provider: &str, what: &str) -> ProviderError {
    ProviderError::new(provider, format!("malformed response: missing {}", what))
}

pub(crate) fn token_count(value: &Value) -> u64 {
    value.as_u64().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use raincloud_domain::ProviderKind;
    use serde_json::json;
    use std::cell::Cell;
    use tokio::time::Instant;

    fn endpoint(extract: ErrorExtractor) -> JsonEndpoint {
        JsonEndpoint::new(
            "anthropic",
            &ProviderSettings::for_kind(ProviderKind::Anthropic),
            extract,
        )
        .unwrap()
    }

    #[test]
    fn test_status_error_uses_vendor_message() {
        let ep = endpoint(|b| nested_error(b, "type"));
        let body = json!({
            "type": "error",
            "error": {"type": "overloaded_error", "message": "Overloaded"}
        })
        .to_string();

        let err = ep.status_error(529, None, &body);
        assert_eq!(err.message, "Overloaded");
        assert_eq!(err.code.as_deref(), Some("overloaded_error"));
        assert_eq!(err.status, Some(529));
        assert_eq!(err.provider, "anthropic");
    }

    #[test]
    fn test_status_error_without_json_body() {
        let ep = endpoint(|b| nested_error(b, "type"));
        let err = ep.status_error(502, Some("Bad Gateway"), "<html>upstream</html>");
        assert_eq!(err.message, "HTTP 502 Bad Gateway");
        assert!(err.code.is_none());
        assert_eq!(err.status, Some(502));
    }

    #[test]
    fn test_nested_error_missing_fields() {
        let (message, code) = nested_error(&json!({"detail": "nope"}), "code");
        assert!(message.is_none());
        assert!(code.is_none());
    }

    fn refused(e: &String) -> bool {
        e == "refused"
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_backs_off_exponentially() {
        let attempts = Cell::new(0);
        let started = Instant::now();

        let result: Result<(), String> = retry_connect(
            "openai",
            3,
            Duration::from_millis(100),
            refused,
            || {
                attempts.set(attempts.get() + 1);
                async { Err("refused".to_string()) }
            },
        )
        .await;

        assert_eq!(result.unwrap_err(), "refused");
        assert_eq!(attempts.get(), 4);
        // 100 + 200 + 400
        assert!(started.elapsed() >= Duration::from_millis(700));
        assert!(started.elapsed() < Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_stops_at_first_success() {
        let attempts = Cell::new(0);
        let started = Instant::now();

        let result = retry_connect("openai", 5, Duration::from_millis(100), refused, || {
            attempts.set(attempts.get() + 1);
            let n = attempts.get();
            async move {
                if n < 3 {
                    Err("refused".to_string())
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert!(started.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_errors_are_not_retried() {
        let attempts = Cell::new(0);
        let started = Instant::now();

        let result: Result<(), String> =
            retry_connect("openai", 5, Duration::from_millis(100), refused, || {
                attempts.set(attempts.get() + 1);
                async { Err("bad certificate".to_string()) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(attempts.get(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_endpoint_uses_default_backoff() {
        let ep = endpoint(|b| nested_error(b, "type"));
        assert_eq!(ep.base_backoff, DEFAULT_BASE_BACKOFF);
        assert_eq!(ep.max_retries, 0);
    }
}
