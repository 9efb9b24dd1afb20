use crate::providers::{errors::ProviderError, extract_error_message, message_prefix};
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::instrument;

/// Bounded wait for a single completion. Free-tier models can be slow but
/// must not hang a request forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Chat-completions client for the text-generation provider.
pub struct OpenRouterClient {
    client: Client,
    api_key: String,
    base_url: String,
    referer: String,
}

/// One chat-completion round trip.
#[derive(Debug)]
pub struct ChatCall<'a> {
    pub model: &'a str,
    pub system: &'a str,
    pub user: &'a str,
    pub temperature: f32,
    /// Human-readable request tag, sent as the `X-Title` header.
    pub title: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}

impl OpenRouterClient {
    pub fn new(api_key: String, base_url: String, referer: String) -> Self {
        Self {
            client: ClientBuilder::new()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build OpenRouter client"),
            api_key,
            base_url,
            referer,
        }
    }

    /// Run one chat completion and return the assistant message text.
    #[instrument(skip_all, fields(model = call.model, title = call.title))]
    pub async fn chat(&self, call: &ChatCall<'_>) -> Result<String, ProviderError> {
        let payload = ChatCompletionRequest {
            model: call.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: call.system,
                },
                ChatMessage {
                    role: "user",
                    content: call.user,
                },
            ],
            temperature: call.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", call.title)
            .json(&payload)
            .send()
            .await
            .map_err(ProviderError::from_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream {
                status,
                message: classify_failure(status, &body),
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::InvalidResponse("no choices in completion".to_string()))
    }
}

/// Auth and rate-limit statuses get fixed texts; anything else digs through
/// the provider's error payload, quoting raw output as a last resort.
fn classify_failure(status: StatusCode, body: &str) -> String {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return "Ошибка авторизации. Проверьте настройки API ключа.".to_string();
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return "Превышен лимит запросов. Попробуйте позже.".to_string();
    }
    extract_error_message(body)
        .or_else(|| message_prefix(body, 200).map(|prefix| format!("Ошибка API: {prefix}")))
        .unwrap_or_else(|| format!("Generation failed: {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_auth_failure() {
        let message = classify_failure(StatusCode::UNAUTHORIZED, r#"{"error":"ignored"}"#);
        assert!(message.contains("авторизации"));
    }

    #[test]
    fn test_classify_rate_limit() {
        let message = classify_failure(StatusCode::TOO_MANY_REQUESTS, "");
        assert!(message.contains("лимит"));
    }

    #[test]
    fn test_classify_uses_payload_message() {
        let message = classify_failure(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"message":"temperature out of range"}}"#,
        );
        assert_eq!(message, "temperature out of range");
    }

    #[test]
    fn test_classify_quotes_raw_body() {
        let message = classify_failure(StatusCode::BAD_GATEWAY, "upstream exploded");
        assert_eq!(message, "Ошибка API: upstream exploded");
    }

    #[test]
    fn test_classify_falls_back_to_status() {
        let message = classify_failure(StatusCode::BAD_GATEWAY, "");
        assert!(message.contains("502"));
    }
}
