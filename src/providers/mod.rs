pub mod errors;
pub mod huggingface;
pub mod openrouter;

pub use errors::ProviderError;
pub use huggingface::{GeneratedImage, HuggingFaceClient};
pub use openrouter::{ChatCall, OpenRouterClient};

/// Dig the human-readable message out of a provider error payload.
///
/// OpenRouter puts it in `error.message`, or JSON-encoded inside
/// `error.metadata.raw`; Hugging Face uses a bare `error` string or
/// `error.message`. Top-level `message` is a last resort.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    if let Some(message) = value["error"]["message"].as_str() {
        return Some(message.to_string());
    }
    if let Some(raw) = value["error"]["metadata"]["raw"].as_str()
        && let Ok(inner) = serde_json::from_str::<serde_json::Value>(raw)
        && let Some(message) = inner["message"].as_str()
    {
        return Some(message.to_string());
    }
    if let Some(error) = value["error"].as_str() {
        return Some(error.to_string());
    }
    if let Some(message) = value["message"].as_str() {
        return Some(message.to_string());
    }

    None
}

/// First `max_chars` characters of a non-empty body, for error messages that
/// quote raw provider output.
pub(crate) fn message_prefix(body: &str, max_chars: usize) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(max_chars).collect())
}
