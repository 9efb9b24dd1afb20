//! The single parameterized pipeline behind every generation action.

use axum::http::StatusCode;
use regex::RegexBuilder;
use tracing::instrument;

use crate::{
    app_state::AppState,
    errors::ApiError,
    generation::{
        action::{ActionKind, IMAGE_MODEL, IMAGE_PROMPT_MODEL},
        dtos::{GenerateRequest, GenerationResult},
        prompts::{self, Language},
    },
    providers::{ChatCall, HuggingFaceClient, OpenRouterClient, ProviderError},
};

const ILLUSTRATION_PROMPT_TITLE: &str = "Referent - Illustration Prompt Generator";

const OPENROUTER_KEY_MISSING: &str =
    "OpenRouter API ключ не настроен. Обратитесь к администратору.";
const HUGGINGFACE_KEY_MISSING: &str =
    "Hugging Face API ключ (HUGGINGFACE_API_KEY) не настроен. Обратитесь к администратору.";
const INVALID_UPSTREAM_RESPONSE: &str = "Получен некорректный ответ от AI сервиса";

/// Run one generation action end to end: assemble the localized prompt, call
/// the provider(s), shape the result. No retries; the first failure is
/// terminal for the invocation.
#[instrument(skip(state, request), fields(action = action.as_str()))]
pub async fn generate(
    state: &AppState,
    action: ActionKind,
    request: &GenerateRequest,
) -> Result<GenerationResult, ApiError> {
    let language = Language::from_code(request.target_language.as_deref());

    match action {
        ActionKind::Summary => {
            let summary = complete(state, action, request, language).await?;
            Ok(GenerationResult::Summary { summary })
        }
        ActionKind::Theses => {
            let theses = complete(state, action, request, language).await?;
            Ok(GenerationResult::Theses { theses })
        }
        ActionKind::Post => {
            let post = complete(state, action, request, language).await?;
            Ok(GenerationResult::Post {
                post: ensure_source_link(post, request.url.as_deref()),
            })
        }
        ActionKind::Translation => {
            let translation = complete(state, action, request, language).await?;
            Ok(GenerationResult::Translation { translation })
        }
        ActionKind::Illustration => illustrate(state, request, language).await,
    }
}

/// One localized chat completion for a plain text action.
async fn complete(
    state: &AppState,
    action: ActionKind,
    request: &GenerateRequest,
    language: Language,
) -> Result<String, ApiError> {
    let client = text_client(state)?;
    let prompt = prompts::build_prompt(
        action,
        language,
        &request.content,
        request.title.as_deref(),
        request.url.as_deref(),
    );

    client
        .chat(&ChatCall {
            model: action.model(),
            system: prompt.system,
            user: &prompt.user,
            temperature: action.temperature(),
            title: action.request_title(),
        })
        .await
        .map_err(|e| provider_error(action.error_code(), e))
}

/// The illustration pipeline: theses from the article, an English image
/// description from the theses, an image from the description. Strictly
/// sequential since every step consumes the previous step's output.
async fn illustrate(
    state: &AppState,
    request: &GenerateRequest,
    language: Language,
) -> Result<GenerationResult, ApiError> {
    // Both credentials are required before any outbound call is attempted.
    let text_client = text_client(state)?;
    let image_client = image_client(state)?;

    let theses = {
        let action = ActionKind::Illustration;
        let prompt = prompts::build_prompt(
            action,
            language,
            &request.content,
            request.title.as_deref(),
            None,
        );
        text_client
            .chat(&ChatCall {
                model: action.model(),
                system: prompt.system,
                user: &prompt.user,
                temperature: action.temperature(),
                title: action.request_title(),
            })
            .await
            .map_err(|e| provider_error(action.error_code(), e))?
    };

    let image_prompt = {
        let set = prompts::illustration_prompt_set(language);
        let user = prompts::build_illustration_prompt(language, &theses);
        text_client
            .chat(&ChatCall {
                model: IMAGE_PROMPT_MODEL,
                system: set.system,
                user: &user,
                temperature: 0.7,
                title: ILLUSTRATION_PROMPT_TITLE,
            })
            .await
            .map_err(|e| provider_error("PROMPT_ERROR", e))?
    };

    let image = image_client
        .generate(IMAGE_MODEL, image_prompt.trim())
        .await
        .map_err(|e| provider_error("IMAGE_GENERATION_ERROR", e))?;

    Ok(GenerationResult::Illustration {
        illustration: image.to_data_url(),
    })
}

fn text_client(state: &AppState) -> Result<&OpenRouterClient, ApiError> {
    state.text_client.as_deref().ok_or_else(|| ApiError::ApiKeyMissing {
        message: OPENROUTER_KEY_MISSING.to_string(),
    })
}

fn image_client(state: &AppState) -> Result<&HuggingFaceClient, ApiError> {
    state.image_client.as_deref().ok_or_else(|| ApiError::ApiKeyMissing {
        message: HUGGINGFACE_KEY_MISSING.to_string(),
    })
}

/// Tag a provider failure with the per-action error code, mirroring the
/// upstream HTTP status where one exists.
fn provider_error(code: &'static str, err: ProviderError) -> ApiError {
    match err {
        ProviderError::Upstream { status, message } => ApiError::Upstream {
            code,
            status,
            message,
        },
        ProviderError::InvalidResponse(_) => ApiError::InvalidResponse {
            message: INVALID_UPSTREAM_RESPONSE.to_string(),
        },
        ProviderError::NotAnImage { message, .. } => ApiError::Upstream {
            code,
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        },
        ProviderError::Timeout | ProviderError::Network(_) => ApiError::Upstream {
            code,
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        },
    }
}

/// The model is instructed to cite the source; when it does not, append the
/// link ourselves. The presence check is a case-insensitive literal match,
/// so trivially modified URLs count as missing.
fn ensure_source_link(post: String, source_url: Option<&str>) -> String {
    let Some(url) = source_url.filter(|u| !u.is_empty()) else {
        return post;
    };
    let pattern = RegexBuilder::new(&regex::escape(url))
        .case_insensitive(true)
        .build()
        .expect("escaped literal is a valid pattern");
    if pattern.is_match(&post) {
        post
    } else {
        format!("{}\n\n🔗 Источник: {}", post.trim(), url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_link_appended_when_missing() {
        let post = ensure_source_link(
            "Great article, read it!".to_string(),
            Some("https://example.com/article"),
        );
        assert!(post.ends_with("🔗 Источник: https://example.com/article"));
    }

    #[test]
    fn test_source_link_not_duplicated() {
        let original = "Read more: HTTPS://EXAMPLE.COM/ARTICLE".to_string();
        let post = ensure_source_link(original.clone(), Some("https://example.com/article"));
        assert_eq!(post, original);
    }

    #[test]
    fn test_source_link_literal_match_only() {
        // A trailing slash on the cited link is a different literal, so the
        // canonical URL still gets appended.
        let post = ensure_source_link(
            "See https://example.com/article/".to_string(),
            Some("https://example.com/article?utm=1"),
        );
        assert!(post.contains("🔗 Источник: https://example.com/article?utm=1"));
    }

    #[test]
    fn test_no_url_no_append() {
        let post = ensure_source_link("Just a post".to_string(), None);
        assert_eq!(post, "Just a post");
    }

    #[test]
    fn test_provider_error_mirrors_upstream_status() {
        let err = provider_error(
            "SUMMARY_ERROR",
            ProviderError::Upstream {
                status: StatusCode::TOO_MANY_REQUESTS,
                message: "rate limited".to_string(),
            },
        );
        match err {
            ApiError::Upstream { code, status, .. } => {
                assert_eq!(code, "SUMMARY_ERROR");
                assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_response_keeps_its_code() {
        let err = provider_error(
            "THESES_ERROR",
            ProviderError::InvalidResponse("no choices".to_string()),
        );
        assert_eq!(err.code(), "INVALID_RESPONSE");
    }
}
