use crate::providers::{errors::ProviderError, extract_error_message, message_prefix};
use base64::Engine as _;
use bytes::Bytes;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::instrument;

/// Image generation can take a while on cold models; bounded all the same.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Inference client for the image-generation provider.
pub struct HuggingFaceClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// A successfully generated image: raw bytes plus the declared content type.
#[derive(Debug)]
pub struct GeneratedImage {
    pub content_type: String,
    pub bytes: Bytes,
}

impl GeneratedImage {
    /// Wrap the raw bytes as a self-contained `data:` URL usable directly as
    /// an image source.
    pub fn to_data_url(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{}", self.content_type, encoded)
    }
}

#[derive(Serialize)]
struct ImageRequest<'a> {
    inputs: &'a str,
}

impl HuggingFaceClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: ClientBuilder::new()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build Hugging Face client"),
            api_key,
            base_url,
        }
    }

    /// Generate one image from an English description prompt.
    #[instrument(skip_all, fields(model = model_id))]
    pub async fn generate(
        &self,
        model_id: &str,
        prompt: &str,
    ) -> Result<GeneratedImage, ProviderError> {
        let response = self
            .client
            .post(format!("{}/models/{}", self.base_url, model_id))
            .bearer_auth(&self.api_key)
            .json(&ImageRequest { inputs: prompt })
            .send()
            .await
            .map_err(ProviderError::from_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream {
                status,
                message: classify_failure(status, model_id, &body),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("image/png")
            .to_string();

        // A success status with a non-image body is an error in disguise:
        // surface whatever the payload says instead of returning garbage.
        if !content_type.starts_with("image/") {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body)
                .or_else(|| message_prefix(&body, 200))
                .unwrap_or_else(|| "Сервис вернул некорректный ответ.".to_string());
            return Err(ProviderError::NotAnImage {
                content_type,
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(GeneratedImage {
            content_type,
            bytes,
        })
    }
}

fn classify_failure(status: StatusCode, model_id: &str, body: &str) -> String {
    if status == StatusCode::SERVICE_UNAVAILABLE {
        return "Модель загружается. Подождите несколько секунд и попробуйте снова.".to_string();
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return "Ошибка авторизации Hugging Face. Проверьте настройки API ключа.".to_string();
    }
    if status == StatusCode::NOT_FOUND {
        return format!("Модель {model_id} не найдена. Возможно, модель недоступна через Inference API.");
    }
    extract_error_message(body)
        .or_else(|| message_prefix(body, 200).map(|prefix| format!("Ошибка API: {prefix}")))
        .unwrap_or_else(|| "Произошла ошибка при генерации изображения".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_round_trip() {
        let image = GeneratedImage {
            content_type: "image/png".to_string(),
            bytes: Bytes::from_static(&[0x89, 0x50, 0x4E, 0x47]),
        };
        assert_eq!(image.to_data_url(), "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_classify_model_loading() {
        let message = classify_failure(StatusCode::SERVICE_UNAVAILABLE, "some/model", "");
        assert!(message.contains("загружается"));
    }

    #[test]
    fn test_classify_missing_model_names_it() {
        let message = classify_failure(StatusCode::NOT_FOUND, "some/model", "");
        assert!(message.contains("some/model"));
    }

    #[test]
    fn test_classify_auth() {
        let message = classify_failure(StatusCode::FORBIDDEN, "some/model", "");
        assert!(message.contains("Hugging Face"));
    }
}
