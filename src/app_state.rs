use crate::{
    config::Config,
    providers::{HuggingFaceClient, OpenRouterClient},
};
use std::sync::Arc;

/// Shared handler state. A provider client exists only when its credential
/// is configured; actions that need an absent client fail with
/// `API_KEY_MISSING` before any outbound call.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub text_client: Option<Arc<OpenRouterClient>>,
    pub image_client: Option<Arc<HuggingFaceClient>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let text_client = config.openrouter_api_key().map(|key| {
            Arc::new(OpenRouterClient::new(
                key.to_string(),
                config.openrouter_base_url().to_string(),
                config.app_url().to_string(),
            ))
        });
        let image_client = config.huggingface_api_key().map(|key| {
            Arc::new(HuggingFaceClient::new(
                key.to_string(),
                config.huggingface_base_url().to_string(),
            ))
        });
        Self {
            config,
            text_client,
            image_client,
        }
    }
}
