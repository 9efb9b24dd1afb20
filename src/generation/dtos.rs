use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Input to every generation action. `targetLanguage` keeps its wire-format
/// camelCase name.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateRequest {
    #[serde(default)]
    pub content: String,
    pub title: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "targetLanguage")]
    pub target_language: Option<String>,
}

impl GenerateRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.content.trim().is_empty() {
            return Err("Контент обязателен для заполнения".to_string());
        }
        Ok(())
    }
}

/// Action-specific result: exactly one field, never combined.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum GenerationResult {
    Summary { summary: String },
    Theses { theses: String },
    Post { post: String },
    Translation { translation: String },
    Illustration { illustration: String },
}
