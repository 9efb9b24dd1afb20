use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::extractor::ParsedArticle;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ExtractRequest {
    #[serde(default)]
    pub url: String,
}

impl ExtractRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("URL обязателен для заполнения".to_string());
        }
        if self.url.len() > 2048 {
            return Err("Слишком длинный URL".to_string());
        }
        Ok(())
    }
}

/// Extraction result; every field is best-effort and may be null.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExtractResponse {
    pub date: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl From<ParsedArticle> for ExtractResponse {
    fn from(article: ParsedArticle) -> Self {
        Self {
            date: article.date,
            title: article.title,
            content: article.content,
        }
    }
}
