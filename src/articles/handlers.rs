use axum::Json;
use tracing::info;
use url::Url;

use crate::{
    articles::dtos::{ExtractRequest, ExtractResponse},
    errors::{ApiError, ErrorBody},
    extractor, fetcher,
};

#[utoipa::path(
    post,
    path = "/api/extract",
    tag = "articles",
    request_body = ExtractRequest,
    responses(
        (status = 200, description = "Best-effort extraction result", body = ExtractResponse),
        (status = 400, description = "Missing or malformed URL", body = ErrorBody),
        (status = 408, description = "Page fetch timed out", body = ErrorBody)
    )
)]
pub async fn extract_article(
    Json(payload): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, ApiError> {
    if let Err(message) = payload.validate() {
        return Err(ApiError::InvalidInput { message });
    }
    if Url::parse(&payload.url).is_err() {
        return Err(ApiError::InvalidUrl);
    }

    let page = fetcher::fetch(&payload.url).await?;
    let article = extractor::extract(&page.html, &page.url_final);

    info!(
        url = %page.url_final,
        fetched_at = %page.fetched_at,
        has_title = article.title.is_some(),
        has_date = article.date.is_some(),
        content_len = article.content.as_deref().map(str::len).unwrap_or(0),
        "article extracted"
    );

    Ok(Json(article.into()))
}
