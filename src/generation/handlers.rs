use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    app_state::AppState,
    errors::{ApiError, ErrorBody},
    generation::{
        action::ActionKind,
        dtos::{GenerateRequest, GenerationResult},
        orchestrator,
    },
};

#[utoipa::path(
    post,
    path = "/api/generate/{action}",
    tag = "generation",
    params(
        ("action" = String, Path, description = "One of: summary, theses, post, translation, illustration")
    ),
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Action-specific result field"),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 500, description = "Configuration or provider failure", body = ErrorBody)
    )
)]
pub async fn generate(
    State(state): State<AppState>,
    Path(action): Path<String>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<GenerationResult>, ApiError> {
    let action = ActionKind::from_path(&action).ok_or_else(|| ApiError::InvalidInput {
        message: format!(
            "Неизвестное действие '{action}'. Доступные действия: summary, theses, post, translation, illustration"
        ),
    })?;

    if let Err(message) = payload.validate() {
        return Err(ApiError::InvalidInput { message });
    }

    let result = orchestrator::generate(&state, action, &payload).await?;
    Ok(Json(result))
}
