use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    text_provider: String,
    image_provider: String,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Process is up; reports which provider credentials are configured", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        text_provider: credential_status(state.text_client.is_some()),
        image_provider: credential_status(state.image_client.is_some()),
    })
}

fn credential_status(configured: bool) -> String {
    if configured { "configured" } else { "missing" }.to_string()
}
