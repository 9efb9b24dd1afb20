pub mod app_state;
pub mod articles;
pub mod config;
pub mod errors;
pub mod extractor;
pub mod fetcher;
pub mod generation;
pub mod health;
pub mod providers;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use app_state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        articles::handlers::extract_article,
        generation::handlers::generate,
    ),
    tags(
        (name = "articles", description = "Article fetching and extraction"),
        (name = "generation", description = "AI generation actions"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;

/// Assemble the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::health_check))
        .route("/api/extract", post(articles::handlers::extract_article))
        .route("/api/generate/{action}", post(generation::handlers::generate))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
