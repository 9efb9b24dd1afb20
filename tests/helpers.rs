use referent::{app_state::AppState, config::Config};

/// Build an [`AppState`] whose provider clients point at test servers.
pub fn state_with(
    openrouter_base: &str,
    openrouter_key: Option<&str>,
    huggingface_base: &str,
    huggingface_key: Option<&str>,
) -> AppState {
    let config = Config::new(
        "127.0.0.1:0",
        openrouter_key.map(str::to_string),
        huggingface_key.map(str::to_string),
        openrouter_base,
        huggingface_base,
        "http://localhost:3000",
    );
    AppState::new(config)
}

/// State for tests that never reach a provider.
pub fn state_without_providers() -> AppState {
    state_with("http://127.0.0.1:1", None, "http://127.0.0.1:1", None)
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}
