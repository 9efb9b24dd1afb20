use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::fetcher::FetchError;

/// Wire format for every failure: a stable machine code plus a user-facing
/// message. Partial results are never returned alongside it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

const FETCH_FAILED_MESSAGE: &str = "Не удалось загрузить статью по этой ссылке.";
const INVALID_URL_MESSAGE: &str = "Некорректный формат URL";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    InvalidInput { message: String },

    #[error("invalid url")]
    InvalidUrl,

    #[error("{message}")]
    ApiKeyMissing { message: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Upstream AI provider failure, tagged with the per-action error code.
    /// The HTTP status mirrors the provider's status.
    #[error("{code}: {message}")]
    Upstream {
        code: &'static str,
        status: StatusCode,
        message: String,
    },

    /// Provider answered success but the payload misses expected fields.
    #[error("{message}")]
    InvalidResponse { message: String },
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        self.parts().1
    }

    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            Self::InvalidInput { message } => {
                (StatusCode::BAD_REQUEST, "INVALID_INPUT", message.clone())
            }
            Self::InvalidUrl => (
                StatusCode::BAD_REQUEST,
                "INVALID_URL",
                INVALID_URL_MESSAGE.to_string(),
            ),
            Self::ApiKeyMissing { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "API_KEY_MISSING",
                message.clone(),
            ),
            Self::Fetch(err) => fetch_parts(err),
            Self::Upstream {
                code,
                status,
                message,
            } => (*status, code, message.clone()),
            Self::InvalidResponse { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INVALID_RESPONSE",
                message.clone(),
            ),
        }
    }
}

fn fetch_parts(err: &FetchError) -> (StatusCode, &'static str, String) {
    let message = FETCH_FAILED_MESSAGE.to_string();
    match err {
        FetchError::InvalidUrl(_) => (
            StatusCode::BAD_REQUEST,
            "INVALID_URL",
            INVALID_URL_MESSAGE.to_string(),
        ),
        FetchError::Timeout => (StatusCode::REQUEST_TIMEOUT, "TIMEOUT", message),
        FetchError::Network(_) => (StatusCode::SERVICE_UNAVAILABLE, "NETWORK_ERROR", message),
        FetchError::Http { status } if *status == StatusCode::NOT_FOUND => {
            (StatusCode::NOT_FOUND, "NOT_FOUND", message)
        }
        FetchError::Http { status } if status.is_server_error() => {
            (*status, "SERVER_ERROR", message)
        }
        FetchError::Http { status } => (*status, "FETCH_ERROR", message),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "FETCH_ERROR", message),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        tracing::warn!(%status, code, "request failed: {}", self);
        (
            status,
            Json(ErrorBody {
                error: code.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_timeout_maps_to_408() {
        let (status, code, message) = ApiError::Fetch(FetchError::Timeout).parts();
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(code, "TIMEOUT");
        assert!(!message.is_empty());
    }

    #[test]
    fn test_fetch_404_maps_to_not_found() {
        let err = ApiError::Fetch(FetchError::Http {
            status: StatusCode::NOT_FOUND,
        });
        let (status, code, _) = err.parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NOT_FOUND");
    }

    #[test]
    fn test_fetch_server_error_mirrors_status() {
        let err = ApiError::Fetch(FetchError::Http {
            status: StatusCode::BAD_GATEWAY,
        });
        let (status, code, _) = err.parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "SERVER_ERROR");
    }

    #[test]
    fn test_fetch_client_error_is_fetch_error() {
        let err = ApiError::Fetch(FetchError::Http {
            status: StatusCode::FORBIDDEN,
        });
        let (status, code, _) = err.parts();
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(code, "FETCH_ERROR");
    }

    #[test]
    fn test_upstream_mirrors_status_and_code() {
        let err = ApiError::Upstream {
            code: "THESES_ERROR",
            status: StatusCode::TOO_MANY_REQUESTS,
            message: "slow down".to_string(),
        };
        let (status, code, message) = err.parts();
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(code, "THESES_ERROR");
        assert_eq!(message, "slow down");
    }

    #[test]
    fn test_network_failure_is_503() {
        let err = ApiError::Fetch(FetchError::Network("dns".to_string()));
        let (status, code, _) = err.parts();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(code, "NETWORK_ERROR");
    }
}
