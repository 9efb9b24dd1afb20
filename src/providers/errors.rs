use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("request timeout")]
    Timeout,

    #[error("network failure: {0}")]
    Network(String),

    /// Non-success HTTP status, with the most specific message that could be
    /// extracted from the provider's error payload.
    #[error("upstream error {status}: {message}")]
    Upstream {
        status: reqwest::StatusCode,
        message: String,
    },

    /// HTTP success but the payload does not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The image endpoint answered success with a non-image payload.
    #[error("non-image response ({content_type}): {message}")]
    NotAnImage {
        content_type: String,
        message: String,
    },
}

impl ProviderError {
    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.to_string())
        }
    }
}
