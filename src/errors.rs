// src/errors.rs

use thiserror::Error;

/// Errors raised by the configuration, profile and generation layers.
///
/// The conversation session never lets these escape: a failed assistant
/// turn is turned into the fallback message and the cause is only logged.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("malformed response: {0}")]
    Response(String),

    #[error("profile error: {0}")]
    Profile(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type FolioResult<T> = Result<T, FolioError>;

impl FolioError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        FolioError::Config(msg.into())
    }

    pub fn api_error(msg: impl Into<String>) -> Self {
        FolioError::Api(msg.into())
    }

    pub fn response_error(msg: impl Into<String>) -> Self {
        FolioError::Response(msg.into())
    }

    pub fn profile_error(msg: impl Into<String>) -> Self {
        FolioError::Profile(msg.into())
    }
}
