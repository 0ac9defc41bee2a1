//! Error types for the proxy service.

use actix_web::http::StatusCode;
use common::model::validation::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of a proxied call, from request validation to decoding the backend's answer.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Backend did not answer in time")]
    Timeout,

    #[error("Backend unreachable: {0}")]
    Transport(reqwest::Error),

    #[error("Backend responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Backend rejected the request: {0}")]
    Rejected(String),

    #[error("Backend returned an unreadable payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProxyError::Timeout
        } else {
            ProxyError::Transport(err)
        }
    }
}

impl ProxyError {
    /// Status code reported to the admin UI for a failed write or lookup.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::Validation(_) | ProxyError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::NotFound(_) => StatusCode::NOT_FOUND,
            ProxyError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Status { status, .. } if *status == 404 => StatusCode::NOT_FOUND,
            ProxyError::Status { status, .. } if *status == 409 => StatusCode::CONFLICT,
            ProxyError::Status { status, .. } if *status == 422 => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ProxyError::Status { .. }
            | ProxyError::Transport(_)
            | ProxyError::Rejected(_)
            | ProxyError::Decode(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Failures while loading [`Config`](crate::config::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
