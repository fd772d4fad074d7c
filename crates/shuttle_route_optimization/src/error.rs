use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        message: String,
        details: Option<String>,
    },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(&'static str),

    #[error("Invalid configuration value for {name}: {value}")]
    InvalidConfig { name: &'static str, value: String },

    #[error("Solver call timed out after {0:?}")]
    Timeout(Duration),
}

impl SolverError {
    /// Whether retrying the same call has a chance to succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            SolverError::Request(error) => error.is_timeout() || error.is_connect(),
            SolverError::Api { status, .. } => matches!(status, 408 | 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            SolverError::Api { status, .. } => Some(*status),
            SolverError::Request(error) => error.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    pub fn details(&self) -> Option<&str> {
        match self {
            SolverError::Api { details, .. } => details.as_deref(),
            _ => None,
        }
    }
}
