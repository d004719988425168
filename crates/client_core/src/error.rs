use std::path::PathBuf;

use reqwest::StatusCode;
use shared::error::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("unsupported document type for '{filename}'; expected PDF, DOCX or TXT")]
    UnsupportedDocument { filename: String },
    #[error("failed to read '{}': {source}", path.display())]
    ReadDocument {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ClientError {
    /// Raw response text for status failures, the error description otherwise.
    pub fn display_body(&self) -> String {
        match self {
            Self::Status { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            _ => None,
        }
    }

    pub fn api_error(&self) -> Option<ApiError> {
        match self {
            Self::Status { body, .. } => ApiError::parse(body),
            _ => None,
        }
    }
}
