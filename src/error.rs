use thiserror::Error;

use crate::pipeline::Stage;

/// Errors that can occur while capturing, detecting or generating
#[derive(Error, Debug)]
pub enum SnapError {
    /// The request could not complete (connection, timeout, undecodable body)
    #[error("Request failed: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server responded with status: {status}")]
    ServerError { status: u16, detail: Option<String> },

    /// Recipe generation was requested without any ingredients
    #[error("No ingredients to generate recipes from")]
    EmptyInput,

    /// The capture device cannot be used
    #[error("Capture device unavailable: {0}")]
    AdapterUnavailable(String),

    /// The file or data URL is not an acceptable image
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// A successful response did not have the expected shape
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    /// A pipeline entry point was called from the wrong state
    #[error("Cannot {action} while pipeline is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Reading an image from disk failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<base64::DecodeError> for SnapError {
    fn from(err: base64::DecodeError) -> Self {
        SnapError::InvalidImage(format!("bad base64 payload: {}", err))
    }
}

impl SnapError {
    /// Text shown to the user when this error ends `stage`.
    pub fn user_message(&self, stage: Stage) -> String {
        match self {
            SnapError::ServerError {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            SnapError::ServerError { status, .. } => {
                format!("Server responded with status: {}", status)
            }
            SnapError::EmptyInput => {
                "No ingredients detected. Please try another image.".to_string()
            }
            SnapError::AdapterUnavailable(_) => {
                "Camera is not available. Try uploading a photo instead.".to_string()
            }
            _ => stage.failure_message().to_string(),
        }
    }
}
