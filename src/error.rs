//! Error types.
//!
//! Only [`AppError`] ever reaches `main`. Validation and backend errors are
//! turned into inline messages where they happen.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::OptionLabel;

/// A user action that is not valid in the current state. The state is left
/// untouched and the message is shown next to the control that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select an option.")]
    NoSelection,
    #[error("Please enter a doubt.")]
    EmptyDoubt,
    #[error("Check your answer before asking a doubt.")]
    NotChecked,
    #[error("Option {0} is not available for this question.")]
    UnknownOption(OptionLabel),
    #[error("Please provide either a file or a prompt.")]
    EmptyPrompt,
}

/// Failure of a call to the study backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} answered with status {status}{}", message_suffix(.message))]
    Status {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    #[error("could not decode the response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not read {}: {source}", .path.display())]
    Upload {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("delete was rejected{}", message_suffix(.0))]
    DeleteRejected(Option<String>),
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

/// Errors that end the program.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to read {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to open log file {}: {source}", .path.display())]
    Log {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::NoSelection.to_string(),
            "Please select an option."
        );
        assert_eq!(ValidationError::EmptyDoubt.to_string(), "Please enter a doubt.");
        assert_eq!(
            ValidationError::UnknownOption(OptionLabel::D).to_string(),
            "Option D is not available for this question."
        );
    }

    #[test]
    fn test_status_message_suffix() {
        let err = BackendError::Status {
            endpoint: "/clarify".to_string(),
            status: 500,
            message: Some("Gemini Error: quota".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "/clarify answered with status 500: Gemini Error: quota"
        );

        let err = BackendError::DeleteRejected(None);
        assert_eq!(err.to_string(), "delete was rejected");
    }
}
