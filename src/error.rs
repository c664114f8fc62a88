//! Error types shared across the crate.
//!
//! Validation errors are local and block a submission before any network
//! call. Request errors come from the backend or the transport and collapse
//! into one display string for the user.

use thiserror::Error;

/// Shown when a failed request carries no usable server message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

/// A form field failed local validation. The `Display` text is what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid full name")]
    FullName,
    #[error("Invalid email")]
    Email,
    #[error("Invalid password")]
    Password,
}

/// A request to the auth backend failed.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("server responded with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },
    /// The backend answered with a body we could not read.
    #[error("could not decode response: {0}")]
    Decode(String),
    /// The selected profile image could not be prepared for upload.
    #[error("profile image error: {0}")]
    Image(String),
}

impl RequestError {
    /// The text to show the user: the server-provided message if there is
    /// one, else a generic fallback. Timeouts, 4xx and 5xx all end up here.
    pub fn display_message(&self) -> String {
        match self {
            RequestError::Status {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            RequestError::Decode(e.to_string())
        } else {
            RequestError::Transport(e.to_string())
        }
    }
}

/// Durable token storage failed.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// The configuration could not be loaded or applied.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Figment(#[from] figment::Error),
    #[error("invalid logging.level '{0}'. Valid values: trace, debug, info, warn, error")]
    LogLevel(String),
    #[error("could not build HTTP client: {0}")]
    HttpClient(String),
}

/// Top-level error used by the command line entrypoint.
#[derive(Debug, Error)]
pub enum AuthFlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
