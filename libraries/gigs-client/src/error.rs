//! Error types for the Gigs API client.

use gigs_core::ProfileError;
use thiserror::Error;

/// Errors that can occur when talking to the marketplace backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Login rejected
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Signed in, but the account role may not perform this operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// File not found for upload
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error while reading uploads or the session file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Profile flow error (authentication, fetch, validation, save)
    #[error(transparent)]
    Profile(#[from] ProfileError),
}

impl ClientError {
    /// Map a transport error, separating unreachable servers.
    pub(crate) fn send(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ClientError::ServerUnreachable(e.to_string())
        } else {
            ClientError::Request(e)
        }
    }

    /// The profile-flow error to show for this failure.
    ///
    /// Errors that are not already part of the profile taxonomy become
    /// `fallback(message)`.
    pub fn into_profile_error(self, fallback: fn(String) -> ProfileError) -> ProfileError {
        match self {
            ClientError::Profile(e) => e,
            other => fallback(other.to_string()),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
