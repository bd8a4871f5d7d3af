//! Error taxonomy for profile editing.

use thiserror::Error;

/// Result type alias using `ProfileError`
pub type Result<T> = std::result::Result<T, ProfileError>;

/// Errors surfaced by the profile editing flow.
///
/// The first four variants are user-facing: their display text is the
/// exact message shown in the transient notice, so they carry no prefix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// Credential missing or not allowed for this profile kind.
    /// Raised before any request is sent.
    #[error("{0}")]
    Authentication(String),

    /// Non-success response while reading a profile
    #[error("{0}")]
    Fetch(String),

    /// Client-side check failed (file size, missing fields)
    #[error("{0}")]
    Validation(String),

    /// Non-success response while writing a profile
    #[error("{0}")]
    Save(String),

    /// Mutation attempted outside edit mode
    #[error("Profile is not in edit mode")]
    NotEditing,

    /// Editor used before a profile was loaded
    #[error("Profile data missing")]
    NotLoaded,

    /// A save is already waiting for the server
    #[error("A save is already in progress")]
    SaveInProgress,

    /// Gallery index out of range
    #[error("No gallery entry at index {0}")]
    NoSuchGalleryEntry(usize),

    /// Field name not known to the profile schema
    #[error("Unknown profile field: {0}")]
    UnknownField(String),
}

impl ProfileError {
    /// Create an authentication error
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a save error
    pub fn save(msg: impl Into<String>) -> Self {
        Self::Save(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_errors_display_bare_message() {
        let err = ProfileError::save("Profile picture must be less than 5MB");
        assert_eq!(err.to_string(), "Profile picture must be less than 5MB");

        let err = ProfileError::authentication("Authentication token or user data missing.");
        assert_eq!(err.to_string(), "Authentication token or user data missing.");
    }

    #[test]
    fn internal_errors_describe_themselves() {
        assert!(ProfileError::NoSuchGalleryEntry(4).to_string().contains('4'));
        assert!(ProfileError::UnknownField("nope".into())
            .to_string()
            .contains("nope"));
    }
}
