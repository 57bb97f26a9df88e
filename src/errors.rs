//! Error types for remote-resource synchronization

use thiserror::Error;

/// Local input constraint violated before any network call was made
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Star rating outside (0, 5] or not a half step
    #[error("Rating must be a half step between 0.5 and 5, got {0}")]
    InvalidRating(f64),

    /// A user tried to review themself
    #[error("Users cannot review themselves")]
    SelfReview,

    /// Age below the service minimum
    #[error("Age must be at least {min}, got {actual}")]
    Underage { min: u32, actual: u32 },

    /// Required form field left empty
    #[error("Field is required: {0}")]
    MissingField(&'static str),

    /// Avatar file is not a JPEG or PNG
    #[error("Unsupported avatar type: {0}")]
    UnsupportedImage(String),

    /// Avatar file exceeds the upload limit
    #[error("Avatar must be smaller than {limit} bytes, got {actual}")]
    ImageTooLarge { limit: u64, actual: u64 },

    /// Session window already closed
    #[error("Matching session {0} has expired")]
    SessionExpired(i64),
}

/// Errors surfaced by the synchronization core
///
/// Every variant is scoped to the single action that produced it; nothing
/// here is fatal to the process.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Network or transport failure, including non-success HTTP statuses
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Server answered but reported `success = false`
    #[error("Application error: {0}")]
    Application(String),

    /// Input rejected locally
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Another action is still pending for this widget
    #[error("An action is already in flight for {0}")]
    ActionInFlight(String),

    /// Completion arrived after the owning widget was torn down
    #[error("Widget was torn down before {0} completed")]
    Detached(String),

    /// Payload could not be decoded into the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl SyncError {
    /// Whether the caller may retry the action that produced this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, SyncError::Configuration(_))
    }

    /// Whether the error was raised before anything was dispatched
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            SyncError::Validation(_) | SyncError::ActionInFlight(_) | SyncError::Configuration(_)
        )
    }
}

/// Result type for synchronization operations
pub type SyncResult<T> = Result<T, SyncError>;

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_converts_into_sync_error() {
        let err: SyncError = ValidationError::SelfReview.into();
        assert!(matches!(err, SyncError::Validation(ValidationError::SelfReview)));
        assert!(err.is_local());
    }

    #[test]
    fn test_remote_failures_are_recoverable() {
        assert!(SyncError::Fetch("timeout".into()).is_recoverable());
        assert!(SyncError::Application("nope".into()).is_recoverable());
        assert!(!SyncError::Fetch("timeout".into()).is_local());
    }

    #[test]
    fn test_error_messages() {
        let err = SyncError::Application("already joined".to_string());
        assert_eq!(err.to_string(), "Application error: already joined");
    }
}
