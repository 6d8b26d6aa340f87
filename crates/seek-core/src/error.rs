//! Error types for the orchestration core.
//!
//! Errors fall in three groups:
//! - **Invalid argument**: a required reference is absent or cannot be resolved
//! - **Instantiation**: an Activity type has no factory, or its factory failed
//! - **Invalid state**: an operation was invoked out of order by host code
//!
//! The first two (and view-load failures) are recoverable: the orchestrator
//! logs them and drops the request, keeping the current Activity on screen.
//! Invalid-state errors are programming errors and reach the caller.

use thiserror::Error;

use crate::view::ViewError;

/// Errors produced by the orchestration core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SeekError {
    /// A required reference is absent or unknown.
    #[error("Invalid argument: {what}")]
    InvalidArgument {
        /// What was missing.
        what: String,
    },

    /// An Activity could not be constructed.
    #[error("Failed to instantiate activity '{key}': {reason}")]
    Instantiation {
        /// Type key of the Activity.
        key: String,
        /// Description of what went wrong.
        reason: String,
    },

    /// An operation was invoked before its prerequisites.
    #[error("Invalid state: {reason}")]
    InvalidState {
        /// Description of the violated precondition.
        reason: String,
    },

    /// `show()` was called before `initialize()`.
    #[error("SeekApplication::initialize() wasn't called before SeekApplication::show()")]
    NotInitialized,

    /// The view layer failed to load or attach a view.
    #[error(transparent)]
    ViewLoad(#[from] ViewError),
}

impl SeekError {
    /// Create an invalid-argument error.
    pub fn invalid_argument(what: impl Into<String>) -> Self {
        Self::InvalidArgument { what: what.into() }
    }

    /// Create an instantiation error.
    pub fn instantiation(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Instantiation {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid-state error.
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }

    /// Whether the orchestrator absorbs this error (log and drop the request).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. } | Self::Instantiation { .. } | Self::ViewLoad(_)
        )
    }
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, SeekError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoverable_classification() {
        assert!(SeekError::invalid_argument("fragment").is_recoverable());
        assert!(SeekError::instantiation("main", "boom").is_recoverable());
        assert!(
            SeekError::from(ViewError::DescriptorNotFound {
                descriptor: "x.fxml".into()
            })
            .is_recoverable()
        );
        assert!(!SeekError::invalid_state("no view").is_recoverable());
        assert!(!SeekError::NotInitialized.is_recoverable());
    }

    #[test]
    fn display_messages() {
        let error = SeekError::instantiation("next", "no factory registered");
        assert_eq!(
            error.to_string(),
            "Failed to instantiate activity 'next': no factory registered"
        );
        assert_eq!(
            SeekError::invalid_argument("container 'body' is not known").to_string(),
            "Invalid argument: container 'body' is not known"
        );
    }
}
