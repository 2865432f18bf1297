//! Failures raised by the record store and submission workflow.
//!
//! Lookup misses are not errors here; they surface as `Option::None`.

use serde_json::json;
use tracing::error;

use super::Error;
use super::ports::{CommentRepositoryError, CredentialHashError, UserRepositoryError};

/// Recoverable failures of consultation use-cases.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsultationError {
    /// The username is already registered; nothing was written.
    #[error("username already registered: {username}")]
    DuplicateUsername {
        /// Username involved.
        username: String,
    },
    /// No account has this username.
    #[error("user not found")]
    UserNotFound {
        /// Username involved.
        username: String,
    },
    /// The password did not match.
    #[error("incorrect password")]
    InvalidCredential,
    /// Caller input failed validation.
    #[error("{message}")]
    InvalidInput {
        /// Underlying failure detail.
        message: String,
    },
    /// The store could not be reached.
    #[error("storage unavailable: {message}")]
    StorageUnavailable {
        /// Underlying failure detail.
        message: String,
    },
    /// The store rejected or failed an operation.
    #[error("storage error: {message}")]
    Storage {
        /// Underlying failure detail.
        message: String,
    },
    /// Hashing or verifying a password failed.
    #[error("credential processing failed: {message}")]
    Credential {
        /// Underlying failure detail.
        message: String,
    },
}

impl ConsultationError {
    /// Shorthand for [`ConsultationError::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Shorthand for [`ConsultationError::Storage`].
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

impl From<UserRepositoryError> for ConsultationError {
    fn from(value: UserRepositoryError) -> Self {
        match value {
            UserRepositoryError::Connection { message } => Self::StorageUnavailable { message },
            UserRepositoryError::Query { message } => Self::Storage { message },
            UserRepositoryError::DuplicateUsername { username } => {
                Self::DuplicateUsername { username }
            }
        }
    }
}

impl From<CommentRepositoryError> for ConsultationError {
    fn from(value: CommentRepositoryError) -> Self {
        match value {
            CommentRepositoryError::Connection { message } => Self::StorageUnavailable { message },
            CommentRepositoryError::Query { message } => Self::Storage { message },
            CommentRepositoryError::DuplicatePasscode { .. } => {
                Self::storage("passcode collision was not resolved")
            }
        }
    }
}

impl From<CredentialHashError> for ConsultationError {
    fn from(value: CredentialHashError) -> Self {
        Self::Credential {
            message: value.to_string(),
        }
    }
}

impl From<ConsultationError> for Error {
    fn from(value: ConsultationError) -> Self {
        match value {
            ConsultationError::DuplicateUsername { username } => {
                Self::conflict("username already registered")
                    .with_details(json!({ "field": "username", "value": username }))
            }
            ConsultationError::UserNotFound { .. } => Self::unauthorized("user not found"),
            ConsultationError::InvalidCredential => Self::unauthorized("incorrect password"),
            ConsultationError::InvalidInput { message } => Self::invalid_request(message),
            ConsultationError::StorageUnavailable { message } => {
                error!(%message, "store unavailable");
                Self::service_unavailable("storage temporarily unavailable")
            }
            ConsultationError::Storage { message } | ConsultationError::Credential { message } => {
                error!(%message, "consultation operation failed");
                Self::internal(message)
            }
        }
    }
}
