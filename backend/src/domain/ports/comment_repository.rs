//! Port for comment persistence and passcode lookups.

use async_trait::async_trait;

use crate::domain::{CommentView, NewComment, Passcode, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "comment repository query failed: {message}",
        /// Another comment already holds this passcode; nothing was written.
        DuplicatePasscode { passcode: String } => "passcode already issued: {passcode}",
    }
}

/// Port for inserting comments and reading them back.
///
/// Adapters must enforce passcode uniqueness at the storage layer and report
/// a collision as [`CommentRepositoryError::DuplicatePasscode`], so callers
/// can regenerate and retry without a separate existence check.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a comment.
    async fn insert(&self, comment: &NewComment) -> Result<(), CommentRepositoryError>;

    /// Fetch the comment holding `passcode`, if any.
    async fn find_by_passcode(
        &self,
        passcode: &Passcode,
    ) -> Result<Option<CommentView>, CommentRepositoryError>;

    /// List comments owned by `user_id`, most recently inserted first.
    async fn list_for_owner(
        &self,
        user_id: UserId,
    ) -> Result<Vec<CommentView>, CommentRepositoryError>;
}
