//! Port abstraction for account persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, StoredUser, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The username is already taken; nothing was written.
        DuplicateUsername { username: String } => "username already registered: {username}",
    }
}

/// Port for creating accounts and reading them back by username.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account and return its store-assigned identifier.
    async fn create(&self, user: &NewUser) -> Result<UserId, UserRepositoryError>;

    /// Fetch an account by exact username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredUser>, UserRepositoryError>;
}
