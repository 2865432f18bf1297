//! Driving port for registration and login use-cases.
//!
//! Inbound adapters call it to create accounts and check credentials without
//! knowing the backing store or hashing scheme, so handler tests can swap in
//! a double instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, Registration, UserId};

/// Domain use-case port for account management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account and return its identifier.
    async fn register(&self, registration: &Registration) -> Result<UserId, Error>;

    /// Validate credentials and return the authenticated user id.
    async fn login(&self, credentials: &Credentials) -> Result<UserId, Error>;
}
