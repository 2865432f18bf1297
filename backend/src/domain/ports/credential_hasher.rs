//! Port for one-way password hashing.

use super::define_port_error;

define_port_error! {
    /// Failures raised while hashing or checking a password.
    pub enum CredentialHashError {
        /// Producing a new hash failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be decoded.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Hashes passwords for storage and checks candidates against stored hashes.
///
/// A mismatch is `Ok(false)`; errors are reserved for broken inputs.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Produce a self-describing hash string for `password`.
    fn hash(&self, password: &str) -> Result<String, CredentialHashError>;

    /// Check `password` against a hash produced by [`CredentialHasher::hash`].
    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, CredentialHashError>;
}
