//! Port supplying fresh candidate passcodes.

use crate::domain::Passcode;

/// Source of random tracking codes.
///
/// Generators need not guarantee uniqueness; the record store retries on a
/// storage-level collision.
#[cfg_attr(test, mockall::automock)]
pub trait PasscodeGenerator: Send + Sync {
    /// Produce a candidate passcode.
    fn generate(&self) -> Passcode;
}
