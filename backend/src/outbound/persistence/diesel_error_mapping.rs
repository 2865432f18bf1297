//! Shared classification of pool and Diesel failures.
//!
//! Repositories turn a [`StoreFault`] into their own port error, adding the
//! duplicate-key variant that only they can name.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Storage failure reduced to what the domain distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFault {
    /// The database could not be reached.
    Connection(String),
    /// A statement failed.
    Query(String),
    /// A `UNIQUE` constraint rejected the write.
    UniqueViolation,
}

impl From<PoolError> for StoreFault {
    fn from(error: PoolError) -> Self {
        let message = match error {
            PoolError::Checkout { message } | PoolError::Build { message } => message,
        };
        debug!(%message, "pool operation failed");
        Self::Connection(message)
    }
}

impl From<DieselError> for StoreFault {
    fn from(error: DieselError) -> Self {
        match &error {
            DieselError::DatabaseError(kind, info) => {
                debug!(?kind, message = info.message(), "diesel operation failed");
            }
            other => debug!(error = %other, "diesel operation failed"),
        }

        match error {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                Self::UniqueViolation
            }
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                Self::Connection("database connection closed".to_owned())
            }
            DieselError::NotFound => Self::Query("record not found".to_owned()),
            DieselError::DatabaseError(_, info) => Self::Query(info.message().to_owned()),
            other => Self::Query(other.to_string()),
        }
    }
}
