//! Embedded schema migrations.

use diesel::Connection;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failure to bring the SQLite file up to the current schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// The file could not be opened or created.
    #[error("failed to open {path}: {message}")]
    Open {
        /// Path involved.
        path: String,
        /// Underlying failure detail.
        message: String,
    },
    /// A migration failed to apply.
    #[error("failed to migrate {path}: {message}")]
    Apply {
        /// Path involved.
        path: String,
        /// Underlying failure detail.
        message: String,
    },
}

/// Apply pending migrations to the SQLite file at `path`, creating it when
/// missing. Returns how many migrations ran.
///
/// Blocking; call before the async pool is built or from `spawn_blocking`.
pub fn run_migrations(path: &str) -> Result<usize, MigrationError> {
    let mut conn = SqliteConnection::establish(path).map_err(|err| MigrationError::Open {
        path: path.to_owned(),
        message: err.to_string(),
    })?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            path: path.to_owned(),
            message: err.to_string(),
        })?;
    info!(path, applied = applied.len(), "database schema up to date");
    Ok(applied.len())
}
