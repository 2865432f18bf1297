//! SQLite persistence adapters using Diesel.
//!
//! Repositories are thin translators between Diesel rows and domain types.
//! Row structs (`models.rs`) and the table macros (`schema.rs`) stay private
//! to this module. Storage faults are reduced to connection, query, or
//! unique-violation kinds and surfaced as the port's error type.
//!
//! ```no_run
//! use econsult::outbound::persistence::{
//!     DbPool, DieselCommentRepository, PoolConfig, run_migrations,
//! };
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! run_migrations("econsult.db")?;
//! let pool = DbPool::new(PoolConfig::new("econsult.db")).await?;
//! let comments = DieselCommentRepository::new(pool);
//! # let _ = comments;
//! # Ok(())
//! # }
//! ```

mod diesel_comment_repository;
mod diesel_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError, SqliteAsyncConnection};
