//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: SQLite repositories using Diesel
//! - **security**: Argon2 credential hashing and random passcodes
//! - **inference**: HTTP client for the optional heavy text models
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod inference;
pub mod persistence;
pub mod security;
