//! HTTP inbound adapter exposing the REST endpoints under `/api/v1`.

pub mod cache_control;
pub mod comments;
pub mod error;
pub mod health;
pub mod sectors;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;
