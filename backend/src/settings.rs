//! Process configuration loaded via OrthoConfig.
//!
//! Values layer CLI flags over `ECONSULT_*` environment variables over an
//! optional config file. Optional fields fall back to the defaults exposed
//! by the accessor methods.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::DEFAULT_SUMMARY_MAX_CHARS;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_DATABASE_PATH: &str = "econsult.db";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 30;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_address` is not a socket address.
    #[error("invalid bind address '{value}': {message}")]
    BindAddress {
        /// Offending value.
        value: String,
        /// Underlying failure detail.
        message: String,
    },
    /// `model_endpoint` is not an absolute URL.
    #[error("invalid model endpoint '{value}': {message}")]
    ModelEndpoint {
        /// Offending value.
        value: String,
        /// Underlying failure detail.
        message: String,
    },
    /// `heavy_models` is on without an endpoint to load from.
    #[error("heavy models are enabled but no model endpoint is configured")]
    MissingModelEndpoint,
    /// A numeric setting that must be positive was zero.
    #[error("{field} must be greater than zero")]
    Zero {
        /// Name of the offending setting.
        field: &'static str,
    },
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ECONSULT")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_address: Option<String>,
    /// SQLite database file.
    pub database_path: Option<String>,
    /// File holding the cookie signing key.
    pub session_key_file: Option<PathBuf>,
    /// Permit a generated key when the key file is missing. Off by default.
    pub session_allow_ephemeral: Option<bool>,
    /// Mark the session cookie `Secure`. On by default.
    pub cookie_secure: Option<bool>,
    /// `SameSite` policy: `Strict`, `Lax` or `None`.
    pub same_site: Option<String>,
    /// Load the inference service at startup. Off by default.
    pub heavy_models: Option<bool>,
    /// Base URL of the inference service.
    pub model_endpoint: Option<String>,
    /// Per-request timeout for the inference service.
    pub model_timeout_secs: Option<u64>,
    /// JSON keyword lists for the heuristic classifier.
    pub keywords_path: Option<PathBuf>,
    /// Length bound for heuristic summaries.
    pub summary_max_chars: Option<usize>,
}

impl AppSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_address.as_deref().unwrap_or(DEFAULT_BIND_ADDRESS);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddress {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// SQLite database file, `econsult.db` unless configured.
    pub fn database_path(&self) -> &str {
        self.database_path.as_deref().unwrap_or(DEFAULT_DATABASE_PATH)
    }

    /// Session signing key file.
    pub fn session_key_file(&self) -> &Path {
        self.session_key_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SESSION_KEY_FILE))
    }

    /// Whether a generated key may stand in for a missing key file.
    pub fn session_allow_ephemeral(&self) -> bool {
        self.session_allow_ephemeral.unwrap_or(false)
    }

    /// Whether the session cookie carries the `Secure` flag.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    /// Whether the heavy text models should be loaded.
    pub fn heavy_models(&self) -> bool {
        self.heavy_models.unwrap_or(false)
    }

    /// Per-request timeout for the inference service.
    pub fn model_timeout(&self) -> Result<Duration, SettingsError> {
        let secs = self
            .model_timeout_secs
            .unwrap_or(DEFAULT_MODEL_TIMEOUT_SECS);
        if secs == 0 {
            return Err(SettingsError::Zero {
                field: "model_timeout_secs",
            });
        }
        Ok(Duration::from_secs(secs))
    }

    /// Character bound for heuristic and model summaries.
    pub fn summary_max_chars(&self) -> Result<usize, SettingsError> {
        let max_chars = self.summary_max_chars.unwrap_or(DEFAULT_SUMMARY_MAX_CHARS);
        if max_chars == 0 {
            return Err(SettingsError::Zero {
                field: "summary_max_chars",
            });
        }
        Ok(max_chars)
    }

    /// Inference endpoint to load, or `None` when heavy models are off.
    pub fn model_endpoint(&self) -> Result<Option<Url>, SettingsError> {
        if !self.heavy_models() {
            return Ok(None);
        }
        let raw = self
            .model_endpoint
            .as_deref()
            .ok_or(SettingsError::MissingModelEndpoint)?;
        Url::parse(raw)
            .map(Some)
            .map_err(|err| SettingsError::ModelEndpoint {
                value: raw.to_owned(),
                message: err.to_string(),
            })
    }
}
