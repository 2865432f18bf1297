//! Authentication primitives: login credentials and registration requests.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{Mobile, UserValidationError, Username};

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Username or contact failed another account rule.
    InvalidAccount(UserValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::InvalidAccount(err) => write!(f, "{err}"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

impl From<UserValidationError> for CredentialsValidationError {
    fn from(value: UserValidationError) -> Self {
        match value {
            UserValidationError::EmptyUsername => Self::EmptyUsername,
            other => Self::InvalidAccount(other),
        }
    }
}

/// Validated username/password pair.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use econsult::domain::Credentials;
///
/// let creds = Credentials::try_from_parts(" asha ", "s3cret").expect("valid credentials");
/// assert_eq!(creds.username().as_str(), "asha");
/// assert_eq!(creds.password(), "s3cret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username suitable for account lookups.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Registration request: credentials plus an optional contact number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    credentials: Credentials,
    mobile: Option<Mobile>,
}

impl Registration {
    /// Validate a registration payload.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        mobile: Option<&str>,
    ) -> Result<Self, CredentialsValidationError> {
        let credentials = Credentials::try_from_parts(username, password)?;
        let mobile = Mobile::parse(mobile)?;
        Ok(Self {
            credentials,
            mobile,
        })
    }

    /// Credentials to store.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Optional contact number.
    pub fn mobile(&self) -> Option<&Mobile> {
        self.mobile.as_ref()
    }
}
