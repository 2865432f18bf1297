//! Account data model.
//!
//! Accounts are identified by a store-assigned integer and a unique username.
//! Password material never appears here in plaintext; only the encoded hash
//! produced by a [`crate::domain::ports::CredentialHasher`] is carried.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum accepted username length, in characters.
pub const USERNAME_MAX: usize = 64;
/// Maximum accepted contact number length, in characters.
pub const MOBILE_MAX: usize = 32;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Username was blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username exceeded [`USERNAME_MAX`].
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// Contact number exceeded [`MOBILE_MAX`].
    #[error("mobile number must be at most {max} characters")]
    MobileTooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// Store identifiers are strictly positive.
    #[error("user id must be positive, got {value}")]
    NonPositiveId {
        /// Offending value.
        value: i32,
    },
}

/// Store-assigned account identifier.
///
/// Identifiers are always positive; `0` is reserved for guest submissions and
/// is modelled by [`crate::domain::CommentOwner::Guest`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct UserId(i32);

impl UserId {
    /// Validate and wrap a raw store identifier.
    ///
    /// # Examples
    /// ```
    /// use econsult::domain::UserId;
    ///
    /// assert_eq!(UserId::new(7).map(UserId::get), Ok(7));
    /// assert!(UserId::new(0).is_err());
    /// ```
    pub fn new(value: i32) -> Result<Self, UserValidationError> {
        if value <= 0 {
            return Err(UserValidationError::NonPositiveId { value });
        }
        Ok(Self(value))
    }

    /// Raw integer value as stored.
    #[must_use]
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i32 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i32> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Trimmed, non-empty username.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Trim and validate a username.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the username.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Optional free-form contact number supplied at registration.
///
/// Blank input collapses to "no contact" rather than failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mobile(String);

impl Mobile {
    /// Parse an optional contact value; whitespace-only input yields `None`.
    pub fn parse(raw: Option<&str>) -> Result<Option<Self>, UserValidationError> {
        let Some(trimmed) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return Ok(None);
        };
        if trimmed.chars().count() > MOBILE_MAX {
            return Err(UserValidationError::MobileTooLong { max: MOBILE_MAX });
        }
        Ok(Some(Self(trimmed.to_owned())))
    }

    /// Borrow the contact value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Account ready for insertion; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Unique account name.
    pub username: Username,
    /// PHC-format password hash.
    pub password_hash: String,
    /// Optional contact number.
    pub mobile: Option<Mobile>,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

/// Persisted account as read back for authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    /// Row identifier.
    pub id: UserId,
    /// Account name.
    pub username: Username,
    /// PHC-format password hash.
    pub password_hash: String,
}
