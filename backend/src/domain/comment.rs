//! Consultation comment records and their tracking passcodes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Sector, UserId};

/// Number of characters in a passcode.
pub const PASSCODE_LEN: usize = 8;
/// Characters a passcode may contain.
pub const PASSCODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
/// Status every new comment starts in.
pub const INITIAL_STATUS: &str = "Submitted";

/// Reasons a string is not a passcode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasscodeValidationError {
    /// Wrong number of characters.
    #[error("passcode must be exactly {expected} characters, got {actual}")]
    WrongLength {
        /// Required length.
        expected: usize,
        /// Length received.
        actual: usize,
    },
    /// A character outside [`PASSCODE_ALPHABET`].
    #[error("passcode may only contain lowercase letters and digits")]
    InvalidCharacter,
}

/// Public tracking token returned at submission time.
///
/// Holding a passcode is the only credential needed to read the record back.
///
/// # Examples
/// ```
/// use econsult::domain::Passcode;
///
/// let code = Passcode::parse(" a1b2c3d4 ").expect("well formed");
/// assert_eq!(code.as_str(), "a1b2c3d4");
/// assert!(Passcode::parse("A1B2C3D4").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Passcode(String);

impl Passcode {
    /// Validate a passcode exactly as given; surrounding whitespace is not
    /// stripped.
    pub fn parse(raw: &str) -> Result<Self, PasscodeValidationError> {
        let actual = raw.chars().count();
        if actual != PASSCODE_LEN {
            return Err(PasscodeValidationError::WrongLength {
                expected: PASSCODE_LEN,
                actual,
            });
        }
        if !raw.bytes().all(|byte| PASSCODE_ALPHABET.contains(&byte)) {
            return Err(PasscodeValidationError::InvalidCharacter);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Assemble a passcode from [`PASSCODE_LEN`] draws of `next_index`.
    ///
    /// Each draw picks a character of [`PASSCODE_ALPHABET`]; out-of-range
    /// draws wrap around, so any source of integers yields a valid code.
    pub fn from_draws(mut next_index: impl FnMut() -> usize) -> Self {
        let code = (0..PASSCODE_LEN)
            .filter_map(|_| {
                PASSCODE_ALPHABET
                    .get(next_index() % PASSCODE_ALPHABET.len())
                    .copied()
                    .map(char::from)
            })
            .collect();
        Self(code)
    }

    /// Borrow the passcode text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Passcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Passcode> for String {
    fn from(value: Passcode) -> Self {
        value.0
    }
}

impl TryFrom<String> for Passcode {
    type Error = PasscodeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Owner of a comment: a registered account or an anonymous guest.
///
/// Guests are stored with the sentinel owner id `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentOwner {
    /// Anonymous submission.
    Guest,
    /// Submission made while logged in.
    User(UserId),
}

impl CommentOwner {
    /// Owner id persisted for guest submissions.
    pub const GUEST_SENTINEL: i32 = 0;

    /// Integer written to the `user_id` column.
    #[must_use]
    pub fn as_stored(self) -> i32 {
        match self {
            Self::Guest => Self::GUEST_SENTINEL,
            Self::User(id) => id.get(),
        }
    }

    /// Decode a stored owner id; anything non-positive is a guest.
    #[must_use]
    pub fn from_stored(value: i32) -> Self {
        UserId::new(value).map_or(Self::Guest, Self::User)
    }
}

impl From<Option<UserId>> for CommentOwner {
    fn from(value: Option<UserId>) -> Self {
        value.map_or(Self::Guest, Self::User)
    }
}

/// Comment ready for insertion. The store assigns the row id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    /// Submitting account, or a guest.
    pub owner: CommentOwner,
    /// Consultation sector.
    pub sector: Sector,
    /// Trimmed comment text.
    pub text: String,
    /// Lowercase sentiment label.
    pub sentiment: String,
    /// Stored synopsis.
    pub summary: String,
    /// Unique tracking code.
    pub passcode: Passcode,
    /// Workflow status, `Submitted` on creation.
    pub status: String,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

/// Flat view of a stored comment, shared with UI and report consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    /// Consultation sector.
    #[schema(value_type = String, example = "Transport")]
    pub sector: Sector,
    /// Comment text as stored.
    pub comment: String,
    /// Lowercase sentiment label.
    #[schema(example = "negative")]
    pub sentiment: String,
    /// Stored synopsis.
    pub summary: String,
    /// Tracking code.
    #[schema(value_type = String, example = "k3v9q2xa")]
    pub passcode: Passcode,
    /// Workflow status.
    pub status: String,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 0)]
    #[case("abc", 3)]
    #[case("abcdefghi", 9)]
    #[case("  k3v9q2xa\t", 11)]
    fn wrong_lengths_are_rejected(#[case] raw: &str, #[case] actual: usize) {
        assert_eq!(
            Passcode::parse(raw),
            Err(PasscodeValidationError::WrongLength {
                expected: PASSCODE_LEN,
                actual,
            })
        );
    }

    #[rstest]
    #[case("ABCDEFGH")]
    #[case("abcd-fgh")]
    #[case("abcdéfgh")]
    #[case(" abcdefg")]
    fn foreign_characters_are_rejected(#[case] raw: &str) {
        assert_eq!(
            Passcode::parse(raw),
            Err(PasscodeValidationError::InvalidCharacter)
        );
    }

    #[rstest]
    #[case(vec![0], "aaaaaaaa")]
    #[case(vec![35], "99999999")]
    #[case(vec![36, 37], "abababab")]
    #[case(vec![0, 1, 2, 3, 26, 27, 28, 29], "abcd0123")]
    fn draws_map_onto_the_alphabet(#[case] draws: Vec<usize>, #[case] expected: &str) {
        let mut cycle = draws.into_iter().cycle();
        let code = Passcode::from_draws(|| cycle.next().unwrap_or_default());
        assert_eq!(code.as_str(), expected);
        assert_eq!(Passcode::parse(code.as_str()), Ok(code));
    }

    #[rstest]
    fn hex_codes_from_earlier_deployments_still_parse() {
        assert!(Passcode::parse("9f86d081").is_ok());
    }

    #[rstest]
    #[case(0, CommentOwner::Guest)]
    #[case(-1, CommentOwner::Guest)]
    fn non_positive_owner_ids_decode_as_guest(#[case] stored: i32, #[case] owner: CommentOwner) {
        assert_eq!(CommentOwner::from_stored(stored), owner);
    }

    #[rstest]
    fn owner_round_trips_through_storage() {
        let id = UserId::new(12).expect("valid id");
        let owner = CommentOwner::User(id);
        assert_eq!(CommentOwner::from_stored(owner.as_stored()), owner);
        assert_eq!(CommentOwner::Guest.as_stored(), 0);
    }
}
