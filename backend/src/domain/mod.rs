//! Domain primitives, services, and ports.
//!
//! Purpose: hold the consultation rules independent of HTTP and SQLite.
//! Inbound adapters call the services through the driving ports in
//! [`ports`]; outbound adapters implement the driven ports there.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error envelope.
//! - User, auth, sector and comment value types with their invariants.
//! - TextAnalyzer: two-tier sentiment classifier and summariser.
//! - RecordStore: accounts, comments and passcode lookups.
//! - SubmissionWorkflow: validate, analyse, persist.
//! - SubmissionReport: export-ready listing of a user's comments.

pub mod analysis;
pub mod auth;
pub mod comment;
pub mod consultation_error;
pub mod error;
pub mod ports;
pub mod record_store;
pub mod report;
pub mod sector;
pub mod submission_workflow;
pub mod trace_id;
pub mod user;

pub use self::analysis::{
    DEFAULT_SUMMARY_MAX_CHARS, KeywordSet, KeywordSetError, MODEL_INPUT_MAX_CHARS, Sentiment,
    TextAnalyzer, heuristic_summary, truncate_chars,
};
pub use self::auth::{Credentials, CredentialsValidationError, Registration};
pub use self::comment::{
    CommentOwner, CommentView, INITIAL_STATUS, NewComment, PASSCODE_ALPHABET, PASSCODE_LEN,
    Passcode, PasscodeValidationError,
};
pub use self::consultation_error::ConsultationError;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::record_store::{
    CommentAnalysis, MAX_PASSCODE_ATTEMPTS, RecordStore, RecordStorePorts,
};
pub use self::report::{PREVIEW_MAX_CHARS, ReportEntry, SubmissionReport};
pub use self::sector::{Sector, UnknownSector};
pub use self::submission_workflow::{MIN_COMMENT_CHARS, SubmissionWorkflow};
pub use self::trace_id::TraceId;
pub use self::user::{
    MOBILE_MAX, Mobile, NewUser, StoredUser, USERNAME_MAX, UserId, UserValidationError, Username,
};

/// Result alias for handlers and services returning the error envelope.
///
/// # Examples
/// ```
/// use econsult::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("no comment with that passcode"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
