//! Driving port for submitting and tracking consultation comments.

use async_trait::async_trait;

use crate::domain::{CommentOwner, CommentView, Error, Passcode, Sector, Sentiment, UserId};

/// Comment submission as accepted from an inbound adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    /// Submitting account, or a guest.
    pub owner: CommentOwner,
    /// Consultation sector.
    pub sector: Sector,
    /// Raw comment text; trimmed and validated by the workflow.
    pub text: String,
    /// Ask for the heavy backend; honoured only when it is loaded.
    pub use_heavy_models: bool,
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    /// Tracking code for the stored comment.
    pub passcode: Passcode,
    /// Classification that was stored.
    pub sentiment: Sentiment,
    /// Synopsis that was stored.
    pub summary: String,
}

/// Domain use-case port for the submission workflow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// Classify, summarise and persist a comment.
    async fn submit(&self, request: SubmissionRequest) -> Result<SubmissionReceipt, Error>;

    /// Look up a comment by its passcode. Malformed codes are simply absent.
    async fn track(&self, passcode: &str) -> Result<Option<CommentView>, Error>;

    /// List the caller's comments, most recent first.
    async fn list_mine(&self, user_id: UserId) -> Result<Vec<CommentView>, Error>;
}
