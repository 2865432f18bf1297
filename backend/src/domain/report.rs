//! Submission report handed to export collaborators.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CommentView, Passcode, Sector, truncate_chars};

/// Characters of the summary kept in a report preview.
pub const PREVIEW_MAX_CHARS: usize = 140;

/// One line of a [`SubmissionReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    /// Consultation sector.
    #[schema(value_type = String, example = "Transport")]
    pub sector: Sector,
    /// Tracking code.
    #[schema(value_type = String, example = "k3v9q2xa")]
    pub passcode: Passcode,
    /// Full comment text.
    pub comment: String,
    /// Lowercase sentiment label.
    pub sentiment: String,
    /// Workflow status.
    pub status: String,
    /// Summary cut to [`PREVIEW_MAX_CHARS`], with `...` when shortened.
    pub preview: String,
}

/// A user's submissions flattened for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReport {
    /// Number of entries.
    pub total: usize,
    /// Entries in listing order.
    pub entries: Vec<ReportEntry>,
}

impl SubmissionReport {
    /// Build a report from listed views, keeping their order.
    ///
    /// # Examples
    /// ```
    /// use econsult::domain::SubmissionReport;
    ///
    /// let report = SubmissionReport::from_views(Vec::new());
    /// assert_eq!(report.total, 0);
    /// ```
    #[must_use]
    pub fn from_views(views: Vec<CommentView>) -> Self {
        let entries: Vec<ReportEntry> = views.into_iter().map(ReportEntry::from).collect();
        Self {
            total: entries.len(),
            entries,
        }
    }
}

impl From<CommentView> for ReportEntry {
    fn from(view: CommentView) -> Self {
        Self {
            preview: preview(&view.summary),
            sector: view.sector,
            passcode: view.passcode,
            comment: view.comment,
            sentiment: view.sentiment,
            status: view.status,
        }
    }
}

fn preview(summary: &str) -> String {
    let kept = truncate_chars(summary, PREVIEW_MAX_CHARS);
    if kept.len() == summary.len() {
        kept.to_owned()
    } else {
        format!("{kept}...")
    }
}
