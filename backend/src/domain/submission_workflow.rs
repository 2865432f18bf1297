//! Submission workflow: validate, analyse, persist, hand back a passcode.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::ports::{SubmissionReceipt, SubmissionRequest, SubmissionService};
use super::{
    CommentAnalysis, CommentOwner, CommentView, ConsultationError, Error, Passcode, RecordStore,
    Sector, Sentiment, TextAnalyzer, UserId,
};

/// Minimum comment length in characters, after trimming.
pub const MIN_COMMENT_CHARS: usize = 5;

/// Orchestrates a single comment submission.
///
/// Analysis always runs before persistence, classification before
/// summarisation. Model faults are absorbed by the [`TextAnalyzer`]; only
/// validation and storage failures escape.
#[derive(Clone)]
pub struct SubmissionWorkflow {
    analyzer: Arc<TextAnalyzer>,
    store: Arc<RecordStore>,
}

impl SubmissionWorkflow {
    /// Wire the workflow to its analyzer and store.
    pub fn new(analyzer: Arc<TextAnalyzer>, store: Arc<RecordStore>) -> Self {
        Self { analyzer, store }
    }

    /// Submit a comment and return its passcode with the computed analysis.
    pub async fn submit_comment(
        &self,
        owner: CommentOwner,
        sector: Sector,
        text: &str,
        use_heavy_models: bool,
    ) -> Result<(Passcode, Sentiment, String), ConsultationError> {
        validate_text(text)?;

        let sentiment = self.analyzer.classify(text, use_heavy_models).await;
        let summary = self.analyzer.summarize(text, use_heavy_models).await;
        let passcode = self
            .store
            .add_comment(
                owner,
                sector,
                text,
                CommentAnalysis {
                    sentiment: sentiment.label(),
                    summary: &summary,
                },
            )
            .await?;

        info!(
            passcode = %passcode,
            sector = %sector,
            sentiment = sentiment.label(),
            guest = matches!(owner, CommentOwner::Guest),
            "comment submitted"
        );
        Ok((passcode, sentiment, summary))
    }
}

fn validate_text(text: &str) -> Result<(), ConsultationError> {
    let length = text.trim().chars().count();
    if length < MIN_COMMENT_CHARS {
        return Err(ConsultationError::invalid_input(format!(
            "comment must contain at least {MIN_COMMENT_CHARS} characters"
        )));
    }
    Ok(())
}

#[async_trait]
impl SubmissionService for SubmissionWorkflow {
    async fn submit(&self, request: SubmissionRequest) -> Result<SubmissionReceipt, Error> {
        let SubmissionRequest {
            owner,
            sector,
            text,
            use_heavy_models,
        } = request;
        let (passcode, sentiment, summary) = self
            .submit_comment(owner, sector, &text, use_heavy_models)
            .await?;
        Ok(SubmissionReceipt {
            passcode,
            sentiment,
            summary,
        })
    }

    async fn track(&self, passcode: &str) -> Result<Option<CommentView>, Error> {
        Ok(self.store.get_by_passcode(passcode).await?)
    }

    async fn list_mine(&self, user_id: UserId) -> Result<Vec<CommentView>, Error> {
        Ok(self.store.list_for_user(user_id).await?)
    }
}

#[cfg(test)]
#[path = "submission_workflow_tests.rs"]
mod tests;
