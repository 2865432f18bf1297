//! Ports for the optional heavy text models.
//!
//! The heavy backend is a black box: given text it returns a label and score,
//! or a short summary, and may fail at any time. Callers never surface these
//! failures; the analyzer falls back to keyword heuristics instead.

use std::sync::Arc;

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Failures raised by heavy model adapters.
    pub enum TextModelError {
        /// The models could not be loaded or reached.
        Unavailable { message: String } => "text model unavailable: {message}",
        /// A call reached the model but produced no usable answer.
        Inference { message: String } => "text model inference failed: {message}",
    }
}

/// Raw sentiment prediction from a heavy model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelLabel {
    /// Label as reported by the model; casing is not normalised.
    pub label: String,
    /// Model confidence in `[0, 1]`.
    pub score: f32,
}

/// Requested summary length, in model tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryBounds {
    /// Shortest summary asked for.
    pub min_tokens: u32,
    /// Longest summary asked for.
    pub max_tokens: u32,
}

impl Default for SummaryBounds {
    fn default() -> Self {
        Self {
            min_tokens: 5,
            max_tokens: 40,
        }
    }
}

/// Sentiment classification model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SentimentModel: Send + Sync {
    /// Classify `text`.
    async fn classify(&self, text: &str) -> Result<ModelLabel, TextModelError>;
}

/// Abstractive summarisation model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SummaryModel: Send + Sync {
    /// Summarise `text` within `bounds`.
    async fn summarize(&self, text: &str, bounds: SummaryBounds)
    -> Result<String, TextModelError>;
}

/// Handles to a loaded heavy backend.
#[derive(Clone)]
pub struct HeavyModels {
    /// Sentiment classifier.
    pub sentiment: Arc<dyn SentimentModel>,
    /// Summariser.
    pub summary: Arc<dyn SummaryModel>,
}

impl std::fmt::Debug for HeavyModels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeavyModels").finish_non_exhaustive()
    }
}

/// Loads the heavy backend. Expected to be slow; called once at startup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelLoader: Send + Sync {
    /// Load and warm up the models.
    async fn load(&self) -> Result<HeavyModels, TextModelError>;
}
