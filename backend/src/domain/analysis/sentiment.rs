//! Sentiment label with confidence.

use serde::{Deserialize, Serialize};

/// Label attached to heuristic negative matches.
pub(super) const NEGATIVE: &str = "negative";
/// Label attached to heuristic positive matches.
pub(super) const POSITIVE: &str = "positive";
/// Label used when no keyword matches.
pub(super) const NEUTRAL: &str = "neutral";

/// Classifier output: a lowercase label and a confidence in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    label: String,
    confidence: f32,
}

impl Sentiment {
    /// Build a sentiment, lowercasing the label and clamping the confidence.
    ///
    /// # Examples
    /// ```
    /// use econsult::domain::Sentiment;
    ///
    /// let sentiment = Sentiment::new("POSITIVE", 1.7);
    /// assert_eq!(sentiment.label(), "positive");
    /// assert!((sentiment.confidence() - 1.0).abs() < f32::EPSILON);
    /// ```
    pub fn new(label: impl AsRef<str>, confidence: f32) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            label: label.as_ref().to_lowercase(),
            confidence,
        }
    }

    /// Keyword heuristic verdict for negative text.
    #[must_use]
    pub fn negative() -> Self {
        Self::new(NEGATIVE, 0.9)
    }

    /// Keyword heuristic verdict for positive text.
    #[must_use]
    pub fn positive() -> Self {
        Self::new(POSITIVE, 0.9)
    }

    /// Keyword heuristic verdict when nothing matched.
    #[must_use]
    pub fn neutral() -> Self {
        Self::new(NEUTRAL, 0.6)
    }

    /// Lowercase label.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Confidence in `[0, 1]`.
    #[must_use]
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Consume the sentiment, keeping the label.
    #[must_use]
    pub fn into_label(self) -> String {
        self.label
    }
}
