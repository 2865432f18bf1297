//! Keyword lists driving the heuristic classifier.
//!
//! The lists are data: deployments can load their own from JSON and tests can
//! substitute fixtures without touching the classifier.

use serde::{Deserialize, Serialize};

use super::Sentiment;

const DEFAULT_NEGATIVE: [&str; 6] = ["delay", "bad", "not working", "poor", "stop", "urgent"];
const DEFAULT_POSITIVE: [&str; 6] = ["good", "great", "thank", "appreciate", "resolved", "helpful"];

/// Errors raised while decoding a keyword set.
#[derive(Debug, thiserror::Error)]
pub enum KeywordSetError {
    /// The document is not valid JSON for a keyword set.
    #[error("invalid keyword set: {0}")]
    Decode(#[from] serde_json::Error),
    /// Both lists were empty, which would classify everything as neutral.
    #[error("keyword set must contain at least one term")]
    Empty,
}

/// Negative and positive trigger terms.
///
/// Terms are matched as lowercase substrings. Blank terms are dropped on
/// construction because an empty needle matches everything.
///
/// # Examples
/// ```
/// use econsult::domain::{KeywordSet, Sentiment};
///
/// let keywords = KeywordSet::default();
/// assert_eq!(keywords.classify("Great work, thank you"), Sentiment::positive());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "KeywordSetDto")]
pub struct KeywordSet {
    negative: Vec<String>,
    positive: Vec<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct KeywordSetDto {
    #[serde(default)]
    negative: Vec<String>,
    #[serde(default)]
    positive: Vec<String>,
}

impl TryFrom<KeywordSetDto> for KeywordSet {
    type Error = KeywordSetError;

    fn try_from(value: KeywordSetDto) -> Result<Self, Self::Error> {
        Self::new(value.negative, value.positive)
    }
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self {
            negative: DEFAULT_NEGATIVE.iter().map(|term| (*term).to_owned()).collect(),
            positive: DEFAULT_POSITIVE.iter().map(|term| (*term).to_owned()).collect(),
        }
    }
}

impl KeywordSet {
    /// Build a set from raw term lists, normalising case and dropping blanks.
    pub fn new<N, P>(negative: N, positive: P) -> Result<Self, KeywordSetError>
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        let negative = normalise(negative);
        let positive = normalise(positive);
        if negative.is_empty() && positive.is_empty() {
            return Err(KeywordSetError::Empty);
        }
        Ok(Self { negative, positive })
    }

    /// Decode a set from a JSON document `{"negative": [..], "positive": [..]}`.
    pub fn from_json(document: &str) -> Result<Self, KeywordSetError> {
        Ok(serde_json::from_str(document)?)
    }

    /// Negative trigger terms.
    #[must_use]
    pub fn negative(&self) -> &[String] {
        &self.negative
    }

    /// Positive trigger terms.
    #[must_use]
    pub fn positive(&self) -> &[String] {
        &self.positive
    }

    /// Classify `text` by keyword presence.
    ///
    /// Negative terms are checked first, so text containing both kinds is
    /// classified negative.
    #[must_use]
    pub fn classify(&self, text: &str) -> Sentiment {
        let folded = text.to_lowercase();
        if self.negative.iter().any(|term| folded.contains(term.as_str())) {
            return Sentiment::negative();
        }
        if self.positive.iter().any(|term| folded.contains(term.as_str())) {
            return Sentiment::positive();
        }
        Sentiment::neutral()
    }
}

fn normalise<I>(terms: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    terms
        .into_iter()
        .map(|term| term.as_ref().trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect()
}
