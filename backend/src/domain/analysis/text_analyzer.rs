//! Two-tier classifier and summariser.

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::domain::ports::{HeavyModels, ModelLoader, SummaryBounds};

use super::{KeywordSet, Sentiment};

/// Default upper bound for heuristic summaries, in characters.
pub const DEFAULT_SUMMARY_MAX_CHARS: usize = 120;
/// Longest prefix of a comment handed to the sentiment model.
pub const MODEL_INPUT_MAX_CHARS: usize = 512;

/// Classifies and summarises comment text.
///
/// Holds at most one heavy backend for its whole lifetime. The backend is
/// loaded by [`TextAnalyzer::enable_heavy_models`]; a failed load pins the
/// analyzer to the heuristics and later enable calls do not retry.
///
/// # Examples
/// ```
/// use econsult::domain::{KeywordSet, Sentiment, TextAnalyzer};
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let analyzer = TextAnalyzer::new(KeywordSet::default(), 120);
/// let sentiment = analyzer.classify("Road repair is delayed and urgent", true).await;
/// assert_eq!(sentiment, Sentiment::negative());
/// # });
/// ```
#[derive(Debug)]
pub struct TextAnalyzer {
    keywords: KeywordSet,
    summary_max_chars: usize,
    heavy: OnceCell<Option<HeavyModels>>,
}

impl TextAnalyzer {
    /// Create an analyzer with only the heuristic tier available.
    #[must_use]
    pub fn new(keywords: KeywordSet, summary_max_chars: usize) -> Self {
        Self {
            keywords,
            summary_max_chars,
            heavy: OnceCell::new(),
        }
    }

    /// Load the heavy backend once; returns whether it is available.
    ///
    /// Concurrent callers wait on the same load. After the first attempt the
    /// outcome is cached, success or not.
    pub async fn enable_heavy_models(&self, loader: &dyn ModelLoader) -> bool {
        let slot = self
            .heavy
            .get_or_init(|| async {
                match loader.load().await {
                    Ok(models) => {
                        info!("heavy text models loaded");
                        Some(models)
                    }
                    Err(error) => {
                        warn!(%error, "heavy text models unavailable; using keyword heuristics");
                        None
                    }
                }
            })
            .await;
        slot.is_some()
    }

    /// Whether a heavy backend is loaded.
    #[must_use]
    pub fn heavy_models_loaded(&self) -> bool {
        self.heavy_models().is_some()
    }

    fn heavy_models(&self) -> Option<&HeavyModels> {
        self.heavy.get().and_then(Option::as_ref)
    }

    fn requested_models(&self, use_heavy_model: bool) -> Option<&HeavyModels> {
        if use_heavy_model {
            self.heavy_models()
        } else {
            None
        }
    }

    /// Classify `text`, preferring the heavy backend when asked and loaded.
    pub async fn classify(&self, text: &str, use_heavy_model: bool) -> Sentiment {
        if let Some(models) = self.requested_models(use_heavy_model) {
            let input = truncate_chars(text, MODEL_INPUT_MAX_CHARS);
            match models.sentiment.classify(input).await {
                Ok(prediction) => return Sentiment::new(prediction.label, prediction.score),
                Err(error) => warn!(%error, "sentiment model failed; using keyword heuristic"),
            }
        }
        self.keywords.classify(text)
    }

    /// Summarise `text`, preferring the heavy backend when asked and loaded.
    ///
    /// Model output is capped at the same character bound as heuristic
    /// summaries.
    pub async fn summarize(&self, text: &str, use_heavy_model: bool) -> String {
        if let Some(models) = self.requested_models(use_heavy_model) {
            match models.summary.summarize(text, SummaryBounds::default()).await {
                Ok(summary) if !summary.trim().is_empty() => {
                    return truncate_chars(summary.trim(), self.summary_max_chars).to_owned();
                }
                Ok(_) => warn!("summary model returned nothing; using first sentence"),
                Err(error) => warn!(%error, "summary model failed; using first sentence"),
            }
        }
        heuristic_summary(text, self.summary_max_chars)
    }
}

/// First sentence of `text`, trimmed and capped at `max_chars` characters.
///
/// Sentences end at `.`, `!`, `?` or a newline. When the first sentence is
/// blank the whole trimmed text is used instead, so input such as `"...ok"`
/// still yields something; blank input yields an empty string.
///
/// # Examples
/// ```
/// use econsult::domain::heuristic_summary;
///
/// assert_eq!(heuristic_summary("Fix the road. It floods.", 120), "Fix the road");
/// assert_eq!(heuristic_summary("   ", 120), "");
/// ```
#[must_use]
pub fn heuristic_summary(text: &str, max_chars: usize) -> String {
    let first = text
        .split(['.', '!', '?', '\n'])
        .next()
        .map(str::trim)
        .unwrap_or_default();
    let chosen = if first.is_empty() { text.trim() } else { first };
    truncate_chars(chosen, max_chars).to_owned()
}

/// Longest prefix of `text` holding at most `max_chars` characters.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((boundary, _)) => text.get(..boundary).unwrap_or(text),
        None => text,
    }
}

#[cfg(test)]
#[path = "text_analyzer_tests.rs"]
mod tests;
