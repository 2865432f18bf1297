//! Sentiment classification and summarisation of comment text.
//!
//! Two tiers: an optional heavy backend reached through
//! [`crate::domain::ports::ModelLoader`], and always-available keyword and
//! truncation heuristics. Heavy failures never escape this module.

mod keywords;
mod sentiment;
mod text_analyzer;

pub use keywords::{KeywordSet, KeywordSetError};
pub use sentiment::Sentiment;
pub use text_analyzer::{
    DEFAULT_SUMMARY_MAX_CHARS, MODEL_INPUT_MAX_CHARS, TextAnalyzer, heuristic_summary,
    truncate_chars,
};
