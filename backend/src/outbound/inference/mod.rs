//! Heavy text models reached over HTTP.
//!
//! The inference service follows the Hugging Face pipeline wire shapes:
//! `POST /sentiment` answers `[{"label","score"}]` and `POST /summarize`
//! answers `[{"summary_text"}]`. `GET /health` must succeed before the
//! models are handed to the analyzer.

mod dto;
mod http_models;

pub use http_models::{HttpModelLoader, HttpSentimentModel, HttpSummaryModel};
