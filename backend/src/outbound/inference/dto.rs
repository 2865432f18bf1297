//! Wire types for the inference service.

use serde::{Deserialize, Serialize};

use crate::domain::ports::{ModelLabel, SummaryBounds, TextModelError};

#[derive(Debug, Serialize)]
pub(super) struct SentimentRequestDto<'a> {
    pub inputs: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct SummaryParametersDto {
    pub min_length: u32,
    pub max_length: u32,
}

impl From<SummaryBounds> for SummaryParametersDto {
    fn from(bounds: SummaryBounds) -> Self {
        Self {
            min_length: bounds.min_tokens,
            max_length: bounds.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct SummaryRequestDto<'a> {
    pub inputs: &'a str,
    pub parameters: SummaryParametersDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct LabelDto {
    pub label: String,
    pub score: f32,
}

#[derive(Debug, Deserialize)]
pub(super) struct SummaryDto {
    pub summary_text: String,
}

/// Take the first prediction; the pipeline returns one per input.
pub(super) fn first_label(body: &[u8]) -> Result<ModelLabel, TextModelError> {
    let labels: Vec<LabelDto> = serde_json::from_slice(body)
        .map_err(|err| TextModelError::inference(format!("invalid sentiment payload: {err}")))?;
    labels
        .into_iter()
        .next()
        .map(|dto| ModelLabel {
            label: dto.label,
            score: dto.score,
        })
        .ok_or_else(|| TextModelError::inference("sentiment payload held no predictions"))
}

pub(super) fn first_summary(body: &[u8]) -> Result<String, TextModelError> {
    let summaries: Vec<SummaryDto> = serde_json::from_slice(body)
        .map_err(|err| TextModelError::inference(format!("invalid summary payload: {err}")))?;
    summaries
        .into_iter()
        .next()
        .map(|dto| dto.summary_text)
        .ok_or_else(|| TextModelError::inference("summary payload held no summaries"))
}
