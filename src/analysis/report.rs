use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::Duration;
use thiserror::Error;
use utoipa::ToSchema;

use crate::fetcher::FetchError;
use crate::sanitizer::SanitizeError;
use crate::text::JaundiceScore;

/// Outcome class of one article. Exactly one per submitted URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingStatus {
    Ok,
    FetchError,
    ParsingError,
    Timeout,
}

impl ProcessingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::FetchError => "FETCH_ERROR",
            Self::ParsingError => "PARSING_ERROR",
            Self::Timeout => "TIMEOUT",
        }
    }
}

impl Display for ProcessingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result for one submitted URL. `rate` and `length` are set only when
/// `status` is `OK`; use the constructors to keep it that way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ArticleReport {
    pub url: String,
    pub status: ProcessingStatus,
    pub rate: Option<f64>,
    pub length: Option<usize>,
}

impl ArticleReport {
    pub fn ok(url: impl Into<String>, score: JaundiceScore) -> Self {
        Self {
            url: url.into(),
            status: ProcessingStatus::Ok,
            rate: Some(score.rate),
            length: Some(score.length),
        }
    }

    pub fn failed(url: impl Into<String>, status: ProcessingStatus) -> Self {
        debug_assert_ne!(status, ProcessingStatus::Ok, "failed report with OK status");
        Self {
            url: url.into(),
            status,
            rate: None,
            length: None,
        }
    }
}

/// Stage of the per-article pipeline. Transitions only move forward; a
/// failure in any stage ends the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Analyzing,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetching => f.write_str("fetch"),
            Self::Analyzing => f.write_str("analysis"),
        }
    }
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{stage} exceeded its budget of {budget:?}")]
    Timeout { stage: Stage, budget: Duration },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Sanitize(#[from] SanitizeError),

    /// Unexpected internal failure. Reported as a fetch error so the batch
    /// still gets a report for the URL.
    #[error("pipeline panicked: {0}")]
    Panicked(String),
}

impl From<&PipelineError> for ProcessingStatus {
    fn from(err: &PipelineError) -> Self {
        match err {
            PipelineError::Timeout { .. } => Self::Timeout,
            PipelineError::Fetch(fetch) if fetch.is_source_rejection() => Self::ParsingError,
            PipelineError::Fetch(_) => Self::FetchError,
            PipelineError::Sanitize(_) => Self::ParsingError,
            PipelineError::Panicked(_) => Self::FetchError,
        }
    }
}
