use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};

/// Query of the rating endpoint: `?urls=https://a,https://b`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalyzeQuery {
    /// Comma-separated article URLs.
    pub urls: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BatchInputError {
    #[error("no urls given")]
    Missing,

    #[error("too many urls in request, should be {max} or less")]
    TooMany { max: usize, got: usize },
}

impl AnalyzeQuery {
    /// Split the raw list on commas. Only the list as a whole is trimmed;
    /// every entry, blank ones included, is reported under the exact string
    /// that was submitted.
    pub fn validate(&self, max: usize) -> Result<Vec<String>, BatchInputError> {
        let raw = self.urls.as_deref().unwrap_or_default().trim();
        if raw.is_empty() {
            return Err(BatchInputError::Missing);
        }
        validate_urls(raw.split(','), max)
    }
}

/// Enforce the batch cap. URLs are passed through untouched; the pipeline
/// judges them.
pub fn validate_urls<I, S>(urls: I, max: usize) -> Result<Vec<String>, BatchInputError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let urls: Vec<String> = urls
        .into_iter()
        .map(|u| u.as_ref().to_string())
        .collect();

    if urls.is_empty() {
        return Err(BatchInputError::Missing);
    }
    if urls.len() > max {
        return Err(BatchInputError::TooMany {
            max,
            got: urls.len(),
        });
    }
    Ok(urls)
}
