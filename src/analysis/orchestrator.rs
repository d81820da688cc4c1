use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task;
use tokio::time::timeout;
use tracing::{error, info, instrument, warn};

use crate::analysis::report::{ArticleReport, PipelineError, ProcessingStatus, Stage};
use crate::fetcher::ArticleSource;
use crate::sanitizer::Sanitizer;
use crate::text::{JaundiceScore, Lexicon, MorphAnalyzer, calculate_jaundice_rate, normalize};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_ANALYSIS_TIMEOUT: Duration = Duration::from_secs(3);

/// Time budgets of one article run. Both are always applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budgets {
    /// Covers the network retrieval only.
    pub fetch: Duration,
    /// Covers sanitize + normalize + score.
    pub analysis: Duration,
}

impl Default for Budgets {
    fn default() -> Self {
        Self {
            fetch: DEFAULT_FETCH_TIMEOUT,
            analysis: DEFAULT_ANALYSIS_TIMEOUT,
        }
    }
}

/// Runs fetch → sanitize → normalize → score for single URLs.
///
/// Holds handles to the shared resources only, so cloning it into every task
/// of a batch is cheap and never duplicates the analyzer or the lexicon.
#[derive(Clone)]
pub struct ArticlePipeline {
    source: Arc<dyn ArticleSource>,
    sanitizer: Arc<dyn Sanitizer>,
    analyzer: Arc<dyn MorphAnalyzer>,
    lexicon: Arc<Lexicon>,
    budgets: Budgets,
}

impl ArticlePipeline {
    pub fn new(
        source: Arc<dyn ArticleSource>,
        sanitizer: Arc<dyn Sanitizer>,
        analyzer: Arc<dyn MorphAnalyzer>,
        lexicon: Arc<Lexicon>,
    ) -> Self {
        Self {
            source,
            sanitizer,
            analyzer,
            lexicon,
            budgets: Budgets::default(),
        }
    }

    pub fn with_budgets(mut self, budgets: Budgets) -> Self {
        self.budgets = budgets;
        self
    }

    pub fn with_fetch_timeout(mut self, fetch: Duration) -> Self {
        self.budgets.fetch = fetch;
        self
    }

    pub fn with_analysis_timeout(mut self, analysis: Duration) -> Self {
        self.budgets.analysis = analysis;
        self
    }

    pub fn budgets(&self) -> Budgets {
        self.budgets
    }

    /// Process one URL. Never fails: every outcome, including a panic inside
    /// the pipeline, becomes a classified report.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn process(&self, url: &str) -> ArticleReport {
        let outcome = match AssertUnwindSafe(self.run(url)).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(panic) => Err(PipelineError::Panicked(panic_message(panic.as_ref()))),
        };

        match outcome {
            Ok(score) => {
                info!(rate = score.rate, length = score.length, "article scored");
                ArticleReport::ok(url, score)
            }
            Err(err) => {
                let status = ProcessingStatus::from(&err);
                if matches!(err, PipelineError::Panicked(_)) {
                    error!(%status, error = %err, "article pipeline crashed");
                } else {
                    warn!(%status, error = %err, "article not scored");
                }
                ArticleReport::failed(url, status)
            }
        }
    }

    async fn run(&self, url: &str) -> Result<JaundiceScore, PipelineError> {
        let html = timeout(self.budgets.fetch, self.source.fetch(url))
            .await
            .map_err(|_| PipelineError::Timeout {
                stage: Stage::Fetching,
                budget: self.budgets.fetch,
            })??;

        let started = Instant::now();
        let analysis = timeout(self.budgets.analysis, self.analyze(html)).await;
        let elapsed = (started.elapsed().as_secs_f64() * 100.0).round() / 100.0;
        info!(elapsed_secs = elapsed, "article analysis finished");

        analysis.map_err(|_| PipelineError::Timeout {
            stage: Stage::Analyzing,
            budget: self.budgets.analysis,
        })?
    }

    // HTML parsing is CPU-bound and cannot yield, so it runs on the blocking
    // pool. On timeout the handle is dropped and the parse finishes detached.
    async fn analyze(&self, html: String) -> Result<JaundiceScore, PipelineError> {
        let sanitizer = self.sanitizer.clone();
        let text = task::spawn_blocking(move || sanitizer.sanitize(&html))
            .await
            .map_err(|join_error| {
                if join_error.is_panic() {
                    PipelineError::Panicked(panic_message(join_error.into_panic().as_ref()))
                } else {
                    PipelineError::Panicked(join_error.to_string())
                }
            })??;
        let words = normalize(self.analyzer.as_ref(), &text).await;
        Ok(calculate_jaundice_rate(&words, &self.lexicon))
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
