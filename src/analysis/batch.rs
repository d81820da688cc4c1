use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::{Instrument, error, info, info_span, instrument};

use crate::analysis::orchestrator::ArticlePipeline;
use crate::analysis::report::{ArticleReport, ProcessingStatus};

pub const DEFAULT_MAX_CONCURRENT: usize = 10;

/// Fans a batch of URLs out to one pipeline task each and collects one report
/// per URL.
#[derive(Clone)]
pub struct BatchCoordinator {
    pipeline: ArticlePipeline,
    max_concurrent: usize,
}

impl BatchCoordinator {
    pub fn new(pipeline: ArticlePipeline) -> Self {
        Self {
            pipeline,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    /// Cap on pipelines running at once. Extra tasks wait for a slot; they are
    /// never dropped.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    pub fn pipeline(&self) -> &ArticlePipeline {
        &self.pipeline
    }

    /// Process every URL concurrently and wait for all of them.
    ///
    /// Returns exactly one report per input URL, duplicates included, in
    /// completion order. Dropping the returned future aborts the in-flight
    /// tasks, so none outlives the call.
    #[instrument(skip_all, fields(batch_size = urls.len()))]
    pub async fn run_batch(&self, urls: Vec<String>) -> Vec<ArticleReport> {
        let batch_size = urls.len();
        let (results_tx, mut results_rx) = mpsc::unbounded_channel();
        let slots = Arc::new(Semaphore::new(self.max_concurrent));

        let mut tasks = JoinSet::new();
        let mut urls_by_task = HashMap::with_capacity(batch_size);

        for (index, url) in urls.into_iter().enumerate() {
            let pipeline = self.pipeline.clone();
            let results_tx = results_tx.clone();
            let slots = slots.clone();
            let task_url = url.clone();

            let handle = tasks.spawn(
                async move {
                    // The semaphore is never closed, so this only fails if the
                    // batch itself is being torn down.
                    let _slot = slots.acquire_owned().await.ok();
                    let report = pipeline.process(&task_url).await;
                    // The receiver outlives every task.
                    let _ = results_tx.send(report);
                }
                .instrument(info_span!("article", index)),
            );
            urls_by_task.insert(handle.id(), url);
        }
        drop(results_tx);

        let mut reports = Vec::with_capacity(batch_size);
        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((id, ())) => {
                    urls_by_task.remove(&id);
                }
                Err(join_error) => {
                    // Pipelines catch their own panics; this is the last line
                    // that keeps one report per URL.
                    if let Some(url) = urls_by_task.remove(&join_error.id()) {
                        error!(%url, error = %join_error, "article task died without a report");
                        reports.push(ArticleReport::failed(url, ProcessingStatus::FetchError));
                    }
                }
            }
        }

        while let Some(report) = results_rx.recv().await {
            reports.push(report);
        }

        let ok = reports
            .iter()
            .filter(|r| r.status == ProcessingStatus::Ok)
            .count();
        info!(reports = reports.len(), ok, "batch finished");
        reports
    }
}
