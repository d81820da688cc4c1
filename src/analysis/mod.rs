//! The per-article pipeline and the batch runner built on it.

pub mod batch;
pub mod orchestrator;
pub mod report;

pub use batch::BatchCoordinator;
pub use orchestrator::{ArticlePipeline, Budgets};
pub use report::{ArticleReport, PipelineError, ProcessingStatus, Stage};
