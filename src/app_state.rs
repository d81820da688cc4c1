use anyhow::Context;
use std::sync::Arc;
use tracing::info;

use crate::analysis::{ArticlePipeline, BatchCoordinator, Budgets};
use crate::config::Config;
use crate::fetcher::{FetchError, Fetcher};
use crate::sanitizer::{InosmiSanitizer, Sanitizer};
use crate::text::{DictionaryAnalyzer, Lexicon, MorphAnalyzer};

/// Process-wide resources: loaded once at startup, shared by every batch.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub lexicon: Arc<Lexicon>,
    pub analyzer: Arc<dyn MorphAnalyzer>,
    pub sanitizer: Arc<dyn Sanitizer>,
}

impl AppState {
    pub fn new(
        config: Config,
        lexicon: Lexicon,
        analyzer: Arc<dyn MorphAnalyzer>,
        sanitizer: Arc<dyn Sanitizer>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            lexicon: Arc::new(lexicon),
            analyzer,
            sanitizer,
        }
    }

    /// Load the lexicon and the analyzer dictionary named by `config`.
    /// Any failure here is fatal to startup.
    pub fn load(config: Config) -> anyhow::Result<Self> {
        let lexicon = Lexicon::load_dir(config.charged_words_dir()).with_context(|| {
            format!(
                "loading charged words from {}",
                config.charged_words_dir().display()
            )
        })?;

        let analyzer = match config.morph_dictionary() {
            Some(path) => DictionaryAnalyzer::load(path)
                .with_context(|| format!("loading morphological dictionary {}", path.display()))?,
            None => {
                info!("no morphological dictionary configured; words are only lowercased");
                DictionaryAnalyzer::new()
            }
        };

        Ok(Self::new(
            config,
            lexicon,
            Arc::new(analyzer),
            Arc::new(InosmiSanitizer::new()),
        ))
    }

    /// A coordinator for one batch, with its own HTTP client shared by all of
    /// the batch's tasks.
    pub fn coordinator(&self) -> Result<BatchCoordinator, FetchError> {
        let fetcher = Fetcher::new(self.config.allowed_hosts())?;
        let pipeline = ArticlePipeline::new(
            Arc::new(fetcher),
            self.sanitizer.clone(),
            self.analyzer.clone(),
            self.lexicon.clone(),
        )
        .with_budgets(Budgets {
            fetch: self.config.fetch_timeout(),
            analysis: self.config.analysis_timeout(),
        });

        Ok(BatchCoordinator::new(pipeline).with_max_concurrent(self.config.max_concurrent_articles()))
    }
}
