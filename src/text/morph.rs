//! Morphological analysis: mapping an inflected word to its dictionary form.
//!
//! The analyzer is an expensive, long-lived handle. Build it once at startup
//! and pass it around as `Arc<dyn MorphAnalyzer>`; never construct one per
//! article.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Reduces a single word to its canonical lemma.
///
/// Implementations must be pure and safe to call from many tasks at once.
pub trait MorphAnalyzer: Send + Sync + 'static {
    fn normal_form(&self, word: &str) -> String;
}

#[derive(Error, Debug)]
pub enum MorphError {
    #[error("failed to read dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dictionary line {line} in {path}: expected `form<TAB>lemma`")]
    Malformed { path: PathBuf, line: usize },
}

/// Dictionary-backed analyzer.
///
/// Words are lowercased and looked up in a form → lemma table; words missing
/// from the table are their own lemma.
#[derive(Debug, Clone, Default)]
pub struct DictionaryAnalyzer {
    lemmas: HashMap<String, String>,
}

impl DictionaryAnalyzer {
    /// Analyzer with an empty table: lemma = lowercase word.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, F, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (F, L)>,
        F: AsRef<str>,
        L: AsRef<str>,
    {
        let lemmas = pairs
            .into_iter()
            .map(|(form, lemma)| (form.as_ref().to_lowercase(), lemma.as_ref().to_lowercase()))
            .collect();
        Self { lemmas }
    }

    /// Load a tab-separated `form<TAB>lemma` file. Blank lines and lines
    /// starting with `#` are skipped.
    pub fn load(path: &Path) -> Result<Self, MorphError> {
        let content = std::fs::read_to_string(path).map_err(|source| MorphError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut lemmas = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t').map(str::trim);
            let (Some(form), Some(lemma), None) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(MorphError::Malformed {
                    path: path.to_path_buf(),
                    line: idx + 1,
                });
            };
            if form.is_empty() || lemma.is_empty() {
                return Err(MorphError::Malformed {
                    path: path.to_path_buf(),
                    line: idx + 1,
                });
            }
            lemmas.insert(form.to_lowercase(), lemma.to_lowercase());
        }

        info!(path = %path.display(), forms = lemmas.len(), "loaded morphological dictionary");
        Ok(Self { lemmas })
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}

impl MorphAnalyzer for DictionaryAnalyzer {
    fn normal_form(&self, word: &str) -> String {
        let lowered = word.to_lowercase();
        match self.lemmas.get(&lowered) {
            Some(lemma) => lemma.clone(),
            None => lowered,
        }
    }
}
