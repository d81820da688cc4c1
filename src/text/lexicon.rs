//! The charged-word lexicon.
//!
//! Loaded once at startup from a directory of word lists and shared read-only
//! by every pipeline afterwards.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("no charged words found under {0}")]
    Empty(PathBuf),
}

/// Set of charged words in normalized (lowercase lemma) form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    words: HashSet<String>,
}

impl Lexicon {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Union of the whitespace-separated words of every file under `dir`,
    /// walking subdirectories.
    pub fn load_dir(dir: &Path) -> Result<Self, LexiconError> {
        if !dir.is_dir() {
            return Err(LexiconError::NotADirectory(dir.to_path_buf()));
        }

        let mut files = Vec::new();
        collect_files(dir, &mut files)?;
        files.sort();

        let mut words = HashSet::new();
        for path in &files {
            let content = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
                path: path.clone(),
                source,
            })?;
            let before = words.len();
            words.extend(content.split_whitespace().map(str::to_lowercase));
            debug!(path = %path.display(), added = words.len() - before, "read word list");
        }

        if words.is_empty() {
            return Err(LexiconError::Empty(dir.to_path_buf()));
        }

        info!(
            dir = %dir.display(),
            files = files.len(),
            words = words.len(),
            "loaded charged-word lexicon"
        );
        Ok(Self { words })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), LexiconError> {
    let io_err = |source: std::io::Error| LexiconError::Io {
        path: dir.to_path_buf(),
        source,
    };
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_dir() {
            collect_files(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_from_words_normalizes_case_and_blanks() {
        let lexicon = Lexicon::from_words(["Аутсайдер", " ", "банкротство"]);
        assert_eq!(lexicon.len(), 2);
        assert!(lexicon.contains("аутсайдер"));
        assert!(!lexicon.contains("Аутсайдер"));
    }

    #[test]
    fn test_loads_union_of_nested_lists() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("negative_words.txt"), "ужас\nкатастрофа\n").unwrap();
        fs::create_dir(dir.path().join("extra")).unwrap();
        fs::write(
            dir.path().join("extra").join("positive_words.txt"),
            "восторг катастрофа\n\n",
        )
        .unwrap();

        let lexicon = Lexicon::load_dir(dir.path()).unwrap();
        assert_eq!(lexicon.len(), 3);
        for word in ["ужас", "катастрофа", "восторг"] {
            assert!(lexicon.contains(word), "missing {word}");
        }
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blank.txt"), "   \n").unwrap();
        assert!(matches!(
            Lexicon::load_dir(dir.path()),
            Err(LexiconError::Empty(_))
        ));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        assert!(matches!(
            Lexicon::load_dir(Path::new("/no/such/charged_dict")),
            Err(LexiconError::NotADirectory(_))
        ));
    }
}
