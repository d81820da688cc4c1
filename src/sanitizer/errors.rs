use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SanitizeError {
    /// The page does not contain exactly one article body in the expected markup.
    #[error("article not found (matched {found} article containers)")]
    ArticleNotFound { found: usize },
}
