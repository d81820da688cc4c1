pub mod errors;
pub mod inosmi;

pub use errors::SanitizeError;
pub use inosmi::InosmiSanitizer;

#[cfg(test)]
use mockall::automock;

/// Converts a fetched HTML page into the article's plaintext.
///
/// Fails when the page is not an article in the format the implementation
/// understands.
#[cfg_attr(test, automock)]
pub trait Sanitizer: Send + Sync + 'static {
    fn sanitize(&self, html: &str) -> Result<String, SanitizeError>;
}
