pub mod client;
pub mod decode;
pub mod errors;

pub use client::{ArticleSource, Fetcher};
pub use errors::FetchError;
