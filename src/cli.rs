//! Command-line interface of the `jaundice` driver.
//!
//! Settings not given as flags come from the same environment variables the
//! HTTP service reads (see `jaundice::config`).

use clap::Parser;
use std::path::PathBuf;

/// Rate news articles by their share of emotionally charged words.
///
/// ```sh
/// jaundice https://inosmi.ru/politic/20190629/245379332.html
/// jaundice --fetch-timeout-ms 100 https://inosmi.ru/a.html,https://inosmi.ru/b.html
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Article URLs, separated by spaces or commas
    #[arg(required = true, value_delimiter = ',')]
    pub urls: Vec<String>,

    /// Directory with charged-word lists
    #[arg(long, env = "CHARGED_WORDS_DIR")]
    pub charged_words_dir: Option<PathBuf>,

    /// Tab-separated `form<TAB>lemma` dictionary
    #[arg(long, env = "MORPH_DICTIONARY")]
    pub morph_dictionary: Option<PathBuf>,

    /// Hosts articles may be fetched from (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub allowed_hosts: Option<Vec<String>>,

    /// Budget for fetching one article, in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub fetch_timeout_ms: Option<u64>,

    /// Budget for analysing one article, in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub analysis_timeout_ms: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}
