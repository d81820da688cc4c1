//! # jaundice
//!
//! Command-line driver: rates the given articles once and prints the reports
//! as JSON on stdout. Logs go to stderr.

use anyhow::Result;
use clap::Parser;
use jaundice::{api::dtos::validate_urls, app_state::AppState, config::Config, telemetry};
use std::time::Duration;
use tracing::info;

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();
    let args = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(dir) = args.charged_words_dir {
        config = config.with_charged_words_dir(dir);
    }
    if args.morph_dictionary.is_some() {
        config = config.with_morph_dictionary(args.morph_dictionary);
    }
    if let Some(hosts) = args.allowed_hosts {
        config = config.with_allowed_hosts(jaundice::config::parse_hosts(&hosts.join(","))?);
    }
    if let Some(ms) = args.fetch_timeout_ms {
        config = config.with_fetch_timeout(Duration::from_millis(ms));
    }
    if let Some(ms) = args.analysis_timeout_ms {
        config = config.with_analysis_timeout(Duration::from_millis(ms));
    }

    // Same structural checks as the HTTP endpoint, before anything is loaded.
    let urls = validate_urls(args.urls, config.max_urls_per_request())?;

    let state = AppState::load(config)?;
    info!(count = urls.len(), "rating articles");
    let reports = state.coordinator()?.run_batch(urls).await;

    let output = if args.pretty {
        serde_json::to_string_pretty(&reports)?
    } else {
        serde_json::to_string(&reports)?
    };
    println!("{output}");
    Ok(())
}
