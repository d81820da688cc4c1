#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use jaundice::{
    analysis::{ArticlePipeline, BatchCoordinator, Budgets},
    app_state::AppState,
    config::Config,
    fetcher::Fetcher,
    sanitizer::InosmiSanitizer,
    text::{DictionaryAnalyzer, Lexicon},
};

/// Host wiremock binds to; it stands in for an allowed news site.
pub const MOCK_HOST: &str = "127.0.0.1";

/// inosmi-style page with the given paragraphs inside the article body.
pub fn article_page(paragraphs: &[&str]) -> String {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<p>{p}</p>"))
        .collect();
    format!(
        r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>ИноСМИ</title></head>
<body>
<nav>Главная Политика Экономика</nav>
<article class="article">
<div class="article-disclaimer">Материалы ИноСМИ содержат оценки исключительно зарубежных СМИ</div>
{body}
</article>
<footer>© ИноСМИ</footer>
</body></html>"#
    )
}

pub fn lexicon() -> Lexicon {
    Lexicon::from_words(["аутсайдер", "банкротство", "ужас"])
}

pub fn analyzer() -> DictionaryAnalyzer {
    DictionaryAnalyzer::from_pairs([("аутсайдера", "аутсайдер"), ("сбежал", "сбежать")])
}

pub fn pipeline(fetch_timeout: Duration) -> ArticlePipeline {
    ArticlePipeline::new(
        Arc::new(Fetcher::new(&[MOCK_HOST]).expect("http client")),
        Arc::new(InosmiSanitizer::new()),
        Arc::new(analyzer()),
        Arc::new(lexicon()),
    )
    .with_budgets(Budgets {
        fetch: fetch_timeout,
        analysis: Duration::from_secs(3),
    })
}

pub fn coordinator(fetch_timeout: Duration) -> BatchCoordinator {
    BatchCoordinator::new(pipeline(fetch_timeout))
}

pub fn test_state(fetch_timeout: Duration) -> AppState {
    let config = Config::default()
        .with_allowed_hosts(vec![MOCK_HOST.to_string()])
        .with_fetch_timeout(fetch_timeout);
    AppState::new(
        config,
        lexicon(),
        Arc::new(analyzer()),
        Arc::new(InosmiSanitizer::new()),
    )
}
