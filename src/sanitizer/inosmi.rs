//! Plaintext extraction for inosmi.ru article pages.
//!
//! An article page carries its body in a single `<article class="article">`.
//! Everything else on the page (navigation, teasers, comments) is ignored, and
//! inside the article the share buttons, disclaimers and embedded scripts are
//! dropped before the text is collected.

use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;

use crate::sanitizer::{Sanitizer, errors::SanitizeError};

static ARTICLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("article.article").expect("valid article selector"));

static NOISE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(
        "script, style, noscript, iframe, svg, button, footer, aside, time, \
         .article-disclaimer, .article-info, [class*='-button'], [class*='share']",
    )
    .expect("valid noise selector")
});

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ul", "ol", "blockquote",
    "br", "header", "figcaption", "tr", "table",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct InosmiSanitizer;

impl InosmiSanitizer {
    pub fn new() -> Self {
        Self
    }
}

impl Sanitizer for InosmiSanitizer {
    fn sanitize(&self, html: &str) -> Result<String, SanitizeError> {
        let document = Html::parse_document(html);
        let articles: Vec<ElementRef> = document.select(&ARTICLE_SELECTOR).collect();

        let [article] = articles.as_slice() else {
            return Err(SanitizeError::ArticleNotFound {
                found: articles.len(),
            });
        };

        let mut raw = String::new();
        collect_text(*article, &mut raw);
        Ok(tidy_lines(&raw))
    }
}

fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };
                if NOISE_SELECTOR.matches(&child_element) {
                    continue;
                }
                let is_block = BLOCK_TAGS.contains(&child_element.value().name());
                if is_block {
                    out.push('\n');
                }
                collect_text(child_element, out);
                if is_block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

/// One paragraph per line, inner runs of whitespace collapsed, blank lines gone.
fn tidy_lines(raw: &str) -> String {
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>ИноСМИ</title><script>var tracking = 1;</script></head>
<body>
  <nav><a href="/">Главная</a></nav>
  <article class="article">
    <header><h1>Аутсайдер   совершил побег</h1></header>
    <div class="article-info"><time>29.06.2019</time></div>
    <p>Первый   абзац статьи.</p>
    <div class="social-button">Поделиться</div>
    <p>Второй абзац, <b>не</b> последний.</p>
    <script>alert('x')</script>
    <div class="article-disclaimer">Материалы ИноСМИ содержат оценки исключительно зарубежных СМИ</div>
  </article>
  <footer>Подвал сайта</footer>
</body></html>"#;

    #[test]
    fn test_extracts_article_plaintext() {
        let text = InosmiSanitizer::new().sanitize(PAGE).unwrap();
        assert_eq!(
            text,
            "Аутсайдер совершил побег\nПервый абзац статьи.\nВторой абзац, не последний."
        );
    }

    #[test]
    fn test_drops_noise_inside_article() {
        let text = InosmiSanitizer::new().sanitize(PAGE).unwrap();
        assert!(!text.contains("Поделиться"));
        assert!(!text.contains("alert"));
        assert!(!text.contains("Материалы ИноСМИ"));
        assert!(!text.contains("29.06.2019"));
        assert!(!text.contains("Главная"));
        assert!(!text.contains("Подвал"));
    }

    #[test]
    fn test_page_without_article_is_rejected() {
        let html = "<html><body><div class=\"news\"><p>Лента новостей</p></div></body></html>";
        assert_eq!(
            InosmiSanitizer::new().sanitize(html),
            Err(SanitizeError::ArticleNotFound { found: 0 })
        );
    }

    #[test]
    fn test_ambiguous_page_is_rejected() {
        let html = r#"<html><body>
            <article class="article"><p>Одна</p></article>
            <article class="article"><p>Другая</p></article>
        </body></html>"#;
        assert_eq!(
            InosmiSanitizer::new().sanitize(html),
            Err(SanitizeError::ArticleNotFound { found: 2 })
        );
    }

    #[test]
    fn test_empty_article_yields_empty_text() {
        let html = r#"<html><body><article class="article"></article></body></html>"#;
        assert_eq!(InosmiSanitizer::new().sanitize(html), Ok(String::new()));
    }

    #[test]
    fn test_malformed_html_does_not_panic() {
        let html = "<article class=\"article\"><p>Незакрытый тег<div>ещё текст";
        let text = InosmiSanitizer::new().sanitize(html).unwrap();
        assert!(text.contains("Незакрытый тег"));
        assert!(text.contains("ещё текст"));
    }
}
