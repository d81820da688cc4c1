use crate::text::morph::MorphAnalyzer;

/// The negation particle. Kept regardless of length because it flips polarity.
pub const NEGATION: &str = "не";

/// Lemmas must be longer than this many characters to be kept.
const MIN_LEMMA_CHARS: usize = 2;

/// Strip punctuation, including typographic quotes, dashes and ellipsis, from
/// both ends of a token. Inner punctuation (`во-первых`) is left alone.
pub fn clean_word(word: &str) -> &str {
    word.trim_matches(is_punctuation)
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '«' | '»' | '…' | '“' | '”' | '„' | '‘' | '’' | '—' | '–' | '‹' | '›'
        )
}

/// Normalize one whitespace-delimited token. Returns `None` when the token is
/// filtered out.
pub fn normalize_word(analyzer: &dyn MorphAnalyzer, raw: &str) -> Option<String> {
    let cleaned = clean_word(raw);
    if cleaned.is_empty() {
        return None;
    }
    let lemma = analyzer.normal_form(cleaned);
    if lemma.chars().count() > MIN_LEMMA_CHARS || lemma == NEGATION {
        Some(lemma)
    } else {
        None
    }
}

/// Split `text` into normalized words, preserving order.
///
/// Yields to the scheduler after every token so one long article cannot starve
/// the other articles of a batch.
pub async fn normalize(analyzer: &dyn MorphAnalyzer, text: &str) -> Vec<String> {
    let mut words = Vec::new();
    for raw in text.split_whitespace() {
        if let Some(lemma) = normalize_word(analyzer, raw) {
            words.push(lemma);
        }
        tokio::task::yield_now().await;
    }
    words
}
