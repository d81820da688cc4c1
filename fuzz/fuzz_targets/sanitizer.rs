#![no_main]

use jaundice::fetcher::decode::decode_body;
use jaundice::sanitizer::{InosmiSanitizer, Sanitizer};
use jaundice::text::{DictionaryAnalyzer, Lexicon, calculate_jaundice_rate, normalize};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes go through charset detection the way a fetched body does.
    let Ok(html) = decode_body("text/html", data) else {
        return;
    };

    // Neither stage may panic, whatever the markup.
    let Ok(text) = InosmiSanitizer::new().sanitize(&html) else {
        return;
    };

    let analyzer = DictionaryAnalyzer::new();
    let words = futures::executor::block_on(normalize(&analyzer, &text));
    let score = calculate_jaundice_rate(&words, &Lexicon::from_words(["ужас"]));
    assert!((0.0..=100.0).contains(&score.rate));
    assert_eq!(score.length, words.len());
});
