use serde::Serialize;

use crate::text::lexicon::Lexicon;

/// Outcome of scoring one article.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JaundiceScore {
    /// Percentage of charged words, rounded to two decimals (half away from zero).
    pub rate: f64,
    /// Number of normalized words the rate was computed over.
    pub length: usize,
}

/// Share of `words` found in `lexicon`, as a percentage.
///
/// An empty article scores exactly `0.0`.
pub fn calculate_jaundice_rate<S: AsRef<str>>(words: &[S], lexicon: &Lexicon) -> JaundiceScore {
    let length = words.len();
    if length == 0 {
        return JaundiceScore {
            rate: 0.0,
            length: 0,
        };
    }

    let charged = words
        .iter()
        .filter(|word| lexicon.contains(word.as_ref()))
        .count();
    let percent = charged as f64 / length as f64 * 100.0;

    JaundiceScore {
        rate: round2(percent),
        length,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_article_scores_zero() {
        let empty: [&str; 0] = [];
        let score = calculate_jaundice_rate(&empty, &Lexicon::default());
        assert_eq!(score, JaundiceScore { rate: 0.0, length: 0 });

        let lexicon = Lexicon::from_words(["аутсайдер"]);
        assert_eq!(calculate_jaundice_rate(&empty, &lexicon).rate, 0.0);
    }

    #[test]
    fn test_one_in_three() {
        let lexicon = Lexicon::from_words(["аутсайдер", "банкротство"]);
        let score = calculate_jaundice_rate(&["все", "аутсайдер", "побег"], &lexicon);
        assert!(33.0 < score.rate && score.rate < 34.0);
        assert_eq!(score.rate, 33.33);
        assert_eq!(score.length, 3);
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        // 1/8 = 12.5% exactly; 1/6 = 16.666..%
        let lexicon = Lexicon::from_words(["x"]);
        let mut words = vec!["x"];
        words.extend(["y"; 7]);
        assert_eq!(calculate_jaundice_rate(&words, &lexicon).rate, 12.5);

        let mut words = vec!["x"];
        words.extend(["y"; 5]);
        assert_eq!(calculate_jaundice_rate(&words, &lexicon).rate, 16.67);
    }

    #[test]
    fn test_duplicates_count_every_time() {
        let lexicon = Lexicon::from_words(["ужас"]);
        let score = calculate_jaundice_rate(&["ужас", "ужас", "мир", "дом"], &lexicon);
        assert_eq!(score.rate, 50.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_rate_stays_within_bounds(
            words in proptest::collection::vec("[а-я]{1,6}", 0..60),
            charged in proptest::collection::vec("[а-я]{1,6}", 0..20),
        ) {
            let lexicon = Lexicon::from_words(charged.iter());
            let score = calculate_jaundice_rate(&words, &lexicon);
            prop_assert!((0.0..=100.0).contains(&score.rate));
            prop_assert_eq!(score.length, words.len());
        }

        #[test]
        fn test_scoring_is_deterministic(
            words in proptest::collection::vec("[a-c]{1,3}", 0..40),
        ) {
            let lexicon = Lexicon::from_words(["a", "bb", "ccc"]);
            let first = calculate_jaundice_rate(&words, &lexicon);
            let second = calculate_jaundice_rate(&words, &lexicon);
            prop_assert_eq!(first, second);
        }
    }
}
