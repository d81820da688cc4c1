pub mod lexicon;
pub mod morph;
pub mod normalizer;
pub mod score;

pub use lexicon::{Lexicon, LexiconError};
pub use morph::{DictionaryAnalyzer, MorphAnalyzer, MorphError};
pub use normalizer::normalize;
pub use score::{JaundiceScore, calculate_jaundice_rate};
