//! Text normalization for the threat pipeline: lowercase, strip, tokenize,
//! drop stopwords, lemmatize.

mod lemma;
mod normalize;
mod stopwords;

pub use lemma::Lemmatizer;
pub use normalize::TextNormalizer;
pub use stopwords::{is_stopword, ENGLISH_STOP_WORDS};
