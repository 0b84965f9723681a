//! Linguistic analysis used by scoring and refinement.
//!
//! The ranking core only talks to the [`LinguisticAnalyzer`] trait. The
//! bundled [`EnglishAnalyzer`] covers tokenization, stopwords, noun
//! lemmatization, and sentence splitting for English text.

mod english;
mod stopwords;

pub use english::EnglishAnalyzer;
pub use stopwords::ENGLISH_STOPWORDS;

use crate::error::Result;

/// Tokenization, stopword filtering, lemmatization, and sentence splitting.
///
/// Implementations must be deterministic. Errors from `tokenize` and
/// `split_sentences` are propagated to the caller untouched.
pub trait LinguisticAnalyzer: Send + Sync {
    /// Split text into word tokens, in order.
    fn tokenize(&self, text: &str) -> Result<Vec<String>>;

    /// Reduce a lower-case token to its dictionary form.
    fn lemmatize(&self, token: &str) -> String;

    /// Check whether a lower-case token is a stopword.
    fn is_stopword(&self, token: &str) -> bool;

    /// Split text into sentences, in order.
    fn split_sentences(&self, text: &str) -> Result<Vec<String>>;
}
