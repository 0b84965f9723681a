//! Relevance scoring of text spans against a persona profile.

use std::collections::HashSet;

use crate::error::Result;
use crate::model::PersonaProfile;
use crate::options::ScoreWeights;
use crate::text::LinguisticAnalyzer;

/// The individual signals behind a relevance score.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    /// Share of profile keywords present, in `[0, 1]`
    pub keyword: f64,

    /// Accumulated primary-focus points
    pub primary: f64,

    /// Accumulated secondary-focus points
    pub secondary: f64,

    /// Content length signal, in `[0, 1]`
    pub length: f64,

    /// Weighted sum of the components
    pub total: f64,
}

/// A span reduced to lemmatized content words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedSpan {
    /// Lemmatized tokens, in order
    pub tokens: Vec<String>,

    /// Tokens joined by single spaces
    pub text: String,
}

impl NormalizedSpan {
    /// Check if nothing survived normalization.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Scores text spans against one profile.
///
/// The profile is borrowed for the scorer's lifetime and never modified, so a
/// scorer can be shared across threads.
pub struct RelevanceScorer<'a> {
    profile: &'a PersonaProfile,
    analyzer: &'a dyn LinguisticAnalyzer,
    weights: ScoreWeights,
}

impl<'a> RelevanceScorer<'a> {
    /// Create a scorer.
    pub fn new(
        profile: &'a PersonaProfile,
        analyzer: &'a dyn LinguisticAnalyzer,
        weights: ScoreWeights,
    ) -> Self {
        Self {
            profile,
            analyzer,
            weights,
        }
    }

    /// The profile being scored against.
    pub fn profile(&self) -> &PersonaProfile {
        self.profile
    }

    /// The analyzer used for normalization.
    pub fn analyzer(&self) -> &'a dyn LinguisticAnalyzer {
        self.analyzer
    }

    /// Lower-case, strip non-letters, drop stopwords and short tokens, and
    /// lemmatize what remains.
    pub fn normalize(&self, span: &str) -> Result<NormalizedSpan> {
        let letters_only: String = span
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphabetic() || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        let tokens: Vec<String> = self
            .analyzer
            .tokenize(&letters_only)?
            .into_iter()
            .filter(|t| {
                !self.analyzer.is_stopword(t) && t.chars().count() >= self.weights.min_token_len
            })
            .map(|t| self.analyzer.lemmatize(&t))
            .collect();

        let text = tokens.join(" ");
        Ok(NormalizedSpan { tokens, text })
    }

    /// Score a span. Spans that normalize to nothing score exactly 0.
    pub fn score(&self, span: &str) -> Result<f64> {
        Ok(self.breakdown(span)?.total)
    }

    /// Score a span and report each component.
    pub fn breakdown(&self, span: &str) -> Result<ScoreBreakdown> {
        let normalized = self.normalize(span)?;
        if normalized.is_empty() {
            return Ok(ScoreBreakdown::default());
        }
        Ok(self.breakdown_normalized(&normalized))
    }

    /// Score an already normalized span.
    pub fn breakdown_normalized(&self, span: &NormalizedSpan) -> ScoreBreakdown {
        if span.is_empty() {
            return ScoreBreakdown::default();
        }
        let w = &self.weights;

        let words: HashSet<&str> = span.tokens.iter().map(String::as_str).collect();
        let keyword = if self.profile.has_keywords() {
            let hits = self
                .profile
                .keywords
                .iter()
                .filter(|k| words.contains(k.as_str()))
                .count();
            hits as f64 / self.profile.keyword_count() as f64
        } else {
            0.0
        };

        let primary = focus_points(&self.profile.primary_focus, &span.text, w.primary_points);
        let secondary = focus_points(
            &self.profile.secondary_focus,
            &span.text,
            w.secondary_points,
        );

        let length = if w.length_saturation == 0 {
            1.0
        } else {
            (span.tokens.len() as f64 / w.length_saturation as f64).min(1.0)
        };

        let total = keyword * w.keyword
            + primary * w.primary
            + secondary * w.secondary
            + length * w.length;

        ScoreBreakdown {
            keyword,
            primary,
            secondary,
            length,
            total,
        }
    }
}

fn focus_points<'t>(
    terms: impl IntoIterator<Item = &'t String>,
    text: &str,
    points: f64,
) -> f64 {
    terms
        .into_iter()
        .filter(|term| text.contains(term.as_str()))
        .count() as f64
        * points
}
