//! Default English analyzer.

use std::collections::HashSet;

use regex::Regex;

use super::stopwords::english_stopword_set;
use super::LinguisticAnalyzer;
use crate::error::Result;

/// Abbreviations that end in a period without ending the sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "inc", "ltd",
    "co", "corp", "fig", "no", "vol", "approx", "dept", "est", "jan", "feb", "mar", "apr",
    "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "mt", "ave", "u.s",
];

/// Irregular plurals and their singular forms.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("wolves", "wolf"),
    ("shelves", "shelf"),
    ("thieves", "thief"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("analyses", "analysis"),
    ("theses", "thesis"),
    ("hypotheses", "hypothesis"),
    ("crises", "crisis"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("appendices", "appendix"),
];

/// Words ending in "s" that are already singular.
const SINGULAR_S_WORDS: &[&str] = &[
    "news", "series", "species", "always", "perhaps", "whereas", "various", "previous",
    "famous", "delicious", "numerous", "towards", "afterwards", "lens", "yes",
];

/// Rule-based English analyzer.
///
/// Lemmatization treats every token as a noun: irregular plurals are looked
/// up, regular plural suffixes are stripped, everything else passes through.
pub struct EnglishAnalyzer {
    word_regex: Regex,
    stopwords: HashSet<&'static str>,
}

impl EnglishAnalyzer {
    /// Create an analyzer with the built-in English resources.
    pub fn new() -> Self {
        Self {
            word_regex: Regex::new(r"[\p{L}\p{N}]+(?:'[\p{L}]+)?").unwrap(),
            stopwords: english_stopword_set(),
        }
    }

    fn singularize(word: &str) -> Option<String> {
        if let Some(&(_, singular)) = IRREGULAR_NOUNS.iter().find(|(plural, _)| *plural == word) {
            return Some(singular.to_string());
        }
        if word.len() <= 3 || SINGULAR_S_WORDS.contains(&word) {
            return None;
        }
        if let Some(stem) = word.strip_suffix("ies") {
            if stem.len() >= 2 {
                return Some(format!("{}y", stem));
            }
            return None;
        }
        for suffix in ["sses", "ches", "shes", "xes", "zes"] {
            if word.ends_with(suffix) {
                return Some(word[..word.len() - 2].to_string());
            }
        }
        if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
            return None;
        }
        word.strip_suffix('s').map(str::to_string)
    }

    fn ends_with_abbreviation(&self, prefix: &str) -> bool {
        let last = prefix
            .split_whitespace()
            .next_back()
            .unwrap_or("")
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if last.is_empty() {
            return false;
        }
        let mut chars = last.chars();
        let single_letter =
            matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic());
        single_letter || ABBREVIATIONS.contains(&last.as_str())
    }
}

impl Default for EnglishAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '\u{201D}' | '\u{2019}')
}

impl LinguisticAnalyzer for EnglishAnalyzer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .word_regex
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect())
    }

    fn lemmatize(&self, token: &str) -> String {
        Self::singularize(token).unwrap_or_else(|| token.to_string())
    }

    fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    fn split_sentences(&self, text: &str) -> Result<Vec<String>> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            let (offset, c) = chars[i];
            if !is_terminator(c) {
                i += 1;
                continue;
            }

            let mut j = i + 1;
            while j < chars.len() && (is_terminator(chars[j].1) || is_closing(chars[j].1)) {
                j += 1;
            }
            if j >= chars.len() {
                break;
            }
            if chars[j].1.is_whitespace() {
                let is_single_period = c == '.' && j == i + 1;
                if !(is_single_period && self.ends_with_abbreviation(&text[start..offset])) {
                    let end = chars[j].0;
                    let sentence = text[start..end].trim();
                    if !sentence.is_empty() {
                        sentences.push(sentence.to_string());
                    }
                    start = end;
                }
            }
            i = j;
        }

        let rest = text[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest.to_string());
        }
        Ok(sentences)
    }
}
