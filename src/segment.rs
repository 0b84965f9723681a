//! Section segmentation of raw page text.
//!
//! Extracted page text carries no structural markup, so headers are found
//! from typographic conventions alone: upper-case lines, numbered headings,
//! Title Case openings, and capitalized labels ending in a colon.

use regex::Regex;

use crate::model::{Page, Section};

/// Title given to a page that has text but no detectable header.
pub const FALLBACK_TITLE: &str = "Main Content";

/// Header lines must be shorter than this many characters.
pub const MAX_HEADER_CHARS: usize = 100;

/// The header conventions recognized, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    /// `METHODOLOGY`, `TRAVEL TIPS`
    AllCaps,
    /// `2. Results`
    Numbered,
    /// `Coastal Adventures ...`
    TitleCase,
    /// `Packing tips:`
    ColonLabel,
}

impl HeaderKind {
    /// All kinds, in evaluation order.
    pub const ALL: [HeaderKind; 4] = [
        HeaderKind::AllCaps,
        HeaderKind::Numbered,
        HeaderKind::TitleCase,
        HeaderKind::ColonLabel,
    ];

    /// Pattern anchored at the start of a trimmed line.
    fn pattern(self) -> &'static str {
        match self {
            HeaderKind::AllCaps => r"^[A-Z][A-Z\s]+$",
            HeaderKind::Numbered => r"^\d+\.\s+[A-Z]",
            HeaderKind::TitleCase => r"^[A-Z][a-z]+\s[A-Z][a-z]+",
            HeaderKind::ColonLabel => r"^[A-Z][a-z\s]+:",
        }
    }
}

/// Ordered list of header predicates.
pub struct HeaderDetector {
    rules: Vec<(HeaderKind, Regex)>,
    max_chars: usize,
}

impl HeaderDetector {
    /// Create a detector with every built-in rule.
    pub fn new() -> Self {
        Self {
            rules: HeaderKind::ALL
                .iter()
                .map(|&kind| (kind, Regex::new(kind.pattern()).unwrap()))
                .collect(),
            max_chars: MAX_HEADER_CHARS,
        }
    }

    /// Test a single rule against a line, ignoring the length limit.
    pub fn matches_rule(&self, kind: HeaderKind, line: &str) -> bool {
        self.rules
            .iter()
            .find(|(k, _)| *k == kind)
            .is_some_and(|(_, re)| re.is_match(line.trim()))
    }

    /// Classify a line; the first matching rule wins.
    pub fn classify(&self, line: &str) -> Option<HeaderKind> {
        let line = line.trim();
        if line.is_empty() || line.chars().count() >= self.max_chars {
            return None;
        }
        self.rules
            .iter()
            .find(|(_, re)| re.is_match(line))
            .map(|(kind, _)| *kind)
    }

    /// Check whether a line is a header.
    pub fn is_header(&self, line: &str) -> bool {
        self.classify(line).is_some()
    }
}

impl Default for HeaderDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits page text into titled sections.
#[derive(Default)]
pub struct Segmenter {
    detector: HeaderDetector,
}

impl Segmenter {
    /// Create a segmenter with the built-in header rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Access the header detector.
    pub fn detector(&self) -> &HeaderDetector {
        &self.detector
    }

    /// Segment one page. Sections keep their order of appearance.
    pub fn segment_page(&self, page: &Page) -> Vec<Section> {
        self.segment_text(&page.raw_text)
            .into_iter()
            .map(|(title, content)| {
                Section::new(&page.document_id, page.page_number, title, content)
            })
            .collect()
    }

    /// Segment raw text into `(title, content)` pairs.
    ///
    /// Lines before the first header are dropped. A header immediately
    /// followed by another header produces nothing. If no section results
    /// and the text is not blank, the whole trimmed text becomes a single
    /// [`FALLBACK_TITLE`] section.
    pub fn segment_text(&self, text: &str) -> Vec<(String, String)> {
        let mut sections = Vec::new();
        let mut title: Option<&str> = None;
        let mut lines: Vec<&str> = Vec::new();

        for line in text.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
            if self.detector.is_header(line) {
                flush(title, &lines, &mut sections);
                title = Some(line);
                lines.clear();
            } else if title.is_some() {
                lines.push(line);
            }
        }
        flush(title, &lines, &mut sections);

        let trimmed = text.trim();
        if sections.is_empty() && !trimmed.is_empty() {
            sections.push((FALLBACK_TITLE.to_string(), trimmed.to_string()));
        }
        sections
    }
}

fn flush(title: Option<&str>, lines: &[&str], sections: &mut Vec<(String, String)>) {
    let Some(title) = title else {
        return;
    };
    let content = lines.join("\n");
    let content = content.trim();
    if !content.is_empty() {
        sections.push((title.to_string(), content.to_string()));
    }
}
