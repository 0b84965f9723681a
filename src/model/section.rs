//! Section-level types.

use serde::{Deserialize, Serialize};

/// A titled block of page text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Identifier of the owning document
    pub document_id: String,

    /// Page the section was found on (1-indexed)
    pub page_number: u32,

    /// Header line that opened the section
    pub title: String,

    /// Trimmed, non-empty body text
    pub content: String,
}

impl Section {
    /// Create a new section.
    pub fn new(
        document_id: impl Into<String>,
        page_number: u32,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            page_number,
            title: title.into(),
            content: content.into(),
        }
    }
}

/// A section with its relevance score and, once shortlisted, its rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSection {
    /// The underlying section
    #[serde(flatten)]
    pub section: Section,

    /// Relevance against the persona profile (finite, non-negative)
    pub relevance_score: f64,

    /// 1-based rank, assigned only inside the shortlist
    pub importance_rank: Option<u32>,
}

impl ScoredSection {
    /// Wrap a section with its score.
    pub fn new(section: Section, relevance_score: f64) -> Self {
        Self {
            section,
            relevance_score,
            importance_rank: None,
        }
    }
}

/// A condensed excerpt of a selected section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinedSubsection {
    /// Identifier of the owning document
    pub document_id: String,

    /// Page of the source section
    pub page_number: u32,

    /// Selected sentences joined by single spaces
    pub refined_text: String,
}
