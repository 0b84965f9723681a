//! Ranking results and the output document.

use super::{RefinedSubsection, ScoredSection};
use serde::{Deserialize, Serialize};

/// A surfaced section, as listed in the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSection {
    /// Document identifier
    pub document: String,

    /// Section header
    pub section_title: String,

    /// 1-based rank (1 = most relevant)
    pub importance_rank: u32,

    /// Page the section was found on
    pub page_number: u32,
}

impl ExtractedSection {
    /// Project a ranked section into its output form.
    ///
    /// Sections that never received a rank are reported with rank 0; the
    /// ranker only surfaces ranked sections so this does not happen in practice.
    pub fn from_scored(scored: &ScoredSection) -> Self {
        Self {
            document: scored.section.document_id.clone(),
            section_title: scored.section.title.clone(),
            importance_rank: scored.importance_rank.unwrap_or(0),
            page_number: scored.section.page_number,
        }
    }
}

/// A refined excerpt, as listed in the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    /// Document identifier
    pub document: String,

    /// Page of the source section
    pub page_number: u32,

    /// Condensed excerpt
    pub refined_text: String,
}

impl From<RefinedSubsection> for SubsectionAnalysis {
    fn from(refined: RefinedSubsection) -> Self {
        Self {
            document: refined.document_id,
            page_number: refined.page_number,
            refined_text: refined.refined_text,
        }
    }
}

/// What the ranking core produces for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingResult {
    /// Surfaced sections, most relevant first
    pub extracted_sections: Vec<ExtractedSection>,

    /// One excerpt per surfaced section, same order
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

impl RankingResult {
    /// Check if nothing was surfaced.
    pub fn is_empty(&self) -> bool {
        self.extracted_sections.is_empty()
    }
}

/// Run metadata attached by the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Every requested document, including skipped ones
    pub input_documents: Vec<String>,

    /// Persona role as supplied
    pub persona: String,

    /// Task as supplied
    pub job_to_be_done: String,

    /// Local ISO-8601 time the output was assembled
    pub processing_timestamp: String,
}

/// The full output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankOutput {
    /// Run metadata
    pub metadata: Metadata,

    /// Surfaced sections, most relevant first
    pub extracted_sections: Vec<ExtractedSection>,

    /// One excerpt per surfaced section, same order
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

impl RankOutput {
    /// Combine metadata with a ranking result.
    pub fn new(metadata: Metadata, result: RankingResult) -> Self {
        Self {
            metadata,
            extracted_sections: result.extracted_sections,
            subsection_analysis: result.subsection_analysis,
        }
    }

    /// The ranking part, without metadata.
    pub fn ranking(&self) -> RankingResult {
        RankingResult {
            extracted_sections: self.extracted_sections.clone(),
            subsection_analysis: self.subsection_analysis.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;

    #[test]
    fn test_extracted_section_field_order() {
        let mut scored = ScoredSection::new(Section::new("a.pdf", 3, "Intro", "body"), 0.5);
        scored.importance_rank = Some(1);
        let json = serde_json::to_string(&ExtractedSection::from_scored(&scored)).unwrap();
        assert_eq!(
            json,
            r#"{"document":"a.pdf","section_title":"Intro","importance_rank":1,"page_number":3}"#
        );
    }

    #[test]
    fn test_ranking_drops_metadata() {
        let result = RankingResult {
            extracted_sections: vec![ExtractedSection {
                document: "a.pdf".into(),
                section_title: "Intro".into(),
                importance_rank: 1,
                page_number: 1,
            }],
            subsection_analysis: Vec::new(),
        };
        let output = RankOutput::new(Metadata::default(), result.clone());
        assert_eq!(output.ranking(), result);
    }

    #[test]
    fn test_subsection_from_refined() {
        let refined = RefinedSubsection {
            document_id: "a.pdf".into(),
            page_number: 2,
            refined_text: "Text.".into(),
        };
        let analysis = SubsectionAnalysis::from(refined);
        assert_eq!(analysis.document, "a.pdf");
        assert_eq!(analysis.page_number, 2);
    }
}
