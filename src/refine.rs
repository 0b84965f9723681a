//! Extractive refinement of selected sections.

use crate::error::Result;
use crate::model::{RefinedSubsection, ScoredSection};
use crate::options::RefineOptions;
use crate::score::RelevanceScorer;

/// Condenses sections into short excerpts of their best sentences.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubsectionRefiner {
    options: RefineOptions,
}

impl SubsectionRefiner {
    /// Create a refiner.
    pub fn new(options: RefineOptions) -> Self {
        Self { options }
    }

    /// Refine each section; output order and count match the input.
    pub fn refine(
        &self,
        sections: &[ScoredSection],
        scorer: &RelevanceScorer<'_>,
    ) -> Result<Vec<RefinedSubsection>> {
        sections
            .iter()
            .map(|section| self.refine_section(section, scorer))
            .collect()
    }

    /// Refine one section.
    pub fn refine_section(
        &self,
        section: &ScoredSection,
        scorer: &RelevanceScorer<'_>,
    ) -> Result<RefinedSubsection> {
        let text = self.refine_text(&section.section.content, scorer)?;
        Ok(RefinedSubsection {
            document_id: section.section.document_id.clone(),
            page_number: section.section.page_number,
            refined_text: text,
        })
    }

    /// Build the excerpt for a block of text.
    ///
    /// The top sentences are joined in score order, not prose order. When
    /// that excerpt is too short and the text had more sentences than were
    /// kept, the leading sentences are used instead.
    pub fn refine_text(&self, content: &str, scorer: &RelevanceScorer<'_>) -> Result<String> {
        let sentences = scorer.analyzer().split_sentences(content)?;

        let mut scored = sentences
            .iter()
            .map(|s| scorer.score(s).map(|score| (s.as_str(), score)))
            .collect::<Result<Vec<_>>>()?;
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let refined = scored
            .iter()
            .take(self.options.max_sentences)
            .map(|(s, _)| *s)
            .collect::<Vec<_>>()
            .join(" ");

        if refined.chars().count() < self.options.min_chars
            && sentences.len() > self.options.max_sentences
        {
            log::debug!(
                "Excerpt too short ({} chars), using first {} sentences",
                refined.chars().count(),
                self.options.fallback_sentences
            );
            let leading = sentences
                .iter()
                .take(self.options.fallback_sentences)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" ");
            return Ok(leading.trim().to_string());
        }

        Ok(refined.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PersonaProfile, Section};
    use crate::options::ScoreWeights;
    use crate::text::EnglishAnalyzer;

    fn profile(keywords: &[&str]) -> PersonaProfile {
        PersonaProfile {
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_joins_in_score_order() {
        let analyzer = EnglishAnalyzer::new();
        let p = profile(&["beach"]);
        let scorer = RelevanceScorer::new(&p, &analyzer, ScoreWeights::default());
        let text = SubsectionRefiner::default()
            .refine_text("Rooms are clean. The beach is lovely.", &scorer)
            .unwrap();
        assert_eq!(text, "The beach is lovely. Rooms are clean.");
    }

    #[test]
    fn test_keeps_top_five() {
        let analyzer = EnglishAnalyzer::new();
        let p = profile(&["beach"]);
        let scorer = RelevanceScorer::new(&p, &analyzer, ScoreWeights::default());
        let content = "Visit the beach early in the morning when the sand is still cool. \
                       Sunsets at the beach draw large crowds every single evening. \
                       Local guides offer walking tours through the historic old town. \
                       Markets sell fresh produce and handmade crafts on weekends. \
                       Trains connect the coast with the mountain villages daily. \
                       Parking is limited.";
        let text = SubsectionRefiner::default().refine_text(content, &scorer).unwrap();
        assert!(text.starts_with("Sunsets at the beach"));
        assert!(text.contains("Visit the beach"));
        assert!(!text.contains("Parking is limited."));
        assert!(text.chars().count() >= 100);
    }

    #[test]
    fn test_short_excerpt_falls_back_to_leading_sentences() {
        let analyzer = EnglishAnalyzer::new();
        let p = profile(&["two"]);
        let scorer = RelevanceScorer::new(&p, &analyzer, ScoreWeights::default());
        let content = "Short one. Two. Three. Four. Five. Six two.";
        let text = SubsectionRefiner::default().refine_text(content, &scorer).unwrap();
        assert_eq!(text, "Short one. Two. Three.");
    }

    #[test]
    fn test_short_excerpt_without_extra_sentences_is_kept() {
        let analyzer = EnglishAnalyzer::new();
        let p = profile(&[]);
        let scorer = RelevanceScorer::new(&p, &analyzer, ScoreWeights::default());
        let text = SubsectionRefiner::default()
            .refine_text("Short one. Two.", &scorer)
            .unwrap();
        assert_eq!(text, "Short one. Two.");
    }

    #[test]
    fn test_refine_preserves_order_and_count() {
        let analyzer = EnglishAnalyzer::new();
        let p = profile(&[]);
        let scorer = RelevanceScorer::new(&p, &analyzer, ScoreWeights::default());
        let sections = vec![
            ScoredSection::new(Section::new("b.pdf", 2, "B", "Second doc text."), 0.9),
            ScoredSection::new(Section::new("a.pdf", 7, "A", "First doc text."), 0.1),
        ];
        let out = SubsectionRefiner::default().refine(&sections, &scorer).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].document_id, "b.pdf");
        assert_eq!(out[0].page_number, 2);
        assert_eq!(out[1].document_id, "a.pdf");
        assert_eq!(out[1].refined_text, "First doc text.");
    }
}
