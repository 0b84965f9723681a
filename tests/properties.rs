//! Property tests for scoring, ranking, refinement, and segmentation.
//!
//! Invariants checked:
//! - Scores are never negative, and empty spans score exactly zero
//! - A profile without keywords never earns keyword points
//! - Ranking surfaces at most five sections, ranked 1..n by descending score
//! - Refinement keeps one excerpt per section, in input order
//! - Header-free text becomes a single "Main Content" section
//! - Ranking the same input twice gives the same result

use proptest::prelude::*;

use docrank::model::{PersonaProfile, ScoredSection, Section};
use docrank::profile::{PersonaProfiler, ProfileRules};
use docrank::rank::SectionRanker;
use docrank::refine::SubsectionRefiner;
use docrank::score::RelevanceScorer;
use docrank::segment::{Segmenter, FALLBACK_TITLE};
use docrank::{DocumentPages, EnglishAnalyzer, JobToBeDone, Persona, Pipeline, ScoreWeights};

fn researcher_profile(analyzer: &EnglishAnalyzer) -> PersonaProfile {
    let rules = ProfileRules::default();
    PersonaProfiler::new(&rules, analyzer)
        .build("Researcher", "Analyze the document content for key insights.")
        .unwrap()
}

// ============================================================================
// SCORING
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn score_is_never_negative(span in ".{0,300}") {
        let analyzer = EnglishAnalyzer::new();
        let profile = researcher_profile(&analyzer);
        let scorer = RelevanceScorer::new(&profile, &analyzer, ScoreWeights::default());

        let score = scorer.score(&span).unwrap();
        prop_assert!(score >= 0.0, "negative score {} for {:?}", score, span);
        prop_assert!(score.is_finite());
    }

    #[test]
    fn empty_keyword_profile_has_no_keyword_component(span in "[a-zA-Z .,]{0,200}") {
        let analyzer = EnglishAnalyzer::new();
        let profile = PersonaProfile::default();
        let scorer = RelevanceScorer::new(&profile, &analyzer, ScoreWeights::default());

        prop_assert_eq!(scorer.breakdown(&span).unwrap().keyword, 0.0);
    }
}

#[test]
fn empty_span_scores_zero() {
    let analyzer = EnglishAnalyzer::new();
    let profile = researcher_profile(&analyzer);
    let scorer = RelevanceScorer::new(&profile, &analyzer, ScoreWeights::default());
    assert_eq!(scorer.score("").unwrap(), 0.0);
}

// ============================================================================
// RANKING AND REFINEMENT
// ============================================================================

fn scored_sections(scores: &[f64]) -> Vec<ScoredSection> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            ScoredSection::new(
                Section::new("doc.pdf", i as u32 + 1, format!("S{}", i), "body text"),
                s,
            )
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn ranking_is_bounded_and_ordered(scores in prop::collection::vec(0.0..100.0f64, 0..40)) {
        let out = SectionRanker::default().select(scored_sections(&scores));

        prop_assert_eq!(out.len(), scores.len().min(5));
        for (i, section) in out.iter().enumerate() {
            prop_assert_eq!(section.importance_rank, Some(i as u32 + 1));
        }
        for pair in out.windows(2) {
            prop_assert!(pair[0].relevance_score >= pair[1].relevance_score);
        }
    }

    #[test]
    fn ties_keep_encounter_order(n in 1usize..20) {
        let out = SectionRanker::default().select(scored_sections(&vec![1.0; n]));
        let pages: Vec<u32> = out.iter().map(|s| s.section.page_number).collect();
        let expected: Vec<u32> = (1..=n.min(5) as u32).collect();
        prop_assert_eq!(pages, expected);
    }

    #[test]
    fn refinement_preserves_count_and_order(
        contents in prop::collection::vec("[A-Za-z ,.!?]{0,120}", 0..8)
    ) {
        let analyzer = EnglishAnalyzer::new();
        let profile = researcher_profile(&analyzer);
        let scorer = RelevanceScorer::new(&profile, &analyzer, ScoreWeights::default());
        let sections: Vec<ScoredSection> = contents
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let section = Section::new(format!("d{}", i), i as u32 + 1, "T", c.clone());
                ScoredSection::new(section, 0.0)
            })
            .collect();

        let refined = SubsectionRefiner::default().refine(&sections, &scorer).unwrap();

        prop_assert_eq!(refined.len(), sections.len());
        for (r, s) in refined.iter().zip(&sections) {
            prop_assert_eq!(&r.document_id, &s.section.document_id);
            prop_assert_eq!(r.page_number, s.section.page_number);
        }
    }
}

// ============================================================================
// SEGMENTATION
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn header_free_text_becomes_main_content(text in "[a-z ]{0,40}(\n[a-z ]{0,40}){0,5}") {
        prop_assume!(!text.trim().is_empty());

        let sections = Segmenter::new().segment_text(&text);
        prop_assert_eq!(sections.len(), 1);
        prop_assert_eq!(sections[0].0.as_str(), FALLBACK_TITLE);
        prop_assert_eq!(sections[0].1.as_str(), text.trim());
    }

    #[test]
    fn sections_follow_headers(
        preamble in "[a-z]{1,10}( [a-z]{1,10}){0,3}",
        h1 in "[A-Z]{2,10}( [A-Z]{2,10}){0,2}",
        c1 in "[a-z]{1,10}( [a-z]{1,10}){0,4}",
        h2 in "[A-Z]{2,10}( [A-Z]{2,10}){0,2}",
        c2 in "[a-z]{1,10}( [a-z]{1,10}){0,4}",
    ) {
        let text = format!("{}\n{}\n{}\n{}\n{}\n", preamble, h1, c1, h2, c2);
        let sections = Segmenter::new().segment_text(&text);
        prop_assert_eq!(sections, vec![(h1, c1), (h2, c2)]);
    }
}

// ============================================================================
// IDEMPOTENCE
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn ranking_is_idempotent(pages in prop::collection::vec("[A-Za-z \n.]{0,200}", 1..6)) {
        let docs = vec![DocumentPages::from_texts("doc.pdf", pages)];
        let persona = Persona::new("Travel Planner");
        let job = JobToBeDone::new("Plan a trip of 4 days for a group of 10 college friends.");
        let pipeline = Pipeline::new();

        let first = pipeline.rank(&docs, &persona, &job).unwrap();
        let second = pipeline.rank(&docs, &persona, &job).unwrap();
        prop_assert_eq!(first, second);
    }
}
