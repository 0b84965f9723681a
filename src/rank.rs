//! Cross-document section ranking.
//!
//! Selection happens in two stages: the top `shortlist_size` sections get an
//! importance rank, and the first `output_size` of those are surfaced.

use rayon::prelude::*;

use crate::error::Result;
use crate::model::{ScoredSection, Section};
use crate::options::RankOptions;
use crate::score::RelevanceScorer;

/// Scores, orders, and selects sections.
#[derive(Debug, Clone, Copy)]
pub struct SectionRanker {
    shortlist_size: usize,
    output_size: usize,
    parallel: bool,
}

impl SectionRanker {
    /// Create a ranker from rank options.
    pub fn new(options: &RankOptions) -> Self {
        Self {
            shortlist_size: options.shortlist_size,
            output_size: options.surfaced_size(),
            parallel: options.parallel,
        }
    }

    /// Score every section, keeping input order. Zero scores are kept.
    pub fn score_all(
        &self,
        sections: Vec<Section>,
        scorer: &RelevanceScorer<'_>,
    ) -> Result<Vec<ScoredSection>> {
        let score_one = |section: Section| -> Result<ScoredSection> {
            let score = scorer.score(&section.content)?;
            Ok(ScoredSection::new(section, score))
        };

        if self.parallel {
            sections.into_par_iter().map(score_one).collect()
        } else {
            sections.into_iter().map(score_one).collect()
        }
    }

    /// Score and select in one step.
    pub fn rank(
        &self,
        sections: Vec<Section>,
        scorer: &RelevanceScorer<'_>,
    ) -> Result<Vec<ScoredSection>> {
        let scored = self.score_all(sections, scorer)?;
        Ok(self.select(scored))
    }

    /// Order scored sections and keep the surfaced head.
    ///
    /// Sorting is stable, so ties keep encounter order (document, then page,
    /// then position on the page).
    pub fn select(&self, mut scored: Vec<ScoredSection>) -> Vec<ScoredSection> {
        scored.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));

        for (i, section) in scored.iter_mut().take(self.shortlist_size).enumerate() {
            section.importance_rank = Some(i as u32 + 1);
        }

        scored.truncate(self.output_size);
        scored
    }
}

impl Default for SectionRanker {
    fn default() -> Self {
        Self::new(&RankOptions::default())
    }
}
