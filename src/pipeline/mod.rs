//! End-to-end ranking pipeline.
//!
//! [`Pipeline::rank`] is the pure core: page texts in, ranked sections and
//! refined excerpts out. [`Pipeline::process`] wraps it for a whole request,
//! reading documents from a [`PageSource`], reporting progress to an
//! [`EventSink`], and attaching run metadata.
//!
//! # Example
//!
//! ```
//! use docrank::model::{DocumentPages, JobToBeDone, Persona};
//! use docrank::pipeline::Pipeline;
//!
//! let docs = vec![DocumentPages::from_texts(
//!     "study.pdf",
//!     ["METHODOLOGY\nThe data analysis results are summarized below."],
//! )];
//! let result = Pipeline::new()
//!     .rank(
//!         &docs,
//!         &Persona::new("Researcher"),
//!         &JobToBeDone::new("Analyze the document content for key insights."),
//!     )
//!     .unwrap();
//! assert_eq!(result.extracted_sections[0].section_title, "METHODOLOGY");
//! ```

mod events;

pub use events::{CollectingSink, EventLevel, EventSink, LogSink, NullSink, PipelineEvent};

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Local};
use rayon::prelude::*;

use crate::error::Result;
use crate::model::{
    DocumentPages, ExtractedSection, JobToBeDone, Metadata, Persona, RankOutput, RankRequest,
    RankingResult, Section, SubsectionAnalysis,
};
use crate::options::{ErrorMode, RankOptions};
use crate::profile::{PersonaProfiler, ProfileRules};
use crate::rank::SectionRanker;
use crate::reader::PageSource;
use crate::refine::SubsectionRefiner;
use crate::score::RelevanceScorer;
use crate::segment::Segmenter;
use crate::text::{EnglishAnalyzer, LinguisticAnalyzer};

/// Format of `processing_timestamp`: local time, microsecond precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Orchestrates segmentation, profiling, ranking, and refinement.
pub struct Pipeline {
    analyzer: Arc<dyn LinguisticAnalyzer>,
    rules: ProfileRules,
    segmenter: Segmenter,
    options: RankOptions,
}

impl Pipeline {
    /// Create a pipeline with the English analyzer and built-in tables.
    pub fn new() -> Self {
        Self::with_options(RankOptions::default())
    }

    /// Create a pipeline with custom rank options.
    pub fn with_options(options: RankOptions) -> Self {
        Self {
            analyzer: Arc::new(EnglishAnalyzer::new()),
            rules: ProfileRules::default(),
            segmenter: Segmenter::new(),
            options,
        }
    }

    /// Replace the linguistic analyzer.
    pub fn analyzer(mut self, analyzer: Arc<dyn LinguisticAnalyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Replace the profile lookup tables.
    pub fn rules(mut self, rules: ProfileRules) -> Self {
        self.rules = rules;
        self
    }

    /// Replace the rank options.
    pub fn options(mut self, options: RankOptions) -> Self {
        self.options = options;
        self
    }

    /// Rank options in effect.
    pub fn rank_options(&self) -> &RankOptions {
        &self.options
    }

    /// Rank the sections of already-read documents.
    ///
    /// Deterministic: identical inputs give identical results.
    pub fn rank(
        &self,
        documents: &[DocumentPages],
        persona: &Persona,
        job: &JobToBeDone,
    ) -> Result<RankingResult> {
        self.rank_with_events(documents, persona, job, &mut NullSink)
    }

    /// Like [`rank`](Self::rank), reporting progress to `sink`.
    pub fn rank_with_events(
        &self,
        documents: &[DocumentPages],
        persona: &Persona,
        job: &JobToBeDone,
        sink: &mut dyn EventSink,
    ) -> Result<RankingResult> {
        let per_document = self.segment_documents(documents);
        for (doc, sections) in documents.iter().zip(&per_document) {
            sink.emit(PipelineEvent::SectionsSegmented {
                document: doc.id.clone(),
                sections: sections.len(),
            });
        }
        let sections: Vec<Section> = per_document.into_iter().flatten().collect();
        let candidates = sections.len();

        let analyzer: &dyn LinguisticAnalyzer = self.analyzer.as_ref();
        let profile =
            PersonaProfiler::new(&self.rules, analyzer).build(&persona.role, &job.task)?;
        sink.emit(PipelineEvent::ProfileBuilt {
            keywords: profile.keyword_count(),
            primary_focus: profile.primary_focus.iter().cloned().collect(),
            secondary_focus: profile.secondary_focus.iter().cloned().collect(),
        });

        let scorer = RelevanceScorer::new(&profile, analyzer, self.options.weights);
        let top = SectionRanker::new(&self.options).rank(sections, &scorer)?;
        let refined = SubsectionRefiner::new(self.options.refine).refine(&top, &scorer)?;

        sink.emit(PipelineEvent::RankingFinished {
            candidates,
            surfaced: top.len(),
        });

        Ok(RankingResult {
            extracted_sections: top.iter().map(ExtractedSection::from_scored).collect(),
            subsection_analysis: refined.into_iter().map(SubsectionAnalysis::from).collect(),
        })
    }

    /// Process a full request: read, rank, and assemble the output.
    ///
    /// Missing documents are reported and skipped. Other read failures abort
    /// the run in strict mode and are skipped in lenient mode.
    pub fn process(
        &self,
        request: &RankRequest,
        source: &dyn PageSource,
        sink: &mut dyn EventSink,
    ) -> Result<RankOutput> {
        request.validate()?;

        let documents = self.read_documents(request, source, sink)?;
        let result =
            self.rank_with_events(&documents, &request.persona, &request.job_to_be_done, sink)?;
        let output = assemble_output(request, result, Local::now());

        sink.emit(PipelineEvent::RunFinished {
            documents: documents.len(),
            sections: output.extracted_sections.len(),
            subsections: output.subsection_analysis.len(),
        });
        Ok(output)
    }

    /// Read every requested document, in request order.
    ///
    /// A filename listed more than once is read at its first appearance only.
    pub fn read_documents(
        &self,
        request: &RankRequest,
        source: &dyn PageSource,
        sink: &mut dyn EventSink,
    ) -> Result<Vec<DocumentPages>> {
        let mut documents = Vec::with_capacity(request.documents.len());
        let mut seen = HashSet::new();

        for doc in &request.documents {
            let id = doc.filename.as_str();
            if !seen.insert(id) {
                log::debug!("Skipping repeated document {}", id);
                continue;
            }
            match source.read_pages(id) {
                Ok(pages) => {
                    sink.emit(PipelineEvent::DocumentRead {
                        document: id.to_string(),
                        pages: pages.len(),
                    });
                    documents.push(DocumentPages {
                        id: id.to_string(),
                        pages,
                    });
                }
                Err(e) if e.is_missing_document() => {
                    sink.emit(PipelineEvent::DocumentSkipped {
                        document: id.to_string(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => match self.options.error_mode {
                    ErrorMode::Strict => {
                        sink.emit(PipelineEvent::DocumentFailed {
                            document: id.to_string(),
                            error: e.to_string(),
                        });
                        return Err(e);
                    }
                    ErrorMode::Lenient => {
                        sink.emit(PipelineEvent::DocumentSkipped {
                            document: id.to_string(),
                            reason: e.to_string(),
                        });
                    }
                },
            }
        }

        Ok(documents)
    }

    fn segment_documents(&self, documents: &[DocumentPages]) -> Vec<Vec<Section>> {
        let segment = |doc: &DocumentPages| -> Vec<Section> {
            doc.pages
                .iter()
                .flat_map(|page| self.segmenter.segment_page(page))
                .collect()
        };

        if self.options.parallel {
            documents.par_iter().map(segment).collect()
        } else {
            documents.iter().map(segment).collect()
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Attach run metadata to a ranking result.
///
/// Metadata lists every requested document, including skipped ones, and the
/// persona and task exactly as supplied.
pub fn assemble_output(
    request: &RankRequest,
    result: RankingResult,
    timestamp: DateTime<Local>,
) -> RankOutput {
    let metadata = Metadata {
        input_documents: request.document_ids(),
        persona: request.persona.role.clone(),
        job_to_be_done: request.job_to_be_done.task.clone(),
        processing_timestamp: timestamp.format(TIMESTAMP_FORMAT).to_string(),
    };
    RankOutput::new(metadata, result)
}
