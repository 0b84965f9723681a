//! # docrank
//!
//! Persona-driven section ranking for document collections.
//!
//! Given a set of documents, a persona role, and a job to be done, docrank
//! splits every page into titled sections, scores each section against a
//! profile derived from the persona and task, and returns the most relevant
//! sections together with short extractive summaries of them.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docrank::{render, Docrank, JsonFormat};
//!
//! fn main() -> docrank::Result<()> {
//!     let output = Docrank::new()
//!         .documents_dir("./collection")
//!         .process_file("challenge1b_input.json")?;
//!
//!     println!("{}", render::to_json(&output, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Reading**: [`reader`] turns PDF and text files into page texts
//! - **Segmentation**: [`segment`] finds headers by typographic convention
//! - **Profiling**: [`profile`] maps role and task to keywords and focus tags
//! - **Scoring and ranking**: [`score`] and [`rank`] order sections across all documents
//! - **Refinement**: [`refine`] keeps the best sentences of each surfaced section
//! - **Parallel processing**: uses Rayon for segmentation and scoring

pub mod error;
pub mod model;
pub mod options;
pub mod pipeline;
pub mod profile;
pub mod rank;
pub mod reader;
pub mod refine;
pub mod render;
pub mod score;
pub mod segment;
pub mod text;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    DocumentPages, DocumentRef, ExtractedSection, JobToBeDone, Metadata, Page, Persona,
    PersonaProfile, RankOutput, RankRequest, RankingResult, ScoredSection, Section,
    SubsectionAnalysis,
};
pub use options::{ErrorMode, RankOptions, RefineOptions, ScoreWeights};
pub use pipeline::{
    assemble_output, CollectingSink, EventLevel, EventSink, LogSink, NullSink, Pipeline,
    PipelineEvent,
};
pub use reader::{
    DocumentReader, InMemorySource, PageSource, PdfReader, ReadOptions, ReaderRegistry,
    TextReader,
};
pub use render::JsonFormat;
pub use text::{EnglishAnalyzer, LinguisticAnalyzer};

use std::path::{Path, PathBuf};

/// Rank already-read documents with default options.
///
/// # Example
///
/// ```
/// use docrank::{rank_documents, DocumentPages, JobToBeDone, Persona};
///
/// let docs = vec![DocumentPages::from_texts("a.pdf", ["BEACHES\nSandy beaches line the coast."])];
/// let persona = Persona::new("Travel Planner");
/// let result = rank_documents(&docs, &persona, &JobToBeDone::new("Plan a trip")).unwrap();
/// assert_eq!(result.extracted_sections.len(), 1);
/// ```
pub fn rank_documents(
    documents: &[DocumentPages],
    persona: &Persona,
    job: &JobToBeDone,
) -> Result<RankingResult> {
    Pipeline::new().rank(documents, persona, job)
}

/// Process a request file, resolving documents relative to `documents_dir`.
///
/// Progress is reported through the `log` facade.
pub fn process_file<P: AsRef<Path>, D: AsRef<Path>>(
    input: P,
    documents_dir: D,
) -> Result<RankOutput> {
    Docrank::new()
        .documents_dir(documents_dir.as_ref())
        .process_file(input)
}

/// Read the pages of a single PDF or text file.
pub fn read_pages<P: AsRef<Path>>(path: P) -> Result<Vec<Page>> {
    let path = path.as_ref();
    let id = path.to_string_lossy();
    ReaderRegistry::with_defaults(ReadOptions::default()).read_pages(&id)
}

/// Builder for end-to-end ranking runs.
///
/// # Example
///
/// ```no_run
/// use docrank::Docrank;
///
/// let output = Docrank::new()
///     .documents_dir("./pdfs")
///     .lenient()
///     .sequential()
///     .process_file("input.json")?;
/// # Ok::<(), docrank::Error>(())
/// ```
pub struct Docrank {
    rank_options: RankOptions,
    read_options: ReadOptions,
}

impl Docrank {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            rank_options: RankOptions::default(),
            read_options: ReadOptions::default(),
        }
    }

    /// Directory that document filenames are resolved against.
    pub fn documents_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.read_options = self.read_options.with_base_dir(dir);
        self
    }

    /// Skip unreadable documents and pages instead of failing.
    pub fn lenient(mut self) -> Self {
        self.rank_options = self.rank_options.lenient();
        self.read_options = self.read_options.lenient();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.rank_options = self.rank_options.sequential();
        self
    }

    /// Enable or disable Unicode normalization of page text.
    pub fn normalize_unicode(mut self, normalize: bool) -> Self {
        self.read_options = self.read_options.with_normalize_unicode(normalize);
        self
    }

    /// Replace the rank options.
    pub fn with_rank_options(mut self, options: RankOptions) -> Self {
        self.rank_options = options;
        self
    }

    /// Process a request, reporting progress to `sink`.
    pub fn process(&self, request: &RankRequest, sink: &mut dyn EventSink) -> Result<RankOutput> {
        let registry = ReaderRegistry::with_defaults(self.read_options.clone());
        Pipeline::with_options(self.rank_options.clone()).process(request, &registry, sink)
    }

    /// Load a request file and process it, logging progress.
    pub fn process_file<P: AsRef<Path>>(&self, input: P) -> Result<RankOutput> {
        let request = RankRequest::from_file(input)?;
        self.process(&request, &mut LogSink)
    }
}

impl Default for Docrank {
    fn default() -> Self {
        Self::new()
    }
}
