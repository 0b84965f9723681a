//! Data model for ranking runs.
//!
//! Pages come in from a reader, sections come out of the segmenter, and the
//! ranked/refined records are what the pipeline hands back. Request and output
//! types mirror the JSON documents exchanged with the CLI.

mod output;
mod page;
mod profile;
mod request;
mod section;

pub use output::{ExtractedSection, Metadata, RankOutput, RankingResult, SubsectionAnalysis};
pub use page::{DocumentPages, Page};
pub use profile::PersonaProfile;
pub use request::{ChallengeInfo, DocumentRef, JobToBeDone, Persona, RankRequest};
pub use section::{RefinedSubsection, ScoredSection, Section};
