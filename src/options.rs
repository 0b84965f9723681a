//! Ranking options and configuration.

/// Default number of sections that receive an importance rank.
pub const DEFAULT_SHORTLIST_SIZE: usize = 10;

/// Default number of ranked sections surfaced in the output.
pub const DEFAULT_OUTPUT_SIZE: usize = 5;

/// Options for a ranking run.
#[derive(Debug, Clone)]
pub struct RankOptions {
    /// How many top sections receive an importance rank
    pub shortlist_size: usize,

    /// How many ranked sections are surfaced (never more than the shortlist)
    pub output_size: usize,

    /// Scoring weights
    pub weights: ScoreWeights,

    /// Excerpt construction
    pub refine: RefineOptions,

    /// Whether to segment documents and score sections in parallel
    pub parallel: bool,

    /// How reader failures other than missing documents are handled
    pub error_mode: ErrorMode,
}

impl RankOptions {
    /// Create new rank options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shortlist size.
    pub fn with_shortlist_size(mut self, size: usize) -> Self {
        self.shortlist_size = size;
        self
    }

    /// Set the number of surfaced sections.
    pub fn with_output_size(mut self, size: usize) -> Self {
        self.output_size = size;
        self
    }

    /// Set scoring weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set refinement options.
    pub fn with_refine(mut self, refine: RefineOptions) -> Self {
        self.refine = refine;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Skip unreadable documents instead of aborting.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Number of sections actually surfaced.
    pub fn surfaced_size(&self) -> usize {
        self.output_size.min(self.shortlist_size)
    }
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            shortlist_size: DEFAULT_SHORTLIST_SIZE,
            output_size: DEFAULT_OUTPUT_SIZE,
            weights: ScoreWeights::default(),
            refine: RefineOptions::default(),
            parallel: true,
            error_mode: ErrorMode::Strict,
        }
    }
}

/// Linear weighting of the relevance components.
///
/// Keyword and length components are normalized to `[0, 1]`; the focus
/// components accumulate points per matching term and are not capped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Weight of the keyword-coverage component
    pub keyword: f64,

    /// Weight of the primary-focus component
    pub primary: f64,

    /// Weight of the secondary-focus component
    pub secondary: f64,

    /// Weight of the length component
    pub length: f64,

    /// Points per matching primary-focus term
    pub primary_points: f64,

    /// Points per matching secondary-focus term
    pub secondary_points: f64,

    /// Token count at which the length component saturates
    pub length_saturation: usize,

    /// Tokens shorter than this are dropped during normalization
    pub min_token_len: usize,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            keyword: 0.4,
            primary: 0.3,
            secondary: 0.2,
            length: 0.1,
            primary_points: 2.0,
            secondary_points: 1.0,
            length_saturation: 50,
            min_token_len: 3,
        }
    }
}

/// How excerpts are built from a section's sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefineOptions {
    /// Number of top-scoring sentences kept
    pub max_sentences: usize,

    /// Excerpts shorter than this (in characters) may fall back
    pub min_chars: usize,

    /// Number of leading sentences used by the fallback
    pub fallback_sentences: usize,
}

impl Default for RefineOptions {
    fn default() -> Self {
        Self {
            max_sentences: 5,
            min_chars: 100,
            fallback_sentences: 3,
        }
    }
}

/// Error handling mode for document reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any reader error other than a missing document
    #[default]
    Strict,
    /// Skip unreadable documents and pages and continue
    Lenient,
}
