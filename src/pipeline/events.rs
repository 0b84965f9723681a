//! Structured progress events emitted by the pipeline.

use std::fmt;

/// Severity of a pipeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventLevel {
    /// Normal progress
    Info,
    /// Something was skipped but the run continues
    Warn,
    /// The run is about to fail
    Error,
}

impl EventLevel {
    /// The matching `log` level.
    pub fn as_log_level(self) -> log::Level {
        match self {
            EventLevel::Info => log::Level::Info,
            EventLevel::Warn => log::Level::Warn,
            EventLevel::Error => log::Level::Error,
        }
    }
}

/// Events emitted while processing a request.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// A document's pages were read.
    DocumentRead {
        /// Document identifier
        document: String,
        /// Number of pages read
        pages: usize,
    },

    /// A document was left out of the ranking.
    DocumentSkipped {
        /// Document identifier
        document: String,
        /// Why it was skipped
        reason: String,
    },

    /// A document could not be read and the run is aborting.
    DocumentFailed {
        /// Document identifier
        document: String,
        /// The reader error
        error: String,
    },

    /// A document was split into sections.
    SectionsSegmented {
        /// Document identifier
        document: String,
        /// Number of sections found across all pages
        sections: usize,
    },

    /// The persona profile was derived.
    ProfileBuilt {
        /// Keyword count
        keywords: usize,
        /// Primary focus tags
        primary_focus: Vec<String>,
        /// Secondary focus tags
        secondary_focus: Vec<String>,
    },

    /// Sections were scored and selected.
    RankingFinished {
        /// Sections that were scored
        candidates: usize,
        /// Sections surfaced in the result
        surfaced: usize,
    },

    /// The output document was assembled.
    RunFinished {
        /// Documents that contributed pages
        documents: usize,
        /// Extracted sections in the output
        sections: usize,
        /// Refined subsections in the output
        subsections: usize,
    },
}

impl PipelineEvent {
    /// Severity of this event.
    pub fn level(&self) -> EventLevel {
        match self {
            PipelineEvent::DocumentSkipped { .. } => EventLevel::Warn,
            PipelineEvent::DocumentFailed { .. } => EventLevel::Error,
            _ => EventLevel::Info,
        }
    }

    /// The document this event concerns, if any.
    pub fn document(&self) -> Option<&str> {
        match self {
            PipelineEvent::DocumentRead { document, .. }
            | PipelineEvent::DocumentSkipped { document, .. }
            | PipelineEvent::DocumentFailed { document, .. }
            | PipelineEvent::SectionsSegmented { document, .. } => Some(document),
            _ => None,
        }
    }
}

impl fmt::Display for PipelineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineEvent::DocumentRead { document, pages } => {
                write!(f, "Read {} ({} pages)", document, pages)
            }
            PipelineEvent::DocumentSkipped { document, reason } => {
                write!(f, "Skipped {}: {}", document, reason)
            }
            PipelineEvent::DocumentFailed { document, error } => {
                write!(f, "Failed to read {}: {}", document, error)
            }
            PipelineEvent::SectionsSegmented { document, sections } => {
                write!(f, "Found {} sections in {}", sections, document)
            }
            PipelineEvent::ProfileBuilt {
                keywords,
                primary_focus,
                secondary_focus,
            } => write!(
                f,
                "Profile: {} keywords, primary [{}], secondary [{}]",
                keywords,
                primary_focus.join(", "),
                secondary_focus.join(", ")
            ),
            PipelineEvent::RankingFinished {
                candidates,
                surfaced,
            } => write!(f, "Ranked {} sections, surfaced {}", candidates, surfaced),
            PipelineEvent::RunFinished {
                documents,
                sections,
                subsections,
            } => write!(
                f,
                "Processed {} documents: {} sections, {} subsections",
                documents, sections, subsections
            ),
        }
    }
}

/// Receives pipeline events.
pub trait EventSink {
    /// Handle one event.
    fn emit(&mut self, event: PipelineEvent);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: PipelineEvent) {
        log::log!(event.level().as_log_level(), "{}", event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: PipelineEvent) {}
}

/// Keeps every event in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    events: Vec<PipelineEvent>,
}

impl CollectingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far, in order.
    pub fn events(&self) -> &[PipelineEvent] {
        &self.events
    }

    /// Take the collected events.
    pub fn into_events(self) -> Vec<PipelineEvent> {
        self.events
    }

    /// Events at the given level.
    pub fn at_level(&self, level: EventLevel) -> impl Iterator<Item = &PipelineEvent> {
        self.events.iter().filter(move |e| e.level() == level)
    }

    /// Identifiers of skipped documents.
    pub fn skipped_documents(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PipelineEvent::DocumentSkipped { document, .. } => Some(document.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for CollectingSink {
    fn emit(&mut self, event: PipelineEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        let skipped = PipelineEvent::DocumentSkipped {
            document: "a.pdf".into(),
            reason: "gone".into(),
        };
        assert_eq!(skipped.level(), EventLevel::Warn);
        assert_eq!(skipped.document(), Some("a.pdf"));
        assert_eq!(skipped.to_string(), "Skipped a.pdf: gone");

        let done = PipelineEvent::RunFinished {
            documents: 1,
            sections: 2,
            subsections: 2,
        };
        assert_eq!(done.level(), EventLevel::Info);
        assert_eq!(done.document(), None);
        assert_eq!(EventLevel::Error.as_log_level(), log::Level::Error);
    }

    #[test]
    fn test_collecting_sink() {
        let mut sink = CollectingSink::new();
        sink.emit(PipelineEvent::DocumentRead {
            document: "a.pdf".into(),
            pages: 3,
        });
        sink.emit(PipelineEvent::DocumentSkipped {
            document: "b.pdf".into(),
            reason: "missing".into(),
        });
        assert_eq!(sink.events().len(), 2);
        assert_eq!(sink.at_level(EventLevel::Warn).count(), 1);
        assert_eq!(sink.skipped_documents(), vec!["b.pdf"]);
        assert_eq!(sink.into_events().len(), 2);
    }
}
