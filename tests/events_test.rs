//! Tests for pipeline event sinks.

use docrank::{
    DocumentRef, EventLevel, EventSink, InMemorySource, JobToBeDone, LogSink, Persona, Pipeline,
    PipelineEvent, RankRequest,
};

/// Sink that counts events by level.
#[derive(Default)]
struct CountingSink {
    info: usize,
    warn: usize,
    error: usize,
}

impl EventSink for CountingSink {
    fn emit(&mut self, event: PipelineEvent) {
        match event.level() {
            EventLevel::Info => self.info += 1,
            EventLevel::Warn => self.warn += 1,
            EventLevel::Error => self.error += 1,
        }
    }
}

fn request(files: &[&str]) -> RankRequest {
    RankRequest::new(
        files.iter().map(|f| DocumentRef::new(*f)).collect(),
        Persona::new("Student"),
        JobToBeDone::new("Prepare for the exam on key concepts"),
    )
}

fn source() -> InMemorySource {
    InMemorySource::new()
        .with_document("notes.pdf", ["KEY CONCEPTS\nA theory explains observations."])
        .with_document("extra.pdf", ["DEFINITIONS\nA definition states meaning."])
}

#[test]
fn test_custom_sink_counts_levels() {
    let mut sink = CountingSink::default();
    Pipeline::new()
        .process(
            &request(&["notes.pdf", "absent.pdf", "extra.pdf"]),
            &source(),
            &mut sink,
        )
        .unwrap();

    // read x2, segmented x2, profile, ranked, finished
    assert_eq!(sink.info, 7);
    assert_eq!(sink.warn, 1);
    assert_eq!(sink.error, 0);
}

#[test]
fn test_profile_event_lists_focus() {
    let mut sink = docrank::CollectingSink::new();
    Pipeline::new()
        .process(&request(&["notes.pdf"]), &source(), &mut sink)
        .unwrap();

    let profile = sink
        .events()
        .iter()
        .find_map(|e| match e {
            PipelineEvent::ProfileBuilt { primary_focus, .. } => Some(primary_focus.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(profile, vec!["learning".to_string()]);
}

#[test]
fn test_run_finished_counts() {
    let mut sink = docrank::CollectingSink::new();
    let output = Pipeline::new()
        .process(&request(&["notes.pdf", "extra.pdf"]), &source(), &mut sink)
        .unwrap();

    match sink.events().last() {
        Some(PipelineEvent::RunFinished {
            documents,
            sections,
            subsections,
        }) => {
            assert_eq!(*documents, 2);
            assert_eq!(*sections, output.extracted_sections.len());
            assert_eq!(*subsections, 2);
        }
        other => panic!("unexpected last event: {:?}", other),
    }
}

#[test]
fn test_log_sink_accepts_every_level() {
    let mut sink = LogSink;
    sink.emit(PipelineEvent::DocumentRead {
        document: "a.pdf".into(),
        pages: 1,
    });
    sink.emit(PipelineEvent::DocumentSkipped {
        document: "b.pdf".into(),
        reason: "Document not found: b.pdf".into(),
    });
    sink.emit(PipelineEvent::DocumentFailed {
        document: "c.pdf".into(),
        error: "PDF parsing error".into(),
    });
}
