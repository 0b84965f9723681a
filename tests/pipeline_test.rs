//! End-to-end tests: request file and text documents in, ranked JSON out.

use std::fs;
use std::path::Path;

use docrank::{
    assemble_output, render, CollectingSink, Docrank, DocumentPages, DocumentRef, JobToBeDone,
    JsonFormat, NullSink, Persona, Pipeline, PipelineEvent, RankOptions, RankRequest,
};

const CITY_GUIDE: &str = "\
Guide to the South of France
CITIES OVERVIEW
Marseille is the oldest city in France and a lively port.
Nice offers a long promenade along the sea.
\x0c\
COASTAL ADVENTURES
The beach at Calanques is perfect for a group of friends who enjoy swimming.
Boat tours leave the harbour every morning and return before sunset.
Budget travellers can rent kayaks for a few euros per hour.
NIGHTLIFE AND ENTERTAINMENT
Bars and clubs in Nice stay open late and welcome college students.
";

const HISTORY: &str = "\
HISTORY OF THE REGION
Roman builders left roads and arenas across Provence.
Medieval towns preserved their walls and churches.
";

fn write_collection(dir: &Path) {
    fs::write(dir.join("cities.txt"), CITY_GUIDE).unwrap();
    fs::write(dir.join("history.txt"), HISTORY).unwrap();
}

fn travel_request(files: &[&str]) -> RankRequest {
    RankRequest::new(
        files.iter().map(|f| DocumentRef::new(*f)).collect(),
        Persona::new("Travel Planner"),
        JobToBeDone::new("Plan a trip of 4 days for a group of 10 college friends."),
    )
}

#[test]
fn test_travel_planner_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    write_collection(dir.path());

    let request = travel_request(&["cities.txt", "history.txt"]);
    let mut sink = CollectingSink::new();
    let output = Docrank::new()
        .documents_dir(dir.path())
        .process(&request, &mut sink)
        .unwrap();

    assert_eq!(output.extracted_sections.len(), 4);
    assert_eq!(output.subsection_analysis.len(), 4);
    let ranks: Vec<u32> = output
        .extracted_sections
        .iter()
        .map(|s| s.importance_rank)
        .collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);

    let top = &output.extracted_sections[0];
    assert_eq!(top.section_title, "COASTAL ADVENTURES");
    assert_eq!(top.document, "cities.txt");
    assert_eq!(top.page_number, 2);

    for (section, analysis) in output
        .extracted_sections
        .iter()
        .zip(&output.subsection_analysis)
    {
        assert_eq!(section.document, analysis.document);
        assert_eq!(section.page_number, analysis.page_number);
        assert!(!analysis.refined_text.is_empty());
    }

    assert_eq!(
        output.metadata.input_documents,
        vec!["cities.txt", "history.txt"]
    );
    assert_eq!(output.metadata.persona, "Travel Planner");
    assert!(sink.skipped_documents().is_empty());
}

#[test]
fn test_missing_document_is_listed_but_not_ranked() {
    let dir = tempfile::tempdir().unwrap();
    write_collection(dir.path());

    let request = travel_request(&["cities.txt", "missing.pdf"]);
    let mut sink = CollectingSink::new();
    let output = Docrank::new()
        .documents_dir(dir.path())
        .process(&request, &mut sink)
        .unwrap();

    assert_eq!(
        output.metadata.input_documents,
        vec!["cities.txt", "missing.pdf"]
    );
    assert!(output
        .extracted_sections
        .iter()
        .all(|s| s.document == "cities.txt"));
    assert_eq!(sink.skipped_documents(), vec!["missing.pdf"]);
}

#[test]
fn test_researcher_methodology_ranks_first() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("paper.txt"),
        "Journal of Examples | Page 1\n\x0cMETHODOLOGY\nWe report data analysis results \
         for the survey and describe how the study was conducted.\n",
    )
    .unwrap();

    let mut request = RankRequest::sample();
    request.documents = vec![DocumentRef::new("paper.txt")];

    let output = Docrank::new()
        .documents_dir(dir.path())
        .process(&request, &mut NullSink)
        .unwrap();

    let first = &output.extracted_sections[0];
    assert_eq!(first.section_title, "METHODOLOGY");
    assert_eq!(first.importance_rank, 1);
    assert_eq!(first.page_number, 2);
}

#[test]
fn test_rank_is_idempotent() {
    let docs = vec![
        DocumentPages::from_texts("cities.txt", CITY_GUIDE.split('\x0c')),
        DocumentPages::from_texts("history.txt", [HISTORY]),
    ];
    let persona = Persona::new("Travel Planner");
    let job = JobToBeDone::new("Plan a trip of 4 days for a group of 10 college friends.");
    let pipeline = Pipeline::new();

    let first = pipeline.rank(&docs, &persona, &job).unwrap();
    let second = pipeline.rank(&docs, &persona, &job).unwrap();
    let sequential = Pipeline::with_options(RankOptions::new().sequential())
        .rank(&docs, &persona, &job)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first, sequential);
}

#[test]
fn test_output_json_shape() {
    let dir = tempfile::tempdir().unwrap();
    write_collection(dir.path());
    let request = travel_request(&["cities.txt"]);

    let output = Docrank::new()
        .documents_dir(dir.path())
        .process(&request, &mut NullSink)
        .unwrap();
    let json = render::to_json(&output, JsonFormat::Pretty).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let metadata = &value["metadata"];
    assert!(metadata["input_documents"].is_array());
    assert_eq!(metadata["job_to_be_done"], request.job_to_be_done.task.as_str());
    assert!(metadata["processing_timestamp"].as_str().unwrap().contains('T'));

    let section = &value["extracted_sections"][0];
    assert!(section["document"].is_string());
    assert!(section["section_title"].is_string());
    assert_eq!(section["importance_rank"], 1);
    assert!(section["page_number"].is_u64());

    let analysis = &value["subsection_analysis"][0];
    assert!(analysis["refined_text"].is_string());
}

#[test]
fn test_process_events_in_order() {
    let dir = tempfile::tempdir().unwrap();
    write_collection(dir.path());
    let request = travel_request(&["cities.txt", "history.txt"]);

    let mut sink = CollectingSink::new();
    Docrank::new()
        .documents_dir(dir.path())
        .process(&request, &mut sink)
        .unwrap();

    let kinds: Vec<&str> = sink
        .events()
        .iter()
        .map(|e| match e {
            PipelineEvent::DocumentRead { .. } => "read",
            PipelineEvent::DocumentSkipped { .. } => "skipped",
            PipelineEvent::DocumentFailed { .. } => "failed",
            PipelineEvent::SectionsSegmented { .. } => "segmented",
            PipelineEvent::ProfileBuilt { .. } => "profile",
            PipelineEvent::RankingFinished { .. } => "ranked",
            PipelineEvent::RunFinished { .. } => "finished",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["read", "read", "segmented", "segmented", "profile", "ranked", "finished"]
    );
}

#[test]
fn test_assemble_output_with_fixed_timestamp_is_reproducible() {
    use chrono::{Local, TimeZone};

    let request = travel_request(&["cities.txt"]);
    let docs = vec![DocumentPages::from_texts("cities.txt", CITY_GUIDE.split('\x0c'))];
    let pipeline = Pipeline::new();
    let ts = Local.with_ymd_and_hms(2025, 7, 10, 9, 30, 0).unwrap();

    let a = assemble_output(
        &request,
        pipeline
            .rank(&docs, &request.persona, &request.job_to_be_done)
            .unwrap(),
        ts,
    );
    let b = assemble_output(
        &request,
        pipeline
            .rank(&docs, &request.persona, &request.job_to_be_done)
            .unwrap(),
        ts,
    );
    assert_eq!(
        render::to_json(&a, JsonFormat::Compact).unwrap(),
        render::to_json(&b, JsonFormat::Compact).unwrap()
    );
}
