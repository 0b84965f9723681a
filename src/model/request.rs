//! Ranking request, as read from the input JSON.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional bookkeeping about the test case that produced a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeInfo {
    /// Challenge identifier
    #[serde(default)]
    pub challenge_id: String,

    /// Test case name
    #[serde(default)]
    pub test_case_name: String,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A document named by the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// File name, also used as the document identifier
    pub filename: String,

    /// Human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl DocumentRef {
    /// Create a reference to a file.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            title: None,
        }
    }
}

/// The reader the ranking is tailored to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    /// Role description, e.g. "Travel Planner"
    #[serde(default)]
    pub role: String,
}

impl Persona {
    /// Create a persona from a role string.
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into() }
    }
}

/// What the persona is trying to get done.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobToBeDone {
    /// Task description
    #[serde(default)]
    pub task: String,
}

impl JobToBeDone {
    /// Create a job from a task string.
    pub fn new(task: impl Into<String>) -> Self {
        Self { task: task.into() }
    }
}

/// A complete ranking request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankRequest {
    /// Test case bookkeeping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_info: Option<ChallengeInfo>,

    /// Documents to rank, in iteration order
    pub documents: Vec<DocumentRef>,

    /// Target persona
    pub persona: Persona,

    /// Task to serve
    pub job_to_be_done: JobToBeDone,
}

impl RankRequest {
    /// Create a request.
    pub fn new(documents: Vec<DocumentRef>, persona: Persona, job: JobToBeDone) -> Self {
        Self {
            challenge_info: None,
            documents,
            persona,
            job_to_be_done: job,
        }
    }

    /// Parse and validate a request from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let request: RankRequest = serde_json::from_str(json)?;
        request.validate()?;
        Ok(request)
    }

    /// Load and validate a request from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check the structural requirements the pipeline relies on.
    pub fn validate(&self) -> Result<()> {
        if self.documents.is_empty() {
            return Err(Error::InvalidInput("no documents listed".into()));
        }
        if let Some(pos) = self
            .documents
            .iter()
            .position(|d| d.filename.trim().is_empty())
        {
            return Err(Error::InvalidInput(format!(
                "document #{} has an empty filename",
                pos + 1
            )));
        }
        Ok(())
    }

    /// Document identifiers in request order.
    pub fn document_ids(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.filename.clone()).collect()
    }

    /// A ready-to-edit example request.
    pub fn sample() -> Self {
        Self {
            challenge_info: Some(ChallengeInfo {
                challenge_id: "test_001".into(),
                test_case_name: "sample_test".into(),
                description: Some("Sample test case".into()),
            }),
            documents: vec![DocumentRef {
                filename: "sample_document.pdf".into(),
                title: Some("Sample Document".into()),
            }],
            persona: Persona::new("Researcher"),
            job_to_be_done: JobToBeDone::new("Analyze the document content for key insights."),
        }
    }
}
