//! Persona profile.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Weighted interest model derived from a persona role and a task.
///
/// Built once per run and shared read-only by every scoring call. All strings
/// are lower-case; the sets keep a stable order so output is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaProfile {
    /// Lower-cased persona role
    pub role: String,

    /// Lower-cased task description
    pub task: String,

    /// Role-table keywords plus non-stopword task words
    pub keywords: BTreeSet<String>,

    /// High-level intents triggered by the task
    pub primary_focus: BTreeSet<String>,

    /// Situational modifiers triggered by role and task
    pub secondary_focus: BTreeSet<String>,
}

impl PersonaProfile {
    /// Number of distinct keywords.
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    /// Whether the profile carries any keywords at all.
    pub fn has_keywords(&self) -> bool {
        !self.keywords.is_empty()
    }
}
