//! Persona profile construction.
//!
//! Classification is table driven: role categories contribute curated
//! keywords, and focus tags fire when one of their trigger words occurs as a
//! substring of the lower-cased role/task text. Rules are evaluated in table
//! order, so the same tables always give the same profile.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::model::PersonaProfile;
use crate::text::LinguisticAnalyzer;

/// Primary focus used when no primary trigger matches.
pub const DEFAULT_PRIMARY_FOCUS: &str = "general";

/// Built-in role categories and their keywords.
pub const ROLE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "travel planner",
        &[
            "itinerary", "accommodation", "restaurant", "attraction", "activity",
            "transportation", "hotel", "booking", "schedule", "location", "sightseeing", "tour",
            "experience", "dining", "nightlife", "beach", "cultural", "budget", "group", "friend",
            "vacation", "trip", "destination",
        ],
    ),
    (
        "researcher",
        &[
            "methodology", "analysis", "data", "study", "research", "experiment", "result",
            "conclusion", "literature", "reference", "evaluation",
        ],
    ),
    (
        "student",
        &[
            "concept", "theory", "example", "definition", "explanation", "key", "important",
            "exam", "study", "learn", "understand",
        ],
    ),
    (
        "analyst",
        &[
            "trend", "performance", "metric", "analysis", "comparison", "data", "insight",
            "strategy", "market", "financial", "revenue",
        ],
    ),
];

/// Built-in primary focus tags, triggered by the task alone.
pub const PRIMARY_FOCUS_TRIGGERS: &[(&str, &[&str])] = &[
    ("planning", &["plan", "organize", "schedule", "arrange"]),
    ("analysis", &["analyze", "evaluate", "assess", "compare"]),
    ("learning", &["learn", "study", "understand", "prepare"]),
    ("research", &["research", "investigate", "explore", "review"]),
];

/// Built-in secondary focus tags, triggered by role and task together.
pub const SECONDARY_FOCUS_TRIGGERS: &[(&str, &[&str])] = &[
    ("group_activities", &["group", "friends", "team", "colleagues"]),
    ("budget_conscious", &["budget", "affordable", "cheap", "cost"]),
    ("time_sensitive", &["days", "quick", "short", "brief"]),
    ("experience_focused", &["experience", "memorable", "special", "unique"]),
];

/// A named category and the words attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    /// Category or focus name
    pub name: String,

    /// Keywords contributed (role rules) or trigger words (focus rules)
    pub words: Vec<String>,
}

impl CategoryRule {
    /// Create a rule; names and words are lower-cased.
    pub fn new<I, S>(name: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into().to_lowercase(),
            words: words.into_iter().map(|w| w.into().to_lowercase()).collect(),
        }
    }

    /// Whether any trigger word occurs inside `text`.
    fn triggered_by(&self, text: &str) -> bool {
        self.words.iter().any(|w| text.contains(w.as_str()))
    }
}

fn table(rules: &[(&str, &[&str])]) -> Vec<CategoryRule> {
    rules
        .iter()
        .map(|(name, words)| CategoryRule::new(*name, words.iter().copied()))
        .collect()
}

/// Lookup tables used by the profiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRules {
    /// Role category (matched as a substring of the role) to keywords
    pub role_keywords: Vec<CategoryRule>,

    /// Primary focus tag to task trigger words
    pub primary_focus: Vec<CategoryRule>,

    /// Secondary focus tag to role/task trigger words
    pub secondary_focus: Vec<CategoryRule>,
}

impl ProfileRules {
    /// Tables with no rules at all.
    pub fn empty() -> Self {
        Self {
            role_keywords: Vec::new(),
            primary_focus: Vec::new(),
            secondary_focus: Vec::new(),
        }
    }
}

impl Default for ProfileRules {
    fn default() -> Self {
        Self {
            role_keywords: table(ROLE_KEYWORDS),
            primary_focus: table(PRIMARY_FOCUS_TRIGGERS),
            secondary_focus: table(SECONDARY_FOCUS_TRIGGERS),
        }
    }
}

/// Builds persona profiles from role and task strings.
pub struct PersonaProfiler<'a> {
    rules: &'a ProfileRules,
    analyzer: &'a dyn LinguisticAnalyzer,
}

impl<'a> PersonaProfiler<'a> {
    /// Create a profiler over the given tables.
    pub fn new(rules: &'a ProfileRules, analyzer: &'a dyn LinguisticAnalyzer) -> Self {
        Self { rules, analyzer }
    }

    /// Build a profile. Empty or unknown roles and tasks still yield a
    /// valid profile; only analyzer failures are returned as errors.
    pub fn build(&self, role: &str, task: &str) -> Result<PersonaProfile> {
        let role = role.to_lowercase();
        let task = task.to_lowercase();

        let mut keywords: BTreeSet<String> = self
            .rules
            .role_keywords
            .iter()
            .filter(|rule| role.contains(rule.name.as_str()))
            .flat_map(|rule| rule.words.iter().cloned())
            .collect();

        for word in self.analyzer.tokenize(&task)? {
            let word = word.to_lowercase();
            if !self.analyzer.is_stopword(&word) {
                keywords.insert(word);
            }
        }

        let primary_focus = self.primary_focus(&task);
        let secondary_focus = self.secondary_focus(&role, &task);

        log::debug!(
            "Built profile: {} keywords, primary {:?}, secondary {:?}",
            keywords.len(),
            primary_focus,
            secondary_focus
        );

        Ok(PersonaProfile {
            role,
            task,
            keywords,
            primary_focus,
            secondary_focus,
        })
    }

    /// Primary focus tags for a lower-cased task.
    pub fn primary_focus(&self, task: &str) -> BTreeSet<String> {
        let mut focus = matching_tags(&self.rules.primary_focus, task);
        if focus.is_empty() {
            focus.insert(DEFAULT_PRIMARY_FOCUS.to_string());
        }
        focus
    }

    /// Secondary focus tags for a lower-cased role and task.
    pub fn secondary_focus(&self, role: &str, task: &str) -> BTreeSet<String> {
        let combined = format!("{} {}", role, task).to_lowercase();
        matching_tags(&self.rules.secondary_focus, &combined)
    }
}

fn matching_tags(rules: &[CategoryRule], text: &str) -> BTreeSet<String> {
    rules
        .iter()
        .filter(|rule| rule.triggered_by(text))
        .map(|rule| rule.name.clone())
        .collect()
}
