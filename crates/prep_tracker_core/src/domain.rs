//! crates/prep_tracker_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

use crate::ports::{PortError, PortResult};

/// Store-assigned identifier shared by both record kinds.
pub type RecordId = i64;

/// Category options offered when filing a question.
pub const QUESTION_CATEGORIES: &[&str] = &[
    "Algorithm",
    "Data Structure",
    "System Design",
    "Behavioral",
    "Database",
    "Backend",
    "Design Patterns",
];

/// Tags offered as one-click buttons on the question form.
pub const SUGGESTED_TAGS: &[&str] = &[
    "Linked List",
    "Array",
    "Tree",
    "Graph",
    "Dynamic Programming",
    "Greedy",
    "Sorting",
    "Searching",
    "String",
    "Bit Manipulation",
    "Math",
    "Recursion",
    "Backtracking",
    "Concurrency",
    "Object-Oriented Programming",
    "Two Pointers",
    "Sliding Window",
    "Hash Table",
    "Stack",
    "Queue",
    "Heap/Priority Queue",
    "Database",
    "SQL",
    "NoSQL",
    "API Design",
    "Prefix-sum",
    "Disjoint-Set",
];

//=========================================================================================
// Entities
//=========================================================================================

/// Anything the client cache can hold: a record with a stable identifier.
pub trait Entity: Clone + PartialEq {
    fn id(&self) -> RecordId;
}

/// Which of the two collections a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Question,
    CodeSnippet,
}

impl EntityKind {
    /// Plural noun used in user-facing messages.
    pub fn plural(self) -> &'static str {
        match self {
            EntityKind::Question => "questions",
            EntityKind::CodeSnippet => "code snippets",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Easy" => Ok(Difficulty::Easy),
            "Medium" => Ok(Difficulty::Medium),
            "Hard" => Ok(Difficulty::Hard),
            other => Err(PortError::Validation(format!(
                "Difficulty must be one of Easy, Medium, Hard (got '{}')",
                other
            ))),
        }
    }
}

/// An interview question the user has worked through.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub link: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub platform: String,
    pub date_solved: Option<NaiveDate>,
    pub hint: String,
    pub solution: String,
    pub notes: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Question {
    fn id(&self) -> RecordId {
        self.id
    }
}

impl Question {
    /// When the question was worked on: the solve date at midnight UTC, or creation time.
    pub fn activity_at(&self) -> DateTime<Utc> {
        match self.date_solved {
            Some(date) => Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)),
            None => self.created_at,
        }
    }
}

/// A condensed, reusable piece of code kept for revision.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeSnippet {
    pub id: RecordId,
    pub title: String,
    pub language: String,
    pub category: String,
    pub description: Option<String>,
    pub condensed_code: String,
    pub complexity: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for CodeSnippet {
    fn id(&self) -> RecordId {
        self.id
    }
}

//=========================================================================================
// Drafts (create/update bodies)
//=========================================================================================

/// Every user-editable field of a question. Used for both create and full-replace update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionDraft {
    pub title: String,
    pub description: String,
    pub link: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub platform: String,
    pub date_solved: Option<NaiveDate>,
    pub hint: String,
    pub solution: String,
    pub notes: String,
    pub tags: Vec<String>,
}

impl QuestionDraft {
    /// Presence check performed before any remote or store call.
    pub fn validate(&self) -> PortResult<()> {
        if self.title.trim().is_empty() {
            return Err(PortError::Validation("Title is required".to_string()));
        }
        Ok(())
    }

    /// Splits a comma-separated tag field into trimmed, non-empty tags.
    pub fn parse_tags(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl From<&Question> for QuestionDraft {
    fn from(q: &Question) -> Self {
        Self {
            title: q.title.clone(),
            description: q.description.clone(),
            link: q.link.clone(),
            category: q.category.clone(),
            difficulty: q.difficulty,
            platform: q.platform.clone(),
            date_solved: q.date_solved,
            hint: q.hint.clone(),
            solution: q.solution.clone(),
            notes: q.notes.clone(),
            tags: q.tags.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeSnippetDraft {
    pub title: String,
    pub language: String,
    pub category: String,
    pub description: Option<String>,
    pub condensed_code: String,
    pub complexity: String,
}

impl CodeSnippetDraft {
    pub fn validate(&self) -> PortResult<()> {
        let missing = [
            &self.title,
            &self.language,
            &self.category,
            &self.condensed_code,
        ]
        .iter()
        .any(|field| field.trim().is_empty());

        if missing {
            return Err(PortError::Validation(
                "Title, language, category, and condensed code are required".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<&CodeSnippet> for CodeSnippetDraft {
    fn from(s: &CodeSnippet) -> Self {
        Self {
            title: s.title.clone(),
            language: s.language.clone(),
            category: s.category.clone(),
            description: s.description.clone(),
            condensed_code: s.condensed_code.clone(),
            complexity: s.complexity.clone(),
        }
    }
}
