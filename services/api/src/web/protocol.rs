//! services/api/src/web/protocol.rs
//!
//! Defines the JSON wire format of the record service, shared by the Axum handlers
//! and the HTTP client adapter so both ends agree on one representation.
//!
//! Field names are camelCase. Empty strings in optional request fields mean "absent".

use chrono::{DateTime, NaiveDate, Utc};
use prep_tracker_core::domain::{
    CodeSnippet, CodeSnippetDraft, Difficulty, Question, QuestionDraft, RecordId,
};
use prep_tracker_core::ports::{PortError, PortResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

//=========================================================================================
// Shared Helpers
//=========================================================================================

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_difficulty(value: Option<String>) -> PortResult<Option<Difficulty>> {
    non_empty(value).map(|v| v.parse()).transpose()
}

fn parse_date(value: Option<String>) -> PortResult<Option<NaiveDate>> {
    non_empty(value)
        .map(|v| {
            NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").map_err(|_| {
                PortError::Validation(format!("dateSolved must be YYYY-MM-DD (got '{}')", v))
            })
        })
        .transpose()
}

/// The body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// The body of a successful delete.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

//=========================================================================================
// Questions
//=========================================================================================

/// A stored question as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResource {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub link: Option<String>,
    pub category: Option<String>,
    /// One of `Easy`, `Medium`, `Hard`, or null.
    pub difficulty: Option<String>,
    #[serde(default)]
    pub platform: String,
    pub date_solved: Option<NaiveDate>,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub solution: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Question> for QuestionResource {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            title: q.title,
            description: q.description,
            link: q.link,
            category: q.category,
            difficulty: q.difficulty.map(|d| d.to_string()),
            platform: q.platform,
            date_solved: q.date_solved,
            hint: q.hint,
            solution: q.solution,
            notes: q.notes,
            tags: q.tags,
            created_at: q.created_at,
            updated_at: q.updated_at,
        }
    }
}

impl TryFrom<QuestionResource> for Question {
    type Error = PortError;

    fn try_from(r: QuestionResource) -> PortResult<Self> {
        Ok(Self {
            id: r.id,
            title: r.title,
            description: r.description,
            link: r.link,
            category: r.category,
            difficulty: parse_difficulty(r.difficulty)?,
            platform: r.platform,
            date_solved: r.date_solved,
            hint: r.hint,
            solution: r.solution,
            notes: r.notes,
            tags: r.tags,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

/// The body of a question create or full-replace update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub platform: Option<String>,
    /// `YYYY-MM-DD`; empty means not solved yet.
    pub date_solved: Option<String>,
    pub hint: Option<String>,
    pub solution: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl QuestionPayload {
    /// Converts to a domain draft, rejecting malformed values. Presence is checked separately.
    pub fn into_draft(self) -> PortResult<QuestionDraft> {
        Ok(QuestionDraft {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            link: non_empty(self.link),
            category: non_empty(self.category),
            difficulty: parse_difficulty(self.difficulty)?,
            platform: self.platform.unwrap_or_default(),
            date_solved: parse_date(self.date_solved)?,
            hint: self.hint.unwrap_or_default(),
            solution: self.solution.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
        })
    }
}

impl From<&QuestionDraft> for QuestionPayload {
    fn from(d: &QuestionDraft) -> Self {
        Self {
            title: Some(d.title.clone()),
            description: Some(d.description.clone()),
            link: d.link.clone(),
            category: d.category.clone(),
            difficulty: d.difficulty.map(|v| v.to_string()),
            platform: Some(d.platform.clone()),
            date_solved: d.date_solved.map(|v| v.format("%Y-%m-%d").to_string()),
            hint: Some(d.hint.clone()),
            solution: Some(d.solution.clone()),
            notes: Some(d.notes.clone()),
            tags: Some(d.tags.clone()),
        }
    }
}

//=========================================================================================
// Code Snippets
//=========================================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CodeSnippetResource {
    pub id: RecordId,
    pub title: String,
    pub language: String,
    pub category: String,
    pub description: Option<String>,
    pub condensed_code: String,
    #[serde(default)]
    pub complexity: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CodeSnippet> for CodeSnippetResource {
    fn from(s: CodeSnippet) -> Self {
        Self {
            id: s.id,
            title: s.title,
            language: s.language,
            category: s.category,
            description: s.description,
            condensed_code: s.condensed_code,
            complexity: s.complexity,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

impl From<CodeSnippetResource> for CodeSnippet {
    fn from(r: CodeSnippetResource) -> Self {
        Self {
            id: r.id,
            title: r.title,
            language: r.language,
            category: r.category,
            description: r.description,
            condensed_code: r.condensed_code,
            complexity: r.complexity,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CodeSnippetPayload {
    pub title: Option<String>,
    pub language: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub condensed_code: Option<String>,
    pub complexity: Option<String>,
}

impl CodeSnippetPayload {
    pub fn into_draft(self) -> CodeSnippetDraft {
        CodeSnippetDraft {
            title: self.title.unwrap_or_default(),
            language: self.language.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            description: non_empty(self.description),
            condensed_code: self.condensed_code.unwrap_or_default(),
            complexity: self.complexity.unwrap_or_default(),
        }
    }
}

impl From<&CodeSnippetDraft> for CodeSnippetPayload {
    fn from(d: &CodeSnippetDraft) -> Self {
        Self {
            title: Some(d.title.clone()),
            language: Some(d.language.clone()),
            category: Some(d.category.clone()),
            description: d.description.clone(),
            condensed_code: Some(d.condensed_code.clone()),
            complexity: Some(d.complexity.clone()),
        }
    }
}
