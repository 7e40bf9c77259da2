//! crates/prep_tracker_core/src/view_model.rs
//!
//! Renderable projections of cached records. Nothing here knows how it will be
//! drawn; a presentation adapter turns these structs into a table, grid or page.

use chrono::NaiveDate;

use crate::domain::{CodeSnippet, Difficulty, Question, RecordId, QUESTION_CATEGORIES};

const PREVIEW_LINES: usize = 5;
const DESCRIPTION_PREVIEW_CHARS: usize = 150;

/// One line of the questions table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRow {
    pub id: RecordId,
    pub title: String,
    pub category: String,
    pub difficulty: String,
    pub platform: String,
    pub date_solved: String,
}

impl From<&Question> for QuestionRow {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            title: q.title.clone(),
            category: q.category.clone().unwrap_or_default(),
            difficulty: q.difficulty.map(|d| d.to_string()).unwrap_or_default(),
            platform: if q.platform.is_empty() {
                "-".to_string()
            } else {
                q.platform.clone()
            },
            date_solved: format_date(q.date_solved),
        }
    }
}

/// A question summary card as shown in the dashboard's recent list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCard {
    pub id: RecordId,
    pub title: String,
    pub difficulty: String,
    pub category: String,
    pub tags: Vec<String>,
    pub description: String,
    pub platform: String,
    pub date_solved: String,
}

impl From<&Question> for QuestionCard {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            title: q.title.clone(),
            difficulty: q.difficulty.map(|d| d.to_string()).unwrap_or_default(),
            category: q.category.clone().unwrap_or_default(),
            tags: q.tags.clone(),
            description: truncate_text(&q.description, DESCRIPTION_PREVIEW_CHARS),
            platform: if q.platform.is_empty() {
                "Unknown Platform".to_string()
            } else {
                q.platform.clone()
            },
            date_solved: format_date(q.date_solved),
        }
    }
}

/// One card of the code archive grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetCard {
    pub id: RecordId,
    pub title: String,
    pub language: String,
    pub category: String,
    pub description: Option<String>,
    pub preview: String,
}

impl From<&CodeSnippet> for SnippetCard {
    fn from(s: &CodeSnippet) -> Self {
        Self {
            id: s.id,
            title: s.title.clone(),
            language: s.language.to_uppercase(),
            category: category_label(&s.category),
            description: s.description.clone().filter(|d| !d.is_empty()),
            preview: code_preview(&s.condensed_code),
        }
    }
}

/// Option lists for the filter and form dropdowns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub difficulties: Vec<String>,
    pub platforms: Vec<String>,
    pub languages: Vec<String>,
    pub snippet_categories: Vec<String>,
}

impl FilterOptions {
    pub fn from_cache(questions: &[Question], snippets: &[CodeSnippet]) -> Self {
        Self {
            categories: QUESTION_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            difficulties: Difficulty::ALL.iter().map(|d| d.to_string()).collect(),
            platforms: distinct(questions.iter().map(|q| q.platform.as_str())),
            languages: distinct(snippets.iter().map(|s| s.language.as_str())),
            snippet_categories: distinct(snippets.iter().map(|s| s.category.as_str())),
        }
    }
}

/// Distinct non-empty values in first-seen order.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values.filter(|v| !v.is_empty()) {
        if !seen.iter().any(|s| s == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => "Not specified".to_string(),
    }
}

/// Cuts `text` to `max_chars` characters, marking the cut with `...`.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// The first few lines of a snippet, with a marker when there is more.
pub fn code_preview(code: &str) -> String {
    let lines: Vec<&str> = code.split('\n').collect();
    let preview = lines[..lines.len().min(PREVIEW_LINES)].join("\n");
    if lines.len() > PREVIEW_LINES {
        format!("{}\n ...", preview)
    } else {
        preview
    }
}

/// Turns a slug such as `data-structures` into `data structures` (first dash only).
pub fn category_label(category: &str) -> String {
    category.replacen('-', " ", 1)
}
