//! crates/prep_tracker_core/src/query.rs
//!
//! The filter → sort pipeline that turns a cached collection into the ordered
//! sequence shown in a table or grid. Everything here is a pure function of its
//! inputs and is recomputed in full on every call.

use std::cmp::Ordering;

use crate::domain::{CodeSnippet, Difficulty, Question};

//=========================================================================================
// Sort State
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The single active sort column and its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: Copy + PartialEq> SortState<F> {
    pub fn ascending(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Descending,
        }
    }

    /// Clicking the active column flips direction; any other column starts ascending.
    pub fn toggle(&mut self, field: F) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            *self = Self::ascending(field);
        }
    }
}

/// A record type that knows how to compare itself on each of its sortable fields.
pub trait Sortable {
    type Field: Copy + PartialEq;

    fn compare_by(&self, other: &Self, field: Self::Field) -> Ordering;
}

/// A predicate over one record type.
pub trait Filter<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Computes the visible sequence: records passing `filter`, stably sorted by `sort`.
///
/// With no sort state the server order is kept.
pub fn view<'a, T, F>(items: &'a [T], filter: &F, sort: Option<&SortState<T::Field>>) -> Vec<&'a T>
where
    T: Sortable,
    F: Filter<T>,
{
    let mut visible: Vec<&T> = items.iter().filter(|item| filter.matches(item)).collect();

    if let Some(sort) = sort {
        // `sort_by` is stable, so ties keep their incoming relative order.
        visible.sort_by(|a, b| {
            let ordering = a.compare_by(b, sort.field);
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    visible
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// A categorical filter is inactive when empty, otherwise requires an exact match.
fn categorical_match(filter: &str, value: Option<&str>) -> bool {
    filter.is_empty() || value == Some(filter)
}

//=========================================================================================
// Questions
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionSortField {
    Title,
    Category,
    Difficulty,
    Platform,
    DateSolved,
}

impl Sortable for Question {
    type Field = QuestionSortField;

    fn compare_by(&self, other: &Self, field: QuestionSortField) -> Ordering {
        match field {
            QuestionSortField::Title => self.title.cmp(&other.title),
            QuestionSortField::Category => self.category.as_deref().cmp(&other.category.as_deref()),
            QuestionSortField::Difficulty => self
                .difficulty
                .map(Difficulty::as_str)
                .cmp(&other.difficulty.map(Difficulty::as_str)),
            QuestionSortField::Platform => self.platform.cmp(&other.platform),
            // A missing date counts as the Unix epoch.
            QuestionSortField::DateSolved => self
                .date_solved
                .unwrap_or_default()
                .cmp(&other.date_solved.unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub search: String,
    pub category: String,
    pub difficulty: String,
    pub platform: String,
}

impl Filter<Question> for QuestionFilter {
    fn matches(&self, q: &Question) -> bool {
        let term = self.search.to_lowercase();
        let matches_search = term.is_empty()
            || contains_ignore_case(&q.title, &term)
            || contains_ignore_case(&q.description, &term)
            || q.tags.iter().any(|tag| contains_ignore_case(tag, &term));

        matches_search
            && categorical_match(&self.category, q.category.as_deref())
            && categorical_match(&self.difficulty, q.difficulty.map(Difficulty::as_str))
            && categorical_match(&self.platform, Some(q.platform.as_str()))
    }
}

/// The question table's filter and sort state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionQuery {
    pub filter: QuestionFilter,
    pub sort: SortState<QuestionSortField>,
}

impl Default for QuestionQuery {
    fn default() -> Self {
        Self {
            filter: QuestionFilter::default(),
            sort: SortState::descending(QuestionSortField::DateSolved),
        }
    }
}

impl QuestionQuery {
    pub fn apply<'a>(&self, questions: &'a [Question]) -> Vec<&'a Question> {
        view(questions, &self.filter, Some(&self.sort))
    }
}

//=========================================================================================
// Code Snippets
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetSortField {
    Title,
    Language,
    Category,
    CreatedAt,
}

impl Sortable for CodeSnippet {
    type Field = SnippetSortField;

    fn compare_by(&self, other: &Self, field: SnippetSortField) -> Ordering {
        match field {
            SnippetSortField::Title => self.title.cmp(&other.title),
            SnippetSortField::Language => self.language.cmp(&other.language),
            SnippetSortField::Category => self.category.cmp(&other.category),
            SnippetSortField::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetFilter {
    pub search: String,
    pub language: String,
    pub category: String,
}

impl Filter<CodeSnippet> for SnippetFilter {
    fn matches(&self, s: &CodeSnippet) -> bool {
        let term = self.search.to_lowercase();
        let matches_search = term.is_empty()
            || contains_ignore_case(&s.title, &term)
            || s.description
                .as_deref()
                .is_some_and(|d| contains_ignore_case(d, &term));

        matches_search
            && categorical_match(&self.language, Some(s.language.as_str()))
            && categorical_match(&self.category, Some(s.category.as_str()))
    }
}

/// The snippet grid's filter and optional sort state. No sort keeps server order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetQuery {
    pub filter: SnippetFilter,
    pub sort: Option<SortState<SnippetSortField>>,
}

impl SnippetQuery {
    pub fn toggle_sort(&mut self, field: SnippetSortField) {
        match self.sort.as_mut() {
            Some(sort) => sort.toggle(field),
            None => self.sort = Some(SortState::ascending(field)),
        }
    }

    pub fn apply<'a>(&self, snippets: &'a [CodeSnippet]) -> Vec<&'a CodeSnippet> {
        view(snippets, &self.filter, self.sort.as_ref())
    }
}
