//! crates/prep_tracker_core/src/stats.rs
//!
//! Dashboard counters and chart series derived from the cached questions.

use chrono::{DateTime, Duration, Utc};
use std::cmp::Reverse;

use crate::domain::{Difficulty, Question};
use crate::view_model::QuestionCard;

const RECENT_LIMIT: usize = 5;
const TOP_TAGS: usize = 10;
/// Above this many tags the tag chart switches from a doughnut to bars.
const DOUGHNUT_MAX_SLICES: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub total: usize,
    pub this_week: usize,
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
    pub recent: Vec<QuestionCard>,
}

impl Dashboard {
    pub fn compute(questions: &[Question], now: DateTime<Utc>) -> Self {
        let week_ago = now - Duration::days(7);
        let count = |difficulty| {
            questions
                .iter()
                .filter(|q| q.difficulty == Some(difficulty))
                .count()
        };

        let mut by_activity: Vec<&Question> = questions.iter().collect();
        by_activity.sort_by_key(|q| Reverse(q.activity_at()));

        Self {
            total: questions.len(),
            this_week: questions
                .iter()
                .filter(|q| q.activity_at() >= week_ago)
                .count(),
            easy: count(Difficulty::Easy),
            medium: count(Difficulty::Medium),
            hard: count(Difficulty::Hard),
            recent: by_activity
                .into_iter()
                .take(RECENT_LIMIT)
                .map(QuestionCard::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Doughnut,
    Bar,
    HorizontalBar,
}

/// Labels and values for one chart, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

impl ChartSeries {
    fn from_counts(kind: ChartKind, counts: Vec<(String, usize)>) -> Self {
        let (labels, values) = counts.into_iter().unzip();
        Self {
            kind,
            labels,
            values,
        }
    }
}

pub fn difficulty_chart(questions: &[Question]) -> ChartSeries {
    let counts = Difficulty::ALL
        .iter()
        .map(|&d| {
            let n = questions.iter().filter(|q| q.difficulty == Some(d)).count();
            (d.to_string(), n)
        })
        .collect();
    ChartSeries::from_counts(ChartKind::Doughnut, counts)
}

pub fn category_chart(questions: &[Question]) -> ChartSeries {
    let counts = tally(
        questions
            .iter()
            .map(|q| q.category.clone().unwrap_or_default()),
    );
    ChartSeries::from_counts(ChartKind::Bar, counts)
}

/// The ten most used tags; equal counts keep first-seen order.
pub fn tags_chart(questions: &[Question]) -> ChartSeries {
    let mut counts = tally(questions.iter().flat_map(|q| q.tags.iter().cloned()));
    counts.sort_by_key(|(_, n)| Reverse(*n));
    counts.truncate(TOP_TAGS);

    let kind = if counts.len() > DOUGHNUT_MAX_SLICES {
        ChartKind::HorizontalBar
    } else {
        ChartKind::Doughnut
    };
    ChartSeries::from_counts(kind, counts)
}

/// Counts occurrences, keeping labels in first-seen order.
fn tally(values: impl Iterator<Item = String>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(label, _)| *label == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value, 1)),
        }
    }
    counts
}
