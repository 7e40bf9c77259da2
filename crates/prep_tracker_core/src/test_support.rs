//! Builders shared by the unit tests in this crate.

use chrono::{TimeZone, Utc};

use crate::domain::{CodeSnippet, Question, RecordId};

pub fn question(id: RecordId, title: &str) -> Question {
    let created = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
    Question {
        id,
        title: title.to_string(),
        description: String::new(),
        link: None,
        category: None,
        difficulty: None,
        platform: String::new(),
        date_solved: None,
        hint: String::new(),
        solution: String::new(),
        notes: String::new(),
        tags: Vec::new(),
        created_at: created,
        updated_at: created,
    }
}

pub fn snippet(id: RecordId, title: &str, language: &str, category: &str) -> CodeSnippet {
    let created = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap() + chrono::Duration::minutes(id);
    CodeSnippet {
        id,
        title: title.to_string(),
        language: language.to_string(),
        category: category.to_string(),
        description: None,
        condensed_code: "return -1;".to_string(),
        complexity: String::new(),
        created_at: created,
        updated_at: created,
    }
}
