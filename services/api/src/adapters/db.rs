//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `RecordService` port from the `core` crate on the server side. It handles
//! all interactions with the SQLite database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use prep_tracker_core::domain::{
    CodeSnippet, CodeSnippetDraft, Question, QuestionDraft, RecordId,
};
use prep_tracker_core::ports::{PortError, PortResult, RecordService};
use sqlx::{FromRow, SqlitePool};
use tracing::info;

use crate::adapters::seed;

const QUESTION_COLUMNS: &str = "id, title, description, link, category, difficulty, platform, \
     date_solved, hint, solution, notes, tags, created_at, updated_at";

const SNIPPET_COLUMNS: &str =
    "id, title, language, category, description, condensed_code, complexity, created_at, updated_at";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `RecordService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: SqlitePool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Fills each empty table with the sample records. Tables that already hold rows are left alone.
    pub async fn seed_sample_data(&self) -> PortResult<()> {
        if self.count("questions").await? == 0 {
            info!("Inserting sample questions...");
            for (draft, created_at) in seed::sample_questions() {
                self.insert_question(&draft, created_at).await?;
            }
        }
        if self.count("code_snippets").await? == 0 {
            info!("Inserting sample code snippets...");
            let now = Utc::now();
            for draft in seed::sample_code_snippets() {
                self.insert_code_snippet(&draft, now).await?;
            }
        }
        Ok(())
    }

    async fn count(&self, table: &str) -> PortResult<i64> {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)
    }

    async fn insert_question(
        &self,
        draft: &QuestionDraft,
        created_at: DateTime<Utc>,
    ) -> PortResult<Question> {
        let sql = format!(
            "INSERT INTO questions (title, description, link, category, difficulty, platform, \
             date_solved, hint, solution, notes, tags, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {}",
            QUESTION_COLUMNS
        );
        let record = sqlx::query_as::<_, QuestionRecord>(&sql)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(&draft.link)
            .bind(&draft.category)
            .bind(draft.difficulty.map(|d| d.as_str()))
            .bind(&draft.platform)
            .bind(draft.date_solved)
            .bind(&draft.hint)
            .bind(&draft.solution)
            .bind(&draft.notes)
            .bind(encode_tags(&draft.tags)?)
            .bind(created_at)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        record.to_domain()
    }

    async fn insert_code_snippet(
        &self,
        draft: &CodeSnippetDraft,
        created_at: DateTime<Utc>,
    ) -> PortResult<CodeSnippet> {
        let sql = format!(
            "INSERT INTO code_snippets (title, language, category, description, condensed_code, \
             complexity, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING {}",
            SNIPPET_COLUMNS
        );
        let record = sqlx::query_as::<_, CodeSnippetRecord>(&sql)
            .bind(&draft.title)
            .bind(&draft.language)
            .bind(&draft.category)
            .bind(&draft.description)
            .bind(&draft.condensed_code)
            .bind(&draft.complexity)
            .bind(created_at)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(record.to_domain())
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

/// Maps `RowNotFound` to a port-level `NotFound` carrying the given message.
fn not_found(message: &'static str) -> impl Fn(sqlx::Error) -> PortError {
    move |e| match e {
        sqlx::Error::RowNotFound => PortError::NotFound(message.to_string()),
        _ => unexpected(e),
    }
}

fn encode_tags(tags: &[String]) -> PortResult<String> {
    serde_json::to_string(tags).map_err(|e| PortError::Unexpected(e.to_string()))
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct QuestionRecord {
    id: i64,
    title: String,
    description: String,
    link: Option<String>,
    category: Option<String>,
    difficulty: Option<String>,
    platform: String,
    date_solved: Option<NaiveDate>,
    hint: String,
    solution: String,
    notes: String,
    tags: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
impl QuestionRecord {
    fn to_domain(self) -> PortResult<Question> {
        let difficulty = self
            .difficulty
            .map(|d| d.parse())
            .transpose()
            .map_err(|e| PortError::Unexpected(format!("Stored question {}: {}", self.id, e)))?;
        let tags = serde_json::from_str(&self.tags).map_err(|e| {
            PortError::Unexpected(format!("Stored question {} has malformed tags: {}", self.id, e))
        })?;
        Ok(Question {
            id: self.id,
            title: self.title,
            description: self.description,
            link: self.link,
            category: self.category,
            difficulty,
            platform: self.platform,
            date_solved: self.date_solved,
            hint: self.hint,
            solution: self.solution,
            notes: self.notes,
            tags,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(FromRow)]
struct CodeSnippetRecord {
    id: i64,
    title: String,
    language: String,
    category: String,
    description: Option<String>,
    condensed_code: String,
    complexity: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
impl CodeSnippetRecord {
    fn to_domain(self) -> CodeSnippet {
        CodeSnippet {
            id: self.id,
            title: self.title,
            language: self.language,
            category: self.category,
            description: self.description,
            condensed_code: self.condensed_code,
            complexity: self.complexity,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

//=========================================================================================
// The Port Implementation
//=========================================================================================

#[async_trait]
impl RecordService for DbAdapter {
    async fn list_questions(&self) -> PortResult<Vec<Question>> {
        let sql = format!("SELECT {} FROM questions ORDER BY id DESC", QUESTION_COLUMNS);
        sqlx::query_as::<_, QuestionRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?
            .into_iter()
            .map(QuestionRecord::to_domain)
            .collect()
    }

    async fn get_question(&self, id: RecordId) -> PortResult<Question> {
        let sql = format!("SELECT {} FROM questions WHERE id = ?", QUESTION_COLUMNS);
        sqlx::query_as::<_, QuestionRecord>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(not_found("Question not found"))?
            .to_domain()
    }

    async fn create_question(&self, draft: &QuestionDraft) -> PortResult<Question> {
        draft.validate()?;
        self.insert_question(draft, Utc::now()).await
    }

    async fn update_question(&self, id: RecordId, draft: &QuestionDraft) -> PortResult<Question> {
        draft.validate()?;
        let sql = format!(
            "UPDATE questions SET title = ?, description = ?, link = ?, category = ?, \
             difficulty = ?, platform = ?, date_solved = ?, hint = ?, solution = ?, notes = ?, \
             tags = ?, updated_at = ? WHERE id = ? RETURNING {}",
            QUESTION_COLUMNS
        );
        sqlx::query_as::<_, QuestionRecord>(&sql)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(&draft.link)
            .bind(&draft.category)
            .bind(draft.difficulty.map(|d| d.as_str()))
            .bind(&draft.platform)
            .bind(draft.date_solved)
            .bind(&draft.hint)
            .bind(&draft.solution)
            .bind(&draft.notes)
            .bind(encode_tags(&draft.tags)?)
            .bind(Utc::now())
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(not_found("Question not found"))?
            .to_domain()
    }

    async fn delete_question(&self, id: RecordId) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(PortError::NotFound("Question not found".to_string()));
        }
        Ok(())
    }

    async fn list_code_snippets(&self) -> PortResult<Vec<CodeSnippet>> {
        let sql = format!("SELECT {} FROM code_snippets ORDER BY id DESC", SNIPPET_COLUMNS);
        let records = sqlx::query_as::<_, CodeSnippetRecord>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(records.into_iter().map(CodeSnippetRecord::to_domain).collect())
    }

    async fn get_code_snippet(&self, id: RecordId) -> PortResult<CodeSnippet> {
        let sql = format!("SELECT {} FROM code_snippets WHERE id = ?", SNIPPET_COLUMNS);
        let record = sqlx::query_as::<_, CodeSnippetRecord>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(not_found("Code snippet not found"))?;
        Ok(record.to_domain())
    }

    async fn create_code_snippet(&self, draft: &CodeSnippetDraft) -> PortResult<CodeSnippet> {
        draft.validate()?;
        self.insert_code_snippet(draft, Utc::now()).await
    }

    async fn update_code_snippet(
        &self,
        id: RecordId,
        draft: &CodeSnippetDraft,
    ) -> PortResult<CodeSnippet> {
        draft.validate()?;
        let sql = format!(
            "UPDATE code_snippets SET title = ?, language = ?, category = ?, description = ?, \
             condensed_code = ?, complexity = ?, updated_at = ? WHERE id = ? RETURNING {}",
            SNIPPET_COLUMNS
        );
        let record = sqlx::query_as::<_, CodeSnippetRecord>(&sql)
            .bind(&draft.title)
            .bind(&draft.language)
            .bind(&draft.category)
            .bind(&draft.description)
            .bind(&draft.condensed_code)
            .bind(&draft.complexity)
            .bind(Utc::now())
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(not_found("Code snippet not found"))?;
        Ok(record.to_domain())
    }

    async fn delete_code_snippet(&self, id: RecordId) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM code_snippets WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(PortError::NotFound("Code snippet not found".to_string()));
        }
        Ok(())
    }
}
