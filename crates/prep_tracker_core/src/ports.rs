//! crates/prep_tracker_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or HTTP.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{CodeSnippet, CodeSnippetDraft, Question, QuestionDraft, RecordId};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("Server responded with status {status}: {message}")]
    Server { status: u16, message: String },
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The record service contract. Lists come back most-recently-created first.
///
/// Implemented on the server by the SQLite adapter and on the client by the
/// HTTP adapter, so the same handlers and session logic run against either.
#[async_trait]
pub trait RecordService: Send + Sync {
    // --- Questions ---
    async fn list_questions(&self) -> PortResult<Vec<Question>>;

    async fn get_question(&self, id: RecordId) -> PortResult<Question>;

    async fn create_question(&self, draft: &QuestionDraft) -> PortResult<Question>;

    async fn update_question(&self, id: RecordId, draft: &QuestionDraft) -> PortResult<Question>;

    async fn delete_question(&self, id: RecordId) -> PortResult<()>;

    // --- Code Snippets ---
    async fn list_code_snippets(&self) -> PortResult<Vec<CodeSnippet>>;

    async fn get_code_snippet(&self, id: RecordId) -> PortResult<CodeSnippet>;

    async fn create_code_snippet(&self, draft: &CodeSnippetDraft) -> PortResult<CodeSnippet>;

    async fn update_code_snippet(
        &self,
        id: RecordId,
        draft: &CodeSnippetDraft,
    ) -> PortResult<CodeSnippet>;

    async fn delete_code_snippet(&self, id: RecordId) -> PortResult<()>;
}

/// Source of the current time, injected so sync timestamps are testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
