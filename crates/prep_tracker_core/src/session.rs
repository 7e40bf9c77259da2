//! crates/prep_tracker_core/src/session.rs
//!
//! The client session: the one place that owns the cache, the query state and the
//! sync machine. A presentation adapter drives it with `HostEvent`s and user
//! actions, then drains `SessionEvent`s to learn what to redraw.
//!
//! Writes are confirm-then-apply: the cache only changes once the record service
//! has returned the authoritative record, so a failed write needs no rollback.

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::cache::ClientCache;
use crate::domain::{
    CodeSnippet, CodeSnippetDraft, EntityKind, Question, QuestionDraft, RecordId,
};
use crate::ports::{Clock, PortError, PortResult, RecordService};
use crate::query::{QuestionQuery, SnippetQuery};
use crate::stats::{self, ChartSeries, Dashboard};
use crate::sync::{
    reconcile, HostEvent, HostStatus, SyncController, SyncNotification, SyncStatus, SyncTrigger,
};
use crate::view_model::{FilterOptions, QuestionRow, SnippetCard};

//=========================================================================================
// Status Line and Outbound Events
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Ok,
    Busy,
    Failed,
}

impl Indicator {
    pub fn symbol(self) -> &'static str {
        match self {
            Indicator::Ok => "🟢",
            Indicator::Busy => "🟡",
            Indicator::Failed => "🔴",
        }
    }
}

/// The text shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub indicator: Indicator,
    pub text: String,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.indicator.symbol(), self.text)
    }
}

/// What the presentation layer should react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Status(StatusLine),
    /// A transient toast.
    Notification(String),
    /// A blocking message the user must acknowledge.
    Alert(String),
    /// Cached data changed; every derived view should be recomputed.
    ViewsChanged,
}

const REQUIRED_FIELDS_ALERT: &str = "Please fill in all required fields.";

fn format_sync_time(at: DateTime<Utc>) -> String {
    at.format("%H:%M").to_string()
}

//=========================================================================================
// Session
//=========================================================================================

pub struct Session {
    records: Arc<dyn RecordService>,
    clock: Arc<dyn Clock>,
    cache: ClientCache,
    controller: SyncController,
    status: StatusLine,
    outbox: Vec<SessionEvent>,
    pub question_query: QuestionQuery,
    pub snippet_query: SnippetQuery,
}

impl Session {
    pub fn new(records: Arc<dyn RecordService>, clock: Arc<dyn Clock>, host: HostStatus) -> Self {
        Self {
            records,
            clock,
            cache: ClientCache::new(),
            controller: SyncController::new(host),
            status: StatusLine {
                indicator: Indicator::Busy,
                text: "Loading...".to_string(),
            },
            outbox: Vec::new(),
            question_query: QuestionQuery::default(),
            snippet_query: SnippetQuery::default(),
        }
    }

    /// Loads both collections. A collection that fails to load starts out empty.
    pub async fn init(&mut self) {
        let records = Arc::clone(&self.records);
        let (questions, snippets) =
            futures::join!(records.list_questions(), records.list_code_snippets());

        let mut loaded = true;
        match questions {
            Ok(questions) => self.cache.questions.replace_all(questions),
            Err(e) => {
                error!("Failed to load questions: {}", e);
                loaded = false;
            }
        }
        match snippets {
            Ok(snippets) => self.cache.snippets.replace_all(snippets),
            Err(e) => {
                error!("Failed to load code snippets: {}", e);
                loaded = false;
            }
        }

        let now = self.clock.now();
        if loaded {
            self.controller.complete(now);
            self.set_status(Indicator::Ok, format!("Last sync: {}", format_sync_time(now)));
        } else {
            self.controller.fail();
            self.set_status(Indicator::Failed, "Sync failed");
        }
        info!(
            "Session initialised with {} questions and {} code snippets.",
            self.cache.questions.len(),
            self.cache.snippets.len()
        );
        self.outbox.push(SessionEvent::ViewsChanged);
    }

    // --- Accessors ---

    pub fn cache(&self) -> &ClientCache {
        &self.cache
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn sync_status(&self) -> SyncStatus {
        self.controller.status()
    }

    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        self.controller.last_sync()
    }

    pub fn host(&self) -> HostStatus {
        self.controller.host()
    }

    /// Takes every event emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.outbox)
    }

    fn set_status(&mut self, indicator: Indicator, text: impl Into<String>) {
        self.status = StatusLine {
            indicator,
            text: text.into(),
        };
        self.outbox.push(SessionEvent::Status(self.status.clone()));
    }

    fn timestamped(&self, label: &str) -> String {
        format!("{} ({})", label, format_sync_time(self.clock.now()))
    }

    // --- Sync ---

    /// Reacts to a scheduler tick or a host signal.
    pub async fn handle_event(&mut self, event: HostEvent) {
        debug!("Handling host event: {:?}", event);
        match event {
            HostEvent::Tick => {
                self.sync(SyncTrigger::Timer).await;
            }
            HostEvent::VisibilityChanged { visible } => {
                let became_visible = visible && !self.controller.host().visible;
                self.controller.set_visible(visible);
                if became_visible {
                    self.sync(SyncTrigger::BecameVisible).await;
                }
            }
            HostEvent::Online => {
                self.controller.set_online(true);
                self.sync(SyncTrigger::CameOnline).await;
            }
            HostEvent::Offline => {
                // Display only; the sync machine keeps its state.
                self.controller.set_online(false);
                self.set_status(Indicator::Failed, "Offline");
            }
            HostEvent::RefreshRequested => {
                self.refresh().await;
            }
        }
    }

    /// An explicit user refresh. Returns whether the sync succeeded.
    pub async fn refresh(&mut self) -> bool {
        self.sync(SyncTrigger::UserRefresh).await && self.controller.status() == SyncStatus::Idle
    }

    /// Fetches both collections and swaps in whichever changed. Returns whether a
    /// sync was attempted.
    pub async fn sync(&mut self, trigger: SyncTrigger) -> bool {
        if !self.controller.should_sync(trigger) {
            debug!("Skipping sync for {:?} (host {:?}).", trigger, self.controller.host());
            return false;
        }

        self.controller.begin();
        let busy_text = match trigger {
            SyncTrigger::CameOnline => "Back online, syncing...",
            _ => "Syncing...",
        };
        self.set_status(Indicator::Busy, busy_text);

        let records = Arc::clone(&self.records);
        let fetched = futures::try_join!(records.list_questions(), records.list_code_snippets());
        let now = self.clock.now();

        match fetched {
            Ok((questions, snippets)) => {
                let questions = reconcile(&mut self.cache.questions, questions);
                let snippets = reconcile(&mut self.cache.snippets, snippets);
                self.controller.complete(now);

                let notes = [
                    SyncNotification::from_reconciled(EntityKind::Question, questions),
                    SyncNotification::from_reconciled(EntityKind::CodeSnippet, snippets),
                ];
                for note in notes.into_iter().flatten() {
                    info!("{}", note);
                    self.outbox.push(SessionEvent::Notification(note.to_string()));
                }

                if questions.changed || snippets.changed {
                    info!("Data updated from server.");
                    self.outbox.push(SessionEvent::ViewsChanged);
                    self.set_status(Indicator::Ok, format!("Last sync: {}", format_sync_time(now)));
                } else {
                    self.set_status(Indicator::Ok, format!("Up to date ({})", format_sync_time(now)));
                }
            }
            Err(e) => {
                error!("Error syncing data: {}", e);
                self.controller.fail();
                self.set_status(Indicator::Failed, "Sync failed");
            }
        }
        true
    }

    // --- Write helpers ---

    fn reject_locally(&mut self, e: &PortError) {
        warn!("Rejected before sending: {}", e);
        self.outbox.push(SessionEvent::Alert(REQUIRED_FIELDS_ALERT.to_string()));
    }

    fn write_succeeded(&mut self, label: &str) {
        self.outbox.push(SessionEvent::ViewsChanged);
        let text = self.timestamped(label);
        self.set_status(Indicator::Ok, text);
    }

    fn write_failed(&mut self, status: &str, alert: &str, e: &PortError) {
        error!("{}: {}", status, e);
        self.set_status(Indicator::Failed, status);
        self.outbox.push(SessionEvent::Alert(alert.to_string()));
    }

    // --- Question writes ---

    pub async fn create_question(&mut self, draft: QuestionDraft) -> PortResult<Question> {
        if let Err(e) = draft.validate() {
            self.reject_locally(&e);
            return Err(e);
        }
        self.set_status(Indicator::Busy, "Saving...");
        let records = Arc::clone(&self.records);
        match records.create_question(&draft).await {
            Ok(question) => {
                self.cache.questions.upsert_one(question.clone());
                self.write_succeeded("Saved");
                Ok(question)
            }
            Err(e) => {
                self.write_failed("Save failed", "Failed to add question. Please try again.", &e);
                Err(e)
            }
        }
    }

    pub async fn update_question(
        &mut self,
        id: RecordId,
        draft: QuestionDraft,
    ) -> PortResult<Question> {
        if let Err(e) = draft.validate() {
            self.reject_locally(&e);
            return Err(e);
        }
        self.set_status(Indicator::Busy, "Updating...");
        let records = Arc::clone(&self.records);
        match records.update_question(id, &draft).await {
            Ok(question) => {
                self.cache.questions.replace_one(question.clone());
                self.write_succeeded("Updated");
                Ok(question)
            }
            Err(e) => {
                self.write_failed(
                    "Update failed",
                    "Failed to update question. Please try again.",
                    &e,
                );
                Err(e)
            }
        }
    }

    pub async fn delete_question(&mut self, id: RecordId) -> PortResult<()> {
        self.set_status(Indicator::Busy, "Deleting...");
        let records = Arc::clone(&self.records);
        match records.delete_question(id).await {
            Ok(()) => {
                self.cache.questions.remove_one(id);
                self.write_succeeded("Deleted");
                Ok(())
            }
            Err(e) => {
                self.write_failed(
                    "Delete failed",
                    "Failed to delete question. Please try again.",
                    &e,
                );
                Err(e)
            }
        }
    }

    // --- Code snippet writes ---

    pub async fn create_code_snippet(&mut self, draft: CodeSnippetDraft) -> PortResult<CodeSnippet> {
        if let Err(e) = draft.validate() {
            self.reject_locally(&e);
            return Err(e);
        }
        self.set_status(Indicator::Busy, "Saving...");
        let records = Arc::clone(&self.records);
        match records.create_code_snippet(&draft).await {
            Ok(snippet) => {
                self.cache.snippets.upsert_one(snippet.clone());
                self.write_succeeded("Saved");
                self.outbox.push(SessionEvent::Notification(
                    "Code snippet added successfully!".to_string(),
                ));
                Ok(snippet)
            }
            Err(e) => {
                self.write_failed("Save failed", "Error saving code snippet. Please try again.", &e);
                Err(e)
            }
        }
    }

    pub async fn update_code_snippet(
        &mut self,
        id: RecordId,
        draft: CodeSnippetDraft,
    ) -> PortResult<CodeSnippet> {
        if let Err(e) = draft.validate() {
            self.reject_locally(&e);
            return Err(e);
        }
        self.set_status(Indicator::Busy, "Updating...");
        let records = Arc::clone(&self.records);
        match records.update_code_snippet(id, &draft).await {
            Ok(snippet) => {
                self.cache.snippets.replace_one(snippet.clone());
                self.write_succeeded("Updated");
                self.outbox.push(SessionEvent::Notification(
                    "Code snippet updated successfully!".to_string(),
                ));
                Ok(snippet)
            }
            Err(e) => {
                self.write_failed(
                    "Update failed",
                    "Error saving code snippet. Please try again.",
                    &e,
                );
                Err(e)
            }
        }
    }

    pub async fn delete_code_snippet(&mut self, id: RecordId) -> PortResult<()> {
        self.set_status(Indicator::Busy, "Deleting...");
        let records = Arc::clone(&self.records);
        match records.delete_code_snippet(id).await {
            Ok(()) => {
                self.cache.snippets.remove_one(id);
                self.write_succeeded("Deleted");
                self.outbox.push(SessionEvent::Notification(
                    "Code snippet deleted successfully!".to_string(),
                ));
                Ok(())
            }
            Err(e) => {
                self.write_failed(
                    "Delete failed",
                    "Error deleting code snippet. Please try again.",
                    &e,
                );
                Err(e)
            }
        }
    }

    // --- Views ---

    pub fn question(&self, id: RecordId) -> Option<&Question> {
        self.cache.questions.get(id)
    }

    pub fn code_snippet(&self, id: RecordId) -> Option<&CodeSnippet> {
        self.cache.snippets.get(id)
    }

    pub fn visible_questions(&self) -> Vec<&Question> {
        self.question_query.apply(self.cache.questions.items())
    }

    pub fn visible_snippets(&self) -> Vec<&CodeSnippet> {
        self.snippet_query.apply(self.cache.snippets.items())
    }

    pub fn question_rows(&self) -> Vec<QuestionRow> {
        self.visible_questions()
            .into_iter()
            .map(QuestionRow::from)
            .collect()
    }

    pub fn snippet_cards(&self) -> Vec<SnippetCard> {
        self.visible_snippets()
            .into_iter()
            .map(SnippetCard::from)
            .collect()
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::compute(self.cache.questions.items(), self.clock.now())
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_cache(self.cache.questions.items(), self.cache.snippets.items())
    }

    /// Difficulty, category and tag charts, in that order.
    pub fn charts(&self) -> [ChartSeries; 3] {
        let questions = self.cache.questions.items();
        [
            stats::difficulty_chart(questions),
            stats::category_chart(questions),
            stats::tags_chart(questions),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PortError;
    use crate::query::QuestionSortField;
    use crate::test_support::{question, snippet};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    /// An in-memory record service that counts calls and can be told to fail.
    #[derive(Default)]
    struct FakeRecords {
        questions: Mutex<Vec<Question>>,
        snippets: Mutex<Vec<CodeSnippet>>,
        next_id: AtomicUsize,
        calls: AtomicUsize,
        failing: AtomicBool,
    }

    impl FakeRecords {
        fn with(questions: Vec<Question>, snippets: Vec<CodeSnippet>) -> Arc<Self> {
            Arc::new(Self {
                questions: Mutex::new(questions),
                snippets: Mutex::new(snippets),
                next_id: AtomicUsize::new(100),
                ..Default::default()
            })
        }

        fn enter(&self) -> PortResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(PortError::Transport("connection refused".to_string()));
            }
            Ok(())
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        fn apply_question(id: RecordId, draft: &QuestionDraft) -> Question {
            let mut q = question(id, &draft.title);
            q.description = draft.description.clone();
            q.difficulty = draft.difficulty;
            q.tags = draft.tags.clone();
            q
        }
    }

    #[async_trait]
    impl RecordService for FakeRecords {
        async fn list_questions(&self) -> PortResult<Vec<Question>> {
            self.enter()?;
            Ok(self.questions.lock().unwrap().clone())
        }

        async fn get_question(&self, id: RecordId) -> PortResult<Question> {
            self.enter()?;
            self.questions
                .lock()
                .unwrap()
                .iter()
                .find(|q| q.id == id)
                .cloned()
                .ok_or_else(|| PortError::NotFound(format!("Question {}", id)))
        }

        async fn create_question(&self, draft: &QuestionDraft) -> PortResult<Question> {
            self.enter()?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) as RecordId;
            let q = Self::apply_question(id, draft);
            self.questions.lock().unwrap().insert(0, q.clone());
            Ok(q)
        }

        async fn update_question(&self, id: RecordId, draft: &QuestionDraft) -> PortResult<Question> {
            self.enter()?;
            let mut questions = self.questions.lock().unwrap();
            let slot = questions
                .iter_mut()
                .find(|q| q.id == id)
                .ok_or_else(|| PortError::NotFound(format!("Question {}", id)))?;
            *slot = Self::apply_question(id, draft);
            Ok(slot.clone())
        }

        async fn delete_question(&self, id: RecordId) -> PortResult<()> {
            self.enter()?;
            let mut questions = self.questions.lock().unwrap();
            let before = questions.len();
            questions.retain(|q| q.id != id);
            if questions.len() == before {
                return Err(PortError::NotFound(format!("Question {}", id)));
            }
            Ok(())
        }

        async fn list_code_snippets(&self) -> PortResult<Vec<CodeSnippet>> {
            self.enter()?;
            Ok(self.snippets.lock().unwrap().clone())
        }

        async fn get_code_snippet(&self, id: RecordId) -> PortResult<CodeSnippet> {
            self.enter()?;
            self.snippets
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id == id)
                .cloned()
                .ok_or_else(|| PortError::NotFound(format!("Code snippet {}", id)))
        }

        async fn create_code_snippet(&self, draft: &CodeSnippetDraft) -> PortResult<CodeSnippet> {
            self.enter()?;
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) as RecordId;
            let s = snippet(id, &draft.title, &draft.language, &draft.category);
            self.snippets.lock().unwrap().insert(0, s.clone());
            Ok(s)
        }

        async fn update_code_snippet(
            &self,
            id: RecordId,
            draft: &CodeSnippetDraft,
        ) -> PortResult<CodeSnippet> {
            self.enter()?;
            let mut snippets = self.snippets.lock().unwrap();
            let slot = snippets
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| PortError::NotFound(format!("Code snippet {}", id)))?;
            *slot = snippet(id, &draft.title, &draft.language, &draft.category);
            Ok(slot.clone())
        }

        async fn delete_code_snippet(&self, id: RecordId) -> PortResult<()> {
            self.enter()?;
            let mut snippets = self.snippets.lock().unwrap();
            let before = snippets.len();
            snippets.retain(|s| s.id != id);
            if snippets.len() == before {
                return Err(PortError::NotFound(format!("Code snippet {}", id)));
            }
            Ok(())
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    async fn started(records: Arc<FakeRecords>) -> Session {
        let mut session = Session::new(records, Arc::new(FixedClock(noon())), HostStatus::default());
        session.init().await;
        session.drain_events();
        session
    }

    fn three_questions() -> Vec<Question> {
        vec![question(3, "Design a URL Shortener"), question(2, "Tell me about yourself"), question(1, "Two Sum")]
    }

    #[tokio::test]
    async fn init_loads_both_collections() {
        let records = FakeRecords::with(three_questions(), vec![snippet(1, "Quick Sort", "cpp", "sorting")]);
        let mut session = Session::new(records, Arc::new(FixedClock(noon())), HostStatus::default());
        session.init().await;

        assert_eq!(session.cache().questions.len(), 3);
        assert_eq!(session.cache().snippets.len(), 1);
        assert_eq!(session.status().text, "Last sync: 12:00");
        assert_eq!(session.last_sync(), Some(noon()));
        assert!(session.drain_events().contains(&SessionEvent::ViewsChanged));
    }

    #[tokio::test]
    async fn failed_init_starts_empty() {
        let records = FakeRecords::with(three_questions(), Vec::new());
        records.set_failing(true);
        let session = started(records).await;

        assert!(session.cache().questions.is_empty());
        assert_eq!(session.sync_status(), SyncStatus::Error);
        assert_eq!(session.status().indicator, Indicator::Failed);
    }

    #[tokio::test]
    async fn sync_with_one_fewer_record_shrinks_cache_and_notifies() {
        let records = FakeRecords::with(three_questions(), Vec::new());
        let mut session = started(records.clone()).await;

        records.questions.lock().unwrap().remove(1);
        assert!(session.sync(SyncTrigger::Timer).await);

        assert_eq!(session.sync_status(), SyncStatus::Idle);
        assert_eq!(session.cache().questions.len(), 2);
        let events = session.drain_events();
        assert!(events.contains(&SessionEvent::Notification(
            "🔄 Data synced: -1 questions".to_string()
        )));
        assert!(events.contains(&SessionEvent::ViewsChanged));
        assert_eq!(session.status().text, "Last sync: 12:00");
    }

    #[tokio::test]
    async fn unchanged_sync_reports_up_to_date() {
        let records = FakeRecords::with(three_questions(), Vec::new());
        let mut session = started(records).await;

        session.sync(SyncTrigger::UserRefresh).await;

        let events = session.drain_events();
        assert!(!events.contains(&SessionEvent::ViewsChanged));
        assert_eq!(session.status().text, "Up to date (12:00)");
        assert_eq!(session.last_sync(), Some(noon()));
    }

    #[tokio::test]
    async fn failed_sync_moves_to_error_and_recovers_on_next_trigger() {
        let records = FakeRecords::with(three_questions(), Vec::new());
        let mut session = started(records.clone()).await;

        records.set_failing(true);
        assert!(!session.refresh().await);
        assert_eq!(session.sync_status(), SyncStatus::Error);
        assert_eq!(session.status().to_string(), "🔴 Sync failed");
        assert_eq!(session.cache().questions.len(), 3);

        records.set_failing(false);
        assert!(session.refresh().await);
        assert_eq!(session.sync_status(), SyncStatus::Idle);
    }

    #[tokio::test]
    async fn ticks_are_ignored_while_hidden() {
        let records = FakeRecords::with(three_questions(), Vec::new());
        let mut session = started(records.clone()).await;
        let before = records.calls();

        session
            .handle_event(HostEvent::VisibilityChanged { visible: false })
            .await;
        session.handle_event(HostEvent::Tick).await;
        assert_eq!(records.calls(), before);

        session
            .handle_event(HostEvent::VisibilityChanged { visible: true })
            .await;
        assert!(records.calls() > before);
    }

    #[tokio::test]
    async fn visible_signal_while_already_visible_does_not_sync() {
        let records = FakeRecords::with(three_questions(), Vec::new());
        let mut session = started(records.clone()).await;
        let before = records.calls();

        session
            .handle_event(HostEvent::VisibilityChanged { visible: true })
            .await;
        assert_eq!(records.calls(), before);
        assert!(session.host().visible);
    }

    #[tokio::test]
    async fn offline_is_display_only_and_online_resyncs() {
        let records = FakeRecords::with(three_questions(), Vec::new());
        let mut session = started(records.clone()).await;

        session.handle_event(HostEvent::Offline).await;
        assert_eq!(session.status().text, "Offline");
        assert_eq!(session.sync_status(), SyncStatus::Idle);

        let before = records.calls();
        session.handle_event(HostEvent::Tick).await;
        assert_eq!(records.calls(), before);

        session.handle_event(HostEvent::Online).await;
        assert!(records.calls() > before);
        let statuses: Vec<_> = session
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                SessionEvent::Status(s) => Some(s.text),
                _ => None,
            })
            .collect();
        assert_eq!(
            statuses,
            vec!["Offline", "Back online, syncing...", "Up to date (12:00)"]
        );
    }

    #[tokio::test]
    async fn create_with_empty_title_never_reaches_the_service() {
        let records = FakeRecords::with(three_questions(), Vec::new());
        let mut session = started(records.clone()).await;
        let before = records.calls();
        let cached = session.cache().clone();

        let result = session.create_question(QuestionDraft::default()).await;

        assert!(matches!(result, Err(PortError::Validation(_))));
        assert_eq!(records.calls(), before);
        assert_eq!(session.cache(), &cached);
        assert_eq!(
            session.drain_events(),
            vec![SessionEvent::Alert(REQUIRED_FIELDS_ALERT.to_string())]
        );
    }

    #[tokio::test]
    async fn created_question_goes_to_the_front() {
        let records = FakeRecords::with(three_questions(), Vec::new());
        let mut session = started(records).await;

        let draft = QuestionDraft {
            title: "LRU Cache".to_string(),
            tags: vec!["design".to_string(), "hash-map".to_string()],
            ..Default::default()
        };
        let created = session.create_question(draft).await.unwrap();

        assert_eq!(session.cache().questions.items()[0], created);
        assert_eq!(session.status().text, "Saved (12:00)");
        let events = session.drain_events();
        assert_eq!(
            events[0],
            SessionEvent::Status(StatusLine {
                indicator: Indicator::Busy,
                text: "Saving...".to_string()
            })
        );
        assert!(events.contains(&SessionEvent::ViewsChanged));
    }

    #[tokio::test]
    async fn update_applies_server_record_in_place() {
        let records = FakeRecords::with(three_questions(), Vec::new());
        let mut session = started(records).await;

        let mut draft = QuestionDraft::from(session.question(2).unwrap());
        draft.title = "Tell me about a conflict".to_string();
        session.update_question(2, draft).await.unwrap();

        let titles: Vec<_> = session
            .cache()
            .questions
            .items()
            .iter()
            .map(|q| q.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Design a URL Shortener", "Tell me about a conflict", "Two Sum"]);
        assert_eq!(session.status().text, "Updated (12:00)");
    }

    #[tokio::test]
    async fn failed_update_leaves_cache_untouched() {
        let records = FakeRecords::with(three_questions(), Vec::new());
        let mut session = started(records).await;
        let cached = session.cache().clone();

        let draft = QuestionDraft {
            title: "Ghost".to_string(),
            ..Default::default()
        };
        let result = session.update_question(42, draft).await;

        assert!(matches!(result, Err(PortError::NotFound(_))));
        assert_eq!(session.cache(), &cached);
        assert_eq!(session.status().text, "Update failed");
        assert!(session.drain_events().contains(&SessionEvent::Alert(
            "Failed to update question. Please try again.".to_string()
        )));
    }

    #[tokio::test]
    async fn delete_removes_question_after_confirmation() {
        let records = FakeRecords::with(three_questions(), Vec::new());
        let mut session = started(records.clone()).await;

        records.set_failing(true);
        assert!(session.delete_question(1).await.is_err());
        assert_eq!(session.cache().questions.len(), 3);

        records.set_failing(false);
        session.delete_question(1).await.unwrap();
        assert!(session.question(1).is_none());
        assert_eq!(session.status().text, "Deleted (12:00)");
    }

    #[tokio::test]
    async fn snippet_writes_notify() {
        let records = FakeRecords::with(Vec::new(), vec![snippet(1, "Quick Sort", "cpp", "sorting")]);
        let mut session = started(records).await;

        let draft = CodeSnippetDraft {
            title: "Union Find".to_string(),
            language: "cpp".to_string(),
            category: "data-structures".to_string(),
            condensed_code: "class UnionFind {};".to_string(),
            ..Default::default()
        };
        let created = session.create_code_snippet(draft).await.unwrap();
        assert_eq!(session.cache().snippets.items()[0], created);
        assert!(session.drain_events().contains(&SessionEvent::Notification(
            "Code snippet added successfully!".to_string()
        )));

        session.delete_code_snippet(created.id).await.unwrap();
        assert_eq!(session.cache().snippets.len(), 1);
    }

    #[tokio::test]
    async fn views_follow_query_state() {
        let records = FakeRecords::with(three_questions(), Vec::new());
        let mut session = started(records).await;

        session.question_query.sort.toggle(QuestionSortField::Title);
        let titles: Vec<_> = session.question_rows().into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["Design a URL Shortener", "Tell me about yourself", "Two Sum"]);

        session.question_query.filter.search = "two".to_string();
        assert_eq!(session.question_rows().len(), 1);
        assert_eq!(session.dashboard().total, 3);
    }
}
