pub mod cache;
pub mod domain;
pub mod ports;
pub mod query;
pub mod session;
pub mod stats;
pub mod sync;
pub mod view_model;

#[cfg(test)]
pub(crate) mod test_support;

pub use cache::{ClientCache, EntityList};
pub use domain::{
    CodeSnippet, CodeSnippetDraft, Difficulty, Entity, EntityKind, Question, QuestionDraft,
    RecordId,
};
pub use ports::{Clock, PortError, PortResult, RecordService, SystemClock};
pub use query::{QuestionQuery, SnippetQuery, SortDirection, SortState};
pub use session::{Session, SessionEvent, StatusLine};
pub use sync::{HostEvent, HostStatus, SyncScheduler, SyncStatus, SyncTrigger};
