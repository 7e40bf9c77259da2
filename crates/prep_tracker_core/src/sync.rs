//! crates/prep_tracker_core/src/sync.rs
//!
//! Keeps the client cache in step with the record service by periodic full-snapshot
//! polling. Contains the sync state machine, the reconciliation step that swaps in a
//! fresh snapshot, and the scheduler that turns a timer and host signals into events.

use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::EntityList;
use crate::domain::{Entity, EntityKind};

/// How often the scheduler ticks when nothing else is configured.
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(30);

//=========================================================================================
// State Machine
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    Idle,
    Syncing,
    Error,
}

/// What asked for a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncTrigger {
    Timer,
    BecameVisible,
    CameOnline,
    UserRefresh,
}

/// Visibility and connectivity of the host as last reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostStatus {
    pub visible: bool,
    pub online: bool,
}

impl Default for HostStatus {
    fn default() -> Self {
        Self {
            visible: true,
            online: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyncController {
    status: SyncStatus,
    last_sync: Option<DateTime<Utc>>,
    host: HostStatus,
}

impl SyncController {
    pub fn new(host: HostStatus) -> Self {
        Self {
            status: SyncStatus::Idle,
            last_sync: None,
            host,
        }
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    pub fn last_sync(&self) -> Option<DateTime<Utc>> {
        self.last_sync
    }

    pub fn host(&self) -> HostStatus {
        self.host
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.host.visible = visible;
    }

    pub fn set_online(&mut self, online: bool) {
        self.host.online = online;
    }

    /// Whether a trigger should start a sync given the current host status.
    pub fn should_sync(&self, trigger: SyncTrigger) -> bool {
        if self.status == SyncStatus::Syncing {
            return false;
        }
        match trigger {
            SyncTrigger::Timer | SyncTrigger::BecameVisible => {
                self.host.visible && self.host.online
            }
            SyncTrigger::CameOnline | SyncTrigger::UserRefresh => true,
        }
    }

    /// `Idle | Error → Syncing`.
    pub fn begin(&mut self) {
        self.status = SyncStatus::Syncing;
    }

    /// `Syncing → Idle`. The timestamp moves whether or not content changed.
    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.status = SyncStatus::Idle;
        self.last_sync = Some(now);
    }

    /// `Syncing → Error`. Recovery waits for the next trigger.
    pub fn fail(&mut self) {
        self.status = SyncStatus::Error;
    }
}

//=========================================================================================
// Reconciliation
//=========================================================================================

/// The outcome of swapping one fresh snapshot into the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciled {
    pub changed: bool,
    pub delta: i64,
}

/// Replaces `cached` wholesale when `fresh` differs structurally. Returns what changed.
pub fn reconcile<T: Entity>(cached: &mut EntityList<T>, fresh: Vec<T>) -> Reconciled {
    if cached.items() == fresh.as_slice() {
        return Reconciled {
            changed: false,
            delta: 0,
        };
    }
    let delta = fresh.len() as i64 - cached.len() as i64;
    cached.replace_all(fresh);
    Reconciled {
        changed: true,
        delta,
    }
}

/// A user-facing note that a sync changed the number of records of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncNotification {
    pub kind: EntityKind,
    pub delta: i64,
}

impl SyncNotification {
    /// Only count changes are announced; in-place edits sync silently.
    pub fn from_reconciled(kind: EntityKind, reconciled: Reconciled) -> Option<Self> {
        (reconciled.changed && reconciled.delta != 0).then_some(Self {
            kind,
            delta: reconciled.delta,
        })
    }
}

impl fmt::Display for SyncNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "🔄 Data synced: {:+} {}",
            self.delta,
            self.kind.plural()
        )
    }
}

//=========================================================================================
// Scheduler
//=========================================================================================

/// Everything the session loop reacts to: timer ticks and host signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Tick,
    VisibilityChanged { visible: bool },
    Online,
    Offline,
    RefreshRequested,
}

/// Emits a `Tick` every period on a channel that host signals share.
///
/// The consumer owns the receiver and handles events one at a time, which keeps
/// all cache mutation on a single logical thread.
pub struct SyncScheduler {
    period: Duration,
    sender: mpsc::UnboundedSender<HostEvent>,
    token: Option<CancellationToken>,
    task: Option<JoinHandle<()>>,
}

impl SyncScheduler {
    pub fn new(period: Duration) -> (Self, mpsc::UnboundedReceiver<HostEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let scheduler = Self {
            period,
            sender,
            token: None,
            task: None,
        };
        (scheduler, receiver)
    }

    /// A handle for pushing host signals onto the same event stream.
    pub fn sender(&self) -> mpsc::UnboundedSender<HostEvent> {
        self.sender.clone()
    }

    pub fn is_running(&self) -> bool {
        self.token.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    /// Starts ticking. The first tick fires one full period after the call.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        let token = CancellationToken::new();
        let child = token.child_token();
        let sender = self.sender.clone();
        let period = self.period;

        info!("Starting sync scheduler with a {:?} period.", period);
        self.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = child.cancelled() => {
                        debug!("Sync scheduler cancelled.");
                        break;
                    }
                    _ = interval.tick() => {
                        if sender.send(HostEvent::Tick).is_err() {
                            debug!("Event receiver dropped; stopping sync scheduler.");
                            break;
                        }
                    }
                }
            }
        }));
        self.token = Some(token);
    }

    /// Stops ticking. Host signals sent through `sender()` still go through.
    pub fn stop(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
            info!("Sync scheduler stopped.");
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for SyncScheduler {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }
}
