//! Ephemeral notification queue.
//!
//! Entries carry an expiry deadline instead of owning timers; the host calls
//! `sweep` with the current instant (on its tick) and expired entries fall
//! out. Explicit dismissal removes by id, so a dismissed toast cannot be
//! removed a second time by a later sweep. Insertion order is preserved and
//! any number of entries may be live at once.

use std::time::{Duration, Instant};

/// Unique handle for one notification.
///
/// Ids come from a per-queue monotonic counter, which cannot collide even
/// for entries enqueued within the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    /// How long a toast of this severity stays visible. Errors linger a bit
    /// longer so the user can actually read them.
    pub fn display_duration(self) -> Duration {
        match self {
            Severity::Success | Severity::Info => Duration::from_secs(3),
            Severity::Error => Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: ToastId,
    pub severity: Severity,
    pub message: String,
    pub expires_at: Instant,
}

/// Queue of live notifications, oldest first.
#[derive(Debug, Default)]
pub struct ToastQueue {
    entries: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, now: Instant, severity: Severity, message: impl Into<String>) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        self.entries.push(Toast {
            id,
            severity,
            message: message.into(),
            expires_at: now + severity.display_duration(),
        });
        id
    }

    /// Remove one toast before its deadline. Returns false if it was already
    /// gone.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|toast| toast.id != id);
        self.entries.len() != before
    }

    /// Drop every toast whose deadline has passed.
    pub fn sweep(&mut self, now: Instant) {
        self.entries.retain(|toast| toast.expires_at > now);
    }

    /// Deadline of the next toast to expire, for hosts that want to sleep
    /// rather than poll.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.entries.iter().map(|toast| toast.expires_at).min()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
