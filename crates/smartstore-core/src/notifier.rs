// ── Notifications ──
//
// Transient success/error/info messages. Controllers receive a
// `Notifier` and never know how (or whether) toasts are displayed.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde::Serialize;
use strum::{Display, IntoStaticStr};

/// Lifetime of an ordinary toast.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3);
/// Lifetime of a toast raised for a failed backend call.
pub const ERROR_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    #[serde(skip)]
    pub ttl: Duration,
}

impl Notification {
    pub fn new(severity: Severity, summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity,
            summary: summary.into(),
            detail: detail.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// `Success` toast with the default ttl.
    pub fn success(detail: impl Into<String>) -> Self {
        Self::new(Severity::Success, "Success", detail)
    }

    /// `Error` toast with the default ttl.
    pub fn error(detail: impl Into<String>) -> Self {
        Self::new(Severity::Error, "Error", detail)
    }

    pub fn info(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(Severity::Info, summary, detail)
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Sink for user-facing notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── ToastBoard ───────────────────────────────────────────────────────

/// Bounded list of the most recent toasts, each expiring on its own ttl.
pub struct ToastBoard {
    capacity: usize,
    toasts: Mutex<VecDeque<(Instant, Notification)>>,
}

impl ToastBoard {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            toasts: Mutex::new(VecDeque::new()),
        }
    }

    /// Toasts still alive now, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        self.active_at(Instant::now())
    }

    /// Toasts alive at `now`; expired ones are dropped.
    pub fn active_at(&self, now: Instant) -> Vec<Notification> {
        let mut toasts = lock(&self.toasts);
        toasts.retain(|(posted, n)| now.saturating_duration_since(*posted) < n.ttl);
        toasts.iter().map(|(_, n)| n.clone()).collect()
    }

    pub fn clear(&self) {
        lock(&self.toasts).clear();
    }
}

impl Default for ToastBoard {
    fn default() -> Self {
        Self::new(5)
    }
}

impl Notifier for ToastBoard {
    fn notify(&self, notification: Notification) {
        let mut toasts = lock(&self.toasts);
        if toasts.len() == self.capacity {
            toasts.pop_front();
        }
        toasts.push_back((Instant::now(), notification));
    }
}

// ── RecordingNotifier ────────────────────────────────────────────────

/// Keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notification> {
        lock(&self.seen).clone()
    }

    /// Drain and return what was recorded so far.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *lock(&self.seen))
    }

    pub fn details(&self) -> Vec<String> {
        lock(&self.seen).iter().map(|n| n.detail.clone()).collect()
    }

    pub fn last(&self) -> Option<Notification> {
        lock(&self.seen).last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        lock(&self.seen).push(notification);
    }
}
