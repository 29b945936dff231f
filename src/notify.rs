//! Transient user-facing notifications ("toasts").
//!
//! Each notification stays visible for a fixed TTL and is also fanned out
//! on a broadcast channel so a frontend can render it as it happens.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use tracing::{info, warn};
use uuid::Uuid;

const BROADCAST_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub text: String,
    pub created_at: Instant,
}

pub struct Notifications {
    ttl: Duration,
    visible: Mutex<VecDeque<Notification>>,
    tx: broadcast::Sender<Notification>,
}

impl Notifications {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { ttl, visible: Mutex::new(VecDeque::new()), tx }
    }

    pub fn push(&self, kind: NotificationKind, text: impl Into<String>) -> Notification {
        self.push_at(kind, text.into(), Instant::now())
    }

    /// Internal: push with explicit timestamp (for testing).
    pub(crate) fn push_at(&self, kind: NotificationKind, text: String, now: Instant) -> Notification {
        let notification = Notification { id: Uuid::new_v4(), kind, text, created_at: now };

        match kind {
            NotificationKind::Error => warn!(id = %notification.id, text = %notification.text, "notification"),
            NotificationKind::Success | NotificationKind::Info => {
                info!(id = %notification.id, %kind, text = %notification.text, "notification");
            }
        }

        {
            let mut visible = self
                .visible
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            prune(&mut visible, now, self.ttl);
            visible.push_back(notification.clone());
        }

        // No subscribers is fine; the notification is still visible.
        let _ = self.tx.send(notification.clone());
        notification
    }

    /// Notifications whose TTL has not yet elapsed, oldest first.
    #[must_use]
    pub fn visible(&self) -> Vec<Notification> {
        self.visible_at(Instant::now())
    }

    pub(crate) fn visible_at(&self, now: Instant) -> Vec<Notification> {
        let mut visible = self
            .visible
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        prune(&mut visible, now, self.ttl);
        visible.iter().cloned().collect()
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

fn prune(visible: &mut VecDeque<Notification>, now: Instant, ttl: Duration) {
    while visible
        .front()
        .is_some_and(|n| now.saturating_duration_since(n.created_at) >= ttl)
    {
        visible.pop_front();
    }
}

#[cfg(test)]
#[path = "notify_test.rs"]
mod tests;
