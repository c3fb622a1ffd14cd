//! Dismissible failure notifications
//!
//! Structural failures surface as short-lived messages. Expiry is computed
//! against a caller-supplied clock so the adapter never runs timers.

use std::time::{Duration, Instant};

/// How long a notification stays visible
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub created_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= NOTIFICATION_TTL
    }
}

/// Queue of visible notifications, oldest first
#[derive(Debug, Default)]
pub struct Notifications {
    items: Vec<Notification>,
    next_id: u64,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notification created at `now`, returning its id.
    /// Entries already expired at `now` are dropped first.
    pub fn push(&mut self, message: impl Into<String>, now: Instant) -> u64 {
        self.prune(now);
        self.next_id += 1;
        self.items.push(Notification {
            id: self.next_id,
            message: message.into(),
            created_at: now,
        });
        self.next_id
    }

    /// Remove a notification before it expires
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// Drop every expired notification
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|n| !n.is_expired(now));
    }

    /// Notifications still visible at `now`
    pub fn active(&self, now: Instant) -> impl Iterator<Item = &Notification> {
        self.items.iter().filter(move |n| !n.is_expired(now))
    }

    pub fn all(&self) -> &[Notification] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
