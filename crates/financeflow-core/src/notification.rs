//! Single-slot transient notifications
//!
//! Each form owns one slot. Expiry is deadline based: a notification is
//! visible until `issued_at + ttl`, and showing a new one replaces the old
//! notification together with its deadline.

use crate::types::NotificationKind;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Default notification lifetime
pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

/// A one-shot status message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    #[serde(skip)]
    pub issued_at: Instant,
}

#[derive(Debug, Clone)]
pub struct NotificationSlot {
    current: Option<Notification>,
    ttl: Duration,
}

impl Default for NotificationSlot {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl NotificationSlot {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Occupy the slot, replacing whatever was showing
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind, now: Instant) {
        self.current = Some(Notification {
            message: message.into(),
            kind,
            issued_at: now,
        });
    }

    /// The notification visible at `now`, dropping it once expired
    pub fn current(&mut self, now: Instant) -> Option<&Notification> {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|n| now.saturating_duration_since(n.issued_at) >= self.ttl);
        if expired {
            self.current = None;
        }
        self.current.as_ref()
    }

    /// Time left before the visible notification expires
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.current
            .as_ref()
            .map(|n| self.ttl.saturating_sub(now.saturating_duration_since(n.issued_at)))
            .filter(|left| !left.is_zero())
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
