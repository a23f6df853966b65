//! Transient notifications
//!
//! Error toasts shown newest first. Each one expires a fixed time after it
//! was raised, or earlier when dismissed.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub raised_at: Instant,
}

#[derive(Debug)]
pub struct Notifications {
    /// Newest at the front.
    items: VecDeque<Notification>,
    ttl: Duration,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            ttl,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, now: Instant) {
        self.items.push_front(Notification {
            message: message.into(),
            raised_at: now,
        });
    }

    pub fn dismiss_newest(&mut self) -> Option<Notification> {
        self.items.pop_front()
    }

    /// Drop expired notifications. Returns whether anything was removed.
    pub fn sweep(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        let ttl = self.ttl;
        self.items
            .retain(|item| now.saturating_duration_since(item.raised_at) < ttl);
        self.items.len() != before
    }

    pub fn messages(&self) -> Vec<String> {
        self.items.iter().map(|item| item.message.clone()).collect()
    }
}
