//! Transient notifications
//!
//! Time is supplied by the caller in milliseconds, so expiry is
//! deterministic under test.

use crate::config::DEFAULT_NOTIFICATION_TTL_MS;
use crate::core::Notice;

/// A message visible until `expires_at_ms`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Text shown to the user
    pub message: String,
    /// Reports a refused operation
    pub warning: bool,
    /// First instant at which the message is gone
    pub expires_at_ms: u64,
}

impl Notification {
    /// True once `now_ms` reaches the expiry
    #[must_use]
    pub const fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at_ms
    }
}

/// Queue of visible notifications, oldest first
#[derive(Debug, Clone)]
pub struct Notifier {
    ttl_ms: u64,
    active: Vec<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL_MS)
    }
}

impl Notifier {
    /// Creates a notifier whose messages live for `ttl_ms`
    #[must_use]
    pub const fn new(ttl_ms: u64) -> Self {
        Self {
            ttl_ms,
            active: Vec::new(),
        }
    }

    /// Message lifetime
    #[must_use]
    pub const fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    /// Shows a free-form message
    pub fn show(&mut self, message: impl Into<String>, now_ms: u64) {
        self.push(message.into(), false, now_ms);
    }

    /// Shows a core notice
    pub fn notify(&mut self, notice: Notice, now_ms: u64) {
        self.push(notice.message().to_string(), notice.is_warning(), now_ms);
    }

    fn push(&mut self, message: String, warning: bool, now_ms: u64) {
        self.prune(now_ms);
        self.active.push(Notification {
            message,
            warning,
            expires_at_ms: now_ms.saturating_add(self.ttl_ms),
        });
    }

    /// Drops expired messages and returns how many were removed
    pub fn prune(&mut self, now_ms: u64) -> usize {
        let before = self.active.len();
        self.active.retain(|n| !n.is_expired(now_ms));
        before - self.active.len()
    }

    /// Messages still visible at `now_ms`
    pub fn visible(&self, now_ms: u64) -> impl Iterator<Item = &Notification> {
        self.active.iter().filter(move |n| !n.is_expired(now_ms))
    }

    /// Texts of the messages visible at `now_ms`
    #[must_use]
    pub fn messages(&self, now_ms: u64) -> Vec<String> {
        self.visible(now_ms).map(|n| n.message.clone()).collect()
    }

    /// Removes every message
    pub fn clear(&mut self) {
        self.active.clear();
    }
}
