//! Transient user notifications ("toasts").
//!
//! The shell only queues them; the host drains the queue after each call and
//! shows them however it likes.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use std::collections::VecDeque;

use serde::Serialize;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyLevel {
    Info,
    Success,
    Error,
}

/// One queued notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotifyLevel,
    pub message: String,
    pub duration_ms: u32,
}

/// FIFO of notifications waiting for the host.
#[derive(Debug, Default)]
pub struct Notifier {
    queue: VecDeque<Notification>,
    default_ms: u32,
}

impl Notifier {
    #[must_use]
    pub fn new(default_ms: u32) -> Self {
        Self { queue: VecDeque::new(), default_ms }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NotifyLevel::Success, message, self.default_ms);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotifyLevel::Error, message, self.default_ms);
    }

    /// Queue a notification with an explicit duration.
    pub fn push(&mut self, level: NotifyLevel, message: impl Into<String>, duration_ms: u32) {
        self.queue.push_back(Notification { level, message: message.into(), duration_ms });
    }

    /// Take everything queued so far, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
