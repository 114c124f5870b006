//! Transient status messages that clear themselves after a fixed lifetime.

use std::time::{Duration, Instant};

use crate::constants::STATUS_MESSAGE_TTL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub expires_at: Instant,
}

/// Holds at most one message. Posting a new message replaces both the text
/// and its expiry, so an older clear can never remove a newer message.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    current: Option<Notice>,
    ttl: Duration,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::with_ttl(STATUS_MESSAGE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn post(&mut self, kind: NoticeKind, text: impl Into<String>, now: Instant) {
        self.current = Some(Notice {
            kind,
            text: text.into(),
            expires_at: now + self.ttl,
        });
    }

    /// The message, if it has not yet expired at `now`
    pub fn current(&self, now: Instant) -> Option<&Notice> {
        self.current.as_ref().filter(|notice| now < notice.expires_at)
    }

    /// Drop the message once expired; returns true if one was cleared.
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(notice) if now >= notice.expires_at => {
                self.current = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new()
    }
}
