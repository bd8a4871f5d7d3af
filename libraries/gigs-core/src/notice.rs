//! Transient inline notices

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A dismissible message. `expires_at == None` stays until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub expires_at: Option<Instant>,
}

impl Notice {
    pub fn is_visible(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| now < deadline)
    }
}

/// One slot per notice kind; posting replaces the previous notice of that kind.
#[derive(Debug, Clone, Default)]
pub struct NoticeBoard {
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(
        &mut self,
        kind: NoticeKind,
        message: impl Into<String>,
        now: Instant,
        ttl: Option<Duration>,
    ) {
        self.dismiss(kind);
        self.notices.push(Notice {
            kind,
            message: message.into(),
            expires_at: ttl.map(|ttl| now + ttl),
        });
    }

    pub fn dismiss(&mut self, kind: NoticeKind) {
        self.notices.retain(|n| n.kind != kind);
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }

    /// Notices still visible at `now`
    pub fn visible(&self, now: Instant) -> Vec<&Notice> {
        self.notices.iter().filter(|n| n.is_visible(now)).collect()
    }

    /// Visible notice of `kind` at `now`
    pub fn get(&self, kind: NoticeKind, now: Instant) -> Option<&Notice> {
        self.notices
            .iter()
            .find(|n| n.kind == kind && n.is_visible(now))
    }

    /// Drop expired notices
    pub fn prune(&mut self, now: Instant) {
        self.notices.retain(|n| n.is_visible(now));
    }
}
