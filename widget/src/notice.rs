//! Transient user-facing notices, auto-dismissed after a fixed display
//! window.

/// Styling class of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// One transient message shown next to the mint button.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub posted_at_ms: i64,
}

/// Holds the single live notice. A new post replaces whatever is showing;
/// expired notices lapse on the next tick.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    ttl_ms: u64,
    current: Option<Notice>,
}

impl NoticeBoard {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            ttl_ms,
            current: None,
        }
    }

    pub fn post(&mut self, kind: NoticeKind, text: impl Into<String>, now_ms: i64) {
        self.current = Some(Notice {
            kind,
            text: text.into(),
            posted_at_ms: now_ms,
        });
    }

    fn expired(&self, notice: &Notice, now_ms: i64) -> bool {
        now_ms.saturating_sub(notice.posted_at_ms) >= self.ttl_ms as i64
    }

    /// Live notice, if its display window has not passed.
    pub fn current(&self, now_ms: i64) -> Option<&Notice> {
        self.current
            .as_ref()
            .filter(|notice| !self.expired(notice, now_ms))
    }

    /// Drop an expired notice.
    pub fn prune(&mut self, now_ms: i64) {
        if let Some(notice) = &self.current {
            if self.expired(notice, now_ms) {
                self.current = None;
            }
        }
    }
}
