//! Transient user notifications. Rendering (the toast stack) is outside this
//! crate; controllers push here and the UI shell drains.

use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct Notices {
    queue: Mutex<Vec<Notice>>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(NoticeLevel::Success, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(NoticeLevel::Error, text.into());
    }

    pub fn warning(&self, text: impl Into<String>) {
        self.push(NoticeLevel::Warning, text.into());
    }

    fn push(&self, level: NoticeLevel, text: String) {
        tracing::debug!(?level, %text, "notice");
        self.queue.lock().unwrap().push(Notice { level, text });
    }

    /// Take everything queued since the last drain, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.queue.lock().unwrap())
    }

    pub fn last(&self) -> Option<Notice> {
        self.queue.lock().unwrap().last().cloned()
    }
}
