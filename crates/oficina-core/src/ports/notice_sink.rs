//! NoticeSink port - user-visible alert delivery.
//!
//! Together with the TaskStore's snapshot subscription this is the whole
//! surface a presentation layer needs: list state to render, notices to
//! flash.
//!
//! # Design
//! - Delivery is fire-and-forget from the caller's view; sinks must not
//!   block (the persister calls `notify` from its save path).
//! - `NoopNoticeSink` for embedders that only render observable state.

use std::sync::Mutex;

use crate::domain::Notice;

/// NoticeSink はユーザー向け通知を受け取る
pub trait NoticeSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// NoopNoticeSink は何もしない（通知を表示しない組み込み先用）
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNoticeSink;

impl NoticeSink for NoopNoticeSink {
    fn notify(&self, _notice: Notice) {}
}

/// RecordingNoticeSink は通知をバッファする（テスト・ヘッドレス用）
#[derive(Debug, Default)]
pub struct RecordingNoticeSink {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNoticeSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything notified so far, in order.
    pub fn recorded(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    /// Drain the buffer.
    pub fn take(&self) -> Vec<Notice> {
        std::mem::take(&mut self.notices.lock().unwrap())
    }
}

impl NoticeSink for RecordingNoticeSink {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}
