//! Non-blocking user notifications.
//!
//! The store never returns errors to UI callers; failures surface as
//! notices through a sink the UI layer chooses. Publishing must never
//! block and never fail.

use std::sync::Arc;
use tokio::sync::mpsc;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Informational message.
    Info,
    /// A failed operation the user should know about.
    Error,
}

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Human-readable message.
    pub message: String,
}

impl Notice {
    /// Create an info notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Create an error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// A destination for notices.
pub trait NoticeSink: Send + Sync {
    /// Publish a notice. Must not block.
    fn publish(&self, notice: Notice);
}

/// Sink that logs notices through `tracing`.
///
/// The default when no UI layer has subscribed.
#[derive(Debug, Default)]
pub struct TracingSink;

impl NoticeSink for TracingSink {
    fn publish(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => tracing::info!(message = %notice.message, "notice"),
            NoticeLevel::Error => tracing::error!(message = %notice.message, "notice"),
        }
    }
}

/// Sink that buffers notices on an unbounded channel for a UI layer to
/// drain.
///
/// Publishing is fire-and-forget: once the receiver is dropped, notices
/// are silently discarded.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Notice>,
}

impl ChannelSink {
    /// Create a sink and the receiver that drains it.
    pub fn channel() -> (Arc<Self>, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { tx }), rx)
    }
}

impl NoticeSink for ChannelSink {
    fn publish(&self, notice: Notice) {
        let _ = self.tx.send(notice);
    }
}
