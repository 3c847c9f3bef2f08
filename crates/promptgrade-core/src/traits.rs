//! Service traits for the clipboard and the notification surface.
//!
//! Implemented by `promptgrade-platform`; the core only consumes them.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ClipboardError;

// ---------------------------------------------------------------------------
// Clipboard
// ---------------------------------------------------------------------------

/// A system clipboard that can accept text.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Short backend name for logs (e.g. "wl-copy").
    fn name(&self) -> &str;

    /// Place `text` on the clipboard.
    async fn write(&self, text: &str) -> Result<(), ClipboardError>;
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Visual style of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Failure,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Failure => write!(f, "failure"),
        }
    }
}

/// A transient message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    /// How long the notification stays visible before it is dismissed.
    pub duration: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind, duration: Duration) -> Self {
        Self {
            message: message.into(),
            kind,
            duration,
        }
    }
}

/// Something that can display transient notifications.
///
/// Implementations own dismissal; callers only hand over the notification.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
