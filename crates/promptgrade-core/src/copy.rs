//! Copy-to-clipboard action with user notification.
//!
//! A copy is a single request with exactly two terminal outcomes. Whichever
//! happens, exactly one notification is emitted. Nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::traits::{Clipboard, Notification, NotificationKind, Notifier};

/// Shown when the prompt reached the clipboard.
pub const COPY_SUCCESS_MESSAGE: &str = "Prompt copied to clipboard";

/// Shown for any clipboard failure.
pub const COPY_FAILURE_MESSAGE: &str = "Failed to copy prompt";

/// Default time a copy notification stays visible.
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_millis(2000);

/// Result of a copy attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyOutcome {
    Copied,
    Failed,
}

impl CopyOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CopyOutcome::Copied)
    }
}

/// Copies prompt text to a clipboard and reports the outcome to a notifier.
#[derive(Clone)]
pub struct PromptCopier {
    clipboard: Arc<dyn Clipboard>,
    notifier: Arc<dyn Notifier>,
    notice_duration: Duration,
}

impl PromptCopier {
    pub fn new(clipboard: Arc<dyn Clipboard>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            clipboard,
            notifier,
            notice_duration: DEFAULT_NOTICE_DURATION,
        }
    }

    /// Override how long copy notifications stay visible.
    pub fn with_notice_duration(mut self, duration: Duration) -> Self {
        self.notice_duration = duration;
        self
    }

    /// Copy `text` and emit one success or one failure notification.
    pub async fn copy(&self, text: &str) -> CopyOutcome {
        let outcome = match self.clipboard.write(text).await {
            Ok(()) => {
                tracing::debug!(backend = self.clipboard.name(), bytes = text.len(), "copied prompt");
                CopyOutcome::Copied
            }
            Err(e) => {
                tracing::warn!(backend = self.clipboard.name(), "clipboard write failed: {e}");
                CopyOutcome::Failed
            }
        };

        let (message, kind) = match outcome {
            CopyOutcome::Copied => (COPY_SUCCESS_MESSAGE, NotificationKind::Success),
            CopyOutcome::Failed => (COPY_FAILURE_MESSAGE, NotificationKind::Failure),
        };
        self.notifier
            .notify(Notification::new(message, kind, self.notice_duration));

        outcome
    }

    /// Run a copy as an independent task.
    ///
    /// The task is never cancelled; concurrent copies each complete and
    /// notify on their own.
    pub fn spawn_copy(&self, text: String) -> JoinHandle<CopyOutcome> {
        let copier = self.clone();
        tokio::spawn(async move { copier.copy(&text).await })
    }
}
