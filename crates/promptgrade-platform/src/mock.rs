//! Test doubles for the clipboard and notification services.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use promptgrade_core::error::ClipboardError;
use promptgrade_core::traits::{Clipboard, Notification, NotificationKind, Notifier};

/// A mock clipboard with a scripted outcome.
pub struct MockClipboard {
    /// Error message to fail with, or `None` to succeed.
    failure: Option<String>,
    /// Artificial latency before the write resolves.
    delay: Duration,
    /// Successfully written texts, in order.
    contents: Mutex<Vec<String>>,
    /// Number of write attempts.
    call_count: AtomicU32,
}

impl MockClipboard {
    /// A clipboard where every write succeeds.
    pub fn succeeding() -> Self {
        Self {
            failure: None,
            delay: Duration::ZERO,
            contents: Mutex::new(Vec::new()),
            call_count: AtomicU32::new(0),
        }
    }

    /// A clipboard that rejects every write as access-denied.
    pub fn denying(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Self::succeeding()
        }
    }

    /// Delay every write by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Get the number of write attempts.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Texts that were written successfully.
    pub fn contents(&self) -> Vec<String> {
        self.contents.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clipboard for MockClipboard {
    fn name(&self) -> &str {
        "mock"
    }

    async fn write(&self, text: &str) -> Result<(), ClipboardError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.failure {
            Some(reason) => Err(ClipboardError::Denied(reason.clone())),
            None => {
                self.contents.lock().unwrap().push(text.to_string());
                Ok(())
            }
        }
    }
}

/// A notifier that records everything it is asked to show.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    /// Number of notifications of the given kind.
    pub fn count(&self, kind: NotificationKind) -> usize {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.kind == kind)
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn succeeding_records_contents() {
        let clip = MockClipboard::succeeding();
        clip.write("one").await.unwrap();
        clip.write("two").await.unwrap();
        assert_eq!(clip.contents(), vec!["one", "two"]);
        assert_eq!(clip.call_count(), 2);
    }

    #[tokio::test]
    async fn denying_records_attempts_only() {
        let clip = MockClipboard::denying("blocked");
        assert!(clip.write("one").await.is_err());
        assert!(clip.contents().is_empty());
        assert_eq!(clip.call_count(), 1);
    }

    #[test]
    fn recording_notifier_counts_by_kind() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notification::new("a", NotificationKind::Success, Duration::ZERO));
        notifier.notify(Notification::new("b", NotificationKind::Failure, Duration::ZERO));
        notifier.notify(Notification::new("c", NotificationKind::Success, Duration::ZERO));
        assert_eq!(notifier.count(NotificationKind::Success), 2);
        assert_eq!(notifier.count(NotificationKind::Failure), 1);
        assert_eq!(notifier.notifications()[1].message, "b");
    }
}
