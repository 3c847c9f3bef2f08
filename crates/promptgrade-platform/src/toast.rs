//! Single-slot toast surface for transient notifications.
//!
//! Only one toast is visible at a time. A new notification replaces the
//! current one, so the last to arrive wins. Each toast dismisses itself
//! after its duration; a stale timer never clears a newer toast.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use promptgrade_core::traits::{Notification, NotificationKind, Notifier};

#[derive(Debug, Clone)]
struct ActiveToast {
    generation: u64,
    notification: Notification,
}

#[derive(Debug, Default)]
struct Slot {
    current: Mutex<Option<ActiveToast>>,
    generation: AtomicU64,
}

impl Slot {
    fn current(&self) -> Option<Notification> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .map(|t| t.notification.clone())
    }

    fn dismiss_if_current(&self, generation: u64) {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if current.as_ref().is_some_and(|t| t.generation == generation) {
            if let Some(toast) = current.take() {
                tracing::debug!(text = %toast.notification.message, "toast dismissed");
            }
        }
    }
}

/// The notification surface used by the terminal front end.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct ToastSurface {
    slot: Arc<Slot>,
    echo: bool,
}

impl ToastSurface {
    /// A surface that only tracks state (useful for tests).
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface that also prints each toast to stderr as it appears.
    pub fn echoing() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    /// The toast currently on screen, if any.
    pub fn current(&self) -> Option<Notification> {
        self.slot.current()
    }
}

impl Notifier for ToastSurface {
    fn notify(&self, notification: Notification) {
        let duration = notification.duration;

        if self.echo {
            eprintln!("{}", render(&notification));
        }
        tracing::debug!(
            kind = %notification.kind,
            text = %notification.message,
            duration_ms = duration.as_millis() as u64,
            "toast shown"
        );

        // Bump the generation under the lock so slot order matches
        // generation order.
        let generation = {
            let mut current = self
                .slot
                .current
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let generation = self.slot.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *current = Some(ActiveToast {
                generation,
                notification,
            });
            generation
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let slot = Arc::clone(&self.slot);
                handle.spawn(async move {
                    tokio::time::sleep(duration).await;
                    slot.dismiss_if_current(generation);
                });
            }
            Err(_) => {
                tracing::warn!("no async runtime; toast will stay until replaced");
            }
        }
    }
}

/// One-line terminal rendering of a notification.
pub fn render(notification: &Notification) -> String {
    match notification.kind {
        NotificationKind::Success => format!("[ok] {}", notification.message),
        NotificationKind::Failure => format!("[error] {}", notification.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn note(message: &str, kind: NotificationKind, ms: u64) -> Notification {
        Notification::new(message, kind, Duration::from_millis(ms))
    }

    #[tokio::test(start_paused = true)]
    async fn toast_dismisses_after_duration() {
        let surface = ToastSurface::new();
        surface.notify(note("copied", NotificationKind::Success, 2000));
        assert_eq!(surface.current().unwrap().message, "copied");

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(surface.current().is_some());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(surface.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn newer_toast_replaces_and_survives_old_timer() {
        let surface = ToastSurface::new();
        surface.notify(note("first", NotificationKind::Success, 2000));

        tokio::time::sleep(Duration::from_millis(1500)).await;
        surface.notify(note("second", NotificationKind::Failure, 2000));
        assert_eq!(surface.current().unwrap().message, "second");

        // The first toast's timer fires here and must not clear "second".
        tokio::time::sleep(Duration::from_millis(600)).await;
        let current = surface.current().unwrap();
        assert_eq!(current.message, "second");
        assert_eq!(current.kind, NotificationKind::Failure);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(surface.current().is_none());
    }

    #[tokio::test]
    async fn clones_share_the_slot() {
        let surface = ToastSurface::new();
        let other = surface.clone();
        other.notify(note("shared", NotificationKind::Success, 60_000));
        assert_eq!(surface.current().unwrap().message, "shared");
    }

    #[test]
    fn notify_without_runtime_keeps_toast() {
        let surface = ToastSurface::new();
        surface.notify(note("sticky", NotificationKind::Success, 1));
        assert_eq!(surface.current().unwrap().message, "sticky");
    }

    #[test]
    fn render_distinguishes_kinds() {
        let ok = render(&note("Prompt copied to clipboard", NotificationKind::Success, 1));
        let err = render(&note("Failed to copy prompt", NotificationKind::Failure, 1));
        assert_eq!(ok, "[ok] Prompt copied to clipboard");
        assert_eq!(err, "[error] Failed to copy prompt");
    }
}
