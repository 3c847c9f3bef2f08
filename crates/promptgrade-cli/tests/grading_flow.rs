//! Grading and copy scenarios across the core model and platform services.
//!
//! These run without the binary: the evaluation set, copier, and toast
//! surface are wired together directly, the way the CLI does it.

use std::sync::Arc;
use std::time::Duration;

use promptgrade_core::model::Grade;
use promptgrade_core::seed::reference_set;
use promptgrade_core::traits::NotificationKind;
use promptgrade_core::{CopyOutcome, PromptCopier};
use promptgrade_platform::mock::{MockClipboard, RecordingNotifier};
use promptgrade_platform::ToastSurface;

#[test]
fn every_item_can_be_graded_independently() {
    for grade in Grade::ALL {
        let base = reference_set();
        for item in base.iter() {
            let mut set = base.clone();
            assert!(set.set_grade(item.id(), grade));
            assert_eq!(set.grade_of(item.id()), Some(grade));
            for other in set.iter().filter(|o| o.id() != item.id()) {
                assert_eq!(other.grade(), Grade::Ungraded);
            }
        }
    }
}

#[test]
fn unknown_id_leaves_set_identical() {
    let mut set = reference_set();
    set.set_grade(4, Grade::Fail);
    set.set_grade(9, Grade::Pass);
    let before = set.clone();

    for id in [0, 14, 99, u32::MAX] {
        assert!(!set.set_grade(id, Grade::Pass));
    }
    assert_eq!(set, before);
}

#[test]
fn reference_walkthrough() {
    let mut set = reference_set();
    assert_eq!(set.len(), 13);
    assert_eq!(set.pass_rate().to_string(), "0.0");

    set.set_grade(1, Grade::Pass);
    set.set_grade(5, Grade::Pass);
    set.set_grade(2, Grade::Fail);
    assert_eq!(set.pass_rate().to_string(), "15.4");

    // Re-applying the same grades changes nothing.
    let snapshot = set.clone();
    set.set_grade(1, Grade::Pass);
    set.set_grade(5, Grade::Pass);
    assert_eq!(set, snapshot);

    for id in 1..=13 {
        set.set_grade(id, Grade::Pass);
    }
    assert_eq!(set.pass_rate().to_string(), "100.0");

    for id in 1..=13 {
        set.set_grade(id, Grade::Ungraded);
    }
    assert_eq!(set.pass_rate().to_string(), "0.0");
}

#[tokio::test(start_paused = true)]
async fn successful_copy_shows_one_toast_then_dismisses() {
    let clipboard = Arc::new(MockClipboard::succeeding());
    let toasts = ToastSurface::new();
    let copier = PromptCopier::new(clipboard.clone(), Arc::new(toasts.clone()))
        .with_notice_duration(Duration::from_millis(2000));
    let set = reference_set();

    let outcome = copier.copy(set.get(8).unwrap().prompt()).await;
    assert_eq!(outcome, CopyOutcome::Copied);
    assert_eq!(
        clipboard.contents(),
        vec!["If a regular hexagon has a short diagonal of 64, what is its long diagonal?"]
    );

    let shown = toasts.current().unwrap();
    assert_eq!(shown.kind, NotificationKind::Success);

    tokio::time::sleep(Duration::from_millis(2001)).await;
    assert!(toasts.current().is_none());
}

#[tokio::test]
async fn rejected_copy_emits_single_failure_and_keeps_grades() {
    let clipboard = Arc::new(MockClipboard::denying("permission denied"));
    let notifier = Arc::new(RecordingNotifier::new());
    let copier = PromptCopier::new(clipboard.clone(), notifier.clone());

    let mut set = reference_set();
    set.set_grade(6, Grade::Pass);
    let before = set.clone();

    let outcome = copier.copy(set.get(6).unwrap().prompt()).await;

    assert_eq!(outcome, CopyOutcome::Failed);
    assert_eq!(clipboard.call_count(), 1);
    assert_eq!(notifier.notifications().len(), 1);
    assert_eq!(notifier.count(NotificationKind::Failure), 1);
    assert_eq!(set, before);
}

#[tokio::test(start_paused = true)]
async fn overlapping_copies_last_resolved_is_displayed() {
    let toasts = ToastSurface::new();
    let notifier = Arc::new(toasts.clone());

    let slow_ok = PromptCopier::new(
        Arc::new(MockClipboard::succeeding().with_delay(Duration::from_millis(500))),
        notifier.clone(),
    );
    let fast_fail = PromptCopier::new(
        Arc::new(MockClipboard::denying("busy").with_delay(Duration::from_millis(100))),
        notifier,
    );

    let first = slow_ok.spawn_copy("first".into());
    let second = fast_fail.spawn_copy("second".into());

    assert_eq!(second.await.unwrap(), CopyOutcome::Failed);
    assert_eq!(toasts.current().unwrap().kind, NotificationKind::Failure);

    assert_eq!(first.await.unwrap(), CopyOutcome::Copied);
    assert_eq!(toasts.current().unwrap().kind, NotificationKind::Success);
}
