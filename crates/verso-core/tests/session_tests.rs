use chrono::{Duration, Utc};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use uuid::Uuid;
use verso_core::{
    EditorSession, EngineConfig, EngineError, EngineEvent, EntryKind, ManualClock,
    PersistenceSink, SinkError,
};

/// Test sink with a shared log so the test can observe persisted saves
/// after the sink has been moved into the session.
#[derive(Clone, Default)]
struct SharedSink {
    log: Rc<RefCell<Vec<(String, String)>>>,
    fail: Rc<Cell<bool>>,
}

impl PersistenceSink<String> for SharedSink {
    fn persist(&mut self, label: &str, state: &String) -> Result<(), SinkError> {
        if self.fail.get() {
            return Err("simulated sink failure".into());
        }
        self.log
            .borrow_mut()
            .push((label.to_string(), state.clone()));
        Ok(())
    }
}

fn session_with_clock() -> (EditorSession<String>, ManualClock, SharedSink) {
    let clock = ManualClock::new(Utc::now());
    let sink = SharedSink::default();
    let session = EditorSession::new(
        "Initial",
        "S0".to_string(),
        EngineConfig::default(),
        sink.clone(),
        clock.clone(),
    );
    (session, clock, sink)
}

#[test]
fn test_burst_coalesces_into_single_auto_save() {
    let (mut session, clock, sink) = session_with_clock();

    // Edits at t=0, 10, 20 with a 30s idle period.
    session.push("Edit 1", "S1".to_string());
    clock.advance(Duration::seconds(10));
    session.push("Edit 2", "S2".to_string());
    clock.advance(Duration::seconds(10));
    session.push("Edit 3", "S3".to_string());

    // t=40: only 20s since the last edit.
    clock.advance(Duration::seconds(20));
    assert!(!session.tick());
    assert!(session.versions().is_empty());

    // t=50: the window elapsed; exactly one auto-save with the last state.
    clock.advance(Duration::seconds(10));
    assert!(session.tick());
    assert_eq!(session.versions().len(), 1);
    let version = session.versions().latest().unwrap();
    assert_eq!(version.kind, EntryKind::Auto);
    assert_eq!(version.state, "S3");
    assert_eq!(sink.log.borrow().len(), 1);

    // No second fire without a new edit.
    clock.advance(Duration::seconds(300));
    assert!(!session.tick());
    assert_eq!(session.versions().len(), 1);
}

#[test]
fn test_save_now_bypasses_idle_timer() {
    let (mut session, _clock, sink) = session_with_clock();
    session.push("Edit", "S1".to_string());

    let id = session.save_now("Before publish").unwrap();
    let version = session.versions().get(id).unwrap();
    assert_eq!(version.kind, EntryKind::Manual);
    assert_eq!(version.label, "Before publish");
    assert_eq!(version.state, "S1");
    assert_eq!(sink.log.borrow()[0].0, "Before publish");
}

#[test]
fn test_events_for_push_and_save() {
    let (mut session, _clock, _sink) = session_with_clock();
    let events = session.subscribe();

    session.push("Edit", "S1".to_string());
    assert_eq!(
        events.try_recv().unwrap(),
        EngineEvent::HistoryChanged {
            can_undo: true,
            can_redo: false,
        }
    );

    let id = session.save_now("v1").unwrap();
    assert_eq!(
        events.try_recv().unwrap(),
        EngineEvent::VersionSaved {
            id,
            kind: EntryKind::Manual,
        }
    );
    assert!(events.try_recv().is_err());
}

#[test]
fn test_save_failure_is_surfaced_and_transient() {
    let (mut session, clock, sink) = session_with_clock();
    let events = session.subscribe();

    sink.fail.set(true);
    let result = session.save_now("doomed");
    assert!(matches!(result, Err(EngineError::Persistence(_))));
    assert!(session.versions().is_empty());
    assert!(!session.versions().is_saving());
    assert!(matches!(
        events.try_recv().unwrap(),
        EngineEvent::SaveFailed { .. }
    ));

    // An auto-save failure is not fatal either: the next edit re-arms the
    // window and the retry succeeds.
    session.push("Edit", "S1".to_string());
    while events.try_recv().is_ok() {}
    clock.advance(Duration::seconds(31));
    assert!(!session.tick());
    assert!(session.versions().is_empty());
    assert!(matches!(
        events.try_recv().unwrap(),
        EngineEvent::SaveFailed { .. }
    ));

    sink.fail.set(false);
    session.push("Edit again", "S2".to_string());
    clock.advance(Duration::seconds(31));
    assert!(session.tick());
    assert_eq!(session.versions().latest().unwrap().state, "S2");
}

#[test]
fn test_restore_is_additive_and_undoable() {
    let (mut session, _clock, _sink) = session_with_clock();

    session.push("Edit", "S1".to_string());
    let id = session.save_now("checkpoint").unwrap();
    session.push("Later edit", "S2".to_string());

    let history_len = session.history().len();
    session.restore_version(id).unwrap();

    // History grew by one; the store did not change.
    assert_eq!(session.history().len(), history_len + 1);
    assert_eq!(session.versions().len(), 1);
    assert_eq!(session.current_state(), "S1");
    assert_eq!(session.history().current().label, "Restored: checkpoint");

    // The restore itself is undoable.
    assert_eq!(session.undo().unwrap(), "S2");
    assert_eq!(session.redo().unwrap(), "S1");
}

#[test]
fn test_restore_unknown_version() {
    let (mut session, _clock, _sink) = session_with_clock();
    let result = session.restore_version(Uuid::new_v4());
    assert!(matches!(result, Err(EngineError::VersionNotFound(_))));
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_delete_version() {
    let (mut session, _clock, _sink) = session_with_clock();
    let events = session.subscribe();

    let v1 = session.save_now("v1").unwrap();
    let v2 = session.save_now("v2").unwrap();
    // Drain the save events.
    while events.try_recv().is_ok() {}

    session.delete_version(v1).unwrap();
    assert_eq!(session.versions().len(), 1);
    assert_eq!(session.versions().latest().unwrap().id, v2);
    assert_eq!(
        events.try_recv().unwrap(),
        EngineEvent::VersionDeleted { id: v1 }
    );

    let result = session.delete_version(v1);
    assert!(matches!(result, Err(EngineError::VersionNotFound(_))));
}

#[test]
fn test_close_cancels_pending_auto_save() {
    let (mut session, clock, sink) = session_with_clock();

    session.push("Edit", "S1".to_string());
    session.close();

    clock.advance(Duration::seconds(120));
    assert!(!session.tick());
    assert!(session.versions().is_empty());
    assert!(sink.log.borrow().is_empty());

    // Mutating operations are rejected or ignored after close.
    assert!(matches!(session.save_now("late"), Err(EngineError::Closed)));
    assert!(matches!(
        session.restore_version(Uuid::new_v4()),
        Err(EngineError::Closed)
    ));
    let len_before = session.history().len();
    session.push("Ignored", "S2".to_string());
    assert_eq!(session.history().len(), len_before);
    assert_eq!(session.current_state(), "S1");
}

#[test]
fn test_undo_at_boundary_is_silent_noop() {
    let (mut session, _clock, _sink) = session_with_clock();
    let events = session.subscribe();

    assert!(!session.can_undo());
    assert!(session.undo().is_none());
    assert_eq!(session.current_state(), "S0");
    assert!(events.try_recv().is_err());
}

#[test]
fn test_undo_restarts_idle_window() {
    let (mut session, clock, _sink) = session_with_clock();

    session.push("Edit", "S1".to_string());
    clock.advance(Duration::seconds(20));

    // The undo is itself a state change: the window restarts at t=20.
    assert!(session.undo().is_some());
    clock.advance(Duration::seconds(20));
    assert!(!session.tick());

    clock.advance(Duration::seconds(10));
    assert!(session.tick());
    assert_eq!(session.versions().latest().unwrap().state, "S0");
}
