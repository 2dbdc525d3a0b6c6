//! Integration tests for the focus session lifecycle.
//!
//! Drives `FocusService` end to end over in-memory and SQLite storage,
//! including simulated restarts that keep only the durable scope.

use focusroom_core::clock::day_key;
use focusroom_core::storage::{ACTIVE_KEY, SESSIONS_KEY};
use focusroom_core::{
    Clock, Event, FocusService, KeyValueStore, ManualClock, MemoryStore, ScopedStorage,
    SessionKind, SessionStatus, SqliteStore,
};

const T0: i64 = 1_760_000_000_000;

fn service_on(durable: &MemoryStore, clock: &ManualClock) -> FocusService {
    FocusService::new(
        ScopedStorage::new(MemoryStore::new(), durable.clone()),
        clock.clone(),
    )
}

#[test]
fn pause_accounting_excludes_paused_minute() {
    let durable = MemoryStore::new();
    let clock = ManualClock::at_ms(T0);
    let mut service = service_on(&durable, &clock);

    service.start();
    clock.advance_secs(30);
    service.toggle_pause();
    clock.advance_secs(60);
    service.toggle_pause();
    assert_eq!(service.storage().load_active().unwrap().paused_accum_ms, 60_000);
    clock.advance_secs(60);

    let Some(Event::SessionEnded { session, .. }) = service.end() else {
        panic!("end() should finalize the running session");
    };
    assert_eq!(session.duration_sec, 90);
    assert_eq!(session.kind, SessionKind::Focus);
    assert_eq!(session.day_key, day_key(clock.now()));
}

#[test]
fn clearing_history_leaves_running_session_alone() {
    let durable = MemoryStore::new();
    let clock = ManualClock::at_ms(T0);
    let mut service = service_on(&durable, &clock);

    service.start();
    clock.advance_secs(10);
    service.end();
    service.start();
    clock.advance_secs(20);

    service.clear_history();
    assert!(service.history().is_empty());
    assert_eq!(service.view().status, SessionStatus::Running);
    assert_eq!(service.view().elapsed_sec, 20);

    service.end();
    let history = service.history().all();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].duration_sec, 20);
}

#[test]
fn fourth_focus_in_history_flags_the_following_break() {
    let durable = MemoryStore::new();
    let clock = ManualClock::at_ms(T0);
    let mut service = service_on(&durable, &clock);

    for _ in 0..4 {
        service.start();
        clock.advance_secs(25 * 60);
        service.end();
    }
    assert!(service.history().by_kind(SessionKind::Break).is_empty());

    let Some(Event::SessionStarted {
        kind,
        is_long_break,
        next_break_is_long,
        ..
    }) = service.start()
    else {
        panic!("start() from idle should start a session");
    };
    assert_eq!(kind, SessionKind::Focus);
    assert!(!is_long_break);
    assert!(next_break_is_long);
    assert!(service.view().next_is_long_break);

    clock.advance_secs(25 * 60);
    service.end();
    service.start_break();
    let view = service.view();
    assert_eq!(view.kind, Some(SessionKind::Break));
    assert!(view.is_long_break);
    assert_eq!(view.target_sec, 15 * 60);
}

#[test]
fn double_start_keeps_one_session() {
    let durable = MemoryStore::new();
    let clock = ManualClock::at_ms(T0);
    let mut service = service_on(&durable, &clock);

    assert!(service.start().is_some());
    let first = service.storage().load_active();
    clock.advance_secs(3);
    assert!(service.start().is_none());
    assert_eq!(service.storage().load_active(), first);
    assert_eq!(service.view().status, SessionStatus::Running);
}

#[test]
fn idle_commands_leave_stores_unchanged() {
    let durable = MemoryStore::new();
    let clock = ManualClock::at_ms(T0);
    let mut service = service_on(&durable, &clock);

    assert!(service.toggle_pause().is_none());
    assert!(service.end().is_none());
    assert!(service.log_distraction("email").is_none());
    assert!(durable.is_empty());
}

#[test]
fn restart_mid_session_reconstructs_view() {
    let durable = MemoryStore::new();
    let clock = ManualClock::at_ms(T0);

    {
        let mut service = service_on(&durable, &clock);
        service.start();
        clock.advance_secs(45);
        service.toggle_pause();
        service.log_distraction("doorbell");
    }

    clock.advance_secs(120);
    let mut service = service_on(&durable, &clock);
    let view = service.view();
    assert_eq!(view.status, SessionStatus::Paused);
    assert_eq!(view.elapsed_sec, 45);
    assert_eq!(view.distraction_count, 1);

    service.toggle_pause();
    clock.advance_secs(15);
    assert_eq!(service.view().elapsed_sec, 60);
}

#[test]
fn distractions_are_bounded_and_carried_into_history() {
    let durable = MemoryStore::new();
    let clock = ManualClock::at_ms(T0);
    let mut service = service_on(&durable, &clock);
    service.start();

    for i in 0..25 {
        clock.advance_secs(1);
        service.log_distraction(&format!("ping {i}"));
    }
    let active = service.storage().load_active().unwrap();
    assert_eq!(active.distractions.len(), 20);
    assert_eq!(active.distractions[0].text, "ping 24");
    assert_eq!(active.distractions[19].text, "ping 5");

    service.end();
    let session = &service.history().all()[0];
    assert_eq!(session.distractions, active.distractions);
}

#[test]
fn history_is_capped_to_newest_250() {
    let durable = MemoryStore::new();
    let clock = ManualClock::at_ms(T0);
    let mut service = service_on(&durable, &clock);

    let mut ids = Vec::new();
    for _ in 0..260 {
        service.start();
        clock.advance_secs(1);
        if let Some(Event::SessionEnded { session, .. }) = service.end() {
            ids.push(session.id);
        }
    }

    let stored: Vec<_> = service.history().all().into_iter().map(|s| s.id).collect();
    assert_eq!(stored.len(), 250);
    assert_eq!(stored, ids[10..]);
}

#[test]
fn stats_today_and_average() {
    let durable = MemoryStore::new();
    let clock = ManualClock::at_ms(T0);
    let mut service = service_on(&durable, &clock);
    assert_eq!(service.stats().all_time_focus_average_sec, 0);

    service.start();
    clock.advance_secs(600);
    service.end();
    service.start_break();
    clock.advance_secs(300);
    service.end();

    clock.advance_secs(2 * 24 * 3600);
    service.start();
    clock.advance_secs(301);
    service.end();

    let stats = service.stats();
    assert_eq!(stats.today_focus_count, 1);
    assert_eq!(stats.today_focus_total_sec, 301);
    assert_eq!(stats.all_time_focus_count, 2);
    assert_eq!(stats.all_time_focus_average_sec, 450);
}

#[test]
fn fresh_tab_reattaches_through_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("focusroom.db");
    let clock = ManualClock::at_ms(T0);

    {
        let storage = ScopedStorage::new(MemoryStore::new(), SqliteStore::open(&path).unwrap());
        let mut service = FocusService::new(storage, clock.clone());
        service.start();
    }

    clock.advance_secs(75);
    let durable = SqliteStore::open(&path).unwrap();
    assert!(durable.get(ACTIVE_KEY).unwrap().is_some());

    let mut service = FocusService::new(ScopedStorage::new(MemoryStore::new(), durable), clock.clone());
    assert_eq!(service.view().elapsed_sec, 75);
    service.end();

    let durable = SqliteStore::open(&path).unwrap();
    assert!(durable.get(ACTIVE_KEY).unwrap().is_none());
    assert_eq!(service.history().len(), 1);
}

#[test]
fn corrupt_durable_state_degrades_to_idle() {
    let durable = MemoryStore::new();
    durable.set(ACTIVE_KEY, "\"half a record").unwrap();
    let clock = ManualClock::at_ms(T0);
    let mut service = service_on(&durable, &clock);

    assert_eq!(service.view().status, SessionStatus::Idle);
    assert!(service.start().is_some());
    assert_eq!(service.view().status, SessionStatus::Running);
}

#[test]
fn oversized_stored_durations_do_not_break_stats() {
    let durable = MemoryStore::new();
    let clock = ManualClock::at_ms(T0);
    let today = day_key(clock.now());
    let entry = |id: &str| {
        serde_json::json!({
            "id": id,
            "kind": "focus",
            "startedAt": "2025-10-09T08:00:00Z",
            "endedAt": "2025-10-09T08:25:00Z",
            "durationSec": u64::MAX,
            "dayKey": today,
        })
    };
    let raw = serde_json::Value::Array(vec![entry("a"), entry("b")]).to_string();
    durable.set(SESSIONS_KEY, &raw).unwrap();

    let service = service_on(&durable, &clock);
    let stats = service.stats();
    assert_eq!(stats.today_focus_count, 2);
    assert_eq!(stats.today_focus_total_sec, u64::MAX);
    assert_eq!(stats.all_time_focus_average_sec, u64::MAX);
}
