//! Active session state machine.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start/start_break--> Running --pause--> Paused
//!   ^                            |  ^--resume------|
//!   +------------end-------------+-----------------+
//! ```
//!
//! Every command from an inapplicable state is a no-op returning `None`.
//! There is no terminal state.

use tracing::debug;

use super::history::HistoryStore;
use super::model::{ActiveSession, Session, SessionKind};
use super::view::{SessionStatus, SessionView};
use crate::clock::Clock;
use crate::settings::Settings;
use crate::storage::ScopedStorage;

/// Number of trailing focus sessions inspected for the long-break rule.
pub const LONG_BREAK_LOOKBACK: usize = 4;

/// Typed view of the persisted record: absent, running, or paused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running(ActiveSession),
    Paused(ActiveSession),
}

impl SessionState {
    pub fn from_active(active: Option<ActiveSession>) -> Self {
        match active {
            None => SessionState::Idle,
            Some(active) if active.is_paused() => SessionState::Paused(active),
            Some(active) => SessionState::Running(active),
        }
    }

    pub fn status(&self) -> SessionStatus {
        match self {
            SessionState::Idle => SessionStatus::Idle,
            SessionState::Running(_) => SessionStatus::Running,
            SessionState::Paused(_) => SessionStatus::Paused,
        }
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        match self {
            SessionState::Idle => None,
            SessionState::Running(active) | SessionState::Paused(active) => Some(active),
        }
    }

    pub fn into_active(self) -> Option<ActiveSession> {
        match self {
            SessionState::Idle => None,
            SessionState::Running(active) | SessionState::Paused(active) => Some(active),
        }
    }
}

/// Outcome of a pause toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseTransition {
    Paused { elapsed_sec: u64 },
    Resumed { paused_for_ms: u64 },
}

/// Whether the break after a focus session is long.
///
/// Looks at the trailing [`LONG_BREAK_LOOKBACK`] focus entries of the whole
/// history, not at sessions since the previous long break: once four focus
/// sessions exist, every following break is long.
pub fn next_break_is_long(history: &[Session]) -> bool {
    history
        .iter()
        .rev()
        .filter(|s| s.kind == SessionKind::Focus)
        .take(LONG_BREAK_LOOKBACK)
        .count()
        >= LONG_BREAK_LOOKBACK
}

/// Drives the single active session through its states.
pub struct SessionTracker<'a> {
    storage: &'a ScopedStorage,
    clock: &'a dyn Clock,
}

impl<'a> SessionTracker<'a> {
    pub fn new(storage: &'a ScopedStorage, clock: &'a dyn Clock) -> Self {
        Self { storage, clock }
    }

    pub fn state(&self) -> SessionState {
        SessionState::from_active(self.storage.load_active())
    }

    /// Start a focus session. No-op unless idle.
    pub fn start(&self) -> Option<ActiveSession> {
        if self.storage.load_active().is_some() {
            return None;
        }
        let history = self.storage.load_history();
        let mut active = ActiveSession::new(SessionKind::Focus, self.clock.now_ms());
        active.next_break_is_long = next_break_is_long(&history);
        self.storage.save_active(&active);
        debug!(next_break_is_long = active.next_break_is_long, "focus session started");
        Some(active)
    }

    /// Start a break. No-op unless idle.
    ///
    /// The break is long when the newest history entry is a focus session
    /// that was flagged for a long break when it started.
    pub fn start_break(&self) -> Option<ActiveSession> {
        if self.storage.load_active().is_some() {
            return None;
        }
        let is_long_break = self
            .storage
            .load_history()
            .last()
            .is_some_and(|s| s.kind == SessionKind::Focus && s.next_break_is_long);
        let mut active = ActiveSession::new(SessionKind::Break, self.clock.now_ms());
        active.is_long_break = is_long_break;
        self.storage.save_active(&active);
        debug!(is_long_break, "break started");
        Some(active)
    }

    /// Running -> Paused, Paused -> Running. No-op when idle.
    pub fn toggle_pause(&self) -> Option<PauseTransition> {
        match self.state() {
            SessionState::Idle => None,
            SessionState::Running(active) => Some(self.pause_active(active)),
            SessionState::Paused(active) => Some(self.resume_active(active)),
        }
    }

    /// Running -> Paused only.
    pub fn pause(&self) -> Option<PauseTransition> {
        match self.state() {
            SessionState::Running(active) => Some(self.pause_active(active)),
            _ => None,
        }
    }

    /// Paused -> Running only.
    pub fn resume(&self) -> Option<PauseTransition> {
        match self.state() {
            SessionState::Paused(active) => Some(self.resume_active(active)),
            _ => None,
        }
    }

    /// Finalize the active session into history. No-op when idle.
    pub fn end(&self) -> Option<Session> {
        let active = self.state().into_active()?;
        let session = Session::finalize(active, self.clock.now());
        HistoryStore::new(self.storage).append(session.clone());
        self.storage.clear_active();
        debug!(id = %session.id, duration_sec = session.duration_sec, "session ended");
        Some(session)
    }

    /// Pure projection of the persisted state at `now_ms`.
    pub fn view_at(&self, settings: &Settings, now_ms: i64) -> SessionView {
        SessionView::compute(&self.state(), settings, now_ms)
    }

    fn pause_active(&self, mut active: ActiveSession) -> PauseTransition {
        let now_ms = self.clock.now_ms();
        active.paused_at_ms = Some(now_ms);
        self.storage.save_active(&active);
        PauseTransition::Paused {
            elapsed_sec: active.elapsed_sec(now_ms),
        }
    }

    fn resume_active(&self, mut active: ActiveSession) -> PauseTransition {
        let now_ms = self.clock.now_ms();
        let paused_for_ms = active
            .paused_at_ms
            .take()
            .map(|at| u64::try_from(now_ms.saturating_sub(at)).unwrap_or(0))
            .unwrap_or(0);
        active.paused_accum_ms = active.paused_accum_ms.saturating_add(paused_for_ms);
        self.storage.save_active(&active);
        PauseTransition::Resumed { paused_for_ms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    const T0: i64 = 1_760_000_000_000;

    #[test]
    fn start_is_idempotent() {
        let storage = ScopedStorage::in_memory();
        let clock = ManualClock::at_ms(T0);
        let tracker = SessionTracker::new(&storage, &clock);

        assert!(tracker.start().is_some());
        clock.advance_secs(5);
        assert!(tracker.start().is_none());

        let active = storage.load_active().unwrap();
        assert_eq!(active.started_at_ms, T0);
        assert_eq!(tracker.state().status(), SessionStatus::Running);
    }

    #[test]
    fn commands_from_idle_are_noops() {
        let storage = ScopedStorage::in_memory();
        let clock = ManualClock::at_ms(T0);
        let tracker = SessionTracker::new(&storage, &clock);

        assert!(tracker.toggle_pause().is_none());
        assert!(tracker.pause().is_none());
        assert!(tracker.resume().is_none());
        assert!(tracker.end().is_none());
        assert!(storage.load_active().is_none());
        assert!(storage.load_history().is_empty());
    }

    #[test]
    fn toggle_pause_accumulates_paused_time() {
        let storage = ScopedStorage::in_memory();
        let clock = ManualClock::at_ms(T0);
        let tracker = SessionTracker::new(&storage, &clock);
        tracker.start();

        clock.advance_secs(30);
        assert_eq!(
            tracker.toggle_pause(),
            Some(PauseTransition::Paused { elapsed_sec: 30 })
        );
        clock.advance_secs(60);
        assert_eq!(
            tracker.toggle_pause(),
            Some(PauseTransition::Resumed { paused_for_ms: 60_000 })
        );

        let active = storage.load_active().unwrap();
        assert_eq!(active.paused_accum_ms, 60_000);
        assert!(active.paused_at_ms.is_none());
    }

    #[test]
    fn explicit_pause_and_resume_only_move_one_way() {
        let storage = ScopedStorage::in_memory();
        let clock = ManualClock::at_ms(T0);
        let tracker = SessionTracker::new(&storage, &clock);
        tracker.start();

        assert!(tracker.resume().is_none());
        assert!(tracker.pause().is_some());
        assert!(tracker.pause().is_none());
        assert_eq!(tracker.state().status(), SessionStatus::Paused);
        assert!(tracker.resume().is_some());
        assert_eq!(tracker.state().status(), SessionStatus::Running);
    }

    #[test]
    fn end_while_paused_stops_at_pause_instant() {
        let storage = ScopedStorage::in_memory();
        let clock = ManualClock::at_ms(T0);
        let tracker = SessionTracker::new(&storage, &clock);
        tracker.start();
        clock.advance_secs(40);
        tracker.pause();
        clock.advance_secs(600);

        let session = tracker.end().unwrap();
        assert_eq!(session.duration_sec, 40);
        assert_eq!(tracker.state(), SessionState::Idle);
        assert_eq!(storage.load_history().len(), 1);
    }

    #[test]
    fn start_break_after_flagged_focus_is_long() {
        let storage = ScopedStorage::in_memory();
        let clock = ManualClock::at_ms(T0);
        let tracker = SessionTracker::new(&storage, &clock);

        for _ in 0..4 {
            tracker.start();
            clock.advance_secs(60);
            tracker.end();
        }
        assert!(!tracker.start_break().unwrap().is_long_break);
        tracker.end();

        tracker.start();
        clock.advance_secs(60);
        tracker.end();
        let brk = tracker.start_break().unwrap();
        assert_eq!(brk.kind, SessionKind::Break);
        assert!(brk.is_long_break);
    }

    #[test]
    fn lookback_needs_four_focus_entries() {
        let storage = ScopedStorage::in_memory();
        let clock = ManualClock::at_ms(T0);
        let tracker = SessionTracker::new(&storage, &clock);
        for _ in 0..3 {
            tracker.start();
            tracker.end();
        }
        assert!(!next_break_is_long(&storage.load_history()));
        tracker.start_break();
        tracker.end();
        assert!(!next_break_is_long(&storage.load_history()));
        tracker.start();
        tracker.end();
        assert!(next_break_is_long(&storage.load_history()));
    }
}
