//! Command surface over the session components.
//!
//! [`FocusService`] owns the storage scopes and the clock and is the one
//! object a front end talks to. Each mutating command returns the event it
//! produced (or `None` when it was a no-op) and publishes that event, then a
//! fresh [`Event::StateSnapshot`], to every subscriber.

use crate::clock::{day_key, Clock, SystemClock};
use crate::events::Event;
use crate::session::{
    DistractionLog, HistoryStore, PauseTransition, SessionState, SessionTracker, SessionView,
};
use crate::settings::{Settings, SettingsPatch, SettingsStore};
use crate::stats::FocusStats;
use crate::storage::ScopedStorage;

type Listener = Box<dyn FnMut(&Event)>;

pub struct FocusService {
    storage: ScopedStorage,
    clock: Box<dyn Clock>,
    listeners: Vec<Listener>,
}

impl FocusService {
    pub fn new(storage: ScopedStorage, clock: impl Clock + 'static) -> Self {
        Self {
            storage,
            clock: Box::new(clock),
            listeners: Vec::new(),
        }
    }

    pub fn with_system_clock(storage: ScopedStorage) -> Self {
        Self::new(storage, SystemClock)
    }

    /// Register a "state changed" listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&Event) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn storage(&self) -> &ScopedStorage {
        &self.storage
    }

    pub fn state(&self) -> SessionState {
        self.tracker().state()
    }

    pub fn view(&self) -> SessionView {
        self.view_at(self.clock.now_ms())
    }

    /// View at an explicit instant. Reads storage only.
    pub fn view_at(&self, now_ms: i64) -> SessionView {
        self.tracker().view_at(&self.settings(), now_ms)
    }

    pub fn settings(&self) -> Settings {
        SettingsStore::new(&self.storage).get()
    }

    pub fn history(&self) -> HistoryStore<'_> {
        HistoryStore::new(&self.storage)
    }

    pub fn stats(&self) -> FocusStats {
        let today = day_key(self.clock.now());
        FocusStats::compute(&self.storage.load_history(), &today)
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            view: self.view(),
            at: self.clock.now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        let active = self.tracker().start()?;
        let event = Event::SessionStarted {
            kind: active.kind,
            is_long_break: active.is_long_break,
            next_break_is_long: active.next_break_is_long,
            at: self.clock.now(),
        };
        Some(self.publish(event))
    }

    pub fn start_break(&mut self) -> Option<Event> {
        let active = self.tracker().start_break()?;
        let event = Event::SessionStarted {
            kind: active.kind,
            is_long_break: active.is_long_break,
            next_break_is_long: false,
            at: self.clock.now(),
        };
        Some(self.publish(event))
    }

    pub fn toggle_pause(&mut self) -> Option<Event> {
        let transition = self.tracker().toggle_pause()?;
        Some(self.publish_pause(transition))
    }

    pub fn pause(&mut self) -> Option<Event> {
        let transition = self.tracker().pause()?;
        Some(self.publish_pause(transition))
    }

    pub fn resume(&mut self) -> Option<Event> {
        let transition = self.tracker().resume()?;
        Some(self.publish_pause(transition))
    }

    pub fn end(&mut self) -> Option<Event> {
        let session = self.tracker().end()?;
        let event = Event::SessionEnded {
            session,
            at: self.clock.now(),
        };
        Some(self.publish(event))
    }

    pub fn log_distraction(&mut self, text: &str) -> Option<Event> {
        let log = DistractionLog::new(&self.storage, self.clock.as_ref());
        let distraction = log.log(text)?;
        let count = log.entries().len();
        let event = Event::DistractionLogged {
            distraction,
            count,
            at: self.clock.now(),
        };
        Some(self.publish(event))
    }

    /// Always applies, running session or not.
    pub fn clear_history(&mut self) -> Event {
        let removed = self.history().clear();
        let event = Event::HistoryCleared {
            removed,
            at: self.clock.now(),
        };
        self.publish(event)
    }

    pub fn update_settings(&mut self, patch: &SettingsPatch) -> Event {
        let settings = SettingsStore::new(&self.storage).update(patch);
        self.publish_settings(settings)
    }

    pub fn toggle_focus_mode(&mut self) -> Event {
        let settings = SettingsStore::new(&self.storage).toggle_focus_mode();
        self.publish_settings(settings)
    }

    pub fn reset_settings(&mut self) -> Event {
        let settings = SettingsStore::new(&self.storage).reset();
        self.publish_settings(settings)
    }

    /// Display refresh. Publishes a snapshot; never writes storage.
    pub fn tick(&mut self) -> Event {
        let snapshot = self.snapshot();
        self.notify(&snapshot);
        snapshot
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn tracker(&self) -> SessionTracker<'_> {
        SessionTracker::new(&self.storage, self.clock.as_ref())
    }

    fn publish_pause(&mut self, transition: PauseTransition) -> Event {
        let at = self.clock.now();
        let event = match transition {
            PauseTransition::Paused { elapsed_sec } => Event::SessionPaused { elapsed_sec, at },
            PauseTransition::Resumed { paused_for_ms } => {
                Event::SessionResumed { paused_for_ms, at }
            }
        };
        self.publish(event)
    }

    fn publish_settings(&mut self, settings: Settings) -> Event {
        let event = Event::SettingsUpdated {
            settings,
            at: self.clock.now(),
        };
        self.publish(event)
    }

    fn publish(&mut self, event: Event) -> Event {
        self.notify(&event);
        let snapshot = self.snapshot();
        self.notify(&snapshot);
        event
    }

    fn notify(&mut self, event: &Event) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}
