use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{Distraction, Session, SessionKind, SessionView};
use crate::settings::Settings;

/// Every state change in the system produces an Event.
/// Renderers subscribe to them; the CLI prints them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SessionStarted {
        kind: SessionKind,
        is_long_break: bool,
        next_break_is_long: bool,
        at: DateTime<Utc>,
    },
    SessionPaused {
        elapsed_sec: u64,
        at: DateTime<Utc>,
    },
    SessionResumed {
        paused_for_ms: u64,
        at: DateTime<Utc>,
    },
    SessionEnded {
        session: Session,
        at: DateTime<Utc>,
    },
    DistractionLogged {
        distraction: Distraction,
        count: usize,
        at: DateTime<Utc>,
    },
    HistoryCleared {
        removed: usize,
        at: DateTime<Utc>,
    },
    SettingsUpdated {
        settings: Settings,
        at: DateTime<Utc>,
    },
    /// Full view snapshot; published after every mutation and on each tick.
    StateSnapshot {
        view: SessionView,
        at: DateTime<Utc>,
    },
}
