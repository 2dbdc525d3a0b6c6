//! Focus session engine.
//!
//! Wall-clock state machine over a single persisted [`ActiveSession`]:
//!
//! ```text
//! Idle -> Running <-> Paused -> Idle
//! ```
//!
//! Nothing here counts time. Elapsed and remaining values are recomputed
//! from the stored timestamps on every read, so a restart mid-session
//! reconstructs the same view.

mod distraction;
mod history;
mod model;
mod tracker;
mod view;

pub use distraction::DistractionLog;
pub use history::{HistoryStore, MAX_HISTORY};
pub use model::{
    ActiveSession, Distraction, Session, SessionKind, MAX_ACTIVE_DISTRACTIONS,
    MAX_DISTRACTION_CHARS, MAX_SESSION_DISTRACTIONS,
};
pub use tracker::{next_break_is_long, PauseTransition, SessionState, SessionTracker, LONG_BREAK_LOOKBACK};
pub use view::{format_clock, SessionStatus, SessionView};
