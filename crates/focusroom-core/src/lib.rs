//! # Focusroom Core Library
//!
//! Core logic for the Focusroom focus-session tracker: start, pause, resume
//! and end timed work intervals, note distractions while a session runs, and
//! derive daily and all-time statistics from a bounded history. Any front
//! end (the bundled CLI, a GUI, a web view) drives the same service.
//!
//! ## Architecture
//!
//! - **Session engine**: a wall-clock state machine whose elapsed and
//!   remaining times are always recomputed from persisted timestamps
//! - **Storage**: a key-value port with a process-local tab scope and a
//!   durable SQLite scope, plus TOML configuration
//! - **Stats**: pure aggregation over the session history
//!
//! ## Key Components
//!
//! - [`FocusService`]: command surface and event publisher
//! - [`SessionTracker`]: the Idle / Running / Paused state machine
//! - [`ScopedStorage`]: dual-scope persistence with typed defaults
//! - [`FocusStats`]: today/all-time focus statistics

pub mod clock;
pub mod error;
pub mod events;
pub mod service;
pub mod session;
pub mod settings;
pub mod stats;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, StorageError};
pub use events::Event;
pub use service::FocusService;
pub use session::{
    ActiveSession, Distraction, HistoryStore, Session, SessionKind, SessionState, SessionStatus,
    SessionTracker, SessionView,
};
pub use settings::{Settings, SettingsPatch, SettingsStore};
pub use stats::FocusStats;
pub use storage::{Config, KeyValueStore, MemoryStore, ScopedStorage, SqliteStore};
