//! Persisted session records.
//!
//! `ActiveSession` is the mutable in-progress record; `Session` is the
//! immutable history entry it turns into on `end()`. Both serialize as
//! camelCase JSON, the layout stored under the `focus:*` keys.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::{day_key, ms_to_datetime};

/// Maximum distractions kept on the active session.
pub const MAX_ACTIVE_DISTRACTIONS: usize = 20;
/// Maximum distractions copied onto a finalized session.
pub const MAX_SESSION_DISTRACTIONS: usize = 50;
/// Maximum characters of a single distraction note.
pub const MAX_DISTRACTION_CHARS: usize = 140;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Focus,
    Break,
}

impl SessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Focus => "focus",
            SessionKind::Break => "break",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" => Ok(SessionKind::Focus),
            "break" => Ok(SessionKind::Break),
            other => Err(format!("unknown session kind: {other}")),
        }
    }
}

/// A timestamped interruption note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distraction {
    pub at: DateTime<Utc>,
    pub text: String,
}

/// The single in-progress session.
///
/// Its presence in storage is the running/paused signal; there is no
/// separate flag. Elapsed time is never stored, only derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSession {
    pub kind: SessionKind,
    pub started_at_ms: i64,
    #[serde(default)]
    pub paused_at_ms: Option<i64>,
    /// Total milliseconds spent paused so far (excludes a pause in progress).
    #[serde(default)]
    pub paused_accum_ms: u64,
    #[serde(default)]
    pub is_long_break: bool,
    /// Set on a focus session when the break that follows it should be long.
    #[serde(default)]
    pub next_break_is_long: bool,
    /// Most recent first.
    #[serde(default)]
    pub distractions: Vec<Distraction>,
}

impl ActiveSession {
    pub fn new(kind: SessionKind, started_at_ms: i64) -> Self {
        Self {
            kind,
            started_at_ms,
            paused_at_ms: None,
            paused_accum_ms: 0,
            is_long_break: false,
            next_break_is_long: false,
            distractions: Vec::new(),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at_ms.is_some()
    }

    /// Effective end of the measured interval: the pause instant while
    /// paused, otherwise `now_ms`.
    pub fn end_ms(&self, now_ms: i64) -> i64 {
        self.paused_at_ms.unwrap_or(now_ms)
    }

    /// Worked milliseconds, clamped to zero under clock skew.
    pub fn elapsed_ms(&self, now_ms: i64) -> u64 {
        let paused = i64::try_from(self.paused_accum_ms).unwrap_or(i64::MAX);
        let elapsed = self
            .end_ms(now_ms)
            .saturating_sub(self.started_at_ms)
            .saturating_sub(paused);
        u64::try_from(elapsed).unwrap_or(0)
    }

    pub fn elapsed_sec(&self, now_ms: i64) -> u64 {
        self.elapsed_ms(now_ms) / 1000
    }
}

/// A completed session. Immutable once appended to history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub kind: SessionKind,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_sec: u64,
    /// UTC calendar day at finalize time. Never recomputed.
    pub day_key: String,
    /// Most recent first.
    #[serde(default)]
    pub distractions: Vec<Distraction>,
    #[serde(default)]
    pub next_break_is_long: bool,
}

impl Session {
    /// Turn the active record into a history entry as of `now`.
    pub fn finalize(active: ActiveSession, now: DateTime<Utc>) -> Self {
        let now_ms = now.timestamp_millis();
        let end_ms = active.end_ms(now_ms);
        let duration_sec = active.elapsed_sec(now_ms);

        let mut distractions = active.distractions;
        distractions.truncate(MAX_SESSION_DISTRACTIONS);

        Self {
            id: new_session_id(now_ms),
            kind: active.kind,
            started_at: ms_to_datetime(active.started_at_ms),
            ended_at: ms_to_datetime(end_ms),
            duration_sec,
            day_key: day_key(now),
            distractions,
            next_break_is_long: active.next_break_is_long,
        }
    }
}

fn new_session_id(now_ms: i64) -> String {
    format!("focus_{now_ms}_{}", Uuid::new_v4().simple())
}
