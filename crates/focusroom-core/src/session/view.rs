use serde::{Deserialize, Serialize};

use super::model::SessionKind;
use super::tracker::SessionState;
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Idle,
    Running,
    Paused,
}

/// Read-only projection of the tracker for a renderer.
///
/// Derived entirely from the persisted active session, the settings and
/// `now`; computing it twice for the same inputs gives the same value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub status: SessionStatus,
    pub kind: Option<SessionKind>,
    pub label: String,
    pub elapsed_sec: u64,
    pub target_sec: u64,
    /// Floors at zero; the session keeps running past its target.
    pub remaining_sec: u64,
    /// `MM:SS` of `remaining_sec`.
    pub clock: String,
    pub is_long_break: bool,
    pub next_is_long_break: bool,
    pub distraction_count: usize,
}

impl SessionView {
    pub fn compute(state: &SessionState, settings: &Settings, now_ms: i64) -> Self {
        let Some(active) = state.active() else {
            return Self::idle();
        };

        let elapsed_sec = active.elapsed_sec(now_ms);
        let target_sec = settings.target_secs(active.kind, active.is_long_break);
        let remaining_sec = target_sec.saturating_sub(elapsed_sec);
        let status = state.status();

        let label = match (status, active.kind) {
            (SessionStatus::Paused, _) => "Paused",
            (_, SessionKind::Break) => "Break",
            _ => "In Session",
        };

        Self {
            status,
            kind: Some(active.kind),
            label: label.to_string(),
            elapsed_sec,
            target_sec,
            remaining_sec,
            clock: format_clock(remaining_sec),
            is_long_break: active.is_long_break,
            next_is_long_break: active.next_break_is_long,
            distraction_count: active.distractions.len(),
        }
    }

    fn idle() -> Self {
        Self {
            status: SessionStatus::Idle,
            kind: None,
            label: "Idle".to_string(),
            elapsed_sec: 0,
            target_sec: 0,
            remaining_sec: 0,
            clock: format_clock(0),
            is_long_break: false,
            next_is_long_break: false,
            distraction_count: 0,
        }
    }
}

/// Format seconds as zero-padded `MM:SS`. Minutes are not wrapped into hours.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
