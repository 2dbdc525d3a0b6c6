//! Derived focus statistics.
//!
//! Pure functions over the history slice, recomputed on demand. Only focus
//! sessions count; breaks are ignored.

use serde::{Deserialize, Serialize};

use crate::session::{Session, SessionKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FocusStats {
    pub today_focus_total_sec: u64,
    pub today_focus_count: usize,
    pub all_time_focus_count: usize,
    pub all_time_focus_average_sec: u64,
}

impl FocusStats {
    pub fn compute(history: &[Session], today: &str) -> Self {
        Self {
            today_focus_total_sec: today_focus_total(history, today),
            today_focus_count: today_focus_count(history, today),
            all_time_focus_count: focus_sessions(history).count(),
            all_time_focus_average_sec: all_time_focus_average(history),
        }
    }
}

fn focus_sessions(history: &[Session]) -> impl Iterator<Item = &Session> {
    history.iter().filter(|s| s.kind == SessionKind::Focus)
}

fn today_focus<'a>(history: &'a [Session], today: &'a str) -> impl Iterator<Item = &'a Session> + 'a {
    focus_sessions(history).filter(move |s| s.day_key == today)
}

pub fn today_focus_total(history: &[Session], today: &str) -> u64 {
    today_focus(history, today).fold(0u64, |total, s| total.saturating_add(s.duration_sec))
}

pub fn today_focus_count(history: &[Session], today: &str) -> usize {
    today_focus(history, today).count()
}

/// Floor of the mean focus duration; 0 when there are no focus sessions.
/// Sums saturate, so hand-edited durations cannot overflow.
pub fn all_time_focus_average(history: &[Session]) -> u64 {
    let (total, count) = focus_sessions(history).fold((0u128, 0u128), |(total, count), s| {
        (total.saturating_add(u128::from(s.duration_sec)), count + 1)
    });
    if count == 0 {
        0
    } else {
        u64::try_from(total / count).unwrap_or(u64::MAX)
    }
}
