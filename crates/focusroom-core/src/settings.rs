//! User-tunable session durations and the focus-mode flag.
//!
//! Settings live in the durable scope as a single JSON object. Reads are
//! lenient: every numeric field is coerced to a positive integer and falls
//! back to its default on its own, so one corrupted field never resets the
//! others.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::session::SessionKind;
use crate::storage::ScopedStorage;

fn default_focus_minutes() -> u32 {
    25
}
fn default_break_minutes() -> u32 {
    5
}
fn default_long_break_minutes() -> u32 {
    15
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub focus_minutes: u32,
    pub break_minutes: u32,
    pub long_break_minutes: u32,
    pub focus_mode_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            break_minutes: default_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            focus_mode_enabled: false,
        }
    }
}

impl Settings {
    /// Advisory target length for a session, in minutes.
    pub fn target_minutes(&self, kind: SessionKind, is_long_break: bool) -> u32 {
        match kind {
            SessionKind::Focus => self.focus_minutes,
            SessionKind::Break if is_long_break => self.long_break_minutes,
            SessionKind::Break => self.break_minutes,
        }
    }

    pub fn target_secs(&self, kind: SessionKind, is_long_break: bool) -> u64 {
        u64::from(self.target_minutes(kind, is_long_break)) * 60
    }

    /// Merge a patch. Absent fields keep their value; present but
    /// non-positive values reset to the default.
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(v) = patch.focus_minutes {
            self.focus_minutes = coerce_minutes(v, default_focus_minutes());
        }
        if let Some(v) = patch.break_minutes {
            self.break_minutes = coerce_minutes(v, default_break_minutes());
        }
        if let Some(v) = patch.long_break_minutes {
            self.long_break_minutes = coerce_minutes(v, default_long_break_minutes());
        }
        if let Some(v) = patch.focus_mode_enabled {
            self.focus_mode_enabled = v;
        }
    }

    /// Build settings from whatever JSON happens to be stored.
    pub(crate) fn from_stored(raw: &Value) -> Self {
        let field = |name: &str| raw.get(name).and_then(json_to_int);
        Self {
            focus_minutes: field("focusMinutes")
                .map(|v| coerce_minutes(v, default_focus_minutes()))
                .unwrap_or_else(default_focus_minutes),
            break_minutes: field("breakMinutes")
                .map(|v| coerce_minutes(v, default_break_minutes()))
                .unwrap_or_else(default_break_minutes),
            long_break_minutes: field("longBreakMinutes")
                .map(|v| coerce_minutes(v, default_long_break_minutes()))
                .unwrap_or_else(default_long_break_minutes),
            focus_mode_enabled: raw.get("focusModeEnabled") == Some(&Value::Bool(true)),
        }
    }
}

/// Partial settings update. Minutes are signed so out-of-range input can be
/// coerced instead of rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default)]
    pub focus_minutes: Option<i64>,
    #[serde(default)]
    pub break_minutes: Option<i64>,
    #[serde(default)]
    pub long_break_minutes: Option<i64>,
    #[serde(default)]
    pub focus_mode_enabled: Option<bool>,
}

fn coerce_minutes(value: i64, default: u32) -> u32 {
    match u32::try_from(value) {
        Ok(v) if v > 0 => v,
        _ => default,
    }
}

fn json_to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.trunc() as i64),
        _ => None,
    }
}

/// Read/merge/persist access to [`Settings`].
pub struct SettingsStore<'a> {
    storage: &'a ScopedStorage,
}

impl<'a> SettingsStore<'a> {
    pub fn new(storage: &'a ScopedStorage) -> Self {
        Self { storage }
    }

    /// Current settings; defaults when nothing (or garbage) is stored.
    pub fn get(&self) -> Settings {
        self.storage.load_settings()
    }

    pub fn update(&self, patch: &SettingsPatch) -> Settings {
        let mut settings = self.get();
        settings.apply(patch);
        self.storage.save_settings(&settings);
        settings
    }

    pub fn toggle_focus_mode(&self) -> Settings {
        let mut settings = self.get();
        settings.focus_mode_enabled = !settings.focus_mode_enabled;
        self.storage.save_settings(&settings);
        settings
    }

    pub fn reset(&self) -> Settings {
        let settings = Settings::default();
        self.storage.save_settings(&settings);
        settings
    }
}
