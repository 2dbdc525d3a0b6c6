//! Dual-scope persistence.
//!
//! Two named backends with different lifetimes:
//!
//! - **tab** -- process-local, lost when the process (tab) ends.
//! - **durable** -- survives restarts; the only home of settings and history.
//!
//! The active session is written to both scopes. Reads prefer the tab scope
//! and fall back to the durable scope, which is how a fresh process reattaches
//! to a session started elsewhere.
//!
//! Every read degrades to a typed default (absent / empty / default settings)
//! and every failed write is logged and dropped. Callers never see a storage
//! error from here.
//!
//! Two processes sharing one durable store are not coordinated: the last
//! writer wins.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::{KeyValueStore, MemoryStore};
use crate::session::{ActiveSession, Session};
use crate::settings::Settings;

pub const SETTINGS_KEY: &str = "focus:settings:v1";
pub const SESSIONS_KEY: &str = "focus:sessions:v1";
pub const ACTIVE_KEY: &str = "focus:active:v1";

pub struct ScopedStorage {
    tab: Box<dyn KeyValueStore>,
    durable: Box<dyn KeyValueStore>,
}

impl ScopedStorage {
    pub fn new(tab: impl KeyValueStore + 'static, durable: impl KeyValueStore + 'static) -> Self {
        Self {
            tab: Box::new(tab),
            durable: Box::new(durable),
        }
    }

    /// Both scopes in memory, for tests and throwaway runs.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), MemoryStore::new())
    }

    // ── Active session ───────────────────────────────────────────────

    pub fn load_active(&self) -> Option<ActiveSession> {
        read_json(self.tab.as_ref(), "tab", ACTIVE_KEY)
            .or_else(|| read_json(self.durable.as_ref(), "durable", ACTIVE_KEY))
    }

    pub fn save_active(&self, active: &ActiveSession) {
        let Some(json) = to_json(active, ACTIVE_KEY) else {
            return;
        };
        write_raw(self.tab.as_ref(), "tab", ACTIVE_KEY, &json);
        write_raw(self.durable.as_ref(), "durable", ACTIVE_KEY, &json);
    }

    pub fn clear_active(&self) {
        remove_raw(self.tab.as_ref(), "tab", ACTIVE_KEY);
        remove_raw(self.durable.as_ref(), "durable", ACTIVE_KEY);
    }

    // ── History ──────────────────────────────────────────────────────

    /// Stored history, oldest first. Entries that fail to parse are skipped.
    pub fn load_history(&self) -> Vec<Session> {
        let Some(entries) = read_json::<Vec<Value>>(self.durable.as_ref(), "durable", SESSIONS_KEY)
        else {
            return Vec::new();
        };
        entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<Session>(entry) {
                Ok(session) => Some(session),
                Err(e) => {
                    warn!(key = SESSIONS_KEY, error = %e, "skipping malformed history entry");
                    None
                }
            })
            .collect()
    }

    pub fn save_history(&self, sessions: &[Session]) {
        if let Some(json) = to_json(sessions, SESSIONS_KEY) {
            write_raw(self.durable.as_ref(), "durable", SESSIONS_KEY, &json);
        }
    }

    pub fn clear_history(&self) {
        remove_raw(self.durable.as_ref(), "durable", SESSIONS_KEY);
    }

    // ── Settings ─────────────────────────────────────────────────────

    pub fn load_settings(&self) -> Settings {
        read_json::<Value>(self.durable.as_ref(), "durable", SETTINGS_KEY)
            .map(|raw| Settings::from_stored(&raw))
            .unwrap_or_default()
    }

    pub fn save_settings(&self, settings: &Settings) {
        if let Some(json) = to_json(settings, SETTINGS_KEY) {
            write_raw(self.durable.as_ref(), "durable", SETTINGS_KEY, &json);
        }
    }
}

fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, scope: &str, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(scope, key, error = %e, "storage read failed; using default");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(scope, key, error = %e, "stored value is malformed; using default");
            None
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T, key: &str) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(json) => Some(json),
        Err(e) => {
            warn!(key, error = %e, "failed to serialize value; write skipped");
            None
        }
    }
}

fn write_raw(store: &dyn KeyValueStore, scope: &str, key: &str, json: &str) {
    if let Err(e) = store.set(key, json) {
        warn!(scope, key, error = %e, "storage write failed");
    }
}

fn remove_raw(store: &dyn KeyValueStore, scope: &str, key: &str) {
    if let Err(e) = store.remove(key) {
        warn!(scope, key, error = %e, "storage remove failed");
    }
}
