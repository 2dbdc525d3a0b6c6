use super::model::{Distraction, MAX_ACTIVE_DISTRACTIONS, MAX_DISTRACTION_CHARS};
use crate::clock::Clock;
use crate::storage::ScopedStorage;

/// Interruption notes attached to the active session.
pub struct DistractionLog<'a> {
    storage: &'a ScopedStorage,
    clock: &'a dyn Clock,
}

impl<'a> DistractionLog<'a> {
    pub fn new(storage: &'a ScopedStorage, clock: &'a dyn Clock) -> Self {
        Self { storage, clock }
    }

    /// Record a note on the active session, newest first.
    ///
    /// No-op when idle or when `text` is blank. Text is trimmed and cut to
    /// [`MAX_DISTRACTION_CHARS`] characters; only the newest
    /// [`MAX_ACTIVE_DISTRACTIONS`] notes are kept.
    pub fn log(&self, text: &str) -> Option<Distraction> {
        let mut active = self.storage.load_active()?;
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let item = Distraction {
            at: self.clock.now(),
            text: text.chars().take(MAX_DISTRACTION_CHARS).collect(),
        };
        active.distractions.insert(0, item.clone());
        active.distractions.truncate(MAX_ACTIVE_DISTRACTIONS);
        self.storage.save_active(&active);
        Some(item)
    }

    /// Notes on the active session, newest first. Empty when idle.
    pub fn entries(&self) -> Vec<Distraction> {
        self.storage
            .load_active()
            .map(|active| active.distractions)
            .unwrap_or_default()
    }
}
