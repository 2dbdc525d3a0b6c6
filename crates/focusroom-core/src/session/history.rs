use super::model::{Session, SessionKind};
use crate::storage::ScopedStorage;

/// Maximum number of sessions kept. Oldest entries are evicted first.
pub const MAX_HISTORY: usize = 250;

/// Append-only, size-bounded log of completed sessions.
///
/// Stored oldest-first; [`recent`](Self::recent) gives the newest-first
/// display order.
pub struct HistoryStore<'a> {
    storage: &'a ScopedStorage,
}

impl<'a> HistoryStore<'a> {
    pub fn new(storage: &'a ScopedStorage) -> Self {
        Self { storage }
    }

    /// All sessions, oldest first.
    pub fn all(&self) -> Vec<Session> {
        self.storage.load_history()
    }

    pub fn len(&self) -> usize {
        self.all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.all().is_empty()
    }

    pub fn append(&self, session: Session) {
        let mut sessions = self.all();
        sessions.push(session);
        if sessions.len() > MAX_HISTORY {
            let excess = sessions.len() - MAX_HISTORY;
            sessions.drain(..excess);
        }
        self.storage.save_history(&sessions);
    }

    /// Newest first, at most `limit` entries.
    pub fn recent(&self, limit: usize) -> Vec<Session> {
        self.all().into_iter().rev().take(limit).collect()
    }

    /// Sessions whose day key starts with `prefix` (`2026`, `2026-03`,
    /// `2026-03-09`), oldest first.
    pub fn by_day_prefix(&self, prefix: &str) -> Vec<Session> {
        self.all()
            .into_iter()
            .filter(|s| s.day_key.starts_with(prefix))
            .collect()
    }

    pub fn by_kind(&self, kind: SessionKind) -> Vec<Session> {
        self.all().into_iter().filter(|s| s.kind == kind).collect()
    }

    /// Remove every entry. Returns how many were removed.
    ///
    /// Does not touch the active session.
    pub fn clear(&self) -> usize {
        let removed = self.len();
        self.storage.clear_history();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn session(id: usize, kind: SessionKind, day_key: &str) -> Session {
        let at = Utc.with_ymd_and_hms(2026, 3, 9, 12, 0, 0).unwrap();
        Session {
            id: format!("s{id}"),
            kind,
            started_at: at,
            ended_at: at,
            duration_sec: id as u64,
            day_key: day_key.to_string(),
            distractions: Vec::new(),
            next_break_is_long: false,
        }
    }

    #[test]
    fn append_evicts_oldest_beyond_cap() {
        let storage = ScopedStorage::in_memory();
        let history = HistoryStore::new(&storage);
        for i in 0..260 {
            history.append(session(i, SessionKind::Focus, "2026-03-09"));
        }

        let all = history.all();
        assert_eq!(all.len(), MAX_HISTORY);
        assert_eq!(all.first().unwrap().id, "s10");
        assert_eq!(all.last().unwrap().id, "s259");
    }

    #[test]
    fn recent_is_newest_first() {
        let storage = ScopedStorage::in_memory();
        let history = HistoryStore::new(&storage);
        for i in 0..5 {
            history.append(session(i, SessionKind::Focus, "2026-03-09"));
        }
        let ids: Vec<_> = history.recent(3).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, ["s4", "s3", "s2"]);
    }

    #[test]
    fn filters_by_day_prefix_and_kind() {
        let storage = ScopedStorage::in_memory();
        let history = HistoryStore::new(&storage);
        history.append(session(0, SessionKind::Focus, "2026-02-28"));
        history.append(session(1, SessionKind::Break, "2026-03-01"));
        history.append(session(2, SessionKind::Focus, "2026-03-09"));

        assert_eq!(history.by_day_prefix("2026-03").len(), 2);
        assert_eq!(history.by_day_prefix("2026-03-09")[0].id, "s2");
        assert_eq!(history.by_kind(SessionKind::Break)[0].id, "s1");
        assert_eq!(history.by_kind(SessionKind::Focus).len(), 2);
    }

    #[test]
    fn clear_removes_everything() {
        let storage = ScopedStorage::in_memory();
        let history = HistoryStore::new(&storage);
        history.append(session(0, SessionKind::Focus, "2026-03-09"));
        history.append(session(1, SessionKind::Focus, "2026-03-09"));

        assert_eq!(history.clear(), 2);
        assert!(history.is_empty());
    }
}
