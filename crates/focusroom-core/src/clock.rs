//! Wall-clock source for the session engine.
//!
//! All elapsed/remaining values are recomputed from persisted timestamps and
//! the current time, so the clock is the only moving input. Tests inject a
//! [`ManualClock`] to drive time explicitly.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep one handle and hand
/// another to the service.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now_ms: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn at_ms(epoch_ms: i64) -> Self {
        Self {
            now_ms: Rc::new(Cell::new(epoch_ms)),
        }
    }

    pub fn at(instant: DateTime<Utc>) -> Self {
        Self::at_ms(instant.timestamp_millis())
    }

    pub fn set_ms(&self, epoch_ms: i64) {
        self.now_ms.set(epoch_ms);
    }

    pub fn advance_ms(&self, delta_ms: i64) {
        self.now_ms.set(self.now_ms.get() + delta_ms);
    }

    pub fn advance_secs(&self, delta_secs: i64) {
        self.advance_ms(delta_secs * 1000);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        ms_to_datetime(self.now_ms.get())
    }

    fn now_ms(&self) -> i64 {
        self.now_ms.get()
    }
}

/// Convert epoch milliseconds to a UTC timestamp, falling back to the epoch
/// for values chrono cannot represent.
pub fn ms_to_datetime(epoch_ms: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(epoch_ms)
        .single()
        .unwrap_or_default()
}

/// Calendar-day key (`YYYY-MM-DD`, UTC) used to bucket statistics.
pub fn day_key(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d").to_string()
}
