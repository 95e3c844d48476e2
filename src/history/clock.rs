use chrono::{DateTime, Utc};

/// Source of "now" for the history store.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Millisecond-derived identifiers that never repeat or go backwards, even
/// when several are minted within the same millisecond.
#[derive(Debug, Default)]
pub struct MonotonicIds {
    last: i64,
}

impl MonotonicIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure the next id is strictly greater than `seen`.
    pub fn observe(&mut self, seen: i64) {
        self.last = self.last.max(seen);
    }

    pub fn next(&mut self, now: DateTime<Utc>) -> String {
        let candidate = now.timestamp_millis().max(self.last.saturating_add(1));
        self.last = candidate;
        candidate.to_string()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::Clock;

    /// Clock that only moves when told to.
    pub struct FixedClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl FixedClock {
        pub fn new() -> Self {
            Self {
                now: Mutex::new(Utc.with_ymd_and_hms(2026, 1, 14, 9, 30, 0).unwrap()),
            }
        }

        pub fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += by;
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }
}
