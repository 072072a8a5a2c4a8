use chrono::{DateTime, Duration, Utc};

// 2001-01-01T00:00:00Z
const START_TIMESTAMP: i64 = 978_307_200;
const STEP_SECONDS: i64 = 10;

/// A `Clock` hands out a sequence of UTC times that increase monotonically
/// but not uniformly, starting at 2001-01-01T00:00:00Z.
///
/// The gap after each reading is 10 seconds longer than the one before it
/// (10, 20, 30, ...), so commits made from successive readings never share
/// a timestamp and are easy to tell apart in logs.
#[derive(Debug, Clone)]
pub struct Clock {
    now: DateTime<Utc>,
    increment: i64,
}

impl Clock {
    pub fn new() -> Clock {
        Clock {
            now: DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(START_TIMESTAMP),
            increment: STEP_SECONDS,
        }
    }

    /// Returns the current time and advances the clock.
    pub fn now(&mut self) -> DateTime<Utc> {
        let now = self.now;
        self.now = now + Duration::seconds(self.increment);
        self.increment += STEP_SECONDS;
        now
    }
}

impl Default for Clock {
    fn default() -> Clock {
        Clock::new()
    }
}
