//! Time sources.
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`Clock`] | Monotonic milliseconds for rotation timing |
//! | [`WallClock`] | Local calendar time for the clock page |
//!
//! Time synchronization (NTP, time zone setup) is the host's job; these
//! traits only read the result.

use std::time::Instant;

use chrono::NaiveDateTime;

/// Monotonic time source.
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}

/// Local wall-clock time source.
pub trait WallClock {
    /// Current local date and time.
    fn local_now(&self) -> NaiveDateTime;
}

/// Host clock: `Instant` for monotonic time, `chrono::Local` for wall time.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    /// Creates a clock whose monotonic epoch is now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl WallClock for SystemClock {
    fn local_now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}
