//! Millisecond time sources.
//!
//! The machine never reads the system clock directly. It is handed a
//! [`Clock`], so tests can drive it with deterministic timestamps.

use std::cell::Cell;
use std::time::Instant;

/// Milliseconds since the clock's origin.
pub type Timestamp = u64;

/// Monotonic millisecond time source.
///
/// Readings must never go backwards within a run.
pub trait Clock {
    fn now_millis(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> Timestamp {
        (**self).now_millis()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now_millis(&self) -> Timestamp {
        (**self).now_millis()
    }
}

/// Process clock: milliseconds elapsed since construction.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_millis(&self) -> Timestamp {
        Timestamp::try_from(self.origin.elapsed().as_millis()).unwrap_or(Timestamp::MAX)
    }
}

/// Clock that only moves when told to.
///
/// # Example
///
/// ```rust
/// use supervisor_fsm::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new(100);
/// assert_eq!(clock.now_millis(), 100);
/// clock.advance(50);
/// assert_eq!(clock.now_millis(), 150);
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, millis: Timestamp) {
        self.now.set(self.now.get().saturating_add(millis));
    }

    /// Move the clock to `millis`. Earlier readings are ignored.
    pub fn set(&self, millis: Timestamp) {
        self.now.set(self.now.get().max(millis));
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> Timestamp {
        self.now.get()
    }
}

/// Clock that advances by a fixed step on every reading.
///
/// The first reading returns `start`, the next `start + step`, and so on.
#[derive(Debug)]
pub struct SequenceClock {
    next: Cell<Timestamp>,
    step: Timestamp,
}

impl SequenceClock {
    pub fn new(start: Timestamp, step: Timestamp) -> Self {
        Self {
            next: Cell::new(start),
            step,
        }
    }

    /// Value the next reading will return.
    pub fn peek(&self) -> Timestamp {
        self.next.get()
    }
}

impl Clock for SequenceClock {
    fn now_millis(&self) -> Timestamp {
        let now = self.next.get();
        self.next.set(now.saturating_add(self.step));
        now
    }
}
