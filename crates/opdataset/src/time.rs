//! Millisecond monotonic time used to age the pending delay timer.
//!
//! Times wrap at `u32::MAX`; differences are taken with wrapping
//! subtraction so a wrap between two observations still yields the
//! elapsed span.

use derive_more::Display;
use std::{cell::Cell, rc::Rc, time::Instant};

///
/// TimeMilli
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
#[display("{_0}ms")]
pub struct TimeMilli(u32);

impl TimeMilli {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_millis(ms: u32) -> Self {
        Self(ms)
    }

    #[must_use]
    pub const fn as_millis(self) -> u32 {
        self.0
    }

    /// Milliseconds from `earlier` to `self`.
    #[must_use]
    pub const fn since(self, earlier: Self) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    #[must_use]
    pub const fn wrapping_add(self, ms: u32) -> Self {
        Self(self.0.wrapping_add(ms))
    }
}

///
/// Clock
///

pub trait Clock {
    fn now(&self) -> TimeMilli;
}

///
/// MonotonicClock
/// Process clock anchored at construction.
///

#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    #[must_use]
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
    // truncation is the wrap
    #[expect(clippy::cast_possible_truncation)]
    fn now(&self) -> TimeMilli {
        TimeMilli(self.origin.elapsed().as_millis() as u32)
    }
}

///
/// ManualClock
///
/// Caller-driven clock. Clones share the same time source, so a test can
/// keep one handle and advance the clock seen by a store.
///

#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<TimeMilli>>,
}

impl ManualClock {
    #[must_use]
    pub fn starting_at(now: TimeMilli) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    pub fn set(&self, now: TimeMilli) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> TimeMilli {
        self.now.get()
    }
}

///
/// TESTS
///
