//! Playback time model.
//!
//! # Design
//!
//! Simulation time is a monotonically increasing millisecond counter,
//! `SimTime`.  The `PlaybackClock` is the single shared time source: the
//! replay scheduler advances it by a fixed tick once per scheduling
//! callback and passes the *value* into every resolver call.  Resolvers
//! never read ambient time — there is exactly one writer (the scheduler)
//! and the readers receive a copy, so a concurrent advancement phase needs
//! no synchronization on the clock.

use std::fmt;

// ── SimTime ──────────────────────────────────────────────────────────────────

/// An absolute simulation instant, in milliseconds since playback start.
///
/// Stored as `u64`: at millisecond resolution a u64 lasts ~585 million
/// years — far longer than any recorded run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// Milliseconds elapsed from `earlier` to `self`, saturating at zero
    /// if `earlier` is in the future.
    #[inline]
    pub fn since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// The instant `ms` milliseconds after `self`.
    #[inline]
    pub fn offset(self, ms: u64) -> SimTime {
        SimTime(self.0 + ms)
    }
}

impl std::ops::Add<u64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: u64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: SimTime) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// ── PlaybackClock ────────────────────────────────────────────────────────────

/// The shared playback time source.
///
/// Holds the current instant and the fixed tick duration.  `PlaybackClock`
/// is cheap to copy and holds no heap data; it does not push updates to
/// entities — each tick the scheduler pulls `now()` and passes it to each
/// entity's resolver.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaybackClock {
    now: SimTime,
    /// Milliseconds one tick represents.
    pub tick_ms: u32,
}

impl PlaybackClock {
    /// Create a clock at time zero with the given tick duration.
    ///
    /// # Panics
    /// Panics in debug mode if `tick_ms == 0`.
    pub fn new(tick_ms: u32) -> Self {
        debug_assert!(tick_ms > 0, "tick_ms must be > 0");
        Self { now: SimTime::ZERO, tick_ms }
    }

    /// The current instant.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Advance by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.now = self.now + self.tick_ms as u64;
    }

    /// Reset to time zero (full-batch replay restart).
    #[inline]
    pub fn reset(&mut self) {
        self.now = SimTime::ZERO;
    }

    /// Number of whole ticks elapsed since time zero.
    #[inline]
    pub fn ticks_elapsed(&self) -> u64 {
        self.now.0 / self.tick_ms as u64
    }
}

impl fmt::Display for PlaybackClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (tick {})", self.now, self.ticks_elapsed())
    }
}
