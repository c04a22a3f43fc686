//! Monotonic time values for foreground deadline polling.
//!
//! Everything in this crate waits by polling: the scanner, the gesture
//! classifier, the retransmission scheduler, and the sleep gate all compare
//! "now" against a stored origin once per foreground iteration. The platform
//! supplies "now" from whatever free-running counter it has (SysTick, a
//! low-power timer, etc.); this module only defines the value types and the
//! wraparound-safe arithmetic on them.
//!
//! [`Instant`] is a 32-bit microsecond counter that is *expected* to wrap
//! (about every 71 minutes at 1 MHz). Elapsed time is therefore always
//! computed with wrapping subtraction via [`Instant::elapsed_since`]; never
//! compare two instants with `<`/`>` directly.

/// A point in time on the platform's free-running microsecond counter.
///
/// Wraps modulo 2³². Two instants may only be related through
/// [`elapsed_since`](Instant::elapsed_since), which is correct across a
/// single wrap of the counter.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Instant {
    ticks: u32,
}

impl Instant {
    /// Creates an instant from a raw counter value in microseconds.
    pub const fn from_ticks(ticks: u32) -> Self {
        Self { ticks }
    }

    /// Creates an instant `micros` microseconds after the counter epoch.
    pub const fn from_micros(micros: u32) -> Self {
        Self { ticks: micros }
    }

    /// Creates an instant `millis` milliseconds after the counter epoch.
    pub const fn from_millis(millis: u32) -> Self {
        Self {
            ticks: millis.wrapping_mul(1_000),
        }
    }

    /// Returns the raw counter value in microseconds.
    pub const fn ticks(self) -> u32 {
        self.ticks
    }

    /// Returns the time elapsed between `earlier` and `self`.
    ///
    /// Uses wrapping subtraction, so the result is correct even when the
    /// counter wrapped between the two instants (as long as less than a full
    /// counter period actually passed).
    pub const fn elapsed_since(self, earlier: Instant) -> Duration {
        Duration {
            micros: self.ticks.wrapping_sub(earlier.ticks),
        }
    }
}

impl core::ops::Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Instant {
        Instant {
            ticks: self.ticks.wrapping_add(rhs.micros),
        }
    }
}

/// A span of time, in microseconds, up to about 71 minutes.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Duration {
    micros: u32,
}

impl Duration {
    /// A zero-length span.
    pub const ZERO: Duration = Duration { micros: 0 };

    /// Creates a duration from microseconds.
    pub const fn from_micros(micros: u32) -> Self {
        Self { micros }
    }

    /// Creates a duration from milliseconds.
    pub const fn from_millis(millis: u32) -> Self {
        Self {
            micros: millis * 1_000,
        }
    }

    /// Returns the length of the span in microseconds.
    pub const fn as_micros(self) -> u32 {
        self.micros
    }

    /// Returns the length of the span in whole milliseconds.
    pub const fn as_millis(self) -> u32 {
        self.micros / 1_000
    }
}
