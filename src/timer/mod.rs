//! Timer and tick-source utilities for the bit-bang transmitter.
//!
//! The transmitter needs exactly one [`tick()`](crate::transmitter::BitBangTransmitter::tick)
//! per half-bit period (400 µs for the 800 µs/bit link). This module offers
//! two ways to provide it: a hardware-timer interrupt driving a
//! `critical_section`-guarded singleton (`timer-isr` feature), or a
//! blocking drain loop built on `embedded_hal::delay::DelayNs`
//! (`delay-loop` feature).
//!
//! Typical timer configurations for the half-bit tick:
//!
//! | Timer clock | Prescaler | Counter ticks per interrupt |
//! |-------------|-----------|-----------------------------|
//! |      48 MHz |        48 |                         400 |
//! |      48 MHz |         1 |                      19 200 |
//! |       8 MHz |         8 |                         400 |

#[cfg(all(feature = "delay-loop", feature = "rf"))]
mod delay;
#[cfg_attr(all(feature = "delay-loop", feature = "rf"), allow(unused_imports))]
#[cfg(all(feature = "delay-loop", feature = "rf"))]
pub use delay::*;

#[cfg(all(feature = "timer-isr", feature = "rf"))]
mod isr;
#[cfg_attr(all(feature = "timer-isr", feature = "rf"), allow(unused_imports))]
#[cfg(all(feature = "timer-isr", feature = "rf"))]
pub use isr::*;

#[cfg(all(feature = "timer-isr", feature = "rf"))]
mod macros;

/// Nominal on-air bit period in microseconds.
pub const BIT_PERIOD_US: u32 = 800;

/// The transmitter tick interval: one waveform level per half bit.
pub const HALF_BIT_PERIOD_US: u32 = BIT_PERIOD_US / 2;

/// Counter ticks per half-bit interrupt for a given timer clock.
///
/// # Arguments
/// - `timer_hz`: input clock of the timer peripheral in Hz
/// - `prescaler`: the configured prescaler division factor
///
/// # Returns
/// The number of prescaled counter ticks per transmitter tick. Timers that
/// reload on match usually want this value minus one in their auto-reload
/// register.
pub const fn half_bit_ticks(timer_hz: u32, prescaler: u32) -> u32 {
    ((timer_hz / prescaler) as u64 * HALF_BIT_PERIOD_US as u64 / 1_000_000) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_bit_ticks_matches_the_reference_timer_setup() {
        // 48 MHz with a /48 prescaler gives a 1 MHz count: 400 ticks.
        assert_eq!(half_bit_ticks(48_000_000, 48), 400);
        assert_eq!(half_bit_ticks(48_000_000, 1), 19_200);
        assert_eq!(half_bit_ticks(8_000_000, 8), 400);
    }
}
