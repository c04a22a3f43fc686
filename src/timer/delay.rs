use crate::transmitter::BitBangTransmitter;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Drains the transmitter with a blocking delay loop.
///
/// For environments where a timer interrupt is unavailable or undesired:
/// ticks the transmitter once per `tick_us` microseconds until the queued
/// waveform has been fully played and the state machine is idle again.
///
/// # Arguments
/// - `tx`: the transmitter with a waveform already queued via `send`
/// - `delay`: a delay provider from the HAL
/// - `tick_us`: the level period, normally
///   [`HALF_BIT_PERIOD_US`](crate::timer::HALF_BIT_PERIOD_US)
///
/// # Notes
/// - Blocks for the whole waveform (about 90 ms for a framed key packet);
///   retransmission pacing still has to happen in the caller's loop.
/// - Prefer interrupt-driven ticking where available; a delay loop accrues
///   the loop overhead on top of each tick.
pub fn run_transmit_loop<D: DelayNs, TX>(
    tx: &mut BitBangTransmitter<TX>,
    delay: &mut D,
    tick_us: u32,
) where
    TX: OutputPin,
{
    while tx.is_working() {
        tx.tick();
        delay.delay_us(tick_us);
    }
}
