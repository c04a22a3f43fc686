//! Interrupt-driven level playback onto the RF pin.
//!
//! This module provides the [`BitBangTransmitter`] struct, the only piece of
//! the firmware that runs in interrupt context. A hardware timer fires once
//! per half-bit period (400 µs for the 800 µs/bit link) and calls
//! [`tick()`](BitBangTransmitter::tick), which plays exactly one level of
//! the active [`Waveform`] onto the RF output pin.
//!
//! The state machine is deliberately minimal:
//!
//! - `Idle`: nothing queued; the pin rests low (carrier off).
//! - `Sending`: a waveform is being played, one level per tick.
//! - `JustCompleted`: the final level has been played; one more tick
//!   returns the machine to `Idle`.
//!
//! [`send()`](BitBangTransmitter::send) only accepts a waveform while the
//! machine is `Idle` and returns [`nb::Error::WouldBlock`] otherwise, so at
//! most one waveform is ever in flight and a started waveform always runs
//! to completion. The foreground must make the idle-check and the start a
//! single atomic step with respect to the timer interrupt; the
//! [`crate::timer`] helpers do this by calling `send` inside a
//! `critical_section::with` block.
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! use fob433::transmitter::BitBangTransmitter;
//! use fob433::waveform::{Level, Waveform};
//!
//! # let rf_pin = Pin::new(&[
//! #     PinTransaction::set(PinState::Low),
//! #     PinTransaction::set(PinState::High),
//! #     PinTransaction::set(PinState::Low),
//! # ]);
//! let mut tx = BitBangTransmitter::new(rf_pin);
//!
//! let mut wave = Waveform::new();
//! wave.push(Level::High).unwrap();
//! wave.push(Level::Low).unwrap();
//! tx.send(wave).unwrap();
//!
//! while tx.is_working() {
//!     tx.tick(); // called every 400 µs by the timer interrupt
//! }
//! # tx.free().done();
//! ```

use crate::waveform::{Level, Waveform};
use core::convert::Infallible;
use embedded_hal::digital::OutputPin;

/// Playback state of the transmitter.
///
/// Written only from the timer interrupt (via `tick`) and the atomic start
/// path; the foreground treats it as read-only.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub enum TxState {
    /// No waveform queued; the RF pin rests low.
    #[default]
    Idle,
    /// A waveform is being played, one level per timer tick.
    Sending,
    /// The last level went out on the previous tick; the next tick idles.
    JustCompleted,
}

/// A software OOK transmitter clocked by a periodic timer interrupt.
///
/// Owns the RF output pin and the active waveform. Construction drives the
/// pin low so the carrier is off until the first transmission starts.
///
/// ## Type Parameters
///
/// - `TX`: the RF output pin, any [`embedded_hal::digital::OutputPin`]
#[derive(Debug)]
pub struct BitBangTransmitter<TX>
where
    TX: OutputPin,
{
    rf: TX,
    state: TxState,
    cursor: usize,
    wave: Waveform,
    /// Counter of waveforms played to completion.
    pub tx_good: u16,
}

impl<TX> BitBangTransmitter<TX>
where
    TX: OutputPin,
{
    /// Creates a transmitter around the RF output pin.
    ///
    /// The pin is driven low immediately (carrier off).
    pub fn new(rf: TX) -> Self {
        #[allow(unused_mut)]
        let mut rf = rf;
        let _ = rf.set_low(); // Ensure idle
        Self {
            rf,
            state: TxState::Idle,
            cursor: 0,
            wave: Waveform::new(),
            tx_good: 0,
        }
    }

    /// Queues a waveform for playback.
    ///
    /// Accepted only while the machine is [`TxState::Idle`]; a machine that
    /// is sending (or still in the one-tick [`TxState::JustCompleted`]
    /// window) rejects the request with [`nb::Error::WouldBlock`] and the
    /// in-flight waveform is unaffected. Callers retry on a later tick.
    pub fn send(&mut self, wave: Waveform) -> nb::Result<(), Infallible> {
        if self.state != TxState::Idle {
            return Err(nb::Error::WouldBlock);
        }
        self.wave = wave;
        self.cursor = 0;
        self.state = TxState::Sending;
        Ok(())
    }

    /// Returns `true` while a queued waveform has not fully drained.
    pub fn is_working(&self) -> bool {
        self.state != TxState::Idle
    }

    /// Current playback state.
    pub fn state(&self) -> TxState {
        self.state
    }

    /// Non-blocking wait for the transmitter to drain.
    ///
    /// Usable with `nb::block!` from code that genuinely wants to spin
    /// until the waveform is out.
    pub fn wait_idle(&self) -> nb::Result<(), Infallible> {
        if self.is_working() {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }

    /// Forces the RF pin low without touching playback state.
    ///
    /// Used by the sleep entry sequence; the sleep gate has already
    /// verified nothing is in flight by the time this is called.
    pub fn pin_low(&mut self) {
        let _ = self.rf.set_low();
    }

    /// Releases the RF pin.
    pub fn free(self) -> TX {
        self.rf
    }

    /// Advances playback by one timer tick.
    ///
    /// Must be called once per half-bit period, normally from the timer
    /// interrupt handler (see [`crate::timer`]).
    pub fn tick(&mut self) {
        match self.state {
            TxState::Idle => {}
            TxState::JustCompleted => self.state = TxState::Idle,
            TxState::Sending => {
                let level = self.wave.get(self.cursor).copied().unwrap_or(Level::Low);
                if level.is_high() {
                    let _ = self.rf.set_high();
                } else {
                    let _ = self.rf.set_low();
                }
                self.cursor += 1;
                if self.cursor >= self.wave.len() {
                    self.cursor = 0;
                    self.wave.clear();
                    self.state = TxState::JustCompleted;
                    self.tx_good = self.tx_good.wrapping_add(1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    fn wave_of(levels: &[Level]) -> Waveform {
        let mut wave = Waveform::new();
        for &level in levels {
            wave.push(level).unwrap();
        }
        wave
    }

    #[test]
    fn construction_idles_the_pin_low() {
        let rf = PinMock::new(&[PinTransaction::set(PinState::Low)]);
        let tx = BitBangTransmitter::new(rf);
        assert_eq!(tx.state(), TxState::Idle);
        assert!(!tx.is_working());
        tx.free().done();
    }

    #[test]
    fn playback_emits_one_level_per_tick_then_idles() {
        let rf = PinMock::new(&[
            PinTransaction::set(PinState::Low), // construction
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);
        let mut tx = BitBangTransmitter::new(rf);
        tx.send(wave_of(&[Level::High, Level::Low, Level::High]))
            .unwrap();
        assert_eq!(tx.state(), TxState::Sending);

        tx.tick();
        tx.tick();
        assert_eq!(tx.state(), TxState::Sending);
        tx.tick(); // final level: completes on the same tick
        assert_eq!(tx.state(), TxState::JustCompleted);
        assert!(tx.is_working());

        tx.tick();
        assert_eq!(tx.state(), TxState::Idle);
        assert_eq!(tx.tx_good, 1);
        tx.free().done();
    }

    #[test]
    fn start_while_sending_is_rejected_and_harmless() {
        let rf = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::High),
        ]);
        let mut tx = BitBangTransmitter::new(rf);
        tx.send(wave_of(&[Level::High, Level::High])).unwrap();
        tx.tick();

        // Second request mid-flight: busy, in-flight waveform unaffected.
        assert_eq!(
            tx.send(wave_of(&[Level::Low])),
            Err(nb::Error::WouldBlock)
        );
        assert_eq!(tx.state(), TxState::Sending);

        tx.tick();
        assert_eq!(tx.state(), TxState::JustCompleted);

        // Still rejected during the completion tick.
        assert_eq!(
            tx.send(wave_of(&[Level::Low])),
            Err(nb::Error::WouldBlock)
        );
        tx.tick();
        assert_eq!(tx.state(), TxState::Idle);
        assert_eq!(tx.tx_good, 1);
        tx.free().done();
    }

    #[test]
    fn wait_idle_blocks_until_drained() {
        let rf = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::Low),
        ]);
        let mut tx = BitBangTransmitter::new(rf);
        tx.send(wave_of(&[Level::Low])).unwrap();
        assert_eq!(tx.wait_idle(), Err(nb::Error::WouldBlock));
        tx.tick();
        tx.tick();
        assert_eq!(tx.wait_idle(), Ok(()));
        tx.free().done();
    }

    #[test]
    fn pin_low_quiesces_without_state_change() {
        let rf = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::Low),
        ]);
        let mut tx = BitBangTransmitter::new(rf);
        tx.pin_low();
        assert_eq!(tx.state(), TxState::Idle);
        tx.free().done();
    }
}
