//! Bounded, timed retransmission of the armed packet.
//!
//! The radio link is one-way: nothing ever acknowledges a packet. The
//! scheduler approximates reliability by transmitting the armed packet a
//! fixed number of times (5 in the reference configuration), pacing the
//! attempts with a per-attempt deadline (100 ms) polled from the foreground
//! loop.
//!
//! Arming while a schedule is already active replaces the packet and
//! resets the attempt counter: the remote always retransmits the *latest*
//! gesture, it never queues. Cancelling stops future attempts immediately,
//! but an attempt the transmitter has already accepted runs to completion;
//! the interrupt handler cannot be preempted mid-waveform.

use crate::clock::{Duration, Instant};
use crate::consts::Timings;
use crate::packet::Packet;
use crate::transmitter::BitBangTransmitter;
use crate::waveform;
use embedded_hal::digital::OutputPin;

/// Foreground retransmission state for the currently armed packet.
#[derive(Debug)]
pub struct TransmitScheduler {
    packet: Option<Packet>,
    attempts_left: u8,
    last_attempt: Option<Instant>,
    interval: Duration,
    attempts: u8,
}

impl TransmitScheduler {
    /// Creates an inactive scheduler with the given pacing configuration.
    pub fn new(timings: Timings) -> Self {
        Self {
            packet: None,
            attempts_left: 0,
            last_attempt: None,
            interval: timings.resend_interval,
            attempts: timings.resend_attempts,
        }
    }

    /// Arms `packet` for the full round of attempts.
    ///
    /// The per-attempt deadline is cleared so the first attempt fires on
    /// the next [`poll`](Self::poll). A schedule already in flight is
    /// replaced outright.
    pub fn arm(&mut self, packet: Packet) {
        self.packet = Some(packet);
        self.attempts_left = self.attempts;
        self.last_attempt = None;
        #[cfg(feature = "defmt-0-3")]
        defmt::debug!("resend armed: {=u8} attempts", self.attempts_left);
        #[cfg(feature = "log")]
        log::debug!("resend armed: {} attempts", self.attempts_left);
    }

    /// Drops the schedule immediately, regardless of transmitter state.
    pub fn cancel(&mut self) {
        self.packet = None;
        self.attempts_left = 0;
        self.last_attempt = None;
        #[cfg(feature = "defmt-0-3")]
        defmt::debug!("resend cancelled");
        #[cfg(feature = "log")]
        log::debug!("resend cancelled");
    }

    /// Returns `true` while a schedule is armed and not yet drained.
    pub fn is_active(&self) -> bool {
        self.packet.is_some()
    }

    /// Attempts not yet fired for the armed packet.
    pub fn attempts_left(&self) -> u8 {
        self.attempts_left
    }

    /// Runs one foreground iteration of the schedule.
    ///
    /// When the per-attempt deadline has elapsed, the packet is re-framed
    /// and offered to the transmitter; a busy transmitter leaves the
    /// attempt pending for the next poll. Once every attempt has fired and
    /// the transmitter has drained, the scheduler deactivates.
    pub fn poll<TX>(&mut self, now: Instant, tx: &mut BitBangTransmitter<TX>)
    where
        TX: OutputPin,
    {
        let Some(packet) = self.packet else {
            return;
        };

        if self.attempts_left > 0 && self.deadline_elapsed(now) {
            match waveform::encode_command(&packet.to_bytes()) {
                Ok(wave) => match tx.send(wave) {
                    Ok(()) => self.attempt_done(now),
                    // Busy: the previous waveform is still draining.
                    Err(nb::Error::WouldBlock) => {}
                    Err(nb::Error::Other(e)) => match e {},
                },
                // An oversize command can never shrink; burn the attempt.
                Err(_) => self.attempt_done(now),
            }
        }

        if self.attempts_left == 0 && !tx.is_working() {
            self.packet = None;
        }
    }

    fn deadline_elapsed(&self, now: Instant) -> bool {
        match self.last_attempt {
            None => true,
            Some(at) => now.elapsed_since(at) >= self.interval,
        }
    }

    fn attempt_done(&mut self, now: Instant) {
        self.attempts_left -= 1;
        self.last_attempt = Some(now);
    }
}
