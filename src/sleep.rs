//! The gate in front of the device's lowest-power state.
//!
//! A transmit-only remote spends nearly all of its life asleep; the gate
//! decides, once per foreground iteration, whether it is safe to go there.
//! Entry requires an idle interval with no key activity *and* an inactive
//! retransmission schedule. A held key refreshes the idle timer on every
//! iteration, so holding a key postpones sleep indefinitely; a schedule
//! that is still retransmitting defers entry without disturbing the timer,
//! so the device drops off as soon as the last waveform has drained.
//!
//! The gate only decides. The surrounding controller performs the actual
//! entry sequence (RF pin low, row outputs low so any key press becomes a
//! wake event, indicator off) and then calls into the platform through
//! [`DeepStop`].

use crate::clock::{Duration, Instant};
use crate::consts::Timings;

/// Platform capability: enter the lowest-power state.
///
/// Implementations run the hardware's stop-mode entry sequence and return
/// once the device has been woken again. On the reference platform that is
/// an event-wait issued twice, per its wake-on-event convention.
pub trait DeepStop {
    /// Enters the lowest-power state; returns after wake-up.
    fn enter(&mut self);
}

/// No-op stand-in for builds that keep the device awake.
impl DeepStop for () {
    fn enter(&mut self) {}
}

/// The sleep decision state machine.
#[derive(Debug)]
pub struct SleepGate {
    idle_since: Option<Instant>,
    threshold: Duration,
}

impl SleepGate {
    /// Creates a gate with the configured idle threshold.
    pub fn new(timings: Timings) -> Self {
        Self {
            idle_since: None,
            threshold: timings.sleep_idle,
        }
    }

    /// Runs one foreground evaluation.
    ///
    /// Returns `true` when the device should enter its lowest-power state
    /// now. After a `true` decision the timer is disarmed; the first
    /// evaluation after wake-up re-arms it.
    pub fn poll(&mut self, now: Instant, keys_held: bool, sending: bool) -> bool {
        if keys_held {
            self.idle_since = Some(now);
            return false;
        }
        let Some(since) = self.idle_since else {
            self.idle_since = Some(now);
            return false;
        };
        if sending || now.elapsed_since(since) < self.threshold {
            return false;
        }
        self.idle_since = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> SleepGate {
        SleepGate::new(Timings::DEFAULT)
    }

    #[test]
    fn sleeps_after_the_idle_threshold() {
        let mut gate = gate();
        assert!(!gate.poll(Instant::from_millis(0), false, false));
        assert!(!gate.poll(Instant::from_millis(99), false, false));
        assert!(gate.poll(Instant::from_millis(100), false, false));
    }

    #[test]
    fn a_held_key_postpones_sleep_indefinitely() {
        let mut gate = gate();
        for at in (0..1_000u32).step_by(8) {
            assert!(!gate.poll(Instant::from_millis(at), true, false));
        }
        // Released: the threshold now counts from the last held iteration.
        assert!(!gate.poll(Instant::from_millis(1_050), false, false));
        assert!(gate.poll(Instant::from_millis(1_092), false, false));
    }

    #[test]
    fn an_active_schedule_defers_without_resetting_the_timer() {
        let mut gate = gate();
        assert!(!gate.poll(Instant::from_millis(0), false, false));
        assert!(!gate.poll(Instant::from_millis(250), false, true));
        assert!(!gate.poll(Instant::from_millis(400), false, true));
        // The moment the schedule drains, the elapsed idle time counts.
        assert!(gate.poll(Instant::from_millis(410), false, false));
    }

    #[test]
    fn rearms_after_a_sleep_decision() {
        let mut gate = gate();
        let _ = gate.poll(Instant::from_millis(0), false, false);
        assert!(gate.poll(Instant::from_millis(120), false, false));
        // Woken up: the next evaluation starts a fresh idle window.
        assert!(!gate.poll(Instant::from_millis(130), false, false));
        assert!(!gate.poll(Instant::from_millis(210), false, false));
        assert!(gate.poll(Instant::from_millis(230), false, false));
    }
}
