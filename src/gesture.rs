//! Key gesture classification: short press, long press, combinations,
//! and the stuck-key timeout.
//!
//! The matrix scanner reports debounced edges; this module aggregates up to
//! two simultaneously held keys into a phase machine and decides what, if
//! anything, the remote should do about it on each scan tick:
//!
//! - `Idle → ShortPress` as soon as any key is recorded. A single held key
//!   emits its mapped command, rate-limited to the repeat interval; a held
//!   pair drives the indicator instead (lit only for the whitelisted
//!   combinations) and sends nothing.
//! - `ShortPress → LongPress` after the long-press threshold. On the
//!   transition a single key emits its hold command (or falls back to its
//!   short-press command), a whitelisted pair emits its pairing command;
//!   either way exactly once.
//! - `LongPress → Timeout` after the press-timeout threshold, measured
//!   from the same origin as the long-press threshold. The timeout is the
//!   safety stop against a stuck key: it cancels any pending
//!   retransmission and clears the indicator.
//! - Any phase returns to `Idle` once every key is released.
//!
//! Any press or release edge that leaves keys held restarts the machine at
//! `ShortPress` with a fresh origin, so the thresholds always measure the
//! *current* key arrangement.

use crate::clock::{Duration, Instant};
use crate::consts::{
    COLOR_HOLD, KEY_COUNT, NOTE_TO_DEVICE_PAIR, NOTE_TO_DEVICE_PAIR_WIFI,
    NOTE_TO_WIFI_FACTORY_MODE, REMOTE_KEY_LIST, RGB_HOLD, Timings,
};
use crate::matrix::ScanStatus;

/// Keys whose long press emits a dedicated hold command.
const HOLD_COMMANDS: [(u8, u8); 2] = [(12, RGB_HOLD), (13, COLOR_HOLD)];

/// The whitelisted two-key combinations and their pairing commands.
const PAIRING_COMMANDS: [(u8, u8, u8); 3] = [
    (7, 9, NOTE_TO_DEVICE_PAIR),
    (9, 13, NOTE_TO_DEVICE_PAIR_WIFI),
    (14, 16, NOTE_TO_WIFI_FACTORY_MODE),
];

/// The set of currently recorded key numbers, at most two.
///
/// Strictly the first two keys observed as simultaneously held: a third
/// key is dropped, and releasing one of two held keys compacts the
/// survivor into slot 0.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ActiveKeys {
    codes: [u8; 2],
    count: u8,
}

impl ActiveKeys {
    /// Creates an empty set.
    pub const fn new() -> Self {
        Self {
            codes: [0; 2],
            count: 0,
        }
    }

    /// Number of recorded keys, always in `0..=2`.
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Returns `true` when no key is recorded.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The key in slot 0, if any.
    pub fn first(&self) -> Option<u8> {
        (self.count > 0).then(|| self.codes[0])
    }

    /// Both keys, when exactly two are held.
    pub fn pair(&self) -> Option<(u8, u8)> {
        (self.count == 2).then(|| (self.codes[0], self.codes[1]))
    }

    /// Returns `true` when `code` is recorded.
    pub fn contains(&self, code: u8) -> bool {
        self.codes[..self.count as usize].contains(&code)
    }

    /// Records a newly pressed key; a third key is dropped.
    pub(crate) fn insert(&mut self, code: u8) -> bool {
        if self.count >= 2 {
            return false;
        }
        self.codes[self.count as usize] = code;
        self.count += 1;
        true
    }

    /// Removes a released key, compacting the survivor into slot 0.
    ///
    /// A key that was never recorded (the dropped third key) is a no-op.
    pub(crate) fn remove(&mut self, code: u8) {
        let held = &self.codes[..self.count as usize];
        let Some(slot) = held.iter().position(|&c| c == code) else {
            return;
        };
        self.count -= 1;
        if slot == 0 && self.count == 1 {
            self.codes[0] = self.codes[1];
        }
        self.codes[self.count as usize] = 0;
    }
}

impl Default for ActiveKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// Phase of the press currently being classified.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub enum GesturePhase {
    /// No key held.
    #[default]
    Idle,
    /// Keys held for less than the long-press threshold.
    ShortPress,
    /// Keys held past the long-press threshold.
    LongPress,
    /// Keys held so long the press is treated as a stuck key.
    Timeout,
}

/// What the rest of the firmware should do about this scan tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum GestureEvent {
    /// Transmit this command code (and light the indicator).
    Command(u8),
    /// Drive the indicator: lit while a whitelisted pair is held.
    ComboIndicator(bool),
    /// Stuck key: cancel pending retransmissions, clear the indicator.
    PressTimeout,
    /// Every key was released; clear the indicator.
    Released,
}

/// The press/hold/timeout state machine.
///
/// Owns the [`ActiveKeys`] record that the matrix scanner fills in; call
/// [`update`](Self::update) once per scan tick with the scan's status.
#[derive(Debug)]
pub struct GestureClassifier {
    keys: ActiveKeys,
    phase: GesturePhase,
    pressed_at: Option<Instant>,
    last_repeat: Option<Instant>,
    long_press: Duration,
    press_timeout: Duration,
    repeat_interval: Duration,
}

impl GestureClassifier {
    /// Creates an idle classifier with the given thresholds.
    pub fn new(timings: Timings) -> Self {
        Self {
            keys: ActiveKeys::new(),
            phase: GesturePhase::Idle,
            pressed_at: None,
            last_repeat: None,
            long_press: timings.long_press,
            press_timeout: timings.press_timeout,
            repeat_interval: timings.repeat_interval,
        }
    }

    /// The currently recorded keys.
    pub fn keys(&self) -> &ActiveKeys {
        &self.keys
    }

    /// Mutable access for the matrix scanner filling in edges.
    pub fn keys_mut(&mut self) -> &mut ActiveKeys {
        &mut self.keys
    }

    /// The current phase.
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Advances the phase machine by one scan tick.
    ///
    /// `scan` is the status the matrix scanner returned for this tick; the
    /// scanner has already updated [`keys`](Self::keys) through
    /// [`keys_mut`](Self::keys_mut).
    pub fn update(&mut self, now: Instant, scan: ScanStatus) -> Option<GestureEvent> {
        // Edge bookkeeping: every edge restarts the press window.
        match scan {
            ScanStatus::Pressed => {
                self.pressed_at = Some(now);
                self.phase = GesturePhase::ShortPress;
                self.last_repeat = None;
            }
            ScanStatus::Released => self.pressed_at = None,
            ScanStatus::Debounce => {}
        }

        if self.keys.is_empty() {
            if self.phase != GesturePhase::Idle {
                self.phase = GesturePhase::Idle;
                self.pressed_at = None;
                return Some(GestureEvent::Released);
            }
            return None;
        }

        // A release that left keys held re-enters ShortPress with a fresh
        // origin, exactly as a new press would.
        let origin = match self.pressed_at {
            Some(at) => at,
            None => {
                self.pressed_at = Some(now);
                self.phase = GesturePhase::ShortPress;
                now
            }
        };

        match self.phase {
            GesturePhase::ShortPress if now.elapsed_since(origin) >= self.long_press => {
                self.phase = GesturePhase::LongPress;
                #[cfg(feature = "defmt-0-3")]
                defmt::debug!("long press");
                #[cfg(feature = "log")]
                log::debug!("long press");
                return self.long_press_event();
            }
            GesturePhase::LongPress if now.elapsed_since(origin) >= self.press_timeout => {
                self.phase = GesturePhase::Timeout;
                #[cfg(feature = "defmt-0-3")]
                defmt::debug!("press timeout");
                #[cfg(feature = "log")]
                log::debug!("press timeout");
                return Some(GestureEvent::PressTimeout);
            }
            _ => {}
        }

        match self.phase {
            GesturePhase::ShortPress => match self.keys.pair() {
                Some(pair) => Some(GestureEvent::ComboIndicator(pairing_command(pair).is_some())),
                None => self.short_press_repeat(now),
            },
            // Long-press and timeout effects fire on their transitions.
            _ => None,
        }
    }

    /// Rate-limited emission of a single held key's command.
    fn short_press_repeat(&mut self, now: Instant) -> Option<GestureEvent> {
        let due = match self.last_repeat {
            None => true,
            Some(at) => now.elapsed_since(at) >= self.repeat_interval,
        };
        if !due {
            return None;
        }
        let key = self.keys.first()?;
        self.last_repeat = Some(now);
        short_command(key).map(GestureEvent::Command)
    }

    /// The one-shot emission on entering the long-press phase.
    fn long_press_event(&mut self) -> Option<GestureEvent> {
        if let Some(pair) = self.keys.pair() {
            return pairing_command(pair).map(GestureEvent::Command);
        }
        let key = self.keys.first()?;
        let hold = HOLD_COMMANDS
            .iter()
            .find(|&&(k, _)| k == key)
            .map(|&(_, cmd)| cmd);
        hold.or_else(|| short_command(key)).map(GestureEvent::Command)
    }
}

/// The short-press command mapped to a key number, if the number is valid.
fn short_command(key: u8) -> Option<u8> {
    let index = (key as usize).checked_sub(1)?;
    if index < KEY_COUNT {
        Some(REMOTE_KEY_LIST[index])
    } else {
        None
    }
}

/// The pairing command for a whitelisted pair, in either key order.
fn pairing_command((a, b): (u8, u8)) -> Option<u8> {
    PAIRING_COMMANDS
        .iter()
        .find(|&&(k1, k2, _)| (a == k1 && b == k2) || (a == k2 && b == k1))
        .map(|&(_, _, cmd)| cmd)
}
