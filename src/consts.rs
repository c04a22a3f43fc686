//! Constants used across the remote-control protocol implementation.
//!
//! This module defines the protocol-wide constants used for waveform
//! framing, packet layout, command codes, and the key map, together with the
//! [`Timings`] structure that gathers every timing threshold of the firmware
//! in one auditable place.
//!
//! ## Key Concepts
//!
//! - **Framing**: fixed wake-up code, header, start marker, and stop tail
//!   wrapped around every transmitted command (see [`crate::waveform`]).
//! - **Packet layout**: the 9-byte key-event packet and its checksum bias.
//! - **Command codes**: the byte values a paired receiver understands, and
//!   the table mapping matrix key numbers onto them.
//! - **Timings**: scan cadence, debounce, press thresholds, retransmission
//!   pacing, and the sleep idle threshold.
//!
//! These values should be used wherever framing or scheduling logic is
//! implemented so that the relationships between thresholds (most notably
//! long-press vs. press-timeout, which share an origin) stay auditable.

use crate::clock::Duration;

/// The wake-up code transmitted ahead of every command.
///
/// Each byte is expanded bit by bit into level pairs, giving the receiver's
/// demodulator a long alternating pattern to synchronize on before the
/// header arrives.
pub const WAKE_UP_CODE: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

/// Total number of fixed header levels following the wake-up code.
pub const HEADER_LEVELS: usize = 10;

/// How many of the [`HEADER_LEVELS`] are driven high; the remainder are low.
pub const HEADER_HIGH_LEVELS: usize = 3;

/// Number of low levels closing every waveform.
pub const STOP_LEVELS: usize = 5;

/// Levels per encoded payload bit (mark half + space half).
pub const LEVELS_PER_BIT: usize = 2;

/// Maximum size (in levels) of a transmit waveform.
///
/// Sized so the full 9-byte key-event packet (225 levels once framed) fits;
/// anything longer is rejected by the encoder before any pin activity.
pub const WAVE_MAX_LEVELS: usize = 240;

/// Total length of the packet on the wire, in bytes.
pub const PACKET_LEN: usize = 9;

/// Length of the packet's data field, in bytes.
pub const PACKET_DATA_LEN: usize = 4;

/// Bias added to the XOR of the data bytes to form the checksum byte.
pub const CHECKSUM_BIAS: u8 = 0x11;

/// Protocol identifier carried in the low nibble of the packet's tag byte.
pub const PROTOCOL_PID: u8 = 5;

/// Number of keys on the remote's matrix.
pub const KEY_COUNT: usize = 16;

// Command codes understood by the paired receiver. Keys 1..=16 map onto
// these through REMOTE_KEY_LIST; the hold, pairing, and warning codes are
// emitted by the gesture classifier and the battery monitor directly.

/// Numeric key 1.
pub const DATA_ONE: u8 = 0x01;
/// Numeric key 2.
pub const DATA_TWO: u8 = 0x02;
/// Numeric key 3.
pub const DATA_THREE: u8 = 0x03;
/// Numeric key 4.
pub const DATA_FOUR: u8 = 0x04;
/// Numeric key 5.
pub const DATA_FIVE: u8 = 0x05;
/// Numeric key 6.
pub const DATA_SIX: u8 = 0x06;
/// Fan power toggle.
pub const FAN_SWITCH: u8 = 0x07;
/// Fan speed down.
pub const GEAR_DEC: u8 = 0x08;
/// Lamp power toggle.
pub const LED_SWITCH: u8 = 0x09;
/// Fan speed up.
pub const GEAR_ADD: u8 = 0x0A;
/// Fan direction reversal.
pub const REVERSIBLE: u8 = 0x0B;
/// RGB ring toggle.
pub const RGB_SWITCH: u8 = 0x12;
/// Color temperature step.
pub const COLOR_TEMP: u8 = 0x0D;
/// 1-hour off timer.
pub const TIME_1_HOUR: u8 = 0x0F;
/// 4-hour off timer.
pub const TIME_4_HOUR: u8 = 0x10;
/// 8-hour off timer.
pub const TIME_8_HOUR: u8 = 0x11;
/// RGB cycling, sent while the RGB key is held long.
pub const RGB_HOLD: u8 = 0x14;
/// Color-temperature cycling, sent while the color key is held long.
pub const COLOR_HOLD: u8 = 0x0E;
/// Low-battery report, sent by the power-supervision path.
pub const LOW_POWER_WARN: u8 = 0xFF;
/// Pair with the receiving device.
pub const NOTE_TO_DEVICE_PAIR: u8 = 0xF1;
/// Pair the receiving device's Wi-Fi module.
pub const NOTE_TO_DEVICE_PAIR_WIFI: u8 = 0xF2;
/// Put the receiver's Wi-Fi module into factory mode.
pub const NOTE_TO_WIFI_FACTORY_MODE: u8 = 0x13;

/// Command code sent for each matrix key, indexed by key number minus one.
pub const REMOTE_KEY_LIST: [u8; KEY_COUNT] = [
    DATA_ONE, DATA_TWO, DATA_THREE, DATA_FOUR, DATA_FIVE, DATA_SIX, FAN_SWITCH, GEAR_DEC,
    LED_SWITCH, GEAR_ADD, REVERSIBLE, RGB_SWITCH, COLOR_TEMP, TIME_1_HOUR, TIME_4_HOUR,
    TIME_8_HOUR,
];

/// Row-major key-number layout of the stock 4x4 matrix.
pub const DEFAULT_KEYMAP: [[u8; 4]; 4] = [
    [1, 2, 3, 4],
    [5, 6, 7, 8],
    [9, 10, 11, 12],
    [13, 14, 15, 16],
];

/// Every timing threshold of the firmware, gathered in one structure.
///
/// All components copy the fields they need at construction time, so a
/// non-default configuration only has to be assembled once.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Timings {
    /// Interval between matrix scans; one row is scanned per interval.
    pub scan_interval: Duration,
    /// How long a key contact must stay closed before it counts as pressed.
    pub debounce: Duration,
    /// Minimum spacing between repeated short-press command emissions.
    pub repeat_interval: Duration,
    /// Held time after which a press becomes a long press.
    pub long_press: Duration,
    /// Held time after which a press is abandoned as a stuck key.
    ///
    /// Measured from the *same origin* as [`long_press`](Self::long_press),
    /// not from the long-press transition.
    pub press_timeout: Duration,
    /// Spacing between retransmission attempts of an armed packet.
    pub resend_interval: Duration,
    /// How many times an armed packet is transmitted.
    pub resend_attempts: u8,
    /// Idle time with no key activity before the device may deep-stop.
    pub sleep_idle: Duration,
}

impl Timings {
    /// The reference timing set of the stock remote.
    pub const DEFAULT: Timings = Timings {
        scan_interval: Duration::from_millis(8),
        debounce: Duration::from_millis(30),
        repeat_interval: Duration::from_millis(200),
        long_press: Duration::from_millis(3_000),
        press_timeout: Duration::from_millis(4_500),
        resend_interval: Duration::from_millis(100),
        resend_attempts: 5,
        sleep_idle: Duration::from_millis(100),
    };
}

impl Default for Timings {
    fn default() -> Self {
        Self::DEFAULT
    }
}
