//! OOK level framing for the 433 MHz transmit path.
//!
//! This module converts a command byte buffer into the flat sequence of
//! output levels that [`crate::transmitter`] plays onto the RF pin, one
//! level per half-bit period. Bits are not sent bare: a `1` is the level
//! pair (high, low) and a `0` is (low, high), so every payload bit carries a
//! transition the receiver can recover timing from.
//!
//! ## Frame layout
//!
//! | Section | Content | Levels |
//! |---------|---------|--------|
//! | Wake-up | [`WAKE_UP_CODE`], each bit MSB-first as a level pair | 64 |
//! | Header  | 3 high levels, then 7 low | 10 |
//! | Start   | a single `1` bit | 2 |
//! | Payload | each command byte, MSB-first, as level pairs | 16 per byte |
//! | Stop    | low levels | 5 |
//!
//! [`encode_command`] is all-or-nothing: a command that would not fit the
//! fixed buffer is rejected up front and no levels are produced, so a
//! failed encode can never leave a truncated frame behind for the
//! transmitter to pick up.

use crate::consts::{
    HEADER_HIGH_LEVELS, HEADER_LEVELS, LEVELS_PER_BIT, STOP_LEVELS, WAKE_UP_CODE, WAVE_MAX_LEVELS,
};
use heapless::Vec;
use thiserror::Error;

/// One on-off-keyed output level, held for half a bit period.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Level {
    /// Carrier off.
    Low,
    /// Carrier on.
    High,
}

impl Level {
    /// Returns `true` for [`Level::High`].
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

/// A fully framed transmit waveform: a fixed-capacity buffer of levels.
///
/// Rebuilt for every transmission attempt and consumed by the transmitter;
/// the transmitter clears it once the last level has been played.
pub type Waveform = Vec<Level, WAVE_MAX_LEVELS>;

/// Errors produced while framing a command.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Error)]
pub enum EncodeError {
    /// The framed command would not fit the waveform buffer.
    #[error("framed command needs {needed} levels, buffer holds {capacity}")]
    Overflow {
        /// Levels the framed command would occupy.
        needed: usize,
        /// Fixed capacity of the waveform buffer.
        capacity: usize,
    },
}

/// Returns the number of levels a framed command of `len` bytes occupies.
pub const fn encoded_levels(len: usize) -> usize {
    (WAKE_UP_CODE.len() * 8 + 1 + len * 8) * LEVELS_PER_BIT + HEADER_LEVELS + STOP_LEVELS
}

/// Frames `command` into a transmit [`Waveform`].
///
/// Fails only when the framed result would exceed the buffer capacity, in
/// which case nothing is produced.
pub fn encode_command(command: &[u8]) -> Result<Waveform, EncodeError> {
    let needed = encoded_levels(command.len());
    if needed > WAVE_MAX_LEVELS {
        return Err(EncodeError::Overflow {
            needed,
            capacity: WAVE_MAX_LEVELS,
        });
    }

    let mut wave = Waveform::new();

    for &byte in &WAKE_UP_CODE {
        push_byte(&mut wave, byte);
    }

    for i in 0..HEADER_LEVELS {
        let level = if i < HEADER_HIGH_LEVELS {
            Level::High
        } else {
            Level::Low
        };
        let _ = wave.push(level);
    }

    // Start marker: one logic-1 bit.
    push_bit(&mut wave, true);

    for &byte in command {
        push_byte(&mut wave, byte);
    }

    for _ in 0..STOP_LEVELS {
        let _ = wave.push(Level::Low);
    }

    Ok(wave)
}

/// Expands one byte, most-significant bit first, into level pairs.
fn push_byte(wave: &mut Waveform, byte: u8) {
    for n in 0..8 {
        push_bit(wave, byte & (0x80 >> n) != 0);
    }
}

fn push_bit(wave: &mut Waveform, bit: bool) {
    if bit {
        let _ = wave.push(Level::High);
        let _ = wave.push(Level::Low);
    } else {
        let _ = wave.push(Level::Low);
        let _ = wave.push(Level::High);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framed_length_matches_formula() {
        for len in [0usize, 1, 2, 9] {
            let command = [0x5a_u8; 9];
            let wave = encode_command(&command[..len]).unwrap();
            assert_eq!(wave.len(), 64 + 10 + 2 + len * 16 + 5);
            assert_eq!(wave.len(), encoded_levels(len));
        }
    }

    #[test]
    fn frame_sections_have_expected_levels() {
        let wave = encode_command(&[0x55]).unwrap();

        // Wake-up: 0xff bytes are all 1-bits, so 32 (high, low) pairs.
        for pair in wave[..64].chunks(2) {
            assert_eq!(pair, [Level::High, Level::Low].as_slice());
        }

        // Header: 3 high then 7 low.
        assert!(wave[64..67].iter().all(|l| l.is_high()));
        assert!(wave[67..74].iter().all(|l| !l.is_high()));

        // Start marker.
        assert_eq!(&wave[74..76], [Level::High, Level::Low].as_slice());

        // 0x55 MSB-first: alternating 0 and 1 bits.
        for bits in wave[76..92].chunks(4) {
            assert_eq!(
                bits,
                [Level::Low, Level::High, Level::High, Level::Low].as_slice(),
                "payload bit pairs for 0x55"
            );
        }

        // Stop tail.
        assert!(wave[92..97].iter().all(|l| !l.is_high()));
        assert_eq!(wave.len(), 97);
    }

    #[test]
    fn nine_byte_packet_fits() {
        let wave = encode_command(&[0u8; 9]).unwrap();
        assert_eq!(wave.len(), 225);
    }

    #[test]
    fn oversize_command_is_rejected_without_output() {
        let err = encode_command(&[0u8; 10]).unwrap_err();
        assert_eq!(
            err,
            EncodeError::Overflow {
                needed: 241,
                capacity: WAVE_MAX_LEVELS
            }
        );
    }

    #[test]
    fn zero_bits_expand_space_first() {
        let wave = encode_command(&[0x00]).unwrap();
        for pair in wave[76..92].chunks(2) {
            assert_eq!(pair, [Level::Low, Level::High].as_slice());
        }
    }
}
