//! The fixed 9-byte packet carried as the radio payload.
//!
//! Every transmission the remote makes is one of these: the persisted
//! 3-byte pairing identifier, a tag byte holding the packet type (high
//! nibble) and protocol id (low nibble), four data bytes, and a one-byte
//! checksum. For key events the data bytes are
//! `[code1, code2, temp_int, temp_frac]`: the primary and secondary key
//! command codes (secondary 0 when a single key is involved) and the last
//! sampled temperature, integer and fractional part.
//!
//! The checksum is the XOR of the four data bytes plus `0x11` (mod 256).
//! It is computed at build time and never verified here; the remote has no
//! receive path.

use crate::consts::{CHECKSUM_BIAS, PACKET_DATA_LEN, PACKET_LEN};

/// Tag identifying what a packet's data bytes carry.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PacketType {
    /// Key command plus temperature reading.
    KeyEvent,
    /// Sensor report (reserved; the sensor pipeline lives outside this core).
    Sensor,
}

impl PacketType {
    /// Wire value of the tag, carried in the high nibble of byte 3.
    pub const fn tag(self) -> u8 {
        match self {
            PacketType::KeyEvent => 1,
            PacketType::Sensor => 2,
        }
    }
}

/// One assembled radio payload.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Packet {
    device_id: [u8; 3],
    packet_type: PacketType,
    pid: u8,
    data: [u8; PACKET_DATA_LEN],
    checksum: u8,
}

impl Packet {
    /// Builds a key-event packet.
    ///
    /// `code2` is 0 when only one key is involved. The checksum is computed
    /// here; the packet is immutable afterwards.
    pub fn key_event(
        device_id: [u8; 3],
        pid: u8,
        code1: u8,
        code2: u8,
        temperature: [u8; 2],
    ) -> Self {
        let data = [code1, code2, temperature[0], temperature[1]];
        Self {
            device_id,
            packet_type: PacketType::KeyEvent,
            pid,
            data,
            checksum: Self::checksum_of(&data),
        }
    }

    /// The checksum rule: XOR of the data bytes, plus the fixed bias.
    pub fn checksum_of(data: &[u8; PACKET_DATA_LEN]) -> u8 {
        (data[0] ^ data[1] ^ data[2] ^ data[3]).wrapping_add(CHECKSUM_BIAS)
    }

    /// The persisted pairing identifier this packet claims to come from.
    pub fn device_id(&self) -> [u8; 3] {
        self.device_id
    }

    /// The packet's type tag.
    pub fn packet_type(&self) -> PacketType {
        self.packet_type
    }

    /// The four data bytes.
    pub fn data(&self) -> [u8; PACKET_DATA_LEN] {
        self.data
    }

    /// The stored checksum byte.
    pub fn checksum(&self) -> u8 {
        self.checksum
    }

    /// Serializes the packet into its wire layout.
    pub fn to_bytes(&self) -> [u8; PACKET_LEN] {
        [
            self.device_id[0],
            self.device_id[1],
            self.device_id[2],
            (self.packet_type.tag() << 4) | (self.pid & 0x0f),
            self.data[0],
            self.data[1],
            self.data[2],
            self.data[3],
            self.checksum,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{FAN_SWITCH, PROTOCOL_PID};

    #[test]
    fn checksum_round_trips() {
        let packet = Packet::key_event([0x11, 0x22, 0x33], PROTOCOL_PID, FAN_SWITCH, 0, [23, 50]);
        assert_eq!(packet.checksum(), Packet::checksum_of(&packet.data()));
        assert_eq!(
            packet.checksum(),
            (FAN_SWITCH ^ 0 ^ 23 ^ 50).wrapping_add(0x11)
        );
    }

    #[test]
    fn checksum_bias_wraps_modulo_256() {
        let data = [0xff, 0x00, 0x00, 0x00];
        assert_eq!(Packet::checksum_of(&data), 0xff_u8.wrapping_add(0x11));
        assert_eq!(Packet::checksum_of(&data), 0x10);
    }

    #[test]
    fn wire_layout_places_type_in_high_nibble() {
        let packet = Packet::key_event([0xaa, 0xbb, 0xcc], PROTOCOL_PID, 0x09, 0x0d, [25, 0]);
        let bytes = packet.to_bytes();
        assert_eq!(&bytes[..3], &[0xaa, 0xbb, 0xcc]);
        assert_eq!(bytes[3] >> 4, PacketType::KeyEvent.tag());
        assert_eq!(bytes[3] & 0x0f, PROTOCOL_PID);
        assert_eq!(&bytes[4..8], &[0x09, 0x0d, 25, 0]);
        assert_eq!(bytes[8], packet.checksum());
    }

    #[test]
    fn secondary_code_defaults_to_zero_in_data() {
        let packet = Packet::key_event([1, 2, 3], PROTOCOL_PID, 0x12, 0, [0, 0]);
        assert_eq!(packet.data()[1], 0);
        assert_eq!(packet.packet_type(), PacketType::KeyEvent);
        assert_eq!(packet.device_id(), [1, 2, 3]);
    }
}
