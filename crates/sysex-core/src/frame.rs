//! Roland RQ1/DT1 and universal identity SysEx frames.
//!
//! Register frames share one layout:
//!
//! ```text
//! F0 41 10 <model id x4> <cmd> <addr x4> <payload...> <checksum> F7
//! ```
//!
//! For RQ1 the payload is the 7-bit packed byte count being requested.

use std::fmt;
use std::str::FromStr;

use crate::bitpack::{address_to_bytes, checksum, pack_to_7bit};
use crate::error::{Error, Result};

/// SysEx start marker.
pub const SYSEX_START: u8 = 0xF0;
/// SysEx end marker.
pub const SYSEX_END: u8 = 0xF7;
/// Manufacturer id followed by device id.
pub const MANUFACTURER_HEADER: [u8; 2] = [0x41, 0x10];
/// Bytes preceding the payload of a register frame.
pub const HEADER_LEN: usize = 12;
/// Position of the 4 address bytes within a register frame.
pub const ADDRESS_RANGE: std::ops::Range<usize> = 8..12;
/// Checksum and end marker.
pub const TRAILER_LEN: usize = 2;

/// Universal non-realtime identity request.
pub const IDENTITY_REQUEST: [u8; 6] = [0xF0, 0x7E, 0x10, 0x06, 0x01, 0xF7];
/// Leading bytes of an identity reply from a Roland device.
pub const IDENTITY_REPLY_PREFIX: [u8; 6] = [0xF0, 0x7E, 0x10, 0x06, 0x02, 0x41];
/// Position of the device family code within an identity reply.
pub const IDENTITY_FAMILY_OFFSET: usize = 6;

/// Register command type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandType {
    /// Data request (read).
    Rq1 = 0x11,
    /// Data set (write).
    Dt1 = 0x12,
}

impl CommandType {
    /// Wire value of the command.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Four-byte model identifier that selects a device's register map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ModelId(pub [u8; 4]);

impl ModelId {
    /// Model id from its raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Raw bytes in wire order.
    #[must_use]
    pub const fn bytes(self) -> [u8; 4] {
        self.0
    }
}

impl FromStr for ModelId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidModelId(s.to_string());
        if s.len() != 8 || !s.is_ascii() {
            return Err(invalid());
        }
        let mut bytes = [0u8; 4];
        for (index, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[index * 2..index * 2 + 2], 16).map_err(|_| invalid())?;
        }
        Ok(Self(bytes))
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

fn build_register_frame(
    model_id: ModelId,
    command: CommandType,
    address: u32,
    payload: &[u8],
) -> Vec<u8> {
    let address_bytes = address_to_bytes(address);
    let mut frame = Vec::with_capacity(HEADER_LEN + payload.len() + TRAILER_LEN);
    frame.push(SYSEX_START);
    frame.extend_from_slice(&MANUFACTURER_HEADER);
    frame.extend_from_slice(&model_id.bytes());
    frame.push(command.as_u8());
    frame.extend_from_slice(&address_bytes);
    frame.extend_from_slice(payload);
    frame.push(checksum(&address_bytes, payload));
    frame.push(SYSEX_END);
    frame
}

/// Builds an RQ1 frame requesting `byte_count` bytes starting at `address`.
#[must_use]
pub fn build_read_request(model_id: ModelId, address: u32, byte_count: u32) -> Vec<u8> {
    let size = pack_to_7bit(byte_count).to_be_bytes();
    build_register_frame(model_id, CommandType::Rq1, address, &size)
}

/// Builds a DT1 frame writing `payload` starting at `address`.
#[must_use]
pub fn build_write_command(model_id: ModelId, address: u32, payload: &[u8]) -> Vec<u8> {
    build_register_frame(model_id, CommandType::Dt1, address, payload)
}

/// Address bytes of an inbound register frame.
#[must_use]
pub fn frame_address(frame: &[u8]) -> Option<[u8; 4]> {
    frame.get(ADDRESS_RANGE)?.try_into().ok()
}

/// Payload of an inbound register frame, between the header and trailer.
#[must_use]
pub fn frame_payload(frame: &[u8]) -> Option<&[u8]> {
    frame.get(HEADER_LEN..frame.len().checked_sub(TRAILER_LEN)?)
}

/// Checks that an inbound register frame's checksum zeroes its address and
/// payload sum.
///
/// # Errors
///
/// [`Error::ChecksumMismatch`] when the carried checksum is wrong or the
/// frame is too short to carry one.
pub fn verify_checksum(frame: &[u8]) -> Result<()> {
    let received = frame
        .len()
        .checked_sub(TRAILER_LEN)
        .and_then(|index| frame.get(index).copied())
        .unwrap_or_default();
    let computed = match (frame.get(ADDRESS_RANGE), frame_payload(frame)) {
        (Some(address), Some(payload)) => checksum(address, payload),
        _ => return Err(Error::ChecksumMismatch { received, computed: 0 }),
    };
    if received == computed {
        Ok(())
    } else {
        Err(Error::ChecksumMismatch { received, computed })
    }
}

/// Returns `true` when `frame` is a DT1 from `model_id` carrying data for
/// `address`.
///
/// Roland devices answer an RQ1 under the model id it was addressed to, so a
/// read through a secondary id (such as the GO series' `00000028`) expects
/// its reply under that same id.
#[must_use]
pub fn is_reply_to(frame: &[u8], model_id: ModelId, address: u32) -> bool {
    frame.get(1..3) == Some(&MANUFACTURER_HEADER[..])
        && frame.get(3..7) == Some(&model_id.bytes()[..])
        && frame.get(7) == Some(&CommandType::Dt1.as_u8())
        && frame_address(frame) == Some(address_to_bytes(address))
}

/// Returns `true` when `frame` starts with the identity-reply prefix.
#[must_use]
pub fn is_identity_reply(frame: &[u8]) -> bool {
    frame.starts_with(&IDENTITY_REPLY_PREFIX)
}
