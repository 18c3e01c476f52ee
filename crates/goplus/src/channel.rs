//! Control Change, RPN, and NRPN channel messages.

use anyhow::{ensure, Result};

/// Channel the loop-mix engine listens on.
pub const LOOPMIX_CHANNEL: Channel = Channel(16);

const CONTROL_CHANGE: u8 = 0xB0;
const NRPN_MSB: u8 = 0x63;
const NRPN_LSB: u8 = 0x62;
const RPN_MSB: u8 = 0x65;
const RPN_LSB: u8 = 0x64;
const DATA_ENTRY_MSB: u8 = 0x06;
const DATA_ENTRY_LSB: u8 = 0x26;
const RPN_NULL: u8 = 0x7F;

/// One three-byte channel voice message.
pub type ChannelMessage = [u8; 3];

/// MIDI channel, numbered 1 to 16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Channel(u8);

impl Channel {
    /// Validates a 1-based channel number.
    ///
    /// # Errors
    ///
    /// Fails for numbers outside `1..=16`.
    pub fn new(number: u8) -> Result<Self> {
        ensure!((1..=16).contains(&number), "MIDI channel {number} is outside 1..=16");
        Ok(Self(number))
    }

    /// 1-based channel number.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    const fn status(self, kind: u8) -> u8 {
        kind | (self.0 - 1)
    }
}

/// Splits a 14-bit number into its MSB and LSB data bytes.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub const fn split_14bit(value: u16) -> (u8, u8) {
    (((value >> 7) & 0x7F) as u8, (value & 0x7F) as u8)
}

/// Control Change message.
#[must_use]
pub const fn control_change(channel: Channel, controller: u8, value: u8) -> ChannelMessage {
    [channel.status(CONTROL_CHANGE), controller & 0x7F, value & 0x7F]
}

/// Registered parameter write followed by the null function.
#[must_use]
pub fn rpn(channel: Channel, param: (u8, u8), data: (u8, u8)) -> Vec<ChannelMessage> {
    vec![
        control_change(channel, RPN_MSB, param.0),
        control_change(channel, RPN_LSB, param.1),
        control_change(channel, DATA_ENTRY_MSB, data.0),
        control_change(channel, DATA_ENTRY_LSB, data.1),
        control_change(channel, RPN_MSB, RPN_NULL),
        control_change(channel, RPN_LSB, RPN_NULL),
    ]
}

/// Non-registered parameter write.
///
/// The GO loop-mix engine acts on the data LSB, so no null function follows.
#[must_use]
pub fn nrpn(channel: Channel, param: (u8, u8), data: (u8, u8)) -> Vec<ChannelMessage> {
    vec![
        control_change(channel, NRPN_MSB, param.0),
        control_change(channel, NRPN_LSB, param.1),
        control_change(channel, DATA_ENTRY_MSB, data.0),
        control_change(channel, DATA_ENTRY_LSB, data.1),
    ]
}

/// Registered parameter write with 14-bit parameter number and value.
#[must_use]
pub fn rpn_14bit(channel: Channel, parameter: u16, value: u16) -> Vec<ChannelMessage> {
    rpn(channel, split_14bit(parameter), split_14bit(value))
}

/// Non-registered parameter write with 14-bit parameter number and value.
#[must_use]
pub fn nrpn_14bit(channel: Channel, parameter: u16, value: u16) -> Vec<ChannelMessage> {
    nrpn(channel, split_14bit(parameter), split_14bit(value))
}
