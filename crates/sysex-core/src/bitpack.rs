//! 7-bit data packing, address splitting, and the Roland checksum.
//!
//! MIDI data bytes are restricted to `0x00..=0x7F`, so sizes and addresses
//! travel as four 7-bit groups. Only 28 significant bits survive packing;
//! anything above bit 27 is dropped by [`pack_to_7bit`].

/// Largest value that survives a pack/unpack round trip.
pub const MAX_PACKED_VALUE: u32 = (1 << 28) - 1;

/// Spreads the four 7-bit groups of `x` into one byte each, most significant
/// group first, so every byte of the result is `<= 0x7F`.
#[must_use]
pub const fn pack_to_7bit(x: u32) -> u32 {
    let group1 = (x & 0x0FE0_0000) << 3;
    let group2 = (x & 0x001F_C000) << 2;
    let group3 = (x & 0x0000_3F80) << 1;
    let group4 = x & 0x0000_007F;
    group1 | group2 | group3 | group4
}

/// Concatenates the low 7 bits of each byte of `x` into a 28-bit value.
///
/// Inverse of [`pack_to_7bit`] for inputs up to [`MAX_PACKED_VALUE`].
#[must_use]
pub const fn unpack_from_7bit(x: u32) -> u32 {
    let group1 = (x & 0x7F00_0000) >> 3;
    let group2 = (x & 0x007F_0000) >> 2;
    let group3 = (x & 0x0000_7F00) >> 1;
    let group4 = x & 0x0000_007F;
    group1 | group2 | group3 | group4
}

/// Splits a register address into its big-endian byte sequence.
#[must_use]
pub const fn address_to_bytes(address: u32) -> [u8; 4] {
    address.to_be_bytes()
}

/// Computes the checksum that makes `address + payload + checksum` sum to a
/// multiple of 128.
#[must_use]
pub fn checksum(address_bytes: &[u8], payload_bytes: &[u8]) -> u8 {
    let sum = address_bytes
        .iter()
        .chain(payload_bytes)
        .fold(0u32, |acc, byte| acc + u32::from(*byte));
    ((128 - sum % 128) % 128) as u8
}

/// Offsets a 7-bit packed address by `delta` bytes in the unpacked domain.
#[must_use]
pub const fn offset_packed_address(address: u32, delta: u32) -> u32 {
    pack_to_7bit(unpack_from_7bit(address) + delta)
}
