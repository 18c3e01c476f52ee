//! Base-address arithmetic for repeated register blocks.

use std::fmt;

use crate::bitpack::{pack_to_7bit, unpack_from_7bit};
use crate::error::{Error, Result};

/// Repeated entity in the device's register space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Unit {
    /// Performance part.
    Part,
    /// Keyboard zone.
    Zone,
    /// Temporary patch slot belonging to a part.
    Patch,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Part => "part",
            Self::Zone => "zone",
            Self::Patch => "patch",
        })
    }
}

/// Base addresses and strides of the part, zone, and patch blocks.
///
/// Part and zone strides are applied directly to the packed base. The patch
/// stride crosses 7-bit byte boundaries, so patch addresses are computed in
/// the unpacked domain and packed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct AddressLayout {
    /// Address of part 1.
    pub part_base: u32,
    /// Distance between consecutive parts.
    pub part_stride: u32,
    /// Address of zone 1.
    pub zone_base: u32,
    /// Distance between consecutive zones.
    pub zone_stride: u32,
    /// Packed address of patch slot 1.
    pub patch_base: u32,
    /// Packed distance between consecutive patch slots.
    pub patch_stride: u32,
    /// Number of parts, zones, and patch slots.
    pub unit_count: u32,
}

impl AddressLayout {
    /// Address of part `n` (1-based).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidUnitIndex`] when `n` is outside `1..=unit_count`.
    pub fn part_address(&self, n: u32) -> Result<u32> {
        let index = self.check(Unit::Part, n)?;
        Ok(self.part_base + index * self.part_stride)
    }

    /// Address of zone `n` (1-based).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidUnitIndex`] when `n` is outside `1..=unit_count`.
    pub fn zone_address(&self, n: u32) -> Result<u32> {
        let index = self.check(Unit::Zone, n)?;
        Ok(self.zone_base + index * self.zone_stride)
    }

    /// Address of the patch slot belonging to part `n` (1-based).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidUnitIndex`] when `n` is outside `1..=unit_count`.
    pub fn patch_address(&self, n: u32) -> Result<u32> {
        let index = self.check(Unit::Patch, n)?;
        Ok(pack_to_7bit(
            unpack_from_7bit(self.patch_base) + index * unpack_from_7bit(self.patch_stride),
        ))
    }

    /// Address of unit `n` of the given kind.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidUnitIndex`] when `n` is outside `1..=unit_count`.
    pub fn address_of(&self, unit: Unit, n: u32) -> Result<u32> {
        match unit {
            Unit::Part => self.part_address(n),
            Unit::Zone => self.zone_address(n),
            Unit::Patch => self.patch_address(n),
        }
    }

    fn check(&self, unit: Unit, n: u32) -> Result<u32> {
        if n == 0 || n > self.unit_count {
            return Err(Error::InvalidUnitIndex {
                unit,
                index: n,
                count: self.unit_count,
            });
        }
        Ok(n - 1)
    }
}
