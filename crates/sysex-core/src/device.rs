//! Known device families and their identity-reply classification.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::frame::{is_identity_reply, ModelId, IDENTITY_FAMILY_OFFSET};

/// Device families answering identity requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum DeviceKind {
    /// GO:KEYS (family code `0x3C`).
    GoKeys,
    /// GO:PIANO (family code `0x3D`).
    GoPiano,
}

impl DeviceKind {
    /// Every known family, in family-code order.
    pub const ALL: [Self; 2] = [Self::GoKeys, Self::GoPiano];

    /// Classifies an identity-reply family code.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownDevice`] for any code without a known family.
    pub fn from_family_code(code: u8) -> Result<Self> {
        match code {
            0x3C => Ok(Self::GoKeys),
            0x3D => Ok(Self::GoPiano),
            other => Err(Error::UnknownDevice(other)),
        }
    }

    /// Classifies a complete identity-reply frame.
    ///
    /// Returns `None` when `frame` is not an identity reply at all.
    #[must_use]
    pub fn from_identity_reply(frame: &[u8]) -> Option<Result<Self>> {
        if !is_identity_reply(frame) {
            return None;
        }
        let code = frame.get(IDENTITY_FAMILY_OFFSET).copied().unwrap_or_default();
        Some(Self::from_family_code(code))
    }

    /// Family code carried in identity replies.
    #[must_use]
    pub const fn family_code(self) -> u8 {
        match self {
            Self::GoKeys => 0x3C,
            Self::GoPiano => 0x3D,
        }
    }

    /// Model id that addresses this family's register map.
    #[must_use]
    pub const fn model_id(self) -> ModelId {
        ModelId::from_bytes([0x00, 0x00, 0x00, self.family_code()])
    }

    /// Short code used on the command line.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::GoKeys => "GK",
            Self::GoPiano => "GP",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GoKeys => "GO:KEYS",
            Self::GoPiano => "GO:PIANO",
        })
    }
}

impl FromStr for DeviceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown model `{s}`, expected GK or GP"))
    }
}
