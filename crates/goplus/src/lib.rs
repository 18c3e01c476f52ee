//! GO:KEYS and GO:PIANO sound management over SysEx.

#[cfg(feature = "cli")]
use tracing_subscriber as _;

/// Command-line parsing.
pub mod cli;
/// Control Change, RPN, and NRPN messages.
pub mod channel;
/// Device operations generic over any transport.
pub mod commands;
/// Register tables and address constants.
pub mod tables;

/// MIDI port transport.
#[cfg(feature = "cli")]
pub mod midi;

pub use commands::{Models, PartSettings, PatchInfo, PatchSelection, Session, Table, ZoneSettings};

#[cfg(test)]
use rstest as _;
