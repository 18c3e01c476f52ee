//! Register-map codec and SysEx request/response engine for Roland-style
//! MIDI devices.

/// 7-bit slicing of packed addresses and sizes, plus the frame checksum.
pub mod bitpack;
pub use bitpack::{
    address_to_bytes, checksum, offset_packed_address, pack_to_7bit, unpack_from_7bit,
    MAX_PACKED_VALUE,
};

mod error;
pub use error::{Error, Result, TransportError};

/// Field descriptors and validated register block layouts.
pub mod model;
pub use model::{
    FieldDescriptor, FieldEncoding, FieldLayout, InitValue, RegisterModel, RESERVED_FIELD_NAME,
    TEXT_FIELD_BYTES,
};

/// Bytes to named values and back.
pub mod codec;
pub use codec::{decode, encode, FieldValue, RegisterBlock};

/// RQ1, DT1, and identity frame construction and inspection.
pub mod frame;
pub use frame::{
    build_read_request, build_write_command, frame_address, frame_payload, is_identity_reply,
    is_reply_to, verify_checksum, CommandType, ModelId, IDENTITY_REPLY_PREFIX, IDENTITY_REQUEST,
};

/// Part, zone, and patch base addresses.
pub mod address;
pub use address::{AddressLayout, Unit};

/// Device families reported by identity replies.
pub mod device;
pub use device::DeviceKind;

/// Message-channel contract.
pub mod transport;
pub use transport::{MessageHandler, Transport};

/// Blocking one-at-a-time transaction driver.
pub mod engine;
pub use engine::{
    EngineConfig, Transaction, TransactionEngine, TransactionState, DEFAULT_REPLY_TIMEOUT,
};

/// In-memory device for exercising the engine without hardware.
pub mod simulator;
pub use simulator::{SimulatedDevice, SimulatorBehavior};

#[cfg(test)]
use proptest as _;
