use std::time::Duration;

use thiserror::Error;

use crate::address::Unit;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by a [`Transport`](crate::Transport) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

impl TransportError {
    /// Wraps any displayable transport failure.
    pub fn new(message: impl std::fmt::Display) -> Self {
        Self(message.to_string())
    }
}

/// Codec, model, and protocol failures.
///
/// None of these are retried by the crate; the caller decides.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Decode input does not match the model's total byte size.
    #[error("register data is {actual} bytes, model `{model}` needs {expected}")]
    LengthMismatch {
        /// Model name.
        model: String,
        /// Bytes required by the model.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
    /// A descriptor declares a width/encoding pair with no defined transform.
    #[error(
        "field `{field}` uses unsupported encoding: {byte_width} bytes of {encoding_width}-bit data"
    )]
    UnsupportedFieldEncoding {
        /// Field name.
        field: String,
        /// Declared byte width.
        byte_width: u8,
        /// Declared encoding width in bits.
        encoding_width: u8,
    },
    /// Two descriptors claim the same byte, or a field runs past the block.
    #[error("field `{field}` at offset {offset:#06x} overlaps another field or the block end")]
    FieldOverlap {
        /// Field name.
        field: String,
        /// Unpacked byte offset of the field.
        offset: usize,
    },
    /// Encoding left a byte position without a value.
    #[error("no value determined for byte offset {offset:#06x}")]
    MissingValue {
        /// First undetermined byte offset.
        offset: usize,
    },
    /// Name is not a visible field of the model.
    #[error("unknown field `{0}`")]
    UnknownField(String),
    /// Integer given to a text field or the reverse.
    #[error("field `{field}` does not accept this kind of value")]
    ValueKindMismatch {
        /// Field name.
        field: String,
    },
    /// Value lies outside the descriptor's declared bounds.
    #[error("value {value} for field `{field}` is outside {min}..={max}")]
    ValueOutOfRange {
        /// Field name.
        field: String,
        /// Rejected value (character code for text fields).
        value: i32,
        /// Inclusive lower bound.
        min: i32,
        /// Inclusive upper bound.
        max: i32,
    },
    /// Biased value does not fit the field's byte layout.
    #[error("field `{field}` encodes to {encoded}, which does not fit its layout")]
    EncodedValueOverflow {
        /// Field name.
        field: String,
        /// Value after applying the bias.
        encoded: i64,
    },
    /// Text value does not fill its fixed-length field exactly.
    #[error("text for field `{field}` is {length} bytes, field holds exactly {capacity}")]
    TextLength {
        /// Field name.
        field: String,
        /// Supplied length in bytes.
        length: usize,
        /// Field width in bytes.
        capacity: usize,
    },
    /// Text field holds bytes outside ASCII.
    #[error("field `{field}` holds non-ASCII text")]
    InvalidText {
        /// Field name.
        field: String,
    },
    /// Device replied with a payload of unexpected size.
    #[error("reply carried {actual} bytes, {expected} were requested")]
    ReplyLengthMismatch {
        /// Requested byte count.
        expected: usize,
        /// Received byte count.
        actual: usize,
    },
    /// Reply checksum does not zero the address and payload sum.
    #[error("reply checksum {received:#04x} does not match computed {computed:#04x}")]
    ChecksumMismatch {
        /// Checksum byte carried by the reply.
        received: u8,
        /// Checksum computed over the reply.
        computed: u8,
    },
    /// Identity reply names a device family this crate does not know.
    #[error("unknown device family code {0:#04x}")]
    UnknownDevice(u8),
    /// No correlated reply arrived within the configured wait.
    #[error("no reply within {0:?}")]
    Timeout(Duration),
    /// Part/zone/patch index outside the layout.
    #[error("{unit} index {index} is outside 1..={count}")]
    InvalidUnitIndex {
        /// Addressed entity.
        unit: Unit,
        /// Rejected 1-based index.
        index: u32,
        /// Number of units in the layout.
        count: u32,
    },
    /// Model id string is not eight hex digits.
    #[error("invalid model id `{0}`, expected 8 hex digits")]
    InvalidModelId(String),
    /// Transport could not deliver a frame.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
