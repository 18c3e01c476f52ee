//! Declarative register-block layouts.
//!
//! A [`RegisterModel`] is built once from a static descriptor table and then
//! shared by every decode/encode of that block. Descriptor addresses are kept
//! in their 7-bit packed form, as device documentation lists them, and are
//! unpacked into byte offsets when the model is validated.

use crate::bitpack::unpack_from_7bit;
use crate::error::{Error, Result};

/// Name carried by layout-only fields that are never exposed to callers.
pub const RESERVED_FIELD_NAME: &str = "(reserve)";

/// Byte width of fixed-length ASCII text fields.
pub const TEXT_FIELD_BYTES: usize = 12;

/// Value a field takes when nothing was decoded or set for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum InitValue {
    /// Numeric default, before bias is applied.
    Int(i32),
    /// Text default, exactly [`TEXT_FIELD_BYTES`] long for well-formed models.
    Text(&'static str),
}

/// Closed set of byte layouts a field can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FieldEncoding {
    /// One data byte holding the biased value.
    Byte,
    /// Two bytes, one nibble each, high nibble first.
    NibblePair,
    /// Four bytes, one nibble each, most significant nibble first.
    NibbleQuad,
    /// Fixed-length ASCII text.
    Text,
}

impl FieldEncoding {
    /// Resolves a descriptor's `(byte_width, encoding_width)` pair.
    ///
    /// `None` means the pair has no defined transform.
    #[must_use]
    pub const fn from_layout(byte_width: u8, encoding_width: u8) -> Option<Self> {
        match (byte_width, encoding_width) {
            (1, 1..=7) => Some(Self::Byte),
            (2, 4) => Some(Self::NibblePair),
            (4, 4) => Some(Self::NibbleQuad),
            (12, 7) => Some(Self::Text),
            _ => None,
        }
    }

    /// Number of register bytes the encoding occupies.
    #[must_use]
    pub const fn byte_width(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::NibblePair => 2,
            Self::NibbleQuad => 4,
            Self::Text => TEXT_FIELD_BYTES,
        }
    }

    /// Largest biased value the layout can carry.
    ///
    /// A single byte travels as one MIDI data byte, so its high bit stays
    /// clear. `encoding_width` counts the bits of the value's span, not of
    /// the biased byte: a 3-bit octave shift biased by 64 encodes as 61..=67.
    #[must_use]
    pub const fn max_encoded(self) -> i64 {
        match self {
            Self::Byte => 0x7F,
            Self::NibblePair => 0xFF,
            Self::NibbleQuad => 0xFFFF,
            Self::Text => 0,
        }
    }

    /// Returns `true` for the numeric layouts.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        !matches!(self, Self::Text)
    }
}

/// Immutable description of one register field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldDescriptor {
    /// Offset from the block base, 7-bit packed.
    pub address: u16,
    /// Bytes occupied in the register block.
    pub byte_width: u8,
    /// Significant bits per byte (or of the whole value for single bytes).
    pub encoding_width: u8,
    /// Subtracted on decode, added on encode.
    pub bias: i32,
    /// Default value.
    pub init: InitValue,
    /// Inclusive lower bound (character code for text).
    pub min: i32,
    /// Inclusive upper bound (character code for text).
    pub max: i32,
    /// Parameter name, or [`RESERVED_FIELD_NAME`].
    pub name: &'static str,
}

impl FieldDescriptor {
    /// Describes a numeric field.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub const fn numeric(
        address: u16,
        byte_width: u8,
        encoding_width: u8,
        bias: i32,
        init: i32,
        min: i32,
        max: i32,
        name: &'static str,
    ) -> Self {
        Self {
            address,
            byte_width,
            encoding_width,
            bias,
            init: InitValue::Int(init),
            min,
            max,
            name,
        }
    }

    /// Describes a 12-byte ASCII text field.
    #[must_use]
    pub const fn text(
        address: u16,
        init: &'static str,
        min: i32,
        max: i32,
        name: &'static str,
    ) -> Self {
        Self {
            address,
            byte_width: 12,
            encoding_width: 7,
            bias: 0,
            init: InitValue::Text(init),
            min,
            max,
            name,
        }
    }

    /// Unpacked byte offset of the field within its block.
    #[must_use]
    pub const fn offset(&self) -> usize {
        unpack_from_7bit(self.address as u32) as usize
    }

    /// Returns `true` for layout-only fields.
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        self.name == RESERVED_FIELD_NAME
    }

    /// Resolves the field's byte layout.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFieldEncoding`] when the width pair is undefined.
    pub fn encoding(&self) -> Result<FieldEncoding> {
        FieldEncoding::from_layout(self.byte_width, self.encoding_width).ok_or_else(|| {
            Error::UnsupportedFieldEncoding {
                field: self.name.to_string(),
                byte_width: self.byte_width,
                encoding_width: self.encoding_width,
            }
        })
    }
}

/// A validated descriptor with its resolved layout and offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldLayout {
    descriptor: FieldDescriptor,
    encoding: FieldEncoding,
    offset: usize,
}

impl FieldLayout {
    /// Template descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    /// Resolved byte layout.
    #[must_use]
    pub const fn encoding(&self) -> FieldEncoding {
        self.encoding
    }

    /// Unpacked byte offset within the block.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Byte range occupied within the block.
    #[must_use]
    pub const fn span(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.encoding.byte_width()
    }

    /// Field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.descriptor.name
    }
}

/// Ordered, validated layout of one contiguous register block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RegisterModel {
    name: String,
    fields: Vec<FieldLayout>,
    byte_size: usize,
}

impl RegisterModel {
    /// Validates `descriptors` and builds a model sorted by offset.
    ///
    /// Every descriptor must use a supported encoding and the fields must
    /// tile the block exactly.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFieldEncoding`] or [`Error::FieldOverlap`].
    pub fn new(name: impl Into<String>, descriptors: &[FieldDescriptor]) -> Result<Self> {
        let mut fields = descriptors
            .iter()
            .map(|descriptor| {
                Ok(FieldLayout {
                    descriptor: *descriptor,
                    encoding: descriptor.encoding()?,
                    offset: descriptor.offset(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        fields.sort_by_key(FieldLayout::offset);

        let byte_size = fields.iter().map(|f| f.encoding.byte_width()).sum();
        let mut claimed = vec![false; byte_size];
        for field in &fields {
            let overlap = || Error::FieldOverlap {
                field: field.name().to_string(),
                offset: field.offset,
            };
            let slots = claimed.get_mut(field.span()).ok_or_else(overlap)?;
            if slots.iter().any(|taken| *taken) {
                return Err(overlap());
            }
            slots.fill(true);
        }

        Ok(Self {
            name: name.into(),
            fields,
            byte_size,
        })
    }

    /// Block name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total number of register bytes in the block.
    #[must_use]
    pub const fn byte_size(&self) -> usize {
        self.byte_size
    }

    /// Fields in ascending offset order, reserved ones included.
    #[must_use]
    pub fn fields(&self) -> &[FieldLayout] {
        &self.fields
    }

    /// Looks up a visible (non-reserved) field by name.
    #[must_use]
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|f| !f.descriptor.is_reserved() && f.name() == name)
    }

    /// Names of the visible fields in offset order.
    pub fn visible_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|f| !f.descriptor.is_reserved())
            .map(FieldLayout::name)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{FieldDescriptor, FieldEncoding, RegisterModel, RESERVED_FIELD_NAME};
    use crate::Error;

    const SAMPLE: &[FieldDescriptor] = &[
        FieldDescriptor::numeric(0x0002, 2, 4, 0, 128, 0, 255, "Wide"),
        FieldDescriptor::numeric(0x0000, 1, 7, 0, 64, 0, 127, "Level"),
        FieldDescriptor::numeric(0x0001, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    ];

    #[rstest]
    #[case(1, 1, Some(FieldEncoding::Byte))]
    #[case(1, 7, Some(FieldEncoding::Byte))]
    #[case(2, 4, Some(FieldEncoding::NibblePair))]
    #[case(4, 4, Some(FieldEncoding::NibbleQuad))]
    #[case(12, 7, Some(FieldEncoding::Text))]
    #[case(2, 7, None)]
    #[case(3, 4, None)]
    #[case(12, 4, None)]
    #[case(1, 0, None)]
    fn layout_table_is_closed(
        #[case] byte_width: u8,
        #[case] encoding_width: u8,
        #[case] expected: Option<FieldEncoding>,
    ) {
        assert_eq!(FieldEncoding::from_layout(byte_width, encoding_width), expected);
    }

    #[test]
    fn model_sorts_fields_by_offset_and_sums_widths() {
        let model = RegisterModel::new("sample", SAMPLE).expect("valid model");
        let offsets: Vec<_> = model.fields().iter().map(|f| f.offset()).collect();
        assert_eq!(offsets, vec![0, 1, 2]);
        assert_eq!(model.byte_size(), 4);
        assert_eq!(model.name(), "sample");
    }

    #[test]
    fn reserved_fields_are_not_addressable_by_name() {
        let model = RegisterModel::new("sample", SAMPLE).expect("valid model");
        assert_eq!(model.field_index("Level"), Some(0));
        assert_eq!(model.field_index(RESERVED_FIELD_NAME), None);
        assert_eq!(model.visible_names().collect::<Vec<_>>(), vec!["Level", "Wide"]);
    }

    #[test]
    fn packed_addresses_are_unpacked_into_offsets() {
        let fields: Vec<_> = (0u16..130)
            .map(|i| {
                let packed = ((i / 128) << 8) | (i % 128);
                FieldDescriptor::numeric(packed, 1, 7, 0, 0, 0, 127, "Byte")
            })
            .collect();
        let model = RegisterModel::new("long", &fields).expect("valid model");
        assert_eq!(model.byte_size(), 130);
        assert_eq!(model.fields()[128].offset(), 128);
        assert_eq!(model.fields()[128].descriptor().address, 0x0100);
    }

    #[test]
    fn unsupported_encoding_is_rejected() {
        let fields = [FieldDescriptor::numeric(0, 2, 7, 0, 0, 0, 127, "Odd")];
        let error = RegisterModel::new("odd", &fields).expect_err("2x7 has no transform");
        assert_eq!(
            error,
            Error::UnsupportedFieldEncoding {
                field: "Odd".to_string(),
                byte_width: 2,
                encoding_width: 7,
            }
        );
    }

    #[test]
    fn overlapping_fields_are_rejected() {
        let fields = [
            FieldDescriptor::numeric(0, 2, 4, 0, 0, 0, 255, "A"),
            FieldDescriptor::numeric(1, 1, 7, 0, 0, 0, 127, "B"),
        ];
        let error = RegisterModel::new("overlap", &fields).expect_err("fields overlap");
        assert!(matches!(error, Error::FieldOverlap { offset: 1, .. }));
    }

    #[test]
    fn gaps_are_rejected_as_running_past_the_block() {
        let fields = [
            FieldDescriptor::numeric(0, 1, 7, 0, 0, 0, 127, "A"),
            FieldDescriptor::numeric(2, 1, 7, 0, 0, 0, 127, "B"),
        ];
        let error = RegisterModel::new("gap", &fields).expect_err("offset 1 is uncovered");
        assert!(matches!(error, Error::FieldOverlap { offset: 2, .. }));
    }
}
