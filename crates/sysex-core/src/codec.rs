//! Bidirectional transform between raw register bytes and named values.

use std::fmt;

use crate::error::{Error, Result};
use crate::model::{FieldEncoding, FieldLayout, InitValue, RegisterModel};

/// Concrete value of one field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FieldValue {
    /// Numeric value with bias removed.
    Int(i32),
    /// Text value.
    Text(String),
}

impl FieldValue {
    /// Returns the numeric value, if this is one.
    #[must_use]
    pub const fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    /// Returns the text value, if this is one.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Text(text) => Some(text),
        }
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<InitValue> for FieldValue {
    fn from(value: InitValue) -> Self {
        match value {
            InitValue::Int(value) => Self::Int(value),
            InitValue::Text(text) => Self::Text(text.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// One instance of a [`RegisterModel`]: the model plus a value slot per field.
///
/// Empty slots fall back to the descriptor's init value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterBlock<'m> {
    model: &'m RegisterModel,
    values: Vec<Option<FieldValue>>,
}

impl<'m> RegisterBlock<'m> {
    /// Creates a block with every field at its init value.
    #[must_use]
    pub fn new(model: &'m RegisterModel) -> Self {
        Self {
            model,
            values: vec![None; model.fields().len()],
        }
    }

    /// Model this block instantiates.
    #[must_use]
    pub const fn model(&self) -> &'m RegisterModel {
        self.model
    }

    /// Current value of a visible field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<FieldValue> {
        self.model.field_index(name).map(|index| self.value_at(index))
    }

    /// Current value of a visible numeric field.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownField`] or [`Error::ValueKindMismatch`].
    pub fn get_int(&self, name: &str) -> Result<i32> {
        self.get(name)
            .ok_or_else(|| Error::UnknownField(name.to_string()))?
            .as_int()
            .ok_or_else(|| Error::ValueKindMismatch {
                field: name.to_string(),
            })
    }

    /// Current value of a visible text field.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownField`] or [`Error::ValueKindMismatch`].
    pub fn get_text(&self, name: &str) -> Result<String> {
        match self.get(name) {
            Some(FieldValue::Text(text)) => Ok(text),
            Some(FieldValue::Int(_)) => Err(Error::ValueKindMismatch {
                field: name.to_string(),
            }),
            None => Err(Error::UnknownField(name.to_string())),
        }
    }

    /// Sets a visible field, checking kind and declared bounds.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownField`], [`Error::ValueKindMismatch`],
    /// [`Error::ValueOutOfRange`], or [`Error::TextLength`].
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        let index = self
            .model
            .field_index(name)
            .ok_or_else(|| Error::UnknownField(name.to_string()))?;
        let value = value.into();
        check_bounds(&self.model.fields()[index], &value)?;
        self.values[index] = Some(value);
        Ok(())
    }

    /// Visible `(name, value)` pairs in offset order.
    pub fn visible_values(&self) -> impl Iterator<Item = (&'static str, FieldValue)> + '_ {
        self.model
            .fields()
            .iter()
            .enumerate()
            .filter(|(_, field)| !field.descriptor().is_reserved())
            .map(|(index, field)| (field.name(), self.value_at(index)))
    }

    fn value_at(&self, index: usize) -> FieldValue {
        self.values[index]
            .clone()
            .unwrap_or_else(|| self.model.fields()[index].descriptor().init.into())
    }
}

fn check_bounds(field: &FieldLayout, value: &FieldValue) -> Result<()> {
    let descriptor = field.descriptor();
    let out_of_range = |value: i32| Error::ValueOutOfRange {
        field: descriptor.name.to_string(),
        value,
        min: descriptor.min,
        max: descriptor.max,
    };
    match (field.encoding(), value) {
        (FieldEncoding::Text, FieldValue::Text(text)) => {
            let capacity = field.encoding().byte_width();
            if text.len() != capacity {
                return Err(Error::TextLength {
                    field: descriptor.name.to_string(),
                    length: text.len(),
                    capacity,
                });
            }
            match text
                .chars()
                .map(|c| i32::try_from(u32::from(c)).unwrap_or(i32::MAX))
                .find(|code| !(descriptor.min..=descriptor.max).contains(code))
            {
                Some(code) => Err(out_of_range(code)),
                None => Ok(()),
            }
        }
        (encoding, FieldValue::Int(value)) if encoding.is_numeric() => {
            if (descriptor.min..=descriptor.max).contains(value) {
                Ok(())
            } else {
                Err(out_of_range(*value))
            }
        }
        _ => Err(Error::ValueKindMismatch {
            field: descriptor.name.to_string(),
        }),
    }
}

/// Decodes a register buffer into a block of `model`.
///
/// # Errors
///
/// [`Error::LengthMismatch`] when `data` is not exactly the model's size, or
/// [`Error::InvalidText`] when a text field holds non-ASCII bytes.
pub fn decode<'m>(data: &[u8], model: &'m RegisterModel) -> Result<RegisterBlock<'m>> {
    if data.len() != model.byte_size() {
        return Err(Error::LengthMismatch {
            model: model.name().to_string(),
            expected: model.byte_size(),
            actual: data.len(),
        });
    }

    let values = model
        .fields()
        .iter()
        .map(|field| decode_field(field, &data[field.span()]).map(Some))
        .collect::<Result<Vec<_>>>()?;

    Ok(RegisterBlock { model, values })
}

fn decode_field(field: &FieldLayout, bytes: &[u8]) -> Result<FieldValue> {
    let bias = field.descriptor().bias;
    let value = match field.encoding() {
        FieldEncoding::Byte => i32::from(bytes[0]) - bias,
        FieldEncoding::NibblePair | FieldEncoding::NibbleQuad => {
            bytes
                .iter()
                .fold(0i32, |acc, byte| (acc << 4) | i32::from(byte & 0x0F))
                - bias
        }
        FieldEncoding::Text => {
            if !bytes.is_ascii() {
                return Err(Error::InvalidText {
                    field: field.name().to_string(),
                });
            }
            return Ok(FieldValue::Text(
                bytes.iter().map(|byte| char::from(*byte)).collect(),
            ));
        }
    };
    Ok(FieldValue::Int(value))
}

/// Encodes a block back into its register bytes.
///
/// Fields without a set value use their init value.
///
/// # Errors
///
/// [`Error::EncodedValueOverflow`], [`Error::ValueKindMismatch`],
/// [`Error::InvalidText`], [`Error::TextLength`], or [`Error::MissingValue`]
/// when a byte position is left without a value.
pub fn encode(block: &RegisterBlock<'_>) -> Result<Vec<u8>> {
    let model = block.model();
    let mut bytes: Vec<Option<u8>> = vec![None; model.byte_size()];

    for (index, field) in model.fields().iter().enumerate() {
        let value = block.value_at(index);
        let slots = &mut bytes[field.span()];
        match (field.encoding(), &value) {
            (FieldEncoding::Text, FieldValue::Text(text)) => {
                if !text.is_ascii() {
                    return Err(Error::InvalidText {
                        field: field.name().to_string(),
                    });
                }
                if text.len() > slots.len() {
                    return Err(Error::TextLength {
                        field: field.name().to_string(),
                        length: text.len(),
                        capacity: slots.len(),
                    });
                }
                for (slot, byte) in slots.iter_mut().zip(text.bytes()) {
                    *slot = Some(byte);
                }
            }
            (encoding, FieldValue::Int(value)) if encoding.is_numeric() => {
                let encoded = i64::from(*value) + i64::from(field.descriptor().bias);
                if !(0..=encoding.max_encoded()).contains(&encoded) {
                    return Err(Error::EncodedValueOverflow {
                        field: field.name().to_string(),
                        encoded,
                    });
                }
                let encoded = encoded as u16;
                match encoding {
                    FieldEncoding::Byte => slots[0] = Some(encoded as u8),
                    _ => {
                        let last = slots.len() - 1;
                        for (position, slot) in slots.iter_mut().enumerate() {
                            let shift = 4 * (last - position);
                            *slot = Some(((encoded >> shift) & 0x0F) as u8);
                        }
                    }
                }
            }
            _ => {
                return Err(Error::ValueKindMismatch {
                    field: field.name().to_string(),
                })
            }
        }
    }

    bytes
        .into_iter()
        .enumerate()
        .map(|(offset, byte)| byte.ok_or(Error::MissingValue { offset }))
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::{decode, encode, FieldValue, RegisterBlock};
    use crate::model::{FieldDescriptor, FieldEncoding, RegisterModel, RESERVED_FIELD_NAME};
    use crate::Error;

    const MIXED: &[FieldDescriptor] = &[
        FieldDescriptor::text(0x0000, "INIT PATCH  ", 32, 127, "Name"),
        FieldDescriptor::numeric(0x000C, 1, 7, 64, 0, -48, 48, "Coarse"),
        FieldDescriptor::numeric(0x000D, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
        FieldDescriptor::numeric(0x000E, 2, 4, 0, 128, 0, 255, "Pair"),
        FieldDescriptor::numeric(0x0010, 4, 4, 1024, 0, -1000, 1000, "Tune"),
    ];

    fn mixed() -> RegisterModel {
        RegisterModel::new("mixed", MIXED).expect("valid model")
    }

    fn single(descriptor: FieldDescriptor) -> RegisterModel {
        RegisterModel::new("single", &[descriptor]).expect("valid model")
    }

    #[test]
    fn nibble_pair_without_bias_decodes_and_reencodes() {
        let model = single(FieldDescriptor::numeric(0, 2, 4, 0, 0, 0, 255, "Pair"));
        let block = decode(&[0x00, 0x05], &model).expect("decodes");
        assert_eq!(block.get("Pair"), Some(FieldValue::Int(5)));
        assert_eq!(encode(&block).expect("encodes"), vec![0x00, 0x05]);
    }

    #[test]
    fn nibble_pair_puts_high_nibble_first() {
        let model = single(FieldDescriptor::numeric(0, 2, 4, 0, 0, 0, 255, "Pair"));
        let mut block = RegisterBlock::new(&model);
        block.set("Pair", 0xA7).expect("in range");
        assert_eq!(encode(&block).expect("encodes"), vec![0x0A, 0x07]);
    }

    #[test]
    fn nibble_quad_with_bias_decodes_to_unbiased_value() {
        let model = single(FieldDescriptor::numeric(0, 4, 4, 64, 0, -64, 63, "Quad"));
        let block = decode(&[0x00, 0x00, 0x04, 0x04], &model).expect("decodes");
        assert_eq!(block.get_int("Quad").expect("numeric"), 4);
        assert_eq!(encode(&block).expect("encodes"), vec![0x00, 0x00, 0x04, 0x04]);
    }

    #[test]
    fn nibble_quad_emits_most_significant_nibble_first() {
        let model = single(FieldDescriptor::numeric(0, 4, 4, 1024, 0, -1000, 1000, "Tune"));
        let mut block = RegisterBlock::new(&model);
        block.set("Tune", 1000).expect("in range");
        // 1000 + 1024 = 0x07E8
        assert_eq!(encode(&block).expect("encodes"), vec![0x00, 0x07, 0x0E, 0x08]);
    }

    #[test]
    fn decode_ignores_high_nibbles_of_nibble_bytes() {
        let model = single(FieldDescriptor::numeric(0, 2, 4, 0, 0, 0, 255, "Pair"));
        let block = decode(&[0x71, 0x72], &model).expect("decodes");
        assert_eq!(block.get_int("Pair").expect("numeric"), 0x12);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(64, 64)]
    #[case(-3, 64)]
    #[case(3, 64)]
    #[case(100, 0)]
    fn init_plus_bias_decodes_to_init(#[case] init: i32, #[case] bias: i32) {
        let model = single(FieldDescriptor::numeric(0, 1, 7, bias, init, -64, 127, "Byte"));
        let raw = u8::try_from(init + bias).expect("fits a byte");
        let block = decode(&[raw], &model).expect("decodes");
        assert_eq!(block.get_int("Byte").expect("numeric"), init);
    }

    #[test]
    fn fresh_block_encodes_init_values() {
        let model = mixed();
        let block = RegisterBlock::new(&model);
        let bytes = encode(&block).expect("encodes");
        assert_eq!(&bytes[..12], b"INIT PATCH  ");
        assert_eq!(bytes[12], 64);
        assert_eq!(bytes[13], 0);
        assert_eq!(&bytes[14..16], &[0x08, 0x00]);
        assert_eq!(&bytes[16..20], &[0x00, 0x04, 0x00, 0x00]);
    }

    #[test]
    fn unset_fields_keep_decoded_values() {
        let model = mixed();
        let mut raw = b"Grand Piano ".to_vec();
        raw.extend_from_slice(&[70, 0x55, 0x01, 0x02, 0x00, 0x04, 0x00, 0x0A]);
        let mut block = decode(&raw, &model).expect("decodes");
        block.set("Coarse", -4).expect("in range");

        let bytes = encode(&block).expect("encodes");
        assert_eq!(bytes[12], 60);
        raw[12] = 60;
        assert_eq!(bytes, raw);
    }

    #[test]
    fn visible_values_skip_reserved_fields() {
        let model = mixed();
        let block = RegisterBlock::new(&model);
        let names: Vec<_> = block.visible_values().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Name", "Coarse", "Pair", "Tune"]);
        assert_eq!(block.get(RESERVED_FIELD_NAME), None);
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let model = mixed();
        let error = decode(&[0; 3], &model).expect_err("too short");
        assert_eq!(
            error,
            Error::LengthMismatch {
                model: "mixed".to_string(),
                expected: 20,
                actual: 3,
            }
        );
    }

    #[test]
    fn decode_rejects_non_ascii_text() {
        let model = mixed();
        let mut raw = vec![0u8; 20];
        raw[0] = 0xC3;
        let error = decode(&raw, &model).expect_err("not ascii");
        assert!(matches!(error, Error::InvalidText { .. }));
    }

    #[test]
    fn set_checks_bounds_and_kind() {
        let model = mixed();
        let mut block = RegisterBlock::new(&model);
        assert!(matches!(
            block.set("Coarse", 49),
            Err(Error::ValueOutOfRange { value: 49, min: -48, max: 48, .. })
        ));
        assert!(matches!(
            block.set("Coarse", "loud"),
            Err(Error::ValueKindMismatch { .. })
        ));
        assert!(matches!(block.set("Name", 3), Err(Error::ValueKindMismatch { .. })));
        assert!(matches!(
            block.set("Name", "short"),
            Err(Error::TextLength { length: 5, capacity: 12, .. })
        ));
        assert!(matches!(
            block.set("Name", "tab\there     "),
            Err(Error::TextLength { .. })
        ));
        assert!(matches!(
            block.set("Name", "tab\there    "),
            Err(Error::ValueOutOfRange { value: 9, .. })
        ));
        assert!(matches!(
            block.set(RESERVED_FIELD_NAME, 0),
            Err(Error::UnknownField(_))
        ));
        assert!(matches!(block.set("Missing", 0), Err(Error::UnknownField(_))));
    }

    #[test]
    fn set_text_round_trips() {
        let model = mixed();
        let mut block = RegisterBlock::new(&model);
        block.set("Name", "Bright EP   ").expect("valid name");
        let bytes = encode(&block).expect("encodes");
        let decoded = decode(&bytes, &model).expect("decodes");
        assert_eq!(decoded.get_text("Name").expect("text"), "Bright EP   ");
    }

    #[test]
    fn short_text_init_leaves_bytes_undetermined() {
        let model = single(FieldDescriptor::text(0, "SHORT", 32, 127, "Name"));
        let error = encode(&RegisterBlock::new(&model)).expect_err("5 of 12 bytes set");
        assert_eq!(error, Error::MissingValue { offset: 5 });
    }

    #[test]
    fn encode_rejects_values_outside_layout() {
        // Bounds wider than the layout can carry, as a malformed table would declare.
        let model = single(FieldDescriptor::numeric(0, 1, 7, 0, 128, 0, 255, "Byte"));
        let error = encode(&RegisterBlock::new(&model)).expect_err("128 is a status byte");
        assert_eq!(
            error,
            Error::EncodedValueOverflow {
                field: "Byte".to_string(),
                encoded: 128,
            }
        );

        let model = single(FieldDescriptor::numeric(0, 1, 7, 64, 0, -64, 127, "Biased"));
        let mut block = RegisterBlock::new(&model);
        block.set("Biased", 63).expect("in declared range");
        assert_eq!(encode(&block).expect("encodes"), vec![0x7F]);
        block.set("Biased", 64).expect("in declared range");
        assert!(matches!(
            encode(&block),
            Err(Error::EncodedValueOverflow { encoded: 128, .. })
        ));

        let model = single(FieldDescriptor::numeric(0, 1, 7, 0, -1, -1, 0, "Neg"));
        assert!(matches!(
            encode(&RegisterBlock::new(&model)),
            Err(Error::EncodedValueOverflow { encoded: -1, .. })
        ));
    }

    fn legal_buffer(model: &RegisterModel) -> impl Strategy<Value = Vec<u8>> {
        let strategies: Vec<BoxedStrategy<u8>> = model
            .fields()
            .iter()
            .flat_map(|field| {
                let byte = match field.encoding() {
                    FieldEncoding::Byte | FieldEncoding::Text => (0u8..=0x7F).boxed(),
                    FieldEncoding::NibblePair | FieldEncoding::NibbleQuad => (0u8..=0x0F).boxed(),
                };
                std::iter::repeat(byte).take(field.encoding().byte_width())
            })
            .collect();
        strategies
    }

    proptest! {
        #[test]
        fn decode_then_encode_reproduces_the_buffer(raw in legal_buffer(&mixed())) {
            let model = mixed();
            let block = decode(&raw, &model).expect("legal buffer decodes");
            prop_assert_eq!(encode(&block).expect("decoded block encodes"), raw);
        }
    }
}
