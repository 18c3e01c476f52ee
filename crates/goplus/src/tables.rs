//! GO:KEYS and GO:PIANO register map.
//!
//! Field tables describe each block's packed layout; the `*_model` functions
//! validate a table into a [`RegisterModel`] ready for the codec.

use sysex_core::{
    AddressLayout, FieldDescriptor, ModelId, RegisterModel, Result, RESERVED_FIELD_NAME,
};

/// Setup block.
pub const SETUP_ADDRESS: u32 = 0x0100_0000;
/// System common block.
pub const SYSTEM_COMMON_ADDRESS: u32 = 0x0200_0000;
/// System control block.
pub const SYSTEM_CONTROL_ADDRESS: u32 = 0x0200_4000;
/// Sound demo switch: 0 stops, `n` plays part `n`.
pub const SOUND_DEMO_SWITCH: u32 = 0x0F00_2000;
/// Writing 0 here leaves loop-mix mode.
pub const LOOPMIX_MODE_ADDRESS: u32 = 0x0100_0019;
/// Two 7-bit bytes holding the loop-mix tempo in BPM.
pub const LOOPMIX_TEMPO_ADDRESS: u32 = 0x0100_0108;
/// Any write nudges the loop-mix tempo up by one BPM.
pub const LOOPMIX_TEMPO_UP_ADDRESS: u32 = 0x0100_0504;
/// Any write nudges the loop-mix tempo down by one BPM.
pub const LOOPMIX_TEMPO_DOWN_ADDRESS: u32 = 0x0100_0503;

/// Secondary model id both GO models answer; its register map is largely
/// undocumented.
pub const AUX_MODEL_ID: ModelId = ModelId::from_bytes([0x00, 0x00, 0x00, 0x28]);

/// Temporary performance parts, zones, and patch slots.
pub const GO_LAYOUT: AddressLayout = AddressLayout {
    part_base: 0x1000_2000,
    part_stride: 0x100,
    zone_base: 0x1000_5000,
    zone_stride: 0x100,
    patch_base: 0x1100_0000,
    patch_stride: 0x0020_0000,
    unit_count: 16,
};

/// Setup block at [`SETUP_ADDRESS`].
#[rustfmt::skip]
pub const SETUP_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::numeric(0x0000, 1, 3, 0, 0, 0, 4, "SoundMode"),
    FieldDescriptor::numeric(0x0001, 1, 7, 0, 85, 0, 127, "PerformBankSelMSB(CC#0)"),
    FieldDescriptor::numeric(0x0002, 1, 7, 0, 64, 0, 127, "PerformBankSelLSB(CC#32)"),
    FieldDescriptor::numeric(0x0003, 1, 7, 0, 0, 0, 127, "PerformProgramNum(PC)"),
    FieldDescriptor::numeric(0x0004, 1, 7, 0, 87, 0, 127, "KbdPatchBankSelMSB(CC#0)"),
    FieldDescriptor::numeric(0x0005, 1, 7, 0, 73, 0, 127, "KbdPatchBankSelLSB(CC#32)"),
    FieldDescriptor::numeric(0x0006, 1, 7, 0, 0, 0, 127, "KbdPatchProgramNum(PC)"),
    FieldDescriptor::numeric(0x0007, 1, 7, 0, 86, 0, 127, "RhyPatchBankSelMSB(CC#0)"),
    FieldDescriptor::numeric(0x0008, 1, 7, 0, 65, 0, 127, "RhyPatchBankSelLSB(CC#32)"),
    FieldDescriptor::numeric(0x0009, 1, 7, 0, 0, 0, 127, "RhyPatchProgramNum(PC)"),
    FieldDescriptor::numeric(0x000A, 1, 1, 0, 1, 0, 1, "MFX1Sw"),
    FieldDescriptor::numeric(0x000B, 1, 1, 0, 1, 0, 1, "MFX2Sw"),
    FieldDescriptor::numeric(0x000C, 1, 1, 0, 1, 0, 1, "MFX3Sw"),
    FieldDescriptor::numeric(0x000D, 1, 1, 0, 1, 0, 1, "ChorusSw"),
    FieldDescriptor::numeric(0x000E, 1, 1, 0, 1, 0, 1, "ReverbSw"),
    FieldDescriptor::numeric(0x000F, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0010, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0011, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0012, 1, 4, 64, 0, -5, 6, "TransposeValue"),
    FieldDescriptor::numeric(0x0013, 1, 3, 64, 0, -3, 3, "OctaveShift"),
    FieldDescriptor::numeric(0x0014, 1, 3, 0, 0, 0, 3, "DBeamSelect"),
    FieldDescriptor::numeric(0x0015, 1, 2, 0, 0, 0, 2, "KnobSelect"),
    FieldDescriptor::numeric(0x0016, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0017, 1, 7, 0, 5, 0, 8, "Arp/PtnGrid"),
    FieldDescriptor::numeric(0x0018, 1, 7, 0, 5, 0, 9, "Arp/PtnDuration"),
    FieldDescriptor::numeric(0x0019, 1, 1, 0, 0, 0, 1, "ArpeggioSw"),
    FieldDescriptor::numeric(0x001A, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x001B, 1, 7, 0, 0, 0, 127, "ArpeggioStyle"),
    FieldDescriptor::numeric(0x001C, 1, 7, 0, 2, 0, 11, "ArpeggioMotif"),
    FieldDescriptor::numeric(0x001D, 1, 3, 64, 0, -3, 3, "ArpeggioOctaveRange"),
    FieldDescriptor::numeric(0x001E, 1, 1, 0, 0, 0, 1, "ArpeggioHold"),
    FieldDescriptor::numeric(0x001F, 1, 7, 0, 100, 0, 100, "ArpeggioAccentRate"),
    FieldDescriptor::numeric(0x0020, 1, 7, 0, 0, 0, 127, "ArpeggioVelocity"),
    FieldDescriptor::numeric(0x0021, 1, 1, 0, 0, 0, 1, "DrumPtnSw"),
    FieldDescriptor::numeric(0x0022, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0023, 2, 4, 0, 0, 0, 255, "DrumPtnStyle"),
    FieldDescriptor::numeric(0x0025, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0026, 1, 7, 0, 0, 0, 29, "DrumPtnGroupNum"),
    FieldDescriptor::numeric(0x0027, 1, 7, 0, 100, 0, 100, "DrumPtnAccentRate"),
    FieldDescriptor::numeric(0x0028, 1, 7, 0, 127, 1, 127, "DrumPtnVelocity"),
    FieldDescriptor::numeric(0x0029, 1, 1, 0, 0, 0, 1, "ChordSw"),
    FieldDescriptor::numeric(0x002A, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x002B, 1, 6, 0, 0, 0, 16, "ChordForm"),
    FieldDescriptor::numeric(0x002C, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x002D, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x002E, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x002F, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0030, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0031, 1, 1, 0, 1, 0, 1, "RolledChord"),
    FieldDescriptor::numeric(0x0032, 1, 2, 0, 0, 0, 2, "RolledChordType"),
    FieldDescriptor::numeric(0x0033, 1, 6, 0, 0, 0, 32, "ArpeggioStep"),
];

/// System common block at [`SYSTEM_COMMON_ADDRESS`].
#[rustfmt::skip]
pub const SYSTEM_COMMON_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::numeric(0x0000, 4, 4, 1024, 0, -1000, 1000, "MasterTune"),
    FieldDescriptor::numeric(0x0004, 1, 6, 64, 0, -24, 24, "MasterKeyShift"),
    FieldDescriptor::numeric(0x0005, 1, 7, 0, 127, 0, 127, "MasterLevel"),
    FieldDescriptor::numeric(0x0006, 1, 1, 0, 1, 0, 1, "ScaleTuneSw"),
    FieldDescriptor::numeric(0x0007, 1, 1, 0, 1, 0, 1, "PatchRemain"),
    FieldDescriptor::numeric(0x0008, 1, 1, 0, 1, 0, 1, "Mix/Parallel"),
    FieldDescriptor::numeric(0x0009, 1, 5, 0, 15, 0, 16, "PerformCtrlChannel"),
    FieldDescriptor::numeric(0x000A, 1, 4, 0, 0, 0, 15, "KbdPatchRx/TxChannel"),
    FieldDescriptor::numeric(0x000B, 1, 4, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x000C, 1, 7, 64, 0, -64, 63, "PatchScaleTune(C)"),
    FieldDescriptor::numeric(0x000D, 1, 7, 64, 0, -64, 63, "PatchScaleTune(C#)"),
    FieldDescriptor::numeric(0x000E, 1, 7, 64, 0, -64, 63, "PatchScaleTune(D)"),
    FieldDescriptor::numeric(0x000F, 1, 7, 64, 0, -64, 63, "PatchScaleTune(D#)"),
    FieldDescriptor::numeric(0x0010, 1, 7, 64, 0, -64, 63, "PatchScaleTune(E)"),
    FieldDescriptor::numeric(0x0011, 1, 7, 64, 0, -64, 63, "PatchScaleTune(F)"),
    FieldDescriptor::numeric(0x0012, 1, 7, 64, 0, -64, 63, "PatchScaleTune(F#)"),
    FieldDescriptor::numeric(0x0013, 1, 7, 64, 0, -64, 63, "PatchScaleTune(G)"),
    FieldDescriptor::numeric(0x0014, 1, 7, 64, 0, -64, 63, "PatchScaleTune(G#)"),
    FieldDescriptor::numeric(0x0015, 1, 7, 64, 0, -64, 63, "PatchScaleTune(A)"),
    FieldDescriptor::numeric(0x0016, 1, 7, 64, 0, -64, 63, "PatchScaleTune(A#)"),
    FieldDescriptor::numeric(0x0017, 1, 7, 64, 0, -64, 63, "PatchScaleTune(B)"),
    FieldDescriptor::numeric(0x0018, 1, 7, 0, 0, 0, 97, "SystemCtrl1Source"),
    FieldDescriptor::numeric(0x0019, 1, 7, 0, 0, 0, 97, "SystemCtrl2Source"),
    FieldDescriptor::numeric(0x001A, 1, 7, 0, 0, 0, 97, "SystemCtrl3Source"),
    FieldDescriptor::numeric(0x001B, 1, 7, 0, 0, 0, 97, "SystemCtrl4Source"),
    FieldDescriptor::numeric(0x001C, 1, 1, 0, 1, 0, 1, "ReceiveProgramChange"),
    FieldDescriptor::numeric(0x001D, 1, 1, 0, 1, 0, 1, "ReceiveBankSel"),
];

/// System control block at [`SYSTEM_CONTROL_ADDRESS`].
#[rustfmt::skip]
pub const SYSTEM_CONTROL_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::numeric(0x0000, 1, 1, 0, 1, 0, 1, "TransmitProgramChange"),
    FieldDescriptor::numeric(0x0001, 1, 1, 0, 1, 0, 1, "TransmitBankSel"),
    FieldDescriptor::numeric(0x0002, 1, 7, 0, 0, 0, 127, "KbdVelocity"),
    FieldDescriptor::numeric(0x0003, 1, 2, 0, 2, 1, 3, "KbdVelocityCurve"),
    FieldDescriptor::numeric(0x0004, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0005, 1, 3, 0, 0, 0, 1, "HoldPedalPolarity"),
    FieldDescriptor::numeric(0x0006, 1, 1, 0, 0, 0, 1, "ContinuousHoldPedal"),
    FieldDescriptor::numeric(0x0007, 1, 5, 0, 4, 0, 24, "PedalAssign"),
    FieldDescriptor::numeric(0x0008, 1, 3, 0, 0, 0, 1, "Pedal1Polarity"),
    FieldDescriptor::numeric(0x0009, 1, 4, 0, 5, 1, 10, "BeamSens"),
    FieldDescriptor::numeric(0x000A, 1, 7, 0, 0, 0, 19, "BeamAssign"),
    FieldDescriptor::numeric(0x000B, 1, 7, 0, 0, 0, 127, "BeamRangeLower"),
    FieldDescriptor::numeric(0x000C, 1, 7, 0, 127, 0, 127, "BeamRangeUpper"),
    FieldDescriptor::numeric(0x000D, 1, 4, 0, 0, 0, 15, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x000E, 1, 7, 0, 100, 1, 127, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x000F, 1, 7, 0, 0, 0, 1, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0010, 1, 7, 0, 0, 0, 104, "Knob1Assign"),
    FieldDescriptor::numeric(0x0011, 1, 7, 0, 0, 0, 104, "Knob2Assign"),
    FieldDescriptor::numeric(0x0012, 1, 7, 0, 0, 0, 104, "Knob3Assign"),
    FieldDescriptor::numeric(0x0013, 1, 7, 0, 0, 0, 104, "Knob4Assign"),
    FieldDescriptor::numeric(0x0014, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0015, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0016, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0017, 1, 2, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0018, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0019, 1, 4, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x001A, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x001B, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x001C, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x001D, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x001E, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x001F, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0020, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0021, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0022, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0023, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0024, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0025, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0026, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0027, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0028, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0029, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x002A, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x002B, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x002C, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x002D, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x002E, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x002F, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0030, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0031, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0032, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0033, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0034, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0035, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0036, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0037, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0038, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0039, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x003A, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x003B, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x003C, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x003D, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x003E, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x003F, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0040, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0041, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0042, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0043, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0044, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0045, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0046, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0047, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0048, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0049, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x004A, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x004B, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x004C, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x004D, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
];

/// Per-zone block of the temporary performance.
#[rustfmt::skip]
pub const ZONE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::numeric(0x0000, 1, 3, 64, 0, -3, 3, "ZoneOctaveShift"),
    FieldDescriptor::numeric(0x0001, 1, 1, 0, 0, 0, 1, "ZoneSw"),
    FieldDescriptor::numeric(0x0002, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0003, 2, 4, 0, 128, 128, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0005, 1, 7, 0, 0, 0, 127, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0006, 2, 4, 0, 128, 128, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0008, 2, 4, 0, 128, 128, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x000A, 2, 4, 0, 128, 128, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x000C, 1, 7, 0, 0, 0, 127, "KbdRangeLower"),
    FieldDescriptor::numeric(0x000D, 1, 7, 0, 127, 0, 127, "KbdRangeUpper"),
    FieldDescriptor::numeric(0x000E, 1, 1, 0, 1, 1, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x000F, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0010, 1, 1, 0, 1, 1, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0011, 1, 1, 0, 1, 1, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0012, 1, 1, 0, 1, 1, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0013, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0014, 1, 1, 0, 1, 1, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0015, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0016, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0017, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0018, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0019, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x001A, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
];

/// Per-part block of the temporary performance.
#[rustfmt::skip]
pub const PART_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::numeric(0x0000, 1, 4, 0, 0, 0, 15, "ReceiveChannel"),
    FieldDescriptor::numeric(0x0001, 1, 1, 0, 1, 0, 1, "ReceiveSw"),
    FieldDescriptor::numeric(0x0002, 1, 1, 0, 1, 1, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0003, 1, 1, 0, 1, 1, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0004, 1, 7, 0, 87, 0, 127, "PatchBankSelMSB(CC#0)"),
    FieldDescriptor::numeric(0x0005, 1, 7, 0, 64, 0, 127, "PatchBankSelLSB(CC#32)"),
    FieldDescriptor::numeric(0x0006, 1, 7, 0, 0, 0, 127, "PatchProgramNum(PC)"),
    FieldDescriptor::numeric(0x0007, 1, 7, 0, 100, 0, 127, "PartLevel(CC#7)"),
    FieldDescriptor::numeric(0x0008, 1, 7, 0, 64, 0, 127, "PartPan(CC#10)"),
    FieldDescriptor::numeric(0x0009, 1, 7, 64, 0, -48, 48, "PartCoarseTune(RPN#2)"),
    FieldDescriptor::numeric(0x000A, 1, 7, 64, 0, -50, 50, "PartFineTune(RPN#1)"),
    FieldDescriptor::numeric(0x000B, 1, 2, 0, 2, 0, 2, "PartMono/Poly(MONO ON/POLY ON)"),
    FieldDescriptor::numeric(0x000C, 1, 2, 0, 2, 0, 2, "PartLegatoSw(CC#68)"),
    FieldDescriptor::numeric(0x000D, 1, 5, 0, 25, 0, 25, "PartPitchBendRange(RPN#0)"),
    FieldDescriptor::numeric(0x000E, 1, 2, 0, 2, 0, 2, "PartPortamentoSw(CC#65)"),
    FieldDescriptor::numeric(0x000F, 2, 4, 0, 128, 0, 128, "PartPortamentoTime(CC#5)"),
    FieldDescriptor::numeric(0x0011, 1, 7, 64, 0, -64, 63, "PartCutoffOffset(CC#74)"),
    FieldDescriptor::numeric(0x0012, 1, 7, 64, 0, -64, 63, "PartResonanceOffset(CC#71)"),
    FieldDescriptor::numeric(0x0013, 1, 7, 64, 0, -64, 63, "PartAttackTimeOffset(CC#73)"),
    FieldDescriptor::numeric(0x0014, 1, 7, 64, 0, -64, 63, "PartReleaseTimeOffset(CC#72)"),
    FieldDescriptor::numeric(0x0015, 1, 3, 64, 0, -3, 3, "PartOctaveShift"),
    FieldDescriptor::numeric(0x0016, 1, 7, 64, 0, -63, 63, "PartVelocitySensOffset"),
    FieldDescriptor::numeric(0x0017, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0018, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0019, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x001A, 1, 7, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x001B, 1, 1, 0, 0, 0, 1, "MuteSw"),
    FieldDescriptor::numeric(0x001C, 1, 7, 0, 127, 0, 127, "PartDrySendLevel"),
    FieldDescriptor::numeric(0x001D, 1, 7, 0, 0, 0, 127, "PartChorusSendLevel(CC#93)"),
    FieldDescriptor::numeric(0x001E, 1, 7, 0, 0, 0, 127, "PartReverbSendLevel(CC#91)"),
    FieldDescriptor::numeric(0x001F, 1, 4, 0, 1, 0, 13, "PartOutputAssign"),
    FieldDescriptor::numeric(0x0020, 1, 2, 0, 0, 0, 2, "PartOutputMFXSelect"),
    FieldDescriptor::numeric(0x0021, 1, 7, 64, 0, -64, 63, "PartDecayTimeOffset(CC#75)"),
    FieldDescriptor::numeric(0x0022, 1, 7, 64, 0, -64, 63, "PartVibratoRate(CC#76)"),
    FieldDescriptor::numeric(0x0023, 1, 7, 64, 0, -64, 63, "PartVibratoDepth(CC#77)"),
    FieldDescriptor::numeric(0x0024, 1, 7, 64, 0, -64, 63, "PartVibratoDelay(CC#78)"),
    FieldDescriptor::numeric(0x0025, 1, 7, 64, 0, -64, 63, "PartScaleTune(C)"),
    FieldDescriptor::numeric(0x0026, 1, 7, 64, 0, -64, 63, "PartScaleTune(C#)"),
    FieldDescriptor::numeric(0x0027, 1, 7, 64, 0, -64, 63, "PartScaleTune(D)"),
    FieldDescriptor::numeric(0x0028, 1, 7, 64, 0, -64, 63, "PartScaleTune(D#)"),
    FieldDescriptor::numeric(0x0029, 1, 7, 64, 0, -64, 63, "PartScaleTune(E)"),
    FieldDescriptor::numeric(0x002A, 1, 7, 64, 0, -64, 63, "PartScaleTune(F)"),
    FieldDescriptor::numeric(0x002B, 1, 7, 64, 0, -64, 63, "PartScaleTune(F#)"),
    FieldDescriptor::numeric(0x002C, 1, 7, 64, 0, -64, 63, "PartScaleTune(G)"),
    FieldDescriptor::numeric(0x002D, 1, 7, 64, 0, -64, 63, "PartScaleTune(G#)"),
    FieldDescriptor::numeric(0x002E, 1, 7, 64, 0, -64, 63, "PartScaleTune(A)"),
    FieldDescriptor::numeric(0x002F, 1, 7, 64, 0, -64, 63, "PartScaleTune(A#)"),
    FieldDescriptor::numeric(0x0030, 1, 7, 64, 0, -64, 63, "PartScaleTune(B)"),
];

/// Common section of a part's temporary patch.
#[rustfmt::skip]
pub const PATCH_COMMON_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::text(0x0000, "INIT PATCH  ", 32, 127, "PatchName"),
    FieldDescriptor::numeric(0x000C, 1, 7, 0, 0, 0, 127, "PatchCategory"),
    FieldDescriptor::numeric(0x000D, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x000E, 1, 7, 0, 127, 0, 127, "PatchLevel"),
    FieldDescriptor::numeric(0x000F, 1, 7, 0, 64, 0, 127, "PatchPan"),
    FieldDescriptor::numeric(0x0010, 1, 1, 0, 0, 0, 1, "PatchPriority"),
    FieldDescriptor::numeric(0x0011, 1, 7, 64, 0, -48, 48, "PatchCoarseTune"),
    FieldDescriptor::numeric(0x0012, 1, 7, 64, 0, -50, 50, "PatchFineTune"),
    FieldDescriptor::numeric(0x0013, 1, 3, 64, 0, -3, 3, "OctaveShift"),
    FieldDescriptor::numeric(0x0014, 1, 2, 0, 0, 0, 3, "StretchTuneDepth"),
    FieldDescriptor::numeric(0x0015, 1, 7, 0, 0, 0, 127, "AnalogFeel"),
    FieldDescriptor::numeric(0x0016, 1, 1, 0, 1, 0, 1, "Mono/Poly"),
    FieldDescriptor::numeric(0x0017, 1, 1, 0, 0, 0, 1, "LegatoSw"),
    FieldDescriptor::numeric(0x0018, 1, 1, 0, 0, 0, 1, "LegatoRetrigger"),
    FieldDescriptor::numeric(0x0019, 1, 1, 0, 0, 0, 1, "PortamentoSw"),
    FieldDescriptor::numeric(0x001A, 1, 1, 0, 0, 0, 1, "PortamentoMode"),
    FieldDescriptor::numeric(0x001B, 1, 1, 0, 0, 0, 1, "PortamentoType"),
    FieldDescriptor::numeric(0x001C, 1, 1, 0, 0, 0, 1, "PortamentoStart"),
    FieldDescriptor::numeric(0x001D, 1, 7, 0, 20, 0, 127, "PortamentoTime"),
    FieldDescriptor::numeric(0x001E, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x001F, 2, 4, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0021, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0022, 1, 7, 64, 0, -63, 63, "CutoffOffset"),
    FieldDescriptor::numeric(0x0023, 1, 7, 64, 0, -63, 63, "ResonanceOffset"),
    FieldDescriptor::numeric(0x0024, 1, 7, 64, 0, -63, 63, "AttackTimeOffset"),
    FieldDescriptor::numeric(0x0025, 1, 7, 64, 0, -63, 63, "ReleaseTimeOffset"),
    FieldDescriptor::numeric(0x0026, 1, 7, 64, 0, -63, 63, "VelocitySensOffset"),
    FieldDescriptor::numeric(0x0027, 1, 4, 0, 13, 0, 13, "PatchOutputAssign"),
    FieldDescriptor::numeric(0x0028, 1, 1, 0, 0, 0, 1, "TMTCtrlSw"),
    FieldDescriptor::numeric(0x0029, 1, 6, 0, 2, 0, 48, "PitchBendRangeUp"),
    FieldDescriptor::numeric(0x002A, 1, 6, 0, 2, 0, 48, "PitchBendRangeDown"),
    FieldDescriptor::numeric(0x002B, 1, 7, 0, 0, 0, 109, "MatrixCtrl1Source"),
    FieldDescriptor::numeric(0x002C, 1, 6, 0, 0, 0, 33, "MatrixCtrl1Destination1"),
    FieldDescriptor::numeric(0x002D, 1, 7, 64, 0, -63, 63, "MatrixCtrl1SourceSens1"),
    FieldDescriptor::numeric(0x002E, 1, 6, 0, 0, 0, 33, "MatrixCtrl1Destination2"),
    FieldDescriptor::numeric(0x002F, 1, 7, 64, 0, -63, 63, "MatrixCtrl1Name2"),
    FieldDescriptor::numeric(0x0030, 1, 6, 0, 0, 0, 33, "MatrixCtrl1Destination3"),
    FieldDescriptor::numeric(0x0031, 1, 7, 64, 0, -63, 63, "MatrixCtrl1Sens3"),
    FieldDescriptor::numeric(0x0032, 1, 6, 0, 0, 0, 33, "MatrixCtrl1Destination4"),
    FieldDescriptor::numeric(0x0033, 1, 7, 64, 0, -63, 63, "MatrixCtrl1Sens4"),
    FieldDescriptor::numeric(0x0034, 1, 7, 0, 0, 0, 109, "MatrixCtrl2Source"),
    FieldDescriptor::numeric(0x0035, 1, 6, 0, 0, 0, 33, "MatrixCtrl2Destination1"),
    FieldDescriptor::numeric(0x0036, 1, 7, 64, 0, -63, 63, "MatrixCtrl2Sens1"),
    FieldDescriptor::numeric(0x0037, 1, 6, 0, 0, 0, 33, "MatrixCtrl2Destination2"),
    FieldDescriptor::numeric(0x0038, 1, 7, 64, 0, -63, 63, "MatrixCtrl2Sens2"),
    FieldDescriptor::numeric(0x0039, 1, 6, 0, 0, 0, 33, "MatrixCtrl2Destination3"),
    FieldDescriptor::numeric(0x003A, 1, 7, 64, 0, -63, 63, "MatrixCtrl2Sens3"),
    FieldDescriptor::numeric(0x003B, 1, 6, 0, 0, 0, 33, "MatrixCtrl2Destination4"),
    FieldDescriptor::numeric(0x003C, 1, 7, 64, 0, -63, 63, "MatrixCtrl2Sens4"),
    FieldDescriptor::numeric(0x003D, 1, 7, 0, 0, 0, 109, "MatrixCtrl3Source"),
    FieldDescriptor::numeric(0x003E, 1, 6, 0, 0, 0, 33, "MatrixCtrl3Destination1"),
    FieldDescriptor::numeric(0x003F, 1, 7, 64, 0, -63, 63, "MatrixCtrl3Sens1"),
    FieldDescriptor::numeric(0x0040, 1, 6, 0, 0, 0, 33, "MatrixCtrl3Destination2"),
    FieldDescriptor::numeric(0x0041, 1, 7, 64, 0, -63, 63, "MatrixCtrl3Sens2"),
    FieldDescriptor::numeric(0x0042, 1, 6, 0, 0, 0, 33, "MatrixCtrl3Destination3"),
    FieldDescriptor::numeric(0x0043, 1, 7, 64, 0, -63, 63, "MatrixCtrl3Sens3"),
    FieldDescriptor::numeric(0x0044, 1, 6, 0, 0, 0, 33, "MatrixCtrl3Destination4"),
    FieldDescriptor::numeric(0x0045, 1, 7, 64, 0, -63, 63, "MatrixCtrl3Sens4"),
    FieldDescriptor::numeric(0x0046, 1, 7, 0, 0, 0, 109, "MatrixCtrl4Source"),
    FieldDescriptor::numeric(0x0047, 1, 6, 0, 0, 0, 33, "MatrixCtrl4Destination1"),
    FieldDescriptor::numeric(0x0048, 1, 7, 64, 0, -63, 63, "MatrixCtrl4Sens1"),
    FieldDescriptor::numeric(0x0049, 1, 6, 0, 0, 0, 33, "MatrixCtrl4Destination2"),
    FieldDescriptor::numeric(0x004A, 1, 7, 64, 0, -63, 63, "MatrixCtrl4Sens2"),
    FieldDescriptor::numeric(0x004B, 1, 6, 0, 0, 0, 33, "MatrixCtrl4Destination3"),
    FieldDescriptor::numeric(0x004C, 1, 7, 64, 0, -63, 63, "MatrixCtrl4Sens3"),
    FieldDescriptor::numeric(0x004D, 1, 6, 0, 0, 0, 33, "MatrixCtrl4Destination4"),
    FieldDescriptor::numeric(0x004E, 1, 7, 64, 0, -63, 63, "MatrixCtrl4Sens4"),
    FieldDescriptor::numeric(0x004F, 1, 1, 0, 0, 0, 1, "PartModulationSw"),
];
/// Validated setup block model.
///
/// # Errors
///
/// Propagates table validation failures.
pub fn setup_model() -> Result<RegisterModel> {
    RegisterModel::new("setup", SETUP_FIELDS)
}

/// Validated system common block model.
///
/// # Errors
///
/// Propagates table validation failures.
pub fn system_common_model() -> Result<RegisterModel> {
    RegisterModel::new("system common", SYSTEM_COMMON_FIELDS)
}

/// Validated system control block model.
///
/// # Errors
///
/// Propagates table validation failures.
pub fn system_control_model() -> Result<RegisterModel> {
    RegisterModel::new("system control", SYSTEM_CONTROL_FIELDS)
}

/// Validated zone block model.
///
/// # Errors
///
/// Propagates table validation failures.
pub fn zone_model() -> Result<RegisterModel> {
    RegisterModel::new("zone", ZONE_FIELDS)
}

/// Validated part block model.
///
/// # Errors
///
/// Propagates table validation failures.
pub fn part_model() -> Result<RegisterModel> {
    RegisterModel::new("part", PART_FIELDS)
}

/// Validated patch common block model.
///
/// # Errors
///
/// Propagates table validation failures.
pub fn patch_common_model() -> Result<RegisterModel> {
    RegisterModel::new("patch common", PATCH_COMMON_FIELDS)
}

/// Note names indexed by MIDI note number.
#[rustfmt::skip]
pub const KEYS: [&str; 128] = [
    "C-1", "C#-1", "D-1", "Eb-1", "E-1", "F-1", "F#-1", "G-1", "G#-1", "A-1", "Bb-1", "B-1",
    "C0", "C#0", "D0", "Eb0", "E0", "F0", "F#0", "G0", "G#0", "A0", "Bb0", "B0",
    "C1", "C#1", "D1", "Eb1", "E1", "F1", "F#1", "G1", "G#1", "A1", "Bb1", "B1",
    "C2", "C#2", "D2", "Eb2", "E2", "F2", "F#2", "G2", "G#2", "A2", "Bb2", "B2",
    "C3", "C#3", "D3", "Eb3", "E3", "F3", "F#3", "G3", "G#3", "A3", "Bb3", "B3",
    "C4", "C#4", "D4", "Eb4", "E4", "F4", "F#4", "G4", "G#4", "A4", "Bb4", "B4",
    "C5", "C#5", "D5", "Eb5", "E5", "F5", "F#5", "G5", "G#5", "A5", "Bb5", "B5",
    "C6", "C#6", "D6", "Eb6", "E6", "F6", "F#6", "G6", "G#6", "A6", "Bb6", "B6",
    "C7", "C#7", "D7", "Eb7", "E7", "F7", "F#7", "G7", "G#7", "A7", "Bb7", "B7",
    "C8", "C#8", "D8", "Eb8", "E8", "F8", "F#8", "G8", "G#8", "A8", "Bb8", "B8",
    "C9", "C#9", "D9", "Eb9", "E9", "F9", "F#9", "G9",
];

/// Patch category abbreviations indexed by `PatchCategory`.
#[rustfmt::skip]
pub const PATCH_CATEGORIES: [&str; 40] = [
    "DRM", "PNO", "EP", "KEY", "BEL", "MLT", "ORG", "ACD", "HRM", "AGT",
    "EGT", "DGT", "BS", "SBS", "STR", "ORC", "HIT", "WND", "FLT", "BRS",
    "SBR", "SAX", "HLD", "SLD", "TEK", "PLS", "FX", "SYN", "BPD", "SPD",
    "VOX", "PLK", "ETH", "FRT", "PRC", "SFX", "BTS", "DRM", "CMB", "SMP",
];

/// Loop-mix styles, numbered from 1 on the command line.
pub const LOOPMIX_STYLES: [&str; 22] = [
    "Trance",
    "Funk",
    "House",
    "Drum N Bass",
    "Neo HipHop",
    "Pop",
    "Bright Rock",
    "Trap Step",
    "Future Bass",
    "Trad HipHop",
    "EDM",
    "R&B",
    "Reggaeton",
    "Cumbia",
    "ColombianPop",
    "Bossa Lounge",
    "Arrocha",
    "Drum N Bossa",
    "Bahia Mix",
    "Power Rock",
    "Classic Rock",
    "J-Pop",
];

/// Loop-mix keys.
pub const LOOPMIX_KEYS: [&str; 12] = [
    "C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
];

/// MIDI note number of a note name such as `C4` or `F#-1`.
#[must_use]
pub fn key_index(name: &str) -> Option<usize> {
    KEYS.iter().position(|key| *key == name)
}

/// Position of a loop-mix key name within [`LOOPMIX_KEYS`].
#[must_use]
pub fn loopmix_key_index(name: &str) -> Option<usize> {
    LOOPMIX_KEYS.iter().position(|key| *key == name)
}

/// Category abbreviation for a `PatchCategory` value.
#[must_use]
pub fn patch_category_name(value: i32) -> Option<&'static str> {
    usize::try_from(value)
        .ok()
        .and_then(|index| PATCH_CATEGORIES.get(index))
        .copied()
}
