//! Transaction engine driven end to end against the simulated device.

#![allow(clippy::pedantic, clippy::nursery)]

use std::time::Duration;

use proptest as _;
use rstest::rstest;
#[cfg(feature = "serde")]
use serde as _;
use sysex_core::{
    build_read_request, build_write_command, encode, AddressLayout, DeviceKind, EngineConfig,
    Error, FieldDescriptor, FieldValue, ModelId, RegisterBlock, RegisterModel, SimulatedDevice,
    SimulatorBehavior, Transaction, TransactionEngine, TransactionState, RESERVED_FIELD_NAME,
};
use thiserror as _;
use tracing as _;

const PART_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::numeric(0x0000, 1, 4, 0, 0, 0, 15, "ReceiveChannel"),
    FieldDescriptor::numeric(0x0001, 2, 4, 0, 0, 0, 127, "ProgramNumber"),
    FieldDescriptor::numeric(0x0003, 1, 7, 64, 0, -3, 3, "OctaveShift"),
    FieldDescriptor::numeric(0x0004, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0005, 1, 7, 0, 100, 0, 127, "Level"),
    FieldDescriptor::text(0x0006, "INIT PATCH  ", 32, 127, "Label"),
];

const LAYOUT: AddressLayout = AddressLayout {
    part_base: 0x1000_2000,
    part_stride: 0x100,
    zone_base: 0x1000_5000,
    zone_stride: 0x100,
    patch_base: 0x1100_0000,
    patch_stride: 0x0020_0000,
    unit_count: 16,
};

fn part_model() -> RegisterModel {
    RegisterModel::new("part", PART_FIELDS).expect("valid model")
}

fn fast() -> EngineConfig {
    EngineConfig::with_timeout(Duration::from_millis(200))
}

fn go_keys() -> SimulatedDevice {
    SimulatedDevice::for_device(DeviceKind::GoKeys)
}

#[test]
fn read_modify_write_round_trips_through_the_device() {
    let model = part_model();
    let model_id = DeviceKind::GoKeys.model_id();
    let address = LAYOUT.part_address(3).expect("part 3");

    let mut device = go_keys();
    let initial = encode(&RegisterBlock::new(&model)).expect("init values encode");
    device.load(address, &initial);

    let mut engine = TransactionEngine::with_config(device, fast());
    let mut block = engine.read_block(&model, address, model_id).expect("reads");
    assert_eq!(block.get_int("Level").expect("numeric"), 100);
    assert_eq!(block.get_text("Label").expect("text"), "INIT PATCH  ");

    block.set("Level", 64).expect("in range");
    block.set("OctaveShift", -2).expect("in range");
    block.set("ProgramNumber", 0x7F).expect("in range");
    engine.write_block(&block, address, model_id).expect("writes");

    let reread = engine.read_block(&model, address, model_id).expect("reads again");
    assert_eq!(reread.get("Level"), Some(FieldValue::Int(64)));
    assert_eq!(reread.get("OctaveShift"), Some(FieldValue::Int(-2)));
    assert_eq!(reread.get("ProgramNumber"), Some(FieldValue::Int(0x7F)));

    let device = engine.into_transport();
    assert_eq!(device.peek(address, 4), vec![0x00, 0x07, 0x0F, 62]);
}

#[test]
fn read_request_on_the_wire_names_address_and_size() {
    let model = part_model();
    let model_id = DeviceKind::GoKeys.model_id();
    let mut engine = TransactionEngine::with_config(go_keys(), fast());
    engine.read_block(&model, 0x1000_2000, model_id).expect("reads");
    assert_eq!(
        engine.transport().sent(),
        &[build_read_request(model_id, 0x1000_2000, 18)]
    );
}

#[test]
fn silent_device_times_out() {
    let device = go_keys().with_behavior(SimulatorBehavior {
        silent: true,
        ..SimulatorBehavior::default()
    });
    let mut engine = TransactionEngine::with_config(device, fast());
    let result = engine.read_raw(0x0100_0108, 2, ModelId([0, 0, 0, 0x3C]));
    assert_eq!(result, Err(Error::Timeout(Duration::from_millis(200))));
    assert_eq!(
        engine.state(),
        TransactionState::Failed(Transaction::Read {
            address: 0x0100_0108,
            byte_count: 2,
        })
    );
}

#[test]
fn wrong_model_id_goes_unanswered() {
    let mut engine = TransactionEngine::with_config(go_keys(), fast());
    let result = engine.read_raw(0x0100_0000, 4, DeviceKind::GoPiano.model_id());
    assert!(matches!(result, Err(Error::Timeout(_))));
}

#[test]
fn unrelated_frames_are_skipped_until_the_reply() {
    let model_id = DeviceKind::GoKeys.model_id();
    let mut device = go_keys().with_behavior(SimulatorBehavior {
        stray_frames: vec![
            vec![0xB0, 0x07, 0x64],
            build_write_command(model_id, 0x0100_0200, &[9, 9]),
            build_read_request(model_id, 0x0100_0100, 2),
            vec![0xF0, 0x7E, 0x10, 0x06, 0x01, 0xF7],
        ],
        ..SimulatorBehavior::default()
    });
    device.load(0x0100_0100, &[5, 6]);
    let mut engine = TransactionEngine::with_config(device, fast());
    assert_eq!(engine.read_raw(0x0100_0100, 2, model_id), Ok(vec![5, 6]));
}

#[test]
fn duplicate_reply_does_not_resolve_a_later_wait() {
    let model_id = DeviceKind::GoKeys.model_id();
    let mut device = go_keys().with_behavior(SimulatorBehavior {
        duplicate_replies: true,
        ..SimulatorBehavior::default()
    });
    device.load(0x0100_0100, &[1, 2]);

    let mut engine = TransactionEngine::with_config(device, fast());
    let first = engine.read_raw(0x0100_0100, 2, model_id).expect("reads");
    assert_eq!(first, vec![1, 2]);

    let device = engine.transport_mut();
    device.settle();
    device.load(0x0100_0100, &[3, 4]);
    device.behavior_mut().silent = true;

    let second = engine.read_raw(0x0100_0100, 2, model_id);
    assert!(matches!(second, Err(Error::Timeout(_))));
    assert_eq!(first, vec![1, 2]);
}

#[rstest]
#[case(DeviceKind::GoKeys)]
#[case(DeviceKind::GoPiano)]
fn identity_request_classifies_the_device(#[case] kind: DeviceKind) {
    let mut engine = TransactionEngine::with_config(SimulatedDevice::for_device(kind), fast());
    assert_eq!(engine.identify(), Ok(kind));
    assert_eq!(engine.state(), TransactionState::Completed(Transaction::Identify));
}

#[test]
fn unknown_family_code_is_reported() {
    let device = SimulatedDevice::new(ModelId([0, 0, 0, 0x28]), 0x28);
    let mut engine = TransactionEngine::with_config(device, fast());
    assert_eq!(engine.identify(), Err(Error::UnknownDevice(0x28)));
}

#[test]
fn writes_land_in_device_memory_without_waiting() {
    let model_id = DeviceKind::GoPiano.model_id();
    let mut engine = TransactionEngine::with_config(
        SimulatedDevice::for_device(DeviceKind::GoPiano),
        EngineConfig::unbounded(),
    );
    engine.write_raw(0x0F00_2000, &[0x03], model_id).expect("writes");
    assert_eq!(engine.transport().peek(0x0F00_2000, 1), vec![0x03]);
}

#[test]
fn patch_blocks_are_read_at_packed_addresses() {
    let model_id = DeviceKind::GoKeys.model_id();
    let address = LAYOUT.patch_address(5).expect("patch 5");
    let mut device = go_keys();
    device.load(address, &[0x11, 0x22]);
    let mut engine = TransactionEngine::with_config(device, fast());
    assert_eq!(engine.read_raw(0x1200_0000, 2, model_id), Ok(vec![0x11, 0x22]));
}

#[test]
fn replies_come_back_under_the_requested_model_id() {
    let aux = ModelId::from_bytes([0x00, 0x00, 0x00, 0x28]);
    let mut device = SimulatedDevice::for_device(DeviceKind::GoKeys);
    device.load(0x0100_0108, &[0x01, 0x00]);
    let mut engine = TransactionEngine::with_config(
        device,
        EngineConfig::with_timeout(Duration::from_millis(30)),
    );
    assert_eq!(
        engine.read_raw(0x0100_0108, 2, aux),
        Err(Error::Timeout(Duration::from_millis(30)))
    );

    let device = engine.into_transport().answering_as(aux);
    let mut engine = TransactionEngine::with_config(
        device,
        EngineConfig::with_timeout(Duration::from_millis(500)),
    );
    assert_eq!(engine.read_raw(0x0100_0108, 2, aux), Ok(vec![0x01, 0x00]));
    assert_eq!(
        engine.read_raw(0x0100_0108, 2, DeviceKind::GoKeys.model_id()),
        Ok(vec![0x01, 0x00])
    );
}
