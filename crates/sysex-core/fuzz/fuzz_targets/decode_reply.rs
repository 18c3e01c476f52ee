#![no_main]

use libfuzzer_sys::fuzz_target;
use sysex_core::{
    decode, encode, frame_address, frame_payload, verify_checksum, DeviceKind, FieldDescriptor,
    RegisterModel, RESERVED_FIELD_NAME,
};

const FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::numeric(0x0000, 1, 7, 64, 0, -64, 63, "Byte"),
    FieldDescriptor::numeric(0x0001, 2, 4, 0, 0, 0, 255, "Pair"),
    FieldDescriptor::numeric(0x0003, 1, 1, 0, 0, 0, 0, RESERVED_FIELD_NAME),
    FieldDescriptor::numeric(0x0004, 4, 4, 1024, 0, -1000, 1000, "Quad"),
    FieldDescriptor::text(0x0008, "INIT PATCH  ", 32, 127, "Name"),
];

fuzz_target!(|data: &[u8]| {
    let _ = DeviceKind::from_identity_reply(data);
    let _ = frame_address(data);
    if verify_checksum(data).is_err() {
        return;
    }
    let Some(payload) = frame_payload(data) else {
        return;
    };
    let Ok(model) = RegisterModel::new("fuzz", FIELDS) else {
        return;
    };
    if let Ok(block) = decode(payload, &model) {
        let _ = encode(&block);
    }
});
