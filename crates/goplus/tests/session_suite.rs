//! Session operations driven against the simulated GO device.

#![allow(clippy::pedantic, clippy::nursery)]

use std::time::Duration;

use anyhow as _;
use goplus::tables::{
    part_model, patch_common_model, zone_model, AUX_MODEL_ID, GO_LAYOUT, LOOPMIX_MODE_ADDRESS,
    LOOPMIX_TEMPO_ADDRESS, LOOPMIX_TEMPO_UP_ADDRESS, SOUND_DEMO_SWITCH,
};
use goplus::{PartSettings, PatchSelection, Session, ZoneSettings};
#[cfg(feature = "cli")]
use midir as _;
use rstest::rstest;
use sysex_core::{
    build_write_command, encode, DeviceKind, EngineConfig, Error, FieldValue, RegisterBlock,
    RegisterModel, SimulatedDevice, SimulatorBehavior, TransactionEngine,
};
use tracing as _;
#[cfg(feature = "cli")]
use tracing_subscriber as _;

fn defaults(model: &RegisterModel) -> Vec<u8> {
    encode(&RegisterBlock::new(model)).expect("defaults encode")
}

fn go_keys() -> SimulatedDevice {
    let mut device = SimulatedDevice::for_device(DeviceKind::GoKeys).answering_as(AUX_MODEL_ID);
    let part = defaults(&part_model().expect("part table"));
    let zone = defaults(&zone_model().expect("zone table"));
    let patch = defaults(&patch_common_model().expect("patch table"));
    for n in 1..=GO_LAYOUT.unit_count {
        device.load(GO_LAYOUT.part_address(n).expect("part"), &part);
        device.load(GO_LAYOUT.zone_address(n).expect("zone"), &zone);
        device.load(GO_LAYOUT.patch_address(n).expect("patch"), &patch);
    }
    device
}

fn session(device: SimulatedDevice) -> Session<SimulatedDevice> {
    let engine = TransactionEngine::with_config(
        device,
        EngineConfig::with_timeout(Duration::from_millis(500)),
    );
    Session::open(engine, Some(DeviceKind::GoKeys)).expect("session opens")
}

fn transport(session: &mut Session<SimulatedDevice>) -> &mut SimulatedDevice {
    session.engine_mut().transport_mut()
}

#[rstest]
#[case(DeviceKind::GoKeys)]
#[case(DeviceKind::GoPiano)]
fn opening_without_a_model_identifies_the_device(#[case] kind: DeviceKind) {
    let engine = TransactionEngine::new(SimulatedDevice::for_device(kind));
    let session = Session::open(engine, None).expect("identified");
    assert_eq!(session.device(), kind);
}

#[test]
fn part_settings_are_written_back_and_read_again() {
    let mut session = session(go_keys());
    let settings = PartSettings {
        patch: Some(PatchSelection {
            msb: 89,
            lsb: 65,
            program: 12,
        }),
        channel: Some(3),
        level: Some(90),
        octave_shift: Some(-2),
    };
    session.part_set(4, &settings).expect("part written");

    let values = session.part_get(4).expect("part read");
    let value = |name: &str| {
        values
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.clone())
    };
    assert_eq!(value("ReceiveChannel"), Some(FieldValue::Int(2)));
    assert_eq!(value("PatchBankSelMSB(CC#0)"), Some(FieldValue::Int(89)));
    assert_eq!(value("PatchBankSelLSB(CC#32)"), Some(FieldValue::Int(65)));
    assert_eq!(value("PatchProgramNum(PC)"), Some(FieldValue::Int(11)));
    assert_eq!(value("PartLevel(CC#7)"), Some(FieldValue::Int(90)));
    assert_eq!(value("PartOctaveShift"), Some(FieldValue::Int(-2)));

    let untouched = session.part_get(5).expect("part read");
    assert!(untouched.contains(&("PartLevel(CC#7)", FieldValue::Int(100))));
}

#[test]
fn part_settings_outside_their_range_are_rejected_before_writing() {
    let mut session = session(go_keys());
    let settings = PartSettings {
        octave_shift: Some(5),
        ..PartSettings::default()
    };
    assert!(session.part_set(1, &settings).is_err());
    let writes = transport(&mut session)
        .sent()
        .iter()
        .filter(|frame| frame.get(7) == Some(&0x12))
        .count();
    assert_eq!(writes, 0);
}

#[test]
fn part_show_reports_one_based_channel_and_program() {
    let mut session = session(go_keys());
    session
        .part_set(
            2,
            &PartSettings {
                channel: Some(10),
                ..PartSettings::default()
            },
        )
        .expect("part written");

    let table = session.part_show(&[2, 1]).expect("parts read");
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0], ["1", "1", "87", "64", "1", "100", "0"]);
    assert_eq!(table.rows[1][..2], ["2", "10"]);
    assert!(table.to_string().starts_with(&format!("{:>24}", "Part number")));
}

#[test]
fn zone_settings_show_as_switch_and_key_names() {
    let mut session = session(go_keys());
    let settings = ZoneSettings {
        octave_shift: Some(1),
        enabled: Some(true),
        low_key: Some("C2".to_string()),
        high_key: Some("G3".to_string()),
    };
    session.zone_set(3, &settings).expect("zone written");

    let table = session.zone_show(&[3, 4]).expect("zones read");
    assert_eq!(table.rows[0], ["3", "on", "1", "C2", "G3"]);
    assert_eq!(table.rows[1], ["4", "off", "0", "C-1", "G9"]);
}

#[test]
fn unknown_key_names_are_rejected() {
    let mut session = session(go_keys());
    let settings = ZoneSettings {
        low_key: Some("H2".to_string()),
        ..ZoneSettings::default()
    };
    let error = session.zone_set(1, &settings).unwrap_err();
    assert!(error.to_string().contains("unknown key `H2`"));
}

#[test]
fn patch_info_combines_part_and_patch_blocks() {
    let mut device = go_keys();
    let model = patch_common_model().expect("patch table");
    let mut patch = RegisterBlock::new(&model);
    patch.set("PatchName", "Concert Gnd ").expect("name");
    patch.set("PatchCategory", 1).expect("category");
    device.load(
        GO_LAYOUT.patch_address(6).expect("patch"),
        &encode(&patch).expect("patch encodes"),
    );
    let mut session = session(device);

    let info = session.patch_info(6).expect("patch read");
    assert_eq!(info.name, "Concert Gnd");
    assert_eq!(info.category, "PNO");
    assert_eq!(
        info.selection,
        PatchSelection {
            msb: 87,
            lsb: 64,
            program: 1
        }
    );
    assert_eq!(
        info.to_string(),
        "part 6: patch name: 'Concert Gnd' (87,64,1), category: PNO"
    );
}

#[test]
fn part_preview_starts_and_stops_the_demo() {
    let mut session = session(go_keys());
    session.part_preview(7, Duration::ZERO).expect("preview");

    let device = transport(&mut session);
    let model_id = DeviceKind::GoKeys.model_id();
    assert_eq!(
        device.sent(),
        [
            build_write_command(model_id, SOUND_DEMO_SWITCH, &[7]),
            build_write_command(model_id, SOUND_DEMO_SWITCH, &[0]),
        ]
    );
    assert_eq!(device.peek(SOUND_DEMO_SWITCH, 1), [0]);
}

#[rstest]
#[case(0)]
#[case(17)]
fn part_numbers_outside_the_layout_are_rejected(#[case] part: u32) {
    let mut session = session(go_keys());
    let error = session.part_get(part).unwrap_err();
    assert!(matches!(
        error.downcast_ref::<Error>(),
        Some(Error::InvalidUnitIndex { index, .. }) if *index == part
    ));
    assert!(session.part_preview(part, Duration::ZERO).is_err());
    assert!(transport(&mut session).sent().is_empty());
}

#[test]
fn loopmix_commands_are_sent_as_nrpn_on_channel_16() {
    let mut session = session(go_keys());
    assert_eq!(session.loopmix_select(3).expect("style"), "House");
    session.loopmix_play(2, 11).expect("play");
    session.loopmix_key("Eb").expect("key");
    session.loopmix_stop(None).expect("stop");

    let sent = transport(&mut session).sent().to_vec();
    let expected: Vec<Vec<u8>> = [
        [0xBF, 0x63, 0],
        [0xBF, 0x62, 0],
        [0xBF, 0x06, 0],
        [0xBF, 0x26, 2],
        [0xBF, 0x63, 0],
        [0xBF, 0x62, 1],
        [0xBF, 0x06, 1],
        [0xBF, 0x26, 10],
        [0xBF, 0x63, 0],
        [0xBF, 0x62, 2],
        [0xBF, 0x06, 0],
        [0xBF, 0x26, 3],
        [0xBF, 0x63, 0],
        [0xBF, 0x62, 3],
        [0xBF, 0x06, 0],
        [0xBF, 0x26, 0],
    ]
    .iter()
    .map(|message| message.to_vec())
    .collect();
    assert_eq!(sent, expected);
}

#[rstest]
#[case(0, 1)]
#[case(6, 1)]
#[case(1, 0)]
#[case(1, 12)]
fn loopmix_play_rejects_unknown_parts_and_patterns(#[case] part: u8, #[case] pattern: u8) {
    let mut session = session(go_keys());
    assert!(session.loopmix_play(part, pattern).is_err());
    assert!(session.loopmix_select(0).is_err());
    assert!(session.loopmix_key("H").is_err());
    assert!(transport(&mut session).sent().is_empty());
}

#[test]
fn loopmix_tempo_reads_the_auxiliary_register() {
    let mut device = go_keys();
    device.load(LOOPMIX_TEMPO_ADDRESS, &[0x01, 0x00]);
    let mut session = session(device);
    assert_eq!(session.loopmix_tempo().expect("tempo"), 128);

    let request = &transport(&mut session).sent()[0];
    assert_eq!(&request[3..7], &AUX_MODEL_ID.bytes());
}

#[test]
fn tempo_nudges_write_the_up_register_once_per_step() {
    let mut device = go_keys();
    device.load(LOOPMIX_TEMPO_ADDRESS, &[0x00, 0x78]);
    let mut session = session(device);

    let (before, after) = session.loopmix_nudge_tempo(2).expect("nudged");
    assert_eq!((before, after), (120, 120));

    let nudge = build_write_command(AUX_MODEL_ID, LOOPMIX_TEMPO_UP_ADDRESS, &[0]);
    let nudges = transport(&mut session)
        .sent()
        .iter()
        .filter(|frame| **frame == nudge)
        .count();
    assert_eq!(nudges, 2);
}

#[test]
fn loopmix_exit_stops_playback_then_leaves_the_mode() {
    let mut device = go_keys();
    device.load(LOOPMIX_MODE_ADDRESS, &[1]);
    let mut session = session(device);
    session.loopmix_exit().expect("exit");

    let device = transport(&mut session);
    assert_eq!(device.sent().len(), 5);
    assert_eq!(device.sent()[3], [0xBF, 0x26, 0]);
    assert_eq!(
        device.sent()[4],
        build_write_command(DeviceKind::GoKeys.model_id(), LOOPMIX_MODE_ADDRESS, &[0])
    );
    assert_eq!(device.peek(LOOPMIX_MODE_ADDRESS, 1), [0]);
}

#[test]
fn silent_devices_surface_a_timeout() {
    let device = go_keys().with_behavior(SimulatorBehavior {
        silent: true,
        ..SimulatorBehavior::default()
    });
    let engine = TransactionEngine::with_config(
        device,
        EngineConfig::with_timeout(Duration::from_millis(30)),
    );
    let mut session = Session::open(engine, Some(DeviceKind::GoKeys)).expect("no identify");

    let error = session.sys_show().unwrap_err();
    assert!(format!("{error:#}").contains("reading"));
    assert!(matches!(
        error.root_cause().downcast_ref::<Error>(),
        Some(Error::Timeout(_))
    ));

    let engine = session.into_engine();
    assert!(Session::open(engine, None).is_err());
}
