//! Read sessions over the mock bus and capture files.

use pmbus_rs::catalog::{by_name, CATALOG};
use pmbus_rs::source::{write_capture, MockBus};
use pmbus_rs::{read_capture, PmbusError, Quantity, ReadOutcome, Reading, Session, SessionConfig};

fn loaded_bus() -> MockBus {
    let mut bus = MockBus::new();
    bus.set_registers(0x60, 0x00, &[0x40, 0x08]);
    bus.set_registers(0x60, 0x0C, b"DELTA");
    bus.set_registers(0x60, 0x88, &[0xF0, 0x08]);
    bus.set_register(0x60, 0x98, 0x22);
    bus
}

#[test]
fn test_live_and_capture_sessions_agree() {
    let live = Session::live(SessionConfig::default(), loaded_bus()).unwrap();
    let text = write_capture(live.image());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dump.txt");
    std::fs::write(&path, text).unwrap();
    let offline = Session::from_capture(SessionConfig::default(), &path).unwrap();

    assert_eq!(live.snapshot().unwrap(), offline.snapshot().unwrap());
}

#[test]
fn test_live_status_uses_mirror() {
    let session = Session::live(SessionConfig::default(), loaded_bus()).unwrap();
    assert_eq!(session.read(Quantity::StatusWord).unwrap(), Reading::Word(0x0840));
    assert_eq!(session.read(Quantity::InputVoltage).unwrap(), Reading::Real(240.0));
    assert_eq!(session.read(Quantity::MfrId).unwrap(), Reading::Text("DELTA".into()));
}

#[test]
fn test_live_session_at_other_address() {
    let mut bus = MockBus::new();
    bus.set_register(0x58, 0x98, 0x11);
    let session = Session::live(SessionConfig::new(1, 0x58), bus).unwrap();
    assert_eq!(session.read(Quantity::PmbusRevision).unwrap(), Reading::Byte(0x11));
    match session.read_outcome() {
        ReadOutcome::Complete(report) => assert_eq!(report.i2c_address, "0x58"),
        ReadOutcome::Failed { error } => panic!("unexpected failure: {error}"),
    }
}

#[test]
fn test_every_catalog_entry_decodes() {
    let session = Session::live(SessionConfig::default(), loaded_bus()).unwrap();
    for d in CATALOG.iter() {
        assert!(session.read_descriptor(d).is_ok(), "{} failed", d.name);
        assert_eq!(by_name(d.name).map(|e| e.quantity), Some(d.quantity));
    }
}

#[test]
fn test_write_guard() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dump.txt");
    std::fs::write(&path, "header\n00: 00\n").unwrap();

    let mut offline = Session::from_capture(SessionConfig::default(), &path).unwrap();
    let err = offline.write_word(0x21, 0x0BB8).unwrap_err();
    assert!(matches!(err, PmbusError::ReadOnlySource));
    assert_eq!(err.to_string(), "Write operations not supported in file mode");

    let mut live = Session::live(SessionConfig::default(), loaded_bus()).unwrap();
    live.write_word(0x21, 0x0BB8).unwrap();
    live.write_byte(0x01, 0x80).unwrap();
}

#[test]
fn test_read_capture_helper() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dump.txt");
    std::fs::write(&path, "header\n0c: 44 45 4c 54 41\n").unwrap();

    match read_capture(&path, 0x60).unwrap() {
        ReadOutcome::Complete(report) => {
            assert_eq!(report.snapshot.manufacturer_info.id, "DELTA");
            assert!(!report.timestamp.is_empty());
        }
        ReadOutcome::Failed { error } => panic!("unexpected failure: {error}"),
    }
    assert!(read_capture(dir.path().join("missing.txt"), 0x60).is_err());
}
