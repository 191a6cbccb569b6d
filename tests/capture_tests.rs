//! Capture-file parsing and writing.

use pmbus_rs::decode::read_ascii_field;
use pmbus_rs::source::{parse_capture, write_capture, CaptureFile, CaptureText, RegisterSource};
use pmbus_rs::{PmbusError, Quantity, Reading, Session, SessionConfig};
use std::io::Write;

const FIXTURE: &str = include_str!("data/delta_psu.txt");

#[test]
fn test_capture_at_offset_zero() {
    let image = parse_capture("header line\n00: 44 45 4c 54 41\n");
    assert_eq!(read_ascii_field(&image, 0x00, 5).unwrap(), "DELTA");
    assert_eq!(image.populated(), 5);
}

#[test]
fn test_manufacturer_id_from_capture_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "     0  1  2  3  4  5  6  7  8  9  a  b  c  d  e  f").unwrap();
    writeln!(file, "0c: 44 45 4c 54 41").unwrap();

    let session = Session::from_capture(SessionConfig::default(), file.path()).unwrap();
    assert_eq!(session.read(Quantity::MfrId).unwrap(), Reading::Text("DELTA".into()));
}

#[test]
fn test_missing_file_is_io_error() {
    let mut source = CaptureFile::new("/nonexistent/capture.txt");
    assert!(matches!(source.populate(), Err(PmbusError::Io(_))));
}

#[test]
fn test_fixture_parses() {
    let image = parse_capture(FIXTURE);
    assert_eq!(image.populated(), 78);
    assert_eq!(image.byte(0x98), 0x22);
    assert!(!image.is_set(0x1B));
}

#[test]
fn test_saved_capture_reloads_identically() {
    let original = parse_capture(FIXTURE);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.txt");
    std::fs::write(&path, write_capture(&original)).unwrap();

    let reloaded = CaptureFile::new(&path).populate().unwrap();
    assert_eq!(reloaded, original);
}

#[test]
fn test_header_only_capture_is_empty() {
    let image = CaptureText::new("     0  1  2  3\n").populate().unwrap();
    assert_eq!(image.populated(), 0);
}

#[test]
fn test_out_of_range_offsets_do_not_disturb_image() {
    let text = concat!(
        "header\n",
        "00: 40 08\n",
        "ffffffffffffffff: 41 42\n",
        "100: 01 02\n",
        "1ff: 03\n",
        "0c: 44 45 4c 54 41\n",
    );
    let image = parse_capture(text);
    assert_eq!(image.word(0x00), 0x0840);
    assert_eq!(read_ascii_field(&image, 0x0C, 5).unwrap(), "DELTA");
    assert_eq!(image.populated(), 7);
}

#[test]
fn test_windows_line_endings() {
    let image = parse_capture("header\r\n10: 01 02\r\n");
    assert_eq!(image.bytes(0x10, 2), vec![0x01, 0x02]);
}
