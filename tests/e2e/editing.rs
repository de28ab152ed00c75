//! E2E tests for overwriting bytes in hex and ASCII mode

use crate::common::harness::HexEditorHarness;
use crossterm::event::{KeyCode, KeyModifiers};

#[test]
fn test_hex_typing_writes_file() {
    let mut harness = HexEditorHarness::new(80, 24, &[0x00, 0x00, 0x00]).unwrap();

    harness.type_text("aB").unwrap();
    assert_eq!(harness.file_bytes(), vec![0xAB, 0x00, 0x00]);
    assert_eq!(harness.cursor_offset(), 1);

    // Moving back onto a byte lands on its high nibble
    harness.type_text("c").unwrap();
    harness.send_key(KeyCode::Left, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::Right, KeyModifiers::NONE).unwrap();
    harness.type_text("1").unwrap();
    harness.send_key(KeyCode::Right, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.file_bytes(), vec![0xAB, 0x10, 0x00]);
    harness.assert_screen_contains("AB 10 00");
}

#[test]
fn test_hex_mode_ignores_other_characters() {
    let mut harness = HexEditorHarness::new(80, 24, b"abc").unwrap();
    harness.type_text("xyz!").unwrap();
    assert_eq!(harness.file_bytes(), b"abc".to_vec());
    assert_eq!(harness.cursor_offset(), 0);
}

#[test]
fn test_ascii_typing_writes_file() {
    let mut harness = HexEditorHarness::new(80, 24, b"......").unwrap();

    harness.send_key(KeyCode::Tab, KeyModifiers::NONE).unwrap();
    harness.type_text("Hi there").unwrap();

    // Two bytes past the end were appended
    assert_eq!(harness.file_bytes(), b"Hi there".to_vec());
    assert_eq!(harness.cursor_offset(), 8);
    harness.assert_screen_contains("|Hi there|");
}

#[test]
fn test_typing_at_end_appends_byte() {
    let mut harness = HexEditorHarness::new(80, 24, b"ab").unwrap();

    harness.send_key(KeyCode::End, KeyModifiers::NONE).unwrap();
    harness.type_text("4").unwrap();
    assert_eq!(harness.file_bytes(), vec![b'a', b'b', 0x40]);

    harness.type_text("1").unwrap();
    assert_eq!(harness.file_bytes(), b"abA".to_vec());
    assert_eq!(harness.cursor_offset(), 3);
    harness.assert_screen_contains("Size: 3");
}

#[test]
fn test_typing_into_empty_file() {
    let mut harness = HexEditorHarness::new(80, 24, b"").unwrap();
    harness.type_text("ff00").unwrap();
    assert_eq!(harness.file_bytes(), vec![0xFF, 0x00]);
    assert!(harness.get_row_text(0).starts_with("00000000  FF 00"));
}

#[test]
fn test_escape_quits() {
    let mut harness = HexEditorHarness::new(80, 24, b"abc").unwrap();
    assert!(!harness.should_quit());
    harness.send_key(KeyCode::Esc, KeyModifiers::NONE).unwrap();
    assert!(harness.should_quit());

    let mut harness = HexEditorHarness::new(80, 24, b"abc").unwrap();
    harness
        .send_key(KeyCode::Char('c'), KeyModifiers::CONTROL)
        .unwrap();
    assert!(harness.should_quit());
}
