//! E2E tests for cursor movement, scrolling and the go-to prompt

use crate::common::harness::HexEditorHarness;
use crossterm::event::{KeyCode, KeyModifiers};

#[test]
fn test_goto_offset_prompt() {
    let mut harness = HexEditorHarness::new(80, 24, &[0u8; 300]).unwrap();

    harness
        .send_key(KeyCode::Char('g'), KeyModifiers::CONTROL)
        .unwrap();
    harness.assert_screen_contains("Go to offset: (hex)");

    harness.type_text("11").unwrap();
    harness.assert_screen_contains("Go to offset: (hex) 11");
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    assert_eq!(harness.cursor_offset(), 0x11);
    harness.assert_screen_not_contains("Go to offset:");
    assert_eq!(harness.screen_cursor_position(), (13, 1));
}

#[test]
fn test_goto_decimal_and_clamp() {
    let mut harness = HexEditorHarness::new(80, 24, &[0u8; 300]).unwrap();

    // Ctrl+O is an alias; Tab switches to decimal
    harness
        .send_key(KeyCode::Char('o'), KeyModifiers::CONTROL)
        .unwrap();
    harness.send_key(KeyCode::Tab, KeyModifiers::NONE).unwrap();
    harness.assert_screen_contains("Go to offset: (dec)");
    harness.type_text("100").unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.cursor_offset(), 100);

    harness
        .prompt(KeyCode::Char('g'), KeyModifiers::CONTROL, "FFFFFF")
        .unwrap();
    assert_eq!(harness.cursor_offset(), 300);
}

#[test]
fn test_prompt_cancel_keys() {
    let mut harness = HexEditorHarness::new(80, 24, &[0u8; 300]).unwrap();

    for (code, modifiers) in [
        (KeyCode::Esc, KeyModifiers::NONE),
        (KeyCode::Char('q'), KeyModifiers::NONE),
        (KeyCode::Char('c'), KeyModifiers::CONTROL),
    ] {
        harness
            .send_key(KeyCode::Char('g'), KeyModifiers::CONTROL)
            .unwrap();
        harness.type_text("20").unwrap();
        harness.send_key(code, modifiers).unwrap();

        harness.assert_screen_not_contains("Go to offset:");
        assert_eq!(harness.cursor_offset(), 0);
        assert!(!harness.should_quit());
    }
}

#[test]
fn test_arrow_keys_stay_in_bounds() {
    let mut harness = HexEditorHarness::new(80, 24, &[0u8; 20]).unwrap();

    harness.send_key(KeyCode::Up, KeyModifiers::NONE).unwrap();
    harness.send_key(KeyCode::Left, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.cursor_offset(), 0);

    harness
        .send_key_repeat(KeyCode::Right, KeyModifiers::NONE, 30)
        .unwrap();
    assert_eq!(harness.cursor_offset(), 20);

    harness.send_key(KeyCode::Down, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.cursor_offset(), 20);

    harness.send_key(KeyCode::Up, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.cursor_offset(), 4);

    harness.send_key(KeyCode::Home, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.cursor_offset(), 0);
}

#[test]
fn test_page_down_and_up() {
    // 9 rows of hex dump plus the status bar
    let mut harness = HexEditorHarness::new(80, 10, &[0u8; 1000]).unwrap();

    harness.send_key(KeyCode::PageDown, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.cursor_offset(), 144);
    assert!(harness.get_row_text(0).starts_with("00000090"));

    harness.send_key(KeyCode::PageUp, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.cursor_offset(), 0);
    assert!(harness.get_row_text(0).starts_with("00000000"));
}

#[test]
fn test_end_scrolls_to_size_line() {
    let mut harness = HexEditorHarness::new(80, 10, &[0u8; 992]).unwrap();

    harness.send_key(KeyCode::End, KeyModifiers::NONE).unwrap();
    assert_eq!(harness.cursor_offset(), 992);
    assert!(harness.get_row_text(0).starts_with("00000360"));
    // The cursor sits on the size line, one past the last byte
    assert_eq!(harness.get_row_text(8).trim(), "000003E0");
    assert_eq!(harness.screen_cursor_position(), (10, 8));

    harness.send_key(KeyCode::Home, KeyModifiers::NONE).unwrap();
    assert!(harness.get_row_text(0).starts_with("00000000"));
}

#[test]
fn test_down_scrolls_one_row() {
    let mut harness = HexEditorHarness::new(80, 4, &[0u8; 200]).unwrap();

    harness
        .send_key_repeat(KeyCode::Down, KeyModifiers::NONE, 3)
        .unwrap();
    assert_eq!(harness.cursor_offset(), 48);
    assert!(harness.get_row_text(0).starts_with("00000010"));
    assert_eq!(harness.screen_cursor_position(), (10, 2));
}
