//! E2E tests for find, find next and find previous

use crate::common::harness::HexEditorHarness;
use crossterm::event::{KeyCode, KeyModifiers};
use fresh_hex::config::Config;

fn haystack() -> Vec<u8> {
    let mut data = vec![0u8; 100];
    data[10..14].copy_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
    data[50..54].copy_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
    data[80..86].copy_from_slice(b"needle");
    data
}

#[test]
fn test_find_hex_pattern() {
    let mut harness = HexEditorHarness::new(80, 24, &haystack()).unwrap();

    harness
        .send_key(KeyCode::Char('f'), KeyModifiers::CONTROL)
        .unwrap();
    harness.assert_screen_contains("Find data: (hex)");
    harness.type_text("deadbe").unwrap();
    harness.assert_screen_contains("Find data: (hex)   DEADBE");
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    assert_eq!(harness.cursor_offset(), 10);
}

#[test]
fn test_find_next_and_previous() {
    let mut harness = HexEditorHarness::new(80, 24, &haystack()).unwrap();

    harness
        .prompt(KeyCode::Char('s'), KeyModifiers::CONTROL, "DEADBEEF")
        .unwrap();
    assert_eq!(harness.cursor_offset(), 10);
    assert_eq!(
        harness.editor().search().pattern(),
        Some(&[0xDE, 0xAD, 0xBE, 0xEF][..])
    );

    harness
        .send_key(KeyCode::Char('n'), KeyModifiers::CONTROL)
        .unwrap();
    assert_eq!(harness.cursor_offset(), 50);

    harness
        .send_key(KeyCode::Char('n'), KeyModifiers::CONTROL)
        .unwrap();
    assert_eq!(harness.cursor_offset(), 50);
    harness.assert_screen_contains("Not found");

    harness
        .send_key(KeyCode::Char('p'), KeyModifiers::CONTROL)
        .unwrap();
    assert_eq!(harness.cursor_offset(), 10);
}

#[test]
fn test_find_ascii_in_ascii_mode() {
    let mut harness = HexEditorHarness::new(80, 24, &haystack()).unwrap();

    harness.send_key(KeyCode::Tab, KeyModifiers::NONE).unwrap();
    harness
        .send_key(KeyCode::Char('f'), KeyModifiers::CONTROL)
        .unwrap();
    harness.assert_screen_contains("Find data: (ASCII)");
    harness.type_text("needle").unwrap();
    harness.send_key(KeyCode::Enter, KeyModifiers::NONE).unwrap();

    assert_eq!(harness.cursor_offset(), 80);
}

#[test]
fn test_find_starts_at_cursor() {
    let mut harness = HexEditorHarness::new(80, 24, &haystack()).unwrap();

    harness
        .prompt(KeyCode::Char('g'), KeyModifiers::CONTROL, "b")
        .unwrap();
    harness
        .prompt(KeyCode::Char('f'), KeyModifiers::CONTROL, "dead")
        .unwrap();
    assert_eq!(harness.cursor_offset(), 50);
}

#[test]
fn test_find_pattern_longer_than_window() {
    let mut config = Config::default();
    config.window_capacity = 4;
    let mut harness = HexEditorHarness::with_config(80, 24, &haystack(), config).unwrap();

    harness.send_key(KeyCode::Tab, KeyModifiers::NONE).unwrap();
    harness
        .prompt(KeyCode::Char('f'), KeyModifiers::CONTROL, "needle")
        .unwrap();
    assert_eq!(harness.cursor_offset(), 80);
}

#[test]
fn test_find_miss_keeps_cursor() {
    let mut harness = HexEditorHarness::new(80, 24, &haystack()).unwrap();

    harness
        .prompt(KeyCode::Char('f'), KeyModifiers::CONTROL, "0102")
        .unwrap();
    assert_eq!(harness.cursor_offset(), 0);
    harness.assert_screen_contains("Not found");
}

#[test]
fn test_find_next_without_pattern() {
    let mut harness = HexEditorHarness::new(80, 24, &haystack()).unwrap();

    assert_eq!(harness.editor().search().pattern(), None);
    harness
        .send_key(KeyCode::Char('n'), KeyModifiers::CONTROL)
        .unwrap();
    assert_eq!(harness.cursor_offset(), 0);
    harness.assert_screen_contains("No search pattern");
}
