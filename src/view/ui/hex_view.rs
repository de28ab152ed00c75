//! Hex dump rendering: offset column, hex columns, ASCII column

use crate::app::types::{EditMode, NibbleCursor, BYTES_PER_ROW};
use crate::view::prompt::is_printable;
use ratatui::layout::{Position, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Column of the first hex digit
pub const HEX_COLUMN: u16 = 10;
/// Column of the separator before the ASCII column
pub const SEPARATOR_COLUMN: u16 = 60;
/// Column of the first ASCII character
pub const ASCII_COLUMN: u16 = 61;

/// Offset of the first hex digit of byte `index` (0..16) within the hex column
pub fn hex_x(index: u64) -> u16 {
    let rem = (index % BYTES_PER_ROW) as u16;
    3 * rem + rem / 8
}

/// Display character for a byte in the ASCII column
pub fn ascii_char(byte: u8) -> char {
    if is_printable(byte as char) {
        byte as char
    } else {
        '.'
    }
}

/// Format one row of up to 16 bytes starting at file offset `offset`
pub fn format_row(offset: u64, bytes: &[u8]) -> String {
    let width = ASCII_COLUMN as usize + bytes.len() + 1;
    let mut row = vec![' '; width];

    for (i, ch) in format!("{:08X}", offset).chars().enumerate() {
        put(&mut row, i, ch);
    }
    for (i, &byte) in bytes.iter().enumerate() {
        let x = (HEX_COLUMN + hex_x(i as u64)) as usize;
        for (j, ch) in format!("{:02X}", byte).chars().enumerate() {
            put(&mut row, x + j, ch);
        }
        put(&mut row, ASCII_COLUMN as usize + i, ascii_char(byte));
    }
    put(&mut row, SEPARATOR_COLUMN as usize, '|');
    put(&mut row, ASCII_COLUMN as usize + bytes.len(), '|');

    row.into_iter().collect()
}

fn put(row: &mut Vec<char>, x: usize, ch: char) {
    if x >= row.len() {
        row.resize(x + 1, ' ');
    }
    row[x] = ch;
}

/// Build the visible lines for `bytes`, read from `view_offset`
///
/// A line with the file size follows the last data row when it fits.
pub fn build_lines(view_offset: u64, file_size: u64, bytes: &[u8], rows: u16) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = bytes
        .chunks(BYTES_PER_ROW as usize)
        .take(rows as usize)
        .enumerate()
        .map(|(row, chunk)| Line::from(format_row(view_offset + row as u64 * BYTES_PER_ROW, chunk)))
        .collect();

    if lines.len() < rows as usize && view_offset + bytes.len() as u64 >= file_size {
        lines.push(Line::from(format!("{:08X}", file_size)));
    }
    lines
}

/// Renders the hex dump and places the terminal cursor
pub struct HexViewRenderer;

impl HexViewRenderer {
    pub fn render(frame: &mut Frame, area: Rect, view_offset: u64, file_size: u64, bytes: &[u8]) {
        let lines = build_lines(view_offset, file_size, bytes, area.height);
        frame.render_widget(Paragraph::new(lines), area);
    }

    /// Screen position of the cursor, or `None` if it is scrolled out of `area`
    pub fn cursor_position(
        area: Rect,
        view_offset: u64,
        cursor: NibbleCursor,
        mode: EditMode,
    ) -> Option<Position> {
        let relative = cursor.byte().checked_sub(view_offset)?;
        let row = relative / BYTES_PER_ROW;
        if row >= u64::from(area.height) {
            return None;
        }

        let x = match mode {
            EditMode::Hex => HEX_COLUMN + hex_x(relative) + u16::from(cursor.is_low_nibble()),
            EditMode::Ascii => ASCII_COLUMN + (relative % BYTES_PER_ROW) as u16,
        };
        Some(Position::new(area.x + x, area.y + row as u16))
    }
}
