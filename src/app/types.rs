use serde::{Deserialize, Serialize};

/// Bytes shown on one screen row
pub const BYTES_PER_ROW: u64 = 16;

/// Which column typed keys edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    /// Hex digits replace the nibble under the cursor
    #[default]
    Hex,
    /// Printable characters replace the byte under the cursor
    Ascii,
}

impl EditMode {
    pub fn toggled(self) -> Self {
        match self {
            EditMode::Hex => EditMode::Ascii,
            EditMode::Ascii => EditMode::Hex,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EditMode::Hex => "HEX",
            EditMode::Ascii => "ASCII",
        }
    }
}

/// Cursor position counted in nibbles: `2 * byte + nibble`
///
/// The cursor may sit one byte past the end of the file, where typing
/// appends a new byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NibbleCursor(u64);

impl NibbleCursor {
    /// Cursor on the high nibble of `byte`
    pub fn at_byte(byte: u64) -> Self {
        Self(byte.saturating_mul(2))
    }

    /// Byte offset under the cursor
    pub fn byte(self) -> u64 {
        self.0 / 2
    }

    /// True when the cursor is on the low (second) hex digit
    pub fn is_low_nibble(self) -> bool {
        self.0 % 2 == 1
    }

    /// Move to the next nibble
    pub fn advance_nibble(&mut self) {
        self.0 = self.0.saturating_add(1);
    }
}

/// What a pending prompt will do with its value once confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPurpose {
    /// Move the cursor to an absolute offset
    GotoOffset,
    /// Insert zero bytes at the cursor
    InsertBytes,
    /// Remove bytes at the cursor
    RemoveBytes,
    /// Remove bytes before the cursor
    RemoveBytesBefore,
    /// Search forward for a byte string
    Find,
}

impl PromptPurpose {
    pub fn message(self) -> &'static str {
        match self {
            PromptPurpose::GotoOffset => "Go to offset:",
            PromptPurpose::InsertBytes => "Number of bytes to insert:",
            PromptPurpose::RemoveBytes | PromptPurpose::RemoveBytesBefore => {
                "Number of bytes to remove:"
            }
            PromptPurpose::Find => "Find data:",
        }
    }
}
