//! Prompt popup input: numbers for offsets and sizes, byte strings for search

use crate::app::types::{EditMode, PromptPurpose};

/// Maximum digits a number prompt accepts
pub const MAX_NUMBER_DIGITS: usize = 20;

/// What the user is typing into the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptInput {
    /// Digits `0-9A-F`, interpreted in hex or decimal on confirm
    Number { digits: String, hex: bool },
    /// A byte string entered as hex nibbles or ASCII characters
    Data {
        bytes: Vec<u8>,
        /// Nibbles entered; `bytes.len() == (nibbles + 1) / 2`
        nibbles: usize,
        hex: bool,
        /// Bytes the prompt can hold
        max_bytes: usize,
    },
}

/// Value produced by a confirmed prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptValue {
    Number(u64),
    Data(Vec<u8>),
}

/// An open prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub message: String,
    pub purpose: PromptPurpose,
    pub input: PromptInput,
}

impl Prompt {
    /// Number prompt; `hex` selects the initial radix
    pub fn number(purpose: PromptPurpose, hex: bool) -> Self {
        Self {
            message: purpose.message().to_string(),
            purpose,
            input: PromptInput::Number {
                digits: String::new(),
                hex,
            },
        }
    }

    /// Byte string prompt holding at most `max_length - 1` bytes
    pub fn data(purpose: PromptPurpose, max_length: usize, mode: EditMode) -> Self {
        Self {
            message: purpose.message().to_string(),
            purpose,
            input: PromptInput::Data {
                bytes: Vec::new(),
                nibbles: 0,
                hex: mode == EditMode::Hex,
                max_bytes: max_length.saturating_sub(1),
            },
        }
    }

    /// True when input is read as hex
    pub fn is_hex(&self) -> bool {
        match &self.input {
            PromptInput::Number { hex, .. } | PromptInput::Data { hex, .. } => *hex,
        }
    }

    /// Switch between hex and decimal (numbers) or hex and ASCII (data)
    pub fn toggle_radix(&mut self) {
        match &mut self.input {
            PromptInput::Number { hex, .. } | PromptInput::Data { hex, .. } => *hex = !*hex,
        }
    }

    /// Feed one typed character; characters the prompt can't take are ignored
    pub fn insert_char(&mut self, ch: char) {
        match &mut self.input {
            PromptInput::Number { digits, hex } => {
                if ch == 'x' || ch == 'X' {
                    *hex = !*hex;
                } else if ch.is_ascii_hexdigit() && digits.len() < MAX_NUMBER_DIGITS {
                    digits.push(ch.to_ascii_uppercase());
                }
            }
            PromptInput::Data {
                bytes,
                nibbles,
                hex,
                max_bytes,
            } => {
                if *nibbles / 2 >= *max_bytes {
                    return;
                }
                if *hex {
                    let Some(nibble) = ch.to_digit(16) else {
                        return;
                    };
                    let nibble = nibble as u8;
                    if *nibbles % 2 == 0 {
                        bytes.push(nibble << 4);
                    } else if let Some(last) = bytes.last_mut() {
                        *last |= nibble;
                    }
                    *nibbles += 1;
                } else if is_printable(ch) {
                    // A pending half byte is kept as X0
                    bytes.truncate(*nibbles / 2 + *nibbles % 2);
                    if *nibbles % 2 == 1 {
                        *nibbles += 1;
                    }
                    bytes.push(ch as u8);
                    *nibbles += 2;
                }
            }
        }
    }

    /// Remove the last digit or nibble
    pub fn backspace(&mut self) {
        match &mut self.input {
            PromptInput::Number { digits, .. } => {
                digits.pop();
            }
            PromptInput::Data { bytes, nibbles, .. } => {
                if *nibbles == 0 {
                    return;
                }
                *nibbles -= 1;
                bytes.truncate((*nibbles + 1) / 2);
                if *nibbles % 2 == 1 {
                    if let Some(last) = bytes.last_mut() {
                        *last &= 0xF0;
                    }
                }
            }
        }
    }

    /// The value the prompt holds if confirmed now
    pub fn value(&self) -> PromptValue {
        match &self.input {
            PromptInput::Number { digits, hex } => {
                PromptValue::Number(parse_prefix(digits, if *hex { 16 } else { 10 }))
            }
            PromptInput::Data { bytes, .. } => PromptValue::Data(bytes.clone()),
        }
    }

    /// Radix label shown after the message
    pub fn mode_label(&self) -> &'static str {
        match &self.input {
            PromptInput::Number { hex: true, .. } => "(hex)",
            PromptInput::Number { hex: false, .. } => "(dec)",
            PromptInput::Data { hex: true, .. } => "(hex)  ",
            PromptInput::Data { hex: false, .. } => "(ASCII)",
        }
    }

    /// The input as displayed, and the cursor column within it
    pub fn display_input(&self) -> (String, usize) {
        match &self.input {
            PromptInput::Number { digits, .. } => (digits.clone(), digits.len()),
            PromptInput::Data {
                bytes,
                nibbles,
                hex: true,
                ..
            } => (
                bytes.iter().map(|b| format!("{:02X}", b)).collect(),
                *nibbles,
            ),
            PromptInput::Data { bytes, .. } => {
                let text: String = bytes
                    .iter()
                    .map(|&b| if is_printable(b as char) { b as char } else { '.' })
                    .collect();
                let len = text.len();
                (text, len)
            }
        }
    }
}

/// Printable 7-bit ASCII, `0x20..=0x7E`
pub fn is_printable(ch: char) -> bool {
    (' '..='~').contains(&ch)
}

/// Parse the longest prefix of `digits` that is valid in `radix`
///
/// Stops at the first invalid digit or when the next digit would overflow.
/// An empty prefix parses as 0.
pub fn parse_prefix(digits: &str, radix: u32) -> u64 {
    let mut value = 0u64;
    for ch in digits.chars() {
        let Some(digit) = ch.to_digit(radix) else {
            break;
        };
        match value
            .checked_mul(u64::from(radix))
            .and_then(|v| v.checked_add(u64::from(digit)))
        {
            Some(next) => value = next,
            None => break,
        }
    }
    value
}
