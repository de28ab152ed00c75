//! Interactive hex editor session

mod prompt_actions;
pub mod types;

use crate::config::Config;
use crate::input::keybindings::{Action, KeyContext, KeybindingResolver};
use crate::model::{BufferError, ByteStore, SearchState, WindowedBuffer};
use crate::view::prompt::{is_printable, Prompt};
use crate::view::ui::{HexViewRenderer, StatusBarRenderer};
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;
use std::fs::File;
use types::{EditMode, NibbleCursor, PromptPurpose, BYTES_PER_ROW};

/// One editing session over a single file
pub struct HexEditor<S: ByteStore = File> {
    buffer: WindowedBuffer<S>,

    /// Cursor in nibbles; its byte never exceeds the file size
    cursor: NibbleCursor,

    /// File offset of the first visible row, a multiple of 16
    view_offset: u64,

    /// Rows available for the hex dump, updated on every render
    visible_rows: u64,

    edit_mode: EditMode,
    search: SearchState,
    prompt: Option<Prompt>,
    status_message: Option<String>,
    keybindings: KeybindingResolver,
    config: Config,
    should_quit: bool,
}

impl<S: ByteStore> HexEditor<S> {
    pub fn new(buffer: WindowedBuffer<S>, config: &Config) -> Self {
        tracing::info!(
            "Editing {} bytes with a {} byte window",
            buffer.file_size(),
            buffer.capacity()
        );
        Self {
            buffer,
            cursor: NibbleCursor::default(),
            view_offset: 0,
            visible_rows: 1,
            edit_mode: config.editor.default_edit_mode,
            search: SearchState::new(),
            prompt: None,
            status_message: None,
            keybindings: KeybindingResolver::new(config),
            config: config.clone(),
            should_quit: false,
        }
    }

    pub fn buffer(&self) -> &WindowedBuffer<S> {
        &self.buffer
    }

    pub fn cursor(&self) -> NibbleCursor {
        self.cursor
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    pub fn view_offset(&self) -> u64 {
        self.view_offset
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn get_status_message(&self) -> Option<&String> {
        self.status_message.as_ref()
    }

    /// Handle a key press
    pub fn handle_key(&mut self, event: KeyEvent) {
        let context = if self.prompt.is_some() {
            KeyContext::Prompt
        } else {
            KeyContext::Normal
        };
        let action = self.keybindings.resolve(&event, context);
        tracing::trace!("Key {:?} -> {:?}", event, action);
        self.handle_action(action);
    }

    /// Perform an action
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::PromptConfirm => {
                if let Some(prompt) = self.prompt.take() {
                    self.handle_prompt_confirm(prompt);
                }
            }
            Action::PromptCancel => {
                self.prompt = None;
            }
            Action::PromptBackspace => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.backspace();
                }
            }
            Action::PromptToggleRadix => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.toggle_radix();
                }
            }
            Action::PromptInput(ch) => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.insert_char(ch);
                }
            }
            _ if self.prompt.is_some() => {}

            Action::Quit => {
                tracing::info!("Quitting at offset {:#x}", self.cursor.byte());
                self.should_quit = true;
            }
            Action::ToggleEditMode => {
                self.edit_mode = self.edit_mode.toggled();
            }
            Action::MoveLeft => {
                let byte = self.cursor.byte();
                if byte >= 1 {
                    self.cursor = NibbleCursor::at_byte(byte - 1);
                }
            }
            Action::MoveRight => {
                let byte = self.cursor.byte();
                if byte < self.buffer.file_size() {
                    self.cursor = NibbleCursor::at_byte(byte + 1);
                }
            }
            Action::MoveUp => {
                let byte = self.cursor.byte();
                if byte >= BYTES_PER_ROW {
                    self.cursor = NibbleCursor::at_byte(byte - BYTES_PER_ROW);
                }
            }
            Action::MoveDown => {
                let byte = self.cursor.byte();
                if byte + BYTES_PER_ROW <= self.buffer.file_size() {
                    self.cursor = NibbleCursor::at_byte(byte + BYTES_PER_ROW);
                }
            }
            Action::MovePageUp => {
                let page = self.page_size();
                self.view_offset = self.view_offset.saturating_sub(page);
                self.cursor = NibbleCursor::at_byte(self.cursor.byte().saturating_sub(page));
            }
            Action::MovePageDown => {
                let page = self.page_size();
                let size = self.buffer.file_size();
                if self.view_offset + page < size {
                    self.view_offset += page;
                    self.cursor = NibbleCursor::at_byte((self.cursor.byte() + page).min(size));
                }
            }
            Action::MoveDocumentStart => {
                self.cursor = NibbleCursor::at_byte(0);
            }
            Action::MoveDocumentEnd => {
                self.cursor = NibbleCursor::at_byte(self.buffer.file_size());
            }
            Action::GotoOffset => {
                self.prompt = Some(Prompt::number(PromptPurpose::GotoOffset, true));
            }
            Action::InsertBytes => {
                self.prompt = Some(Prompt::number(PromptPurpose::InsertBytes, false));
            }
            Action::RemoveBytes => {
                self.prompt = Some(Prompt::number(PromptPurpose::RemoveBytes, false));
            }
            Action::RemoveBytesBefore => {
                self.prompt = Some(Prompt::number(PromptPurpose::RemoveBytesBefore, false));
            }
            Action::Find => {
                self.prompt = Some(Prompt::data(
                    PromptPurpose::Find,
                    self.config.editor.max_search_length,
                    self.edit_mode,
                ));
            }
            Action::FindNext => {
                let from = self.cursor.byte() + 1;
                let result = self.search.find_next(&mut self.buffer, from);
                self.apply_search_result(result);
            }
            Action::FindPrevious => {
                let byte = self.cursor.byte();
                if byte > 0 {
                    let result = self.search.find_previous(&mut self.buffer, byte - 1);
                    self.apply_search_result(result);
                }
            }
            Action::TypeChar(ch) => {
                if let Err(e) = self.type_char(ch) {
                    self.report_error("Edit failed", &e);
                }
            }
            Action::None => {}
        }

        self.clamp_cursor();
        self.scroll_to_cursor();
    }

    /// Overwrite the nibble (hex mode) or byte (ASCII mode) under the cursor
    ///
    /// At the end of the file a zero byte is appended first.
    fn type_char(&mut self, ch: char) -> crate::model::Result<()> {
        let value = match self.edit_mode {
            EditMode::Hex => match ch.to_digit(16) {
                Some(nibble) => nibble as u8,
                None => return Ok(()),
            },
            EditMode::Ascii if is_printable(ch) => ch as u8,
            EditMode::Ascii => return Ok(()),
        };

        let byte = self.cursor.byte();
        if byte >= self.buffer.file_size() {
            self.buffer.insert(self.buffer.file_size(), 1)?;
        }

        match self.edit_mode {
            EditMode::Hex => {
                let current = self.buffer.access(byte, 1)?[0];
                let updated = if self.cursor.is_low_nibble() {
                    (current & 0xF0) | value
                } else {
                    (current & 0x0F) | (value << 4)
                };
                self.buffer.write(byte, &[updated])?;
                self.cursor.advance_nibble();
            }
            EditMode::Ascii => {
                self.buffer.write(byte, &[value])?;
                self.cursor = NibbleCursor::at_byte(byte + 1);
            }
        }
        Ok(())
    }

    fn apply_search_result(&mut self, result: crate::model::Result<Option<u64>>) {
        match result {
            Ok(Some(offset)) => {
                self.cursor = NibbleCursor::at_byte(offset);
                self.status_message = None;
            }
            Ok(None) if self.search.pattern().is_none() => {
                self.set_status_message("No search pattern".to_string());
            }
            Ok(None) => self.set_status_message("Not found".to_string()),
            Err(e) => self.report_error("Search failed", &e),
        }
    }

    /// Log a failed operation and show it in the status bar
    fn report_error(&mut self, what: &str, error: &BufferError) {
        tracing::warn!("{}: {}", what, error);
        self.set_status_message(format!("{}: {}", what, error));
    }

    fn page_size(&self) -> u64 {
        self.visible_rows * BYTES_PER_ROW
    }

    fn clamp_cursor(&mut self) {
        let size = self.buffer.file_size();
        if self.cursor.byte() > size {
            self.cursor = NibbleCursor::at_byte(size);
        }
    }

    /// Scroll by whole rows until the cursor row is visible
    fn scroll_to_cursor(&mut self) {
        let byte = self.cursor.byte();
        let row_start = byte - byte % BYTES_PER_ROW;
        if byte < self.view_offset {
            self.view_offset = row_start;
        } else if byte >= self.view_offset + self.page_size() {
            self.view_offset = row_start - (self.visible_rows - 1) * BYTES_PER_ROW;
        }
    }

    /// Draw the session into `frame`
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let status_height = u16::from(self.config.editor.show_status_bar && area.height > 1);
        let main = Rect::new(area.x, area.y, area.width, area.height - status_height);

        self.visible_rows = u64::from(main.height.max(1));
        self.scroll_to_cursor();

        let size = self.buffer.file_size();
        let length = (size - self.view_offset.min(size)).min(self.page_size());
        let bytes = match self.buffer.read_to_vec(self.view_offset, length) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.report_error("Read failed", &e);
                Vec::new()
            }
        };
        HexViewRenderer::render(frame, main, self.view_offset, size, &bytes);

        if status_height > 0 {
            let status_area = Rect::new(area.x, area.y + main.height, area.width, 1);
            StatusBarRenderer::render_status_bar(
                frame,
                status_area,
                self.edit_mode,
                self.cursor.byte(),
                size,
                self.status_message.as_deref(),
                &self.keybindings,
            );
        }

        match &self.prompt {
            Some(prompt) => StatusBarRenderer::render_prompt(frame, main, prompt),
            None => {
                if let Some(position) =
                    HexViewRenderer::cursor_position(main, self.view_offset, self.cursor, self.edit_mode)
                {
                    frame.set_cursor_position(position);
                }
            }
        }
    }
}
