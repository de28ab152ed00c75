// HexEditorHarness - Virtual terminal environment for E2E testing

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fresh_hex::app::HexEditor;
use fresh_hex::config::Config;
use fresh_hex::model::WindowedBuffer;
use ratatui::{backend::TestBackend, Terminal};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Virtual editor environment for testing
/// Edits a real file in a temp directory and renders into a `TestBackend`
pub struct HexEditorHarness {
    /// The editor instance
    editor: HexEditor<File>,

    /// Virtual terminal backend
    terminal: Terminal<TestBackend>,

    /// Path of the edited file
    path: PathBuf,

    /// Temp directory holding the file (kept alive for the duration of the test)
    _temp_dir: TempDir,
}

impl HexEditorHarness {
    /// Create a harness editing a new file with `contents`, default config
    pub fn new(width: u16, height: u16, contents: &[u8]) -> io::Result<Self> {
        Self::with_config(width, height, contents, Config::default())
    }

    /// Create a harness with a custom configuration
    pub fn with_config(
        width: u16,
        height: u16,
        contents: &[u8],
        config: Config,
    ) -> io::Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("data.bin");
        std::fs::write(&path, contents)?;

        let file = OpenOptions::new().read(true).write(true).open(&path)?;
        let buffer = WindowedBuffer::create(config.window_capacity, file)
            .map_err(|e| io::Error::other(e.to_string()))?;
        let editor = HexEditor::new(buffer, &config);

        let terminal =
            Terminal::new(TestBackend::new(width, height)).map_err(io::Error::other)?;
        let mut harness = Self {
            editor,
            terminal,
            path,
            _temp_dir: temp_dir,
        };
        harness.render()?;
        Ok(harness)
    }

    /// Send a key press and render
    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> io::Result<()> {
        self.editor.handle_key(KeyEvent::new(code, modifiers));
        self.render()
    }

    /// Send the same key press multiple times, rendering once at the end
    pub fn send_key_repeat(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        count: usize,
    ) -> io::Result<()> {
        for _ in 0..count {
            self.editor.handle_key(KeyEvent::new(code, modifiers));
        }
        self.render()
    }

    /// Simulate typing a string of text
    pub fn type_text(&mut self, text: &str) -> io::Result<()> {
        for ch in text.chars() {
            self.editor
                .handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
        }
        self.render()
    }

    /// Open a prompt with `open`, type `input` and confirm it
    pub fn prompt(&mut self, open: KeyCode, modifiers: KeyModifiers, input: &str) -> io::Result<()> {
        self.send_key(open, modifiers)?;
        self.type_text(input)?;
        self.send_key(KeyCode::Enter, KeyModifiers::NONE)
    }

    pub fn render(&mut self) -> io::Result<()> {
        self.terminal
            .draw(|frame| {
                self.editor.render(frame);
            })
            .map_err(io::Error::other)?;
        Ok(())
    }

    pub fn buffer(&self) -> &ratatui::buffer::Buffer {
        self.terminal.backend().buffer()
    }

    /// Get the text content of a specific screen row
    pub fn get_row_text(&self, y: u16) -> String {
        let buffer = self.buffer();
        let width = buffer.area.width;
        let mut row_text = String::new();

        for x in 0..width {
            let pos = buffer.index_of(x, y);
            if let Some(cell) = buffer.content.get(pos) {
                row_text.push_str(cell.symbol());
            }
        }

        row_text
    }

    /// Get entire screen as string (for debugging)
    pub fn screen_to_string(&self) -> String {
        let height = self.buffer().area.height;
        (0..height)
            .map(|y| self.get_row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Verify text appears on screen
    pub fn assert_screen_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            screen.contains(text),
            "Expected screen to contain '{text}'\nScreen content:\n{screen}"
        );
    }

    /// Verify text does not appear on screen
    pub fn assert_screen_not_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            !screen.contains(text),
            "Expected screen to not contain '{text}'\nScreen content:\n{screen}"
        );
    }

    /// Current content of the file on disk
    pub fn file_bytes(&self) -> Vec<u8> {
        std::fs::read(&self.path).unwrap()
    }

    /// Path of the edited file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte offset under the cursor
    pub fn cursor_offset(&self) -> u64 {
        self.editor.cursor().byte()
    }

    /// Get the screen cursor position (x, y) from the terminal
    pub fn screen_cursor_position(&mut self) -> (u16, u16) {
        let pos = self.terminal.get_cursor_position().unwrap_or_default();
        (pos.x, pos.y)
    }

    pub fn editor(&self) -> &HexEditor<File> {
        &self.editor
    }

    pub fn should_quit(&self) -> bool {
        self.editor.should_quit()
    }
}
