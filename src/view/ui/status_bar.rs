//! Status bar and prompt popup rendering

use crate::app::types::EditMode;
use crate::input::keybindings::{Action, KeyContext, KeybindingResolver};
use crate::view::prompt::Prompt;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

/// Height of the prompt popup
pub const PROMPT_HEIGHT: u16 = 3;

/// Renders the status bar and prompt popup
pub struct StatusBarRenderer;

impl StatusBarRenderer {
    /// Render the status bar
    ///
    /// Shows the edit mode, cursor offset and file size, followed by the last
    /// status message or, when there is none, a short key hint.
    pub fn render_status_bar(
        frame: &mut Frame,
        area: Rect,
        mode: EditMode,
        cursor_offset: u64,
        file_size: u64,
        status_message: Option<&str>,
        keybindings: &KeybindingResolver,
    ) {
        let style = Style::default().add_modifier(Modifier::REVERSED);
        let text = Self::status_text(mode, cursor_offset, file_size, status_message, keybindings);

        // Pad to the full width so the reversed style covers the row
        let padded = format!("{:<width$}", text, width = area.width as usize);
        frame.render_widget(Paragraph::new(Line::from(Span::styled(padded, style))), area);
    }

    fn status_text(
        mode: EditMode,
        cursor_offset: u64,
        file_size: u64,
        status_message: Option<&str>,
        keybindings: &KeybindingResolver,
    ) -> String {
        let base = format!(
            " {} | Offset: {:08X} | Size: {}",
            mode.label(),
            cursor_offset,
            file_size
        );
        match status_message {
            Some(msg) => format!("{} | {}", base, msg),
            None => {
                let hints: Vec<String> = [
                    (Action::Quit, "quit"),
                    (Action::GotoOffset, "goto"),
                    (Action::Find, "find"),
                ]
                .into_iter()
                .filter_map(|(action, label)| {
                    keybindings
                        .find_keybinding_for_action(action, KeyContext::Normal)
                        .map(|key| format!("{} {}", key, label))
                })
                .collect();
                if hints.is_empty() {
                    base
                } else {
                    format!("{} | {}", base, hints.join("  "))
                }
            }
        }
    }

    /// Render the prompt as a reversed popup centered vertically in `area`
    pub fn render_prompt(frame: &mut Frame, area: Rect, prompt: &Prompt) {
        if area.height < PROMPT_HEIGHT {
            return;
        }
        let popup = Rect::new(
            area.x,
            area.y + (area.height - PROMPT_HEIGHT) / 2,
            area.width,
            PROMPT_HEIGHT,
        );
        let style = Style::default().add_modifier(Modifier::REVERSED);

        let (input, cursor_col) = prompt.display_input();
        let line = format!(" {} {} {}", prompt.message, prompt.mode_label(), input);

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(vec![Line::default(), Line::from(line)])
                .style(style)
                .block(Block::default().style(style)),
            popup,
        );

        let x = 1 + prompt.message.len() + 1 + prompt.mode_label().len() + 1 + cursor_col;
        let x = area.x.saturating_add(u16::try_from(x).unwrap_or(u16::MAX));
        if x < area.x + area.width {
            frame.set_cursor_position(Position::new(x, popup.y + 1));
        }
    }
}
