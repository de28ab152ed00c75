//! Prompt confirmation action handlers.

use super::types::{NibbleCursor, PromptPurpose};
use super::HexEditor;
use crate::model::ByteStore;
use crate::view::prompt::{Prompt, PromptValue};

impl<S: ByteStore> HexEditor<S> {
    /// Apply a confirmed prompt according to its purpose
    pub(super) fn handle_prompt_confirm(&mut self, prompt: Prompt) {
        let byte = self.cursor.byte();
        match (prompt.purpose, prompt.value()) {
            (PromptPurpose::GotoOffset, PromptValue::Number(offset)) => {
                self.cursor = NibbleCursor::at_byte(offset.min(self.buffer.file_size()));
            }
            (PromptPurpose::InsertBytes, PromptValue::Number(count)) => {
                match self.buffer.insert(byte, count) {
                    Ok(()) => self.set_status_message(format!("Inserted {} bytes", count)),
                    Err(e) => self.report_error("Insert failed", &e),
                }
            }
            (PromptPurpose::RemoveBytes, PromptValue::Number(count)) => {
                let count = count.min(self.buffer.file_size() - byte);
                match self.buffer.remove(byte, count) {
                    Ok(()) => self.set_status_message(format!("Removed {} bytes", count)),
                    Err(e) => self.report_error("Remove failed", &e),
                }
            }
            (PromptPurpose::RemoveBytesBefore, PromptValue::Number(count)) => {
                let count = count.min(byte);
                match self.buffer.remove(byte - count, count) {
                    Ok(()) => {
                        self.cursor = NibbleCursor::at_byte(byte - count);
                        self.set_status_message(format!("Removed {} bytes", count));
                    }
                    Err(e) => self.report_error("Remove failed", &e),
                }
            }
            (PromptPurpose::Find, PromptValue::Data(pattern)) => {
                self.search.set_pattern(pattern);
                let result = self.search.find_next(&mut self.buffer, byte);
                self.apply_search_result(result);
            }
            (purpose, value) => {
                tracing::warn!("Prompt {:?} produced unexpected value {:?}", purpose, value);
            }
        }
    }
}
