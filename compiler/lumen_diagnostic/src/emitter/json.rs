//! JSON Emitter
//!
//! Writes the whole log as one JSON array in the editor wire format.

use std::io::Write;

use crate::Message;

use super::DiagnosticEmitter;

pub struct JsonEmitter<W: Write> {
    writer: W,
    pending: Vec<Message>,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            pending: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Render messages as a JSON array string.
pub fn render_messages(messages: &[Message]) -> String {
    serde_json::to_string(messages).unwrap_or_else(|_| "[]".to_string())
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, message: &Message) {
        self.pending.push(message.clone());
    }

    fn flush(&mut self) {
        let _ = writeln!(self.writer, "{}", render_messages(&self.pending));
        self.pending.clear();
        let _ = self.writer.flush();
    }

    /// Counts are implied by the array itself.
    fn emit_summary(&mut self, _error_count: usize, _warning_count: usize) {}
}
