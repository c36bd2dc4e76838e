//! Diagnostic emitters.
//!
//! - Terminal: human-readable output with source excerpts and optional color
//! - JSON: the editor wire format, one array of messages

mod json;
mod terminal;

pub use json::{render_messages, JsonEmitter};
pub use terminal::{ColorMode, TerminalEmitter};

use crate::{Level, Log, Message};

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    fn emit(&mut self, message: &Message);

    fn emit_all(&mut self, log: &Log) {
        for message in log {
            self.emit(message);
        }
    }

    fn flush(&mut self);

    /// Emit a closing summary of errors and warnings.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);

    /// Emit every message of `log` followed by its summary.
    fn emit_log(&mut self, log: &Log) {
        self.emit_all(log);
        self.emit_summary(log.count(Level::Error), log.count(Level::Warning));
        self.flush();
    }
}
