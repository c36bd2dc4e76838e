//! Terminal Emitter
//!
//! Human-readable diagnostic output with a source excerpt and a caret line
//! under the offending columns.

use std::io::{self, Write};

use lumen_ir::LineIndex;

use crate::{Level, Message};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const INFO: &str = "\x1b[1;36m"; // Bold cyan
    pub const GUTTER: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// For `Auto`, `is_tty` decides.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse a `--color` flag value.
    pub fn parse(value: &str) -> Option<ColorMode> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// Terminal emitter with optional color support.
///
/// Holds the source text so each message can show the line it points at.
pub struct TerminalEmitter<'src, W: Write> {
    writer: W,
    lines: LineIndex<'src>,
    colors: bool,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    pub fn with_color_mode(writer: W, source: &'src str, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            lines: LineIndex::new(source),
            colors: mode.should_use_colors(is_tty),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn level_color(level: Level) -> &'static str {
        match level {
            Level::Error => colors::ERROR,
            Level::Warning => colors::WARNING,
            Level::Info => colors::INFO,
        }
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    /// Source line plus carets. Spans that continue past the line are
    /// underlined to its end; empty spans get a single caret.
    fn write_excerpt(&mut self, message: &Message) {
        let line = message.begin.line;
        let Some(text) = self.lines.line_text(line) else {
            return;
        };
        let number = (line + 1).to_string();
        let pad = " ".repeat(number.len());
        let line_chars = text.chars().count();

        let start = message.begin.column as usize;
        let end = if message.end.line > line {
            line_chars
        } else {
            message.end.column as usize
        };
        let width = end.saturating_sub(start).max(1);

        self.write_colored(&format!("{pad} |"), colors::GUTTER);
        let _ = writeln!(self.writer);
        self.write_colored(&format!("{number} |"), colors::GUTTER);
        let _ = writeln!(self.writer, " {text}");
        self.write_colored(&format!("{pad} |"), colors::GUTTER);
        let _ = write!(self.writer, " {}", " ".repeat(start));
        self.write_colored(&"^".repeat(width), Self::level_color(message.level));
        let _ = writeln!(self.writer);
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, message: &Message) {
        let level = message.level.to_string();
        self.write_colored(&level, Self::level_color(message.level));
        let _ = writeln!(self.writer, ": {}", message.text);
        let _ = writeln!(self.writer, "  --> {}", message.begin);
        self.write_excerpt(message);
        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count > 0 {
            self.write_colored("error", colors::ERROR);
            let error_part = if error_count == 1 {
                "previous error".to_string()
            } else {
                format!("{error_count} previous errors")
            };
            if warning_count > 0 {
                let _ = writeln!(
                    self.writer,
                    ": aborting due to {error_part}; {warning_count} warning{} emitted",
                    plural_s(warning_count)
                );
            } else {
                let _ = writeln!(self.writer, ": aborting due to {error_part}");
            }
        } else if warning_count > 0 {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {warning_count} warning{} emitted",
                plural_s(warning_count)
            );
        }
    }
}

impl<'src> TerminalEmitter<'src, io::Stderr> {
    pub fn stderr(source: &'src str, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), source, mode, is_tty)
    }
}
