//! The diagnostic message and its wire format.

use std::fmt;

use lumen_ir::{Position, SourceSpan};
use serde::{Deserialize, Serialize};

/// Severity of a [`Message`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub enum Level {
    Info,
    Warning,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Info => write!(f, "info"),
            Level::Warning => write!(f, "warning"),
            Level::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic.
///
/// Serializes as
/// `{"text": .., "level": "Info"|"Warning"|"Error", "begin": [line, column], "end": [line, column]}`
/// with zero-indexed positions and `end` exclusive. Editor tooling reads this
/// shape verbatim.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(into = "MessageWire", from = "MessageWire")]
pub struct Message {
    pub level: Level,
    pub text: String,
    pub begin: Position,
    pub end: Position,
}

impl Message {
    pub fn new(level: Level, text: impl Into<String>, span: SourceSpan) -> Self {
        Message {
            level,
            text: text.into(),
            begin: span.begin,
            end: span.end,
        }
    }

    pub fn error(text: impl Into<String>, span: SourceSpan) -> Self {
        Message::new(Level::Error, text, span)
    }

    pub fn warning(text: impl Into<String>, span: SourceSpan) -> Self {
        Message::new(Level::Warning, text, span)
    }

    pub fn info(text: impl Into<String>, span: SourceSpan) -> Self {
        Message::new(Level::Info, text, span)
    }

    #[inline]
    pub fn span(&self) -> SourceSpan {
        SourceSpan::new(self.begin, self.end)
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at {}", self.level, self.text, self.begin)
    }
}

#[derive(Serialize, Deserialize)]
struct MessageWire {
    text: String,
    level: Level,
    begin: [u32; 2],
    end: [u32; 2],
}

impl From<Message> for MessageWire {
    fn from(message: Message) -> Self {
        MessageWire {
            text: message.text,
            level: message.level,
            begin: [message.begin.line, message.begin.column],
            end: [message.end.line, message.end.column],
        }
    }
}

impl From<MessageWire> for Message {
    fn from(wire: MessageWire) -> Self {
        Message {
            level: wire.level,
            text: wire.text,
            begin: Position::new(wire.begin[0], wire.begin[1]),
            end: Position::new(wire.end[0], wire.end[1]),
        }
    }
}

#[cfg(test)]
mod tests;
