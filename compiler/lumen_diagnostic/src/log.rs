//! The diagnostic accumulator.
//!
//! `Log` is a monoid: [`Log::new`] is the identity and [`Log::append`] (or
//! `+`) concatenates, preserving source order. Phases own a `Log` and return
//! it with their result; nothing is collected through global state.

use std::ops::{Add, AddAssign};

use lumen_ir::SourceSpan;

use crate::{Level, Message};

#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Log {
    messages: Vec<Message>,
}

impl Log {
    pub fn new() -> Self {
        Log::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Record an error at `span`.
    pub fn error(&mut self, text: impl Into<String>, span: SourceSpan) {
        self.push(Message::error(text, span));
    }

    pub fn warning(&mut self, text: impl Into<String>, span: SourceSpan) {
        self.push(Message::warning(text, span));
    }

    /// Move every message of `other` to the end of this log.
    pub fn append(&mut self, other: Log) {
        self.messages.extend(other.messages);
    }

    /// Drop messages recorded after the log had `len` entries.
    pub fn truncate(&mut self, len: usize) {
        self.messages.truncate(len);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(Message::is_error)
    }

    pub fn count(&self, level: Level) -> usize {
        self.messages.iter().filter(|m| m.level == level).count()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

impl Add for Log {
    type Output = Log;

    fn add(mut self, rhs: Log) -> Log {
        self.append(rhs);
        self
    }
}

impl AddAssign for Log {
    fn add_assign(&mut self, rhs: Log) {
        self.append(rhs);
    }
}

impl Extend<Message> for Log {
    fn extend<I: IntoIterator<Item = Message>>(&mut self, iter: I) {
        self.messages.extend(iter);
    }
}

impl FromIterator<Message> for Log {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        Log {
            messages: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Message>> for Log {
    fn from(messages: Vec<Message>) -> Self {
        Log { messages }
    }
}

impl IntoIterator for Log {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

impl<'a> IntoIterator for &'a Log {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}
