//! Diagnostics for every Lumen compiler phase.
//!
//! - [`Message`]: a leveled diagnostic pointing at a `begin..end` source range
//! - [`Log`]: the ordered, append-only accumulator threaded through each phase
//! - [`emitter`]: terminal and JSON renderings of a log
//!
//! Diagnostics never abort a phase. Each phase returns its partial result
//! together with a `Log`, and callers decide whether to continue.

pub mod emitter;
mod log;
mod message;

pub use log::Log;
pub use message::{Level, Message};
