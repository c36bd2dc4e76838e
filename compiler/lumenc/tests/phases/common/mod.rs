//! Shared helpers for phase tests.

use lumen_diagnostic::Message;
use lumenc::{execute, prelude, Environment, ExecutionResult};

pub fn environment() -> Environment {
    prelude().environment().expect("the prelude builds")
}

pub fn run(source: &str) -> ExecutionResult {
    execute(source, &environment())
}

/// Rendered value of a program that must compile and evaluate cleanly.
pub fn value_of(source: &str) -> String {
    let executed = run(source);
    assert!(
        executed.messages.is_empty(),
        "unexpected diagnostics for {source}: {:?}",
        executed.messages
    );
    assert!(
        executed.evaluated,
        "{source} failed to evaluate: {:?}",
        executed.error
    );
    executed.result.unwrap().to_string()
}

/// Diagnostics of a program that must not compile.
pub fn diagnostics_of(source: &str) -> Vec<Message> {
    let executed = run(source);
    assert!(!executed.compiled, "{source} compiled");
    assert!(!executed.evaluated);
    executed.messages.into_messages()
}

pub fn texts(messages: &[Message]) -> Vec<&str> {
    messages.iter().map(|message| message.text.as_str()).collect()
}
