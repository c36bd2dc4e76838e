//! Command handlers for the Lumen CLI.
//!
//! Each submodule implements one command. Option parsing, file reading and
//! result reporting are shared and live here.

use std::io::IsTerminal;

use lumen_diagnostic::emitter::{ColorMode, DiagnosticEmitter, JsonEmitter, TerminalEmitter};
use lumen_diagnostic::{Log, Message};
use serde::Serialize;

use crate::library::{Environment, Library};
use crate::pipeline::ExecutionResult;
use crate::prelude::prelude;

mod check;
mod debug;
mod run;

pub use check::check_file;
pub use debug::{lex_file, parse_file};
pub use run::{eval_source, run_file};

/// Flags shared by every command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Print one JSON document instead of human-readable output.
    pub json: bool,
    /// Start from the standard prelude rather than an empty library.
    pub prelude: bool,
    pub color: ColorMode,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            json: false,
            prelude: true,
            color: ColorMode::Auto,
        }
    }
}

/// Split command arguments into options and positional arguments.
pub fn parse_options(args: &[String]) -> Result<(Options, Vec<String>), String> {
    let mut options = Options::default();
    let mut positional = Vec::new();
    for arg in args {
        match arg.as_str() {
            "--json" => options.json = true,
            "--no-prelude" => options.prelude = false,
            "--color" => options.color = ColorMode::Always,
            _ if arg.starts_with("--color=") => {
                let value = &arg["--color=".len()..];
                options.color = ColorMode::parse(value)
                    .ok_or_else(|| format!("invalid --color value '{value}'"))?;
            }
            _ if arg.starts_with("--") => return Err(format!("unknown option '{arg}'")),
            _ => positional.push(arg.clone()),
        }
    }
    Ok((options, positional))
}

/// Read a file from disk, exiting with a user-friendly error message on failure.
pub(super) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Root environment for `options`, exiting if the library is malformed.
pub(super) fn environment(options: Options) -> Environment {
    let library = if options.prelude {
        prelude()
    } else {
        Library::new()
    };
    match library.environment() {
        Ok(environment) => environment,
        Err(error) => {
            eprintln!("internal error: {error}");
            std::process::exit(1);
        }
    }
}

/// Write `log` to stderr in the format `options` asks for.
pub(super) fn emit_diagnostics(log: &Log, source: &str, options: Options) {
    if log.is_empty() {
        return;
    }
    if options.json {
        JsonEmitter::new(std::io::stderr()).emit_log(log);
    } else {
        let is_tty = std::io::stderr().is_terminal();
        TerminalEmitter::stderr(source, options.color, is_tty).emit_log(log);
    }
}

/// JSON form of an [`ExecutionResult`].
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub compiled: bool,
    pub evaluated: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub messages: &'a [Message],
}

impl<'a> Report<'a> {
    pub fn new(execution: &'a ExecutionResult) -> Self {
        Report {
            compiled: execution.compiled,
            evaluated: execution.evaluated,
            ty: execution
                .expression
                .as_ref()
                .map(|expression| crate::pipeline::type_name(&expression.ty)),
            result: execution.result.as_ref().map(ToString::to_string),
            error: execution.error.as_ref().map(ToString::to_string),
            messages: execution.messages.messages(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
    }
}
