//! The `run` and `eval` commands: compile and evaluate a program.

use tracing::debug;

use super::{emit_diagnostics, environment, read_file, Options, Report};
use crate::pipeline::execute;

/// Run the program in the file at `path`.
pub fn run_file(path: &str, options: Options) {
    let source = read_file(path);
    eval_source(&source, options);
}

/// Run `source` and print its value.
///
/// Exits with status 1 when the program does not compile or fails while
/// being evaluated.
pub fn eval_source(source: &str, options: Options) {
    let environment = environment(options);
    let execution = execute(source, &environment);
    debug!(
        compiled = execution.compiled,
        evaluated = execution.evaluated,
        "executed"
    );

    if options.json {
        println!("{}", Report::new(&execution).to_json());
    } else {
        emit_diagnostics(&execution.messages, source, options);
        if let Some(result) = &execution.result {
            println!("{result}");
        }
        if let Some(error) = &execution.error {
            eprintln!("error: {error}");
        }
    }

    if !execution.evaluated {
        std::process::exit(1);
    }
}
