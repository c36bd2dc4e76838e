//! The `check` command: compile a file without running it.

use super::{emit_diagnostics, environment, read_file, Options, Report};
use crate::pipeline::{compile, type_name, ExecutionResult};

/// Type-check the program at `path` and print its type.
pub fn check_file(path: &str, options: Options) {
    let source = read_file(path);
    let environment = environment(options);
    let compilation = compile(&source, &environment);

    if options.json {
        let execution = ExecutionResult::from(compilation.clone());
        println!("{}", Report::new(&execution).to_json());
    } else {
        emit_diagnostics(&compilation.messages, &source, options);
        if let Some(expression) = &compilation.expression {
            println!("{}", type_name(&expression.ty));
        }
    }

    if !compilation.compiled {
        std::process::exit(1);
    }
}
