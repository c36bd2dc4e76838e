//! Lumen CLI
//!
//! Compiles and evaluates Lumen programs.

use lumenc::commands::{
    check_file, eval_source, lex_file, parse_file, parse_options, run_file, Options,
};

/// Install the tree-shaped trace subscriber when `LUMEN_LOG` is set.
///
/// `LUMEN_LOG` takes `EnvFilter` directives, e.g. `LUMEN_LOG=lumen_types=debug`.
fn init_tracing() {
    use tracing_subscriber::{prelude::*, EnvFilter};

    if std::env::var("LUMEN_LOG").is_ok() {
        let filter = EnvFilter::from_env("LUMEN_LOG");
        tracing_subscriber::registry()
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .init();
    }
}

/// Options and positional arguments after the command name, or exit.
fn command_arguments(args: &[String]) -> (Options, Vec<String>) {
    match parse_options(args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("error: {message}");
            std::process::exit(1);
        }
    }
}

/// The single positional argument of a command, or print `usage` and exit.
fn single(positional: &[String], usage: &str) -> String {
    match positional {
        [argument] => argument.clone(),
        _ => {
            eprintln!("Usage: {usage}");
            std::process::exit(1);
        }
    }
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    let (options, positional) = command_arguments(&args[2..]);

    match command.as_str() {
        "run" => {
            let path = single(&positional, "lumen run <file.lm> [options]");
            run_file(&path, options);
        }
        "eval" => {
            let source = single(&positional, "lumen eval '<expression>' [options]");
            eval_source(&source, options);
        }
        "check" => {
            let path = single(&positional, "lumen check <file.lm> [options]");
            check_file(&path, options);
        }
        "parse" => {
            let path = single(&positional, "lumen parse <file.lm>");
            parse_file(&path, options);
        }
        "lex" => {
            let path = single(&positional, "lumen lex <file.lm>");
            lex_file(&path, options);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("Lumen {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // If it looks like a file path, try to run it
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("lm"))
            {
                run_file(command, options);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("Lumen, a lazy expression language");
    println!();
    println!("Usage: lumen <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.lm>        Compile and evaluate a program");
    println!("  eval '<expression>'  Compile and evaluate source given inline");
    println!("  check <file.lm>      Type check a program and print its type");
    println!("  parse <file.lm>      Parse and display the syntax tree");
    println!("  lex <file.lm>        Tokenize and display tokens");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Options:");
    println!("  --json               Print results and diagnostics as JSON");
    println!("  --no-prelude         Start from an empty library");
    println!("  --color=<mode>       Diagnostic colors: auto, always, never");
    println!();
    println!("Set LUMEN_LOG (e.g. LUMEN_LOG=debug) to trace the compiler phases.");
}
