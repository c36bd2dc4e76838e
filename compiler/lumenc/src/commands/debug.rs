//! Debug commands: `lex` and `parse` for inspecting compiler internals.

use super::{emit_diagnostics, read_file, Options};

/// Lex a file and display the token stream.
pub fn lex_file(path: &str, options: Options) {
    let content = read_file(path);
    let tokenized = lumen_lexer::tokenize(&content);

    println!("Tokens for '{}' ({} tokens):", path, tokenized.tokens.len());
    for token in &tokenized.tokens {
        println!("  {} {:?} @ {}-{}", token.kind, token.value, token.begin, token.end);
    }
    emit_diagnostics(&tokenized.messages, &content, options);
}

/// Parse a file and display the syntax tree.
pub fn parse_file(path: &str, options: Options) {
    let content = read_file(path);
    let tokenized = lumen_lexer::tokenize(&content);
    let parsed = lumen_parse::interpret_syntax_tree(&tokenized.tokens);

    println!("Parse result for '{path}':");
    println!("  Expressions: {}", parsed.expressions.len());
    println!("  Messages: {}", tokenized.messages.len() + parsed.messages.len());
    for expression in &parsed.expressions {
        println!();
        println!("{expression:#?}");
    }

    let mut log = tokenized.messages;
    log.append(parsed.messages);
    emit_diagnostics(&log, &content, options);
}
