//! Program entry points.
//!
//! [`compile`] runs tokenizer, parser, type engine and monotizer, stopping at
//! the first stage that reports anything. [`evaluate`] runs a compiled
//! expression and forces its root. [`execute`] does both.

use lumen_diagnostic::Log;
use lumen_ir::{SourceSpan, Token};
use lumen_types::{monotize, type_expression, MonoExpression};
use lumen_value::{EvaluationError, LazyValue, Value};
use tracing::{debug, warn};

use crate::library::Environment;

#[derive(Clone, Debug)]
pub struct CompilationResult {
    pub tokens: Vec<Token>,
    pub messages: Log,
    /// Present once the expression made it through every stage.
    pub expression: Option<MonoExpression>,
    pub compiled: bool,
}

#[derive(Clone, Debug)]
pub struct EvaluationResult {
    pub messages: Log,
    pub result: Option<Value>,
    pub evaluated: bool,
    /// Fatal failure of a compiled program, kept apart from diagnostics.
    pub error: Option<EvaluationError>,
}

/// Both results of [`execute`]; the evaluation fields stay empty when
/// compilation failed.
#[derive(Clone, Debug)]
pub struct ExecutionResult {
    pub tokens: Vec<Token>,
    pub messages: Log,
    pub expression: Option<MonoExpression>,
    pub compiled: bool,
    pub result: Option<Value>,
    pub evaluated: bool,
    pub error: Option<EvaluationError>,
}

impl ExecutionResult {
    fn new(compilation: CompilationResult, evaluation: Option<EvaluationResult>) -> Self {
        let CompilationResult {
            tokens,
            mut messages,
            expression,
            compiled,
        } = compilation;
        let (result, evaluated, error) = match evaluation {
            Some(evaluation) => {
                messages.append(evaluation.messages);
                (evaluation.result, evaluation.evaluated, evaluation.error)
            }
            None => (None, false, None),
        };
        ExecutionResult {
            tokens,
            messages,
            expression,
            compiled,
            result,
            evaluated,
            error,
        }
    }
}

impl From<CompilationResult> for ExecutionResult {
    fn from(compilation: CompilationResult) -> Self {
        ExecutionResult::new(compilation, None)
    }
}

/// Compile one expression.
#[tracing::instrument(level = "debug", skip_all, fields(len = code.len()))]
pub fn compile(code: &str, environment: &Environment) -> CompilationResult {
    let tokenized = lumen_lexer::tokenize(code);
    let mut result = CompilationResult {
        tokens: tokenized.tokens,
        messages: tokenized.messages,
        expression: None,
        compiled: false,
    };
    if !result.messages.is_empty() {
        debug!("stopped after tokenizing");
        return result;
    }

    let parsed = lumen_parse::interpret_syntax_tree(&result.tokens);
    result.messages.append(parsed.messages);
    let mut expressions = parsed.expressions.into_iter();
    let Some(root) = expressions.next() else {
        return result;
    };
    let extra = expressions
        .map(|expression| expression.span)
        .reduce(SourceSpan::merge);
    if let Some(span) = extra {
        result.messages.error("Unexpected tokens after expression.", span);
    }
    if !result.messages.is_empty() {
        debug!("stopped after parsing");
        return result;
    }

    let (log, typed) = type_expression(&environment.types, &root);
    if !log.is_empty() {
        debug!(messages = log.len(), "stopped after typing");
        result.messages.append(log);
        return result;
    }

    let (log, expression) = monotize(&environment.types, &typed, &typed.ty.value);
    if !log.is_empty() {
        debug!(messages = log.len(), "stopped after monotization");
        result.messages.append(log);
        return result;
    }

    result.expression = Some(expression);
    result.compiled = true;
    result
}

/// Evaluate a compiled expression and force its root value.
#[tracing::instrument(level = "debug", skip_all)]
pub fn evaluate(expression: &MonoExpression, environment: &Environment) -> EvaluationResult {
    match lumen_eval::evaluate(&environment.values, expression).force() {
        Ok(value) => EvaluationResult {
            messages: Log::new(),
            result: Some(value),
            evaluated: true,
            error: None,
        },
        Err(error) => {
            warn!(%error, "evaluation failed");
            EvaluationResult {
                messages: Log::new(),
                result: None,
                evaluated: false,
                error: Some(error),
            }
        }
    }
}

/// Compile, then evaluate if compilation succeeded.
pub fn execute(code: &str, environment: &Environment) -> ExecutionResult {
    let compilation = compile(code, environment);
    let evaluation = match &compilation.expression {
        Some(expression) if compilation.compiled => Some(evaluate(expression, environment)),
        _ => None,
    };
    ExecutionResult::new(compilation, evaluation)
}

/// Render a type for display.
pub(crate) fn type_name(ty: &LazyValue) -> String {
    ty.force()
        .map_or_else(|_| "<error>".to_string(), |ty| ty.to_string())
}
