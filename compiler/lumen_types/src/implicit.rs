//! Implicit resolution.
//!
//! Every constraint an identifier carries names a dictionary the identifier
//! needs at run time. Once inference is done, each one is either
//! - satisfied by the innermost implementation in scope whose arguments
//!   converge with it, or
//! - still generic, and owned by an enclosing `let`-bound function that
//!   takes the dictionary as an implicit parameter.
//!
//! Anything else is reported. Interface members (methods) with a concrete
//! constraint are left to the monotizer, which picks the implementation by
//! signature.

use lumen_diagnostic::Log;
use lumen_ir::SourceSpan;
use lumen_value::{EvaluationError, LazyValue};

use crate::converge::converge;
use crate::scope::{TypeImplementation, TypeScope};
use lumen_stack::ensure_sufficient_stack;
use crate::traverse::has_variables;
use crate::ty::{implicit_key, TypeConstraint};
use crate::typed::{TypedExpression, TypedKind};

/// Where the dictionary for one constraint comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedImplicit {
    /// The dictionary of an implementation, bound under `key`.
    Implementation { key: String },
    /// An implicit parameter of an enclosing function.
    Parameter { key: String },
}

impl ResolvedImplicit {
    pub fn key(&self) -> &str {
        match self {
            ResolvedImplicit::Implementation { key } | ResolvedImplicit::Parameter { key } => key,
        }
    }
}

/// Resolve the constraints of every identifier and method in `expression`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn resolve_implicits(
    scope: &TypeScope,
    mut expression: TypedExpression,
) -> (Log, TypedExpression) {
    let mut resolver = Resolver {
        log: Log::new(),
        owned: Vec::new(),
    };
    resolver.visit(scope, &mut expression, false);
    (resolver.log, expression)
}

/// The implementation in `scope` satisfying `constraint`, innermost first.
pub fn find_implementation(
    scope: &TypeScope,
    constraint: &TypeConstraint,
) -> Result<Option<std::rc::Rc<TypeImplementation>>, EvaluationError> {
    let interface = constraint.interface_name()?;
    let arguments = constraint.arguments()?;
    for implementation in scope.implementations_of(&interface) {
        if arguments_converge(&implementation.arguments, &arguments)? {
            return Ok(Some(implementation));
        }
    }
    Ok(None)
}

fn arguments_converge(
    implemented: &[LazyValue],
    required: &[LazyValue],
) -> Result<bool, EvaluationError> {
    if implemented.len() != required.len() {
        return Ok(false);
    }
    for (implemented, required) in implemented.iter().zip(required) {
        if converge(implemented, required)?.is_none() {
            return Ok(false);
        }
    }
    Ok(true)
}

struct Resolver {
    log: Log,
    /// Implicit parameter keys of the enclosing `let`-bound functions.
    owned: Vec<Vec<String>>,
}

impl Resolver {
    fn visit(&mut self, scope: &TypeScope, expression: &mut TypedExpression, let_bound: bool) {
        ensure_sufficient_stack(|| self.visit_inner(scope, expression, let_bound));
    }

    fn visit_inner(&mut self, scope: &TypeScope, expression: &mut TypedExpression, let_bound: bool) {
        let span = expression.span;
        match &mut expression.kind {
            TypedKind::Identifier { implicits, .. } => {
                let mut resolved = Vec::with_capacity(expression.ty.constraints.len());
                for constraint in &expression.ty.constraints {
                    match self.resolve_constraint(scope, constraint, span) {
                        Some(implicit) => resolved.push(implicit),
                        None => return,
                    }
                }
                *implicits = resolved;
            }
            TypedKind::Method { resolved, .. } => {
                let Some(constraint) = expression.ty.constraints.first() else {
                    return;
                };
                match has_variables(&constraint.child) {
                    Ok(true) => *resolved = self.resolve_constraint(scope, constraint, span),
                    Ok(false) => {}
                    Err(error) => self.log.error(error.to_string(), span),
                }
            }
            TypedKind::Array(elements) => {
                for element in elements {
                    self.visit(scope, element, false);
                }
            }
            TypedKind::Function {
                body,
                implicit_parameters,
                ..
            } => {
                if let_bound {
                    self.owned.push(implicit_parameters.clone());
                    self.visit(scope, body, false);
                    self.owned.pop();
                } else {
                    // Only a `let` can pass dictionaries in. Constraints still
                    // generic here are reported at the identifiers that carry
                    // them.
                    implicit_parameters.clear();
                    expression.ty.constraints.clear();
                    self.visit(scope, body, false);
                }
            }
            TypedKind::FunctionCall { callee, arguments } => {
                self.visit(scope, callee, false);
                for argument in arguments.iter_mut().flatten() {
                    self.visit(scope, argument, false);
                }
            }
            TypedKind::Binding { value, body, .. } => {
                self.visit(scope, value, true);
                self.visit(scope, body, false);
            }
            TypedKind::Interface { body, .. } => self.visit(scope, body, false),
            TypedKind::Implementation {
                implementation,
                members,
                body,
            } => {
                for (_, member) in members.iter_mut() {
                    self.visit(scope, member, false);
                }
                let mut child = scope.child();
                child.declare_implementation(std::rc::Rc::clone(implementation));
                self.visit(&child, body, false);
            }
            TypedKind::Integer(_)
            | TypedKind::Float(_)
            | TypedKind::String(_)
            | TypedKind::Boolean(_)
            | TypedKind::Unrecognized => {}
        }
    }

    fn resolve_constraint(
        &mut self,
        scope: &TypeScope,
        constraint: &TypeConstraint,
        span: SourceSpan,
    ) -> Option<ResolvedImplicit> {
        match self.try_resolve_constraint(scope, constraint, span) {
            Ok(resolved) => resolved,
            Err(error) => {
                self.log.error(error.to_string(), span);
                None
            }
        }
    }

    fn try_resolve_constraint(
        &mut self,
        scope: &TypeScope,
        constraint: &TypeConstraint,
        span: SourceSpan,
    ) -> Result<Option<ResolvedImplicit>, EvaluationError> {
        let interface = constraint.interface_name()?;
        let child = constraint.child.force()?;

        if has_variables(&constraint.child)? {
            let key = implicit_key(constraint)?;
            if self.owned.iter().any(|keys| keys.contains(&key)) {
                return Ok(Some(ResolvedImplicit::Parameter { key }));
            }
            self.log
                .error(format!("Could not resolve {interface} for {child}"), span);
            return Ok(None);
        }

        match find_implementation(scope, constraint)? {
            Some(implementation) => Ok(Some(ResolvedImplicit::Implementation {
                key: implementation.key.clone(),
            })),
            None => {
                self.log
                    .error(format!("No implementation of {interface} for {child}"), span);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests;
