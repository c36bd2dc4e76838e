//! Monotization.
//!
//! Turns a resolved typed tree into the tree the evaluator runs. Interface
//! members become lookups into one dictionary: the implicit parameter chosen
//! during resolution, or the single implementation whose instantiated
//! member signature converges with the type expected at the use. Interface
//! declarations disappear; implementations become dictionary bindings.

use std::rc::Rc;

use lumen_diagnostic::Log;
use lumen_ir::SourceSpan;
use lumen_value::{EvaluationError, LazyValue};

use crate::converge::converge;
use crate::implicit::ResolvedImplicit;
use crate::scope::{TypeImplementation, TypeScope};
use lumen_stack::ensure_sufficient_stack;
use crate::ty::list_element;
use crate::typed::{TypedExpression, TypedKind};

/// A node of the evaluable tree.
#[derive(Clone, Debug)]
pub struct MonoExpression {
    pub kind: MonoKind,
    pub ty: LazyValue,
    pub span: SourceSpan,
}

#[derive(Clone, Debug)]
pub enum MonoKind {
    Integer(i64),
    Float(f64),
    String(Rc<str>),
    Boolean(bool),
    /// A name, applied to the dictionaries bound under `dictionaries` first
    /// when there are any.
    Identifier {
        name: String,
        dictionaries: Vec<String>,
    },
    /// Field `member` of the dictionary bound under `dictionary`.
    Member {
        dictionary: String,
        member: String,
    },
    Array(Vec<MonoExpression>),
    Function {
        /// Dictionary names, taken before the ordinary parameters.
        implicit_parameters: Vec<String>,
        parameters: Vec<String>,
        body: Rc<MonoExpression>,
    },
    Call {
        callee: Box<MonoExpression>,
        arguments: Vec<Option<MonoExpression>>,
    },
    Binding {
        name: String,
        value: Box<MonoExpression>,
        body: Box<MonoExpression>,
    },
    /// Bind the dictionary built from `members` under `dictionary`.
    Implementation {
        dictionary: String,
        members: Vec<(String, MonoExpression)>,
        body: Box<MonoExpression>,
    },
    Unrecognized,
}

/// Monotize `expression`, which is expected to have type `expected`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn monotize(
    scope: &TypeScope,
    expression: &TypedExpression,
    expected: &LazyValue,
) -> (Log, MonoExpression) {
    let mut monotizer = Monotizer { log: Log::new() };
    let mono = monotizer.monotize(scope, expression, expected);
    (monotizer.log, mono)
}

struct Monotizer {
    log: Log,
}

impl Monotizer {
    fn monotize(
        &mut self,
        scope: &TypeScope,
        expression: &TypedExpression,
        expected: &LazyValue,
    ) -> MonoExpression {
        ensure_sufficient_stack(|| self.monotize_inner(scope, expression, expected))
    }

    /// Children are expected to have their own resolved type.
    fn child(&mut self, scope: &TypeScope, expression: &TypedExpression) -> MonoExpression {
        self.monotize(scope, expression, &expression.ty.value)
    }

    fn monotize_inner(
        &mut self,
        scope: &TypeScope,
        expression: &TypedExpression,
        expected: &LazyValue,
    ) -> MonoExpression {
        let kind = match &expression.kind {
            TypedKind::Integer(n) => MonoKind::Integer(*n),
            TypedKind::Float(x) => MonoKind::Float(*x),
            TypedKind::String(text) => MonoKind::String(Rc::clone(text)),
            TypedKind::Boolean(b) => MonoKind::Boolean(*b),
            TypedKind::Identifier { name, implicits } => MonoKind::Identifier {
                name: name.clone(),
                dictionaries: implicits
                    .iter()
                    .map(|implicit| implicit.key().to_string())
                    .collect(),
            },
            TypedKind::Method {
                interface,
                member,
                resolved,
            } => match resolved {
                Some(ResolvedImplicit::Parameter { key } | ResolvedImplicit::Implementation { key }) => {
                    MonoKind::Member {
                        dictionary: key.clone(),
                        member: member.clone(),
                    }
                }
                None => self.select_member(scope, interface, member, expression, expected),
            },
            TypedKind::Array(elements) => {
                let element_type = expected
                    .force()
                    .ok()
                    .and_then(|list| list_element(&list).ok().flatten());
                MonoKind::Array(
                    elements
                        .iter()
                        .map(|element| match &element_type {
                            Some(element_type) => self.monotize(scope, element, element_type),
                            None => self.child(scope, element),
                        })
                        .collect(),
                )
            }
            TypedKind::Function {
                parameters,
                body,
                implicit_parameters,
                ..
            } => MonoKind::Function {
                implicit_parameters: implicit_parameters.clone(),
                parameters: parameters
                    .iter()
                    .map(|parameter| parameter.name.clone())
                    .collect(),
                body: Rc::new(self.child(scope, body)),
            },
            TypedKind::FunctionCall { callee, arguments } => MonoKind::Call {
                callee: Box::new(self.child(scope, callee)),
                arguments: arguments
                    .iter()
                    .map(|argument| argument.as_ref().map(|argument| self.child(scope, argument)))
                    .collect(),
            },
            TypedKind::Binding { name, value, body } => MonoKind::Binding {
                name: name.clone(),
                value: Box::new(self.child(scope, value)),
                body: Box::new(self.monotize(scope, body, expected)),
            },
            TypedKind::Interface { interface, body } => {
                let mut child = scope.child();
                child.declare_interface(Rc::clone(interface));
                return self.monotize(&child, body, expected);
            }
            TypedKind::Implementation {
                implementation,
                members,
                body,
            } => {
                let members = members
                    .iter()
                    .map(|(name, member)| (name.clone(), self.child(scope, member)))
                    .collect();
                let mut child = scope.child();
                child.declare_implementation(Rc::clone(implementation));
                MonoKind::Implementation {
                    dictionary: implementation.key.clone(),
                    members,
                    body: Box::new(self.monotize(&child, body, expected)),
                }
            }
            TypedKind::Unrecognized => MonoKind::Unrecognized,
        };
        MonoExpression {
            kind,
            ty: expression.ty.value.clone(),
            span: expression.span,
        }
    }

    /// Pick the implementation whose member signature converges with
    /// `expected`. Exactly one must.
    fn select_member(
        &mut self,
        scope: &TypeScope,
        interface: &str,
        member: &str,
        expression: &TypedExpression,
        expected: &LazyValue,
    ) -> MonoKind {
        match matching_implementations(scope, interface, member, expected) {
            Ok(candidates) => match candidates.as_slice() {
                [implementation] => {
                    return MonoKind::Member {
                        dictionary: implementation.key.clone(),
                        member: member.to_string(),
                    };
                }
                [] => self.log.error(
                    format!(
                        "No implementation of {interface} for {}",
                        constrained_type(expression)
                    ),
                    expression.span,
                ),
                _ => self.log.error(
                    format!(
                        "Ambiguous implementation of {interface} for {}",
                        constrained_type(expression)
                    ),
                    expression.span,
                ),
            },
            Err(error) => self.log.error(error.to_string(), expression.span),
        }
        MonoKind::Unrecognized
    }
}

fn matching_implementations(
    scope: &TypeScope,
    interface: &str,
    member: &str,
    expected: &LazyValue,
) -> Result<Vec<Rc<TypeImplementation>>, EvaluationError> {
    let Some(declaration) = scope.interface(interface) else {
        return Ok(Vec::new());
    };
    let mut matching = Vec::new();
    for implementation in scope.implementations_of(interface) {
        let Some(signature) = declaration.instantiate_member(member, &implementation.arguments)?
        else {
            continue;
        };
        if converge(&signature, expected)?.is_some() {
            matching.push(implementation);
        }
    }
    Ok(matching)
}

/// The type the member's constraint is about, for messages.
fn constrained_type(expression: &TypedExpression) -> String {
    expression
        .ty
        .constraints
        .first()
        .and_then(|constraint| constraint.child.force().ok())
        .map_or_else(|| "<unknown>".to_string(), |child| child.to_string())
}
