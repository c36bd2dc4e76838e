//! The typed expression tree produced by inference.

use std::rc::Rc;

use lumen_ir::{SourceSpan, TokenRange};
use lumen_value::{LazyValue, TypeVariable};

use crate::implicit::ResolvedImplicit;
use crate::scope::{TypeImplementation, TypeInterface};
use crate::ty::Type;

/// A node with its type.
///
/// After [`type_expression`](crate::type_expression) returns, `ty` is fully
/// resolved: every variable still in it is genuinely unconstrained.
/// `ty.constraints` lists the constraints this node introduces: the
/// instantiated constraints of an identifier, or the implicit parameters of
/// a function.
#[derive(Clone, Debug)]
pub struct TypedExpression {
    pub kind: TypedKind,
    pub ty: Type,
    pub tokens: TokenRange,
    pub span: SourceSpan,
}

#[derive(Clone, Debug)]
pub struct TypedParameter {
    pub name: String,
    pub ty: LazyValue,
}

#[derive(Clone, Debug)]
pub enum TypedKind {
    Integer(i64),
    Float(f64),
    String(Rc<str>),
    Boolean(bool),
    /// A value or parameter reference. `implicits` parallels
    /// `ty.constraints` once resolved.
    Identifier {
        name: String,
        implicits: Vec<ResolvedImplicit>,
    },
    /// A reference to an interface member, dispatched by monotization.
    /// Its constraint is `ty.constraints[0]`.
    Method {
        interface: Rc<str>,
        member: String,
        resolved: Option<ResolvedImplicit>,
    },
    Array(Vec<TypedExpression>),
    Function {
        parameters: Vec<TypedParameter>,
        body: Box<TypedExpression>,
        /// Variables this function is generic over.
        generalized: Vec<TypeVariable>,
        /// Dictionary keys, parallel to `ty.constraints`.
        implicit_parameters: Vec<String>,
    },
    FunctionCall {
        callee: Box<TypedExpression>,
        arguments: Vec<Option<TypedExpression>>,
    },
    Binding {
        name: String,
        value: Box<TypedExpression>,
        body: Box<TypedExpression>,
    },
    Interface {
        interface: Rc<TypeInterface>,
        body: Box<TypedExpression>,
    },
    Implementation {
        implementation: Rc<TypeImplementation>,
        members: Vec<(String, TypedExpression)>,
        body: Box<TypedExpression>,
    },
    Unrecognized,
}

impl TypedExpression {
    pub fn new(kind: TypedKind, ty: Type, tokens: TokenRange, span: SourceSpan) -> Self {
        TypedExpression {
            kind,
            ty,
            tokens,
            span,
        }
    }

    /// Visit this node and every descendant, parents first.
    pub fn walk(&self, f: &mut impl FnMut(&TypedExpression)) {
        f(self);
        match &self.kind {
            TypedKind::Array(elements) => {
                for element in elements {
                    element.walk(f);
                }
            }
            TypedKind::Function { body, .. }
            | TypedKind::Interface { body, .. } => body.walk(f),
            TypedKind::FunctionCall { callee, arguments } => {
                callee.walk(f);
                for argument in arguments.iter().flatten() {
                    argument.walk(f);
                }
            }
            TypedKind::Binding { value, body, .. } => {
                value.walk(f);
                body.walk(f);
            }
            TypedKind::Implementation { members, body, .. } => {
                for (_, member) in members {
                    member.walk(f);
                }
                body.walk(f);
            }
            TypedKind::Integer(_)
            | TypedKind::Float(_)
            | TypedKind::String(_)
            | TypedKind::Boolean(_)
            | TypedKind::Identifier { .. }
            | TypedKind::Method { .. }
            | TypedKind::Unrecognized => {}
        }
    }
}
