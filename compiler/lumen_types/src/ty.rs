//! Types as values.
//!
//! A type is a [`LazyValue`] plus the interface constraints it carries.
//! Nominal types are `UserDefinedLiteral`s, `List<T>` is an application of
//! the `List` literal, and function types are curried applications of the
//! `function` literal: `(A, B) -> R` is `function<A, function<B, R>>` and
//! `() -> R` is `function<R>`.

use std::fmt::{self, Write as _};
use std::rc::Rc;

use lumen_value::{errors, EvaluationError, LazyValue, Value, FUNCTION_LITERAL};

use lumen_stack::ensure_sufficient_stack;

pub const INTEGER: &str = "Integer";
pub const FLOAT: &str = "Float";
pub const STRING: &str = "String";
pub const BOOLEAN: &str = "Boolean";
pub const LIST: &str = "List";

/// `child` must implement the interface named by `parent`.
///
/// For a single-parameter interface `I<T>` the parent is the literal `I`; for
/// `I<A, B>` the child is `A` and the parent is the application `I<B>`.
#[derive(Clone, Debug)]
pub struct TypeConstraint {
    pub child: LazyValue,
    pub parent: LazyValue,
}

impl TypeConstraint {
    pub fn new(interface: &str, child: LazyValue, rest: Vec<LazyValue>) -> Self {
        let parent = if rest.is_empty() {
            Value::literal(interface).into_lazy()
        } else {
            Value::Application {
                callee: Value::literal(interface).into_lazy(),
                parameters: rest,
            }
            .into_lazy()
        };
        TypeConstraint { child, parent }
    }

    pub fn interface_name(&self) -> Result<Rc<str>, EvaluationError> {
        let parent = self.parent.force()?;
        let literal = match &parent {
            Value::Application { callee, .. } => callee.force()?,
            other => other.clone(),
        };
        match literal {
            Value::UserDefinedLiteral(name) => Ok(name),
            other => Err(errors::unresolved_type(other.to_string())),
        }
    }

    /// Interface arguments in declaration order: the child, then the rest.
    pub fn arguments(&self) -> Result<Vec<LazyValue>, EvaluationError> {
        let mut arguments = vec![self.child.clone()];
        if let Value::Application { parameters, .. } = self.parent.force()? {
            arguments.extend(parameters);
        }
        Ok(arguments)
    }

    /// Rewrite both sides with `f`.
    pub fn try_map<E>(
        &self,
        mut f: impl FnMut(&LazyValue) -> Result<LazyValue, E>,
    ) -> Result<TypeConstraint, E> {
        Ok(TypeConstraint {
            child: f(&self.child)?,
            parent: f(&self.parent)?,
        })
    }
}

impl fmt::Display for TypeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Ok(name), Ok(arguments)) = (self.interface_name(), self.arguments()) else {
            return write!(f, "<error>");
        };
        write!(f, "{name}<")?;
        for (index, argument) in arguments.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            match argument.force() {
                Ok(value) => write!(f, "{value}")?,
                Err(_) => write!(f, "<error>")?,
            }
        }
        write!(f, ">")
    }
}

/// A type value with the constraints it carries.
#[derive(Clone, Debug)]
pub struct Type {
    pub value: LazyValue,
    pub constraints: Vec<TypeConstraint>,
}

impl Type {
    pub fn new(value: LazyValue) -> Self {
        Type {
            value,
            constraints: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_constraints(mut self, constraints: Vec<TypeConstraint>) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn nothing() -> Self {
        Type::new(Value::Nothing.into_lazy())
    }
}

impl From<LazyValue> for Type {
    fn from(value: LazyValue) -> Self {
        Type::new(value)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.force() {
            Ok(value) => write!(f, "{value}")?,
            Err(_) => write!(f, "<error>")?,
        }
        for (index, constraint) in self.constraints.iter().enumerate() {
            let separator = if index == 0 { " where " } else { ", " };
            write!(f, "{separator}{constraint}")?;
        }
        Ok(())
    }
}

// ========================================
// Constructors
// ========================================

pub fn named(name: &str) -> LazyValue {
    Value::literal(name).into_lazy()
}

pub fn integer() -> LazyValue {
    named(INTEGER)
}

pub fn float() -> LazyValue {
    named(FLOAT)
}

pub fn string() -> LazyValue {
    named(STRING)
}

pub fn boolean() -> LazyValue {
    named(BOOLEAN)
}

pub fn list_of(element: LazyValue) -> LazyValue {
    Value::Application {
        callee: named(LIST),
        parameters: vec![element],
    }
    .into_lazy()
}

/// Curried function type over `parameters`.
pub fn function_of(parameters: Vec<LazyValue>, result: LazyValue) -> LazyValue {
    if parameters.is_empty() {
        return Value::Application {
            callee: named(FUNCTION_LITERAL),
            parameters: vec![result],
        }
        .into_lazy();
    }
    parameters.into_iter().rev().fold(result, |rest, parameter| {
        Value::Application {
            callee: named(FUNCTION_LITERAL),
            parameters: vec![parameter, rest],
        }
        .into_lazy()
    })
}

/// One layer of a curried function type.
#[derive(Clone, Debug)]
pub enum FunctionShape {
    /// `() -> result`
    Nullary(LazyValue),
    /// `(parameter) -> rest`
    Unary {
        parameter: LazyValue,
        rest: LazyValue,
    },
}

pub fn function_shape(value: &Value) -> Result<Option<FunctionShape>, EvaluationError> {
    let Some(parameters) = applied_parameters(value, FUNCTION_LITERAL)? else {
        return Ok(None);
    };
    Ok(match parameters.as_slice() {
        [result] => Some(FunctionShape::Nullary(result.clone())),
        [parameter, rest] => Some(FunctionShape::Unary {
            parameter: parameter.clone(),
            rest: rest.clone(),
        }),
        _ => None,
    })
}

/// Element type of `List<T>`.
pub fn list_element(value: &Value) -> Result<Option<LazyValue>, EvaluationError> {
    Ok(match applied_parameters(value, LIST)?.as_deref() {
        Some([element]) => Some(element.clone()),
        _ => None,
    })
}

fn applied_parameters(value: &Value, name: &str) -> Result<Option<Vec<LazyValue>>, EvaluationError> {
    let Value::Application { callee, parameters } = value else {
        return Ok(None);
    };
    Ok(match callee.force()? {
        Value::UserDefinedLiteral(literal) if &*literal == name => Some(parameters.clone()),
        _ => None,
    })
}

pub fn is_nothing(value: &LazyValue) -> bool {
    matches!(value.force(), Ok(Value::Nothing))
}

// ========================================
// Comparison and keys
// ========================================

/// Structural equality. Variables compare by kind and id; callables never
/// compare equal.
pub fn same_type(left: &LazyValue, right: &LazyValue) -> Result<bool, EvaluationError> {
    if left.ptr_eq(right) {
        return Ok(true);
    }
    ensure_sufficient_stack(|| same_value(&left.force()?, &right.force()?))
}

fn same_value(left: &Value, right: &Value) -> Result<bool, EvaluationError> {
    Ok(match (left, right) {
        (Value::Anything, Value::Anything) | (Value::Nothing, Value::Nothing) => true,
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::UserDefinedLiteral(a), Value::UserDefinedLiteral(b)) => a == b,
        (Value::UnboundVariable(a), Value::UnboundVariable(b))
        | (Value::BoundVariable(a), Value::BoundVariable(b)) => a == b,
        (Value::List(a), Value::List(b)) => all_same(&a.to_vec()?, &b.to_vec()?)?,
        (Value::Record(a), Value::Record(b)) => {
            a.len() == b.len()
                && a.keys().eq(b.keys())
                && all_same(
                    &a.values().cloned().collect::<Vec<_>>(),
                    &b.values().cloned().collect::<Vec<_>>(),
                )?
        }
        (
            Value::Application {
                callee: left_callee,
                parameters: left_parameters,
            },
            Value::Application {
                callee: right_callee,
                parameters: right_parameters,
            },
        ) => same_type(left_callee, right_callee)? && all_same(left_parameters, right_parameters)?,
        _ => false,
    })
}

fn all_same(left: &[LazyValue], right: &[LazyValue]) -> Result<bool, EvaluationError> {
    if left.len() != right.len() {
        return Ok(false);
    }
    for (left, right) in left.iter().zip(right) {
        if !same_type(left, right)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Canonical text of a type, with variables distinguished by id.
pub fn type_key(value: &LazyValue) -> Result<String, EvaluationError> {
    let mut key = String::new();
    write_key(&mut key, value)?;
    Ok(key)
}

fn write_key(out: &mut String, value: &LazyValue) -> Result<(), EvaluationError> {
    let value = value.force()?;
    ensure_sufficient_stack(|| {
        match &value {
            Value::UnboundVariable(variable) | Value::BoundVariable(variable) => {
                let _ = write!(out, "{}'{}", variable.name, variable.id);
            }
            Value::List(list) => {
                out.push('[');
                write_keys(out, &list.to_vec()?)?;
                out.push(']');
            }
            Value::Record(fields) => {
                out.push('{');
                for (index, (name, field)) in fields.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(name);
                    out.push_str(": ");
                    write_key(out, field)?;
                }
                out.push('}');
            }
            Value::Application { callee, parameters } => {
                write_key(out, callee)?;
                out.push('<');
                write_keys(out, parameters)?;
                out.push('>');
            }
            Value::Lambda(_) | Value::NativeLambda(_) | Value::PartialApplication(_) => {
                out.push_str("<function>");
            }
            other => {
                let _ = write!(out, "{other}");
            }
        }
        Ok(())
    })
}

fn write_keys(out: &mut String, values: &[LazyValue]) -> Result<(), EvaluationError> {
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        write_key(out, value)?;
    }
    Ok(())
}

/// Name under which the dictionary satisfying `constraint` is bound, such as
/// `Numeric<Integer>`.
pub fn implicit_key(constraint: &TypeConstraint) -> Result<String, EvaluationError> {
    let mut key = constraint.interface_name()?.to_string();
    key.push('<');
    write_keys(&mut key, &constraint.arguments()?)?;
    key.push('>');
    Ok(key)
}

/// Key of the implementation of `interface` for `arguments`.
pub fn implementation_key(
    interface: &str,
    arguments: &[LazyValue],
) -> Result<String, EvaluationError> {
    let mut key = interface.to_string();
    key.push('<');
    write_keys(&mut key, arguments)?;
    key.push('>');
    Ok(key)
}
