//! The value model shared by run-time data and types.
//!
//! Types are values too: `Integer` the type is `UserDefinedLiteral("Integer")`,
//! `List<T>` is an `Application` of the `List` literal to a type variable, and
//! function types are curried applications of the `function` literal. Every
//! component is a [`LazyValue`], so both programs and types are evaluated on
//! demand.

mod display;

pub use display::{FUNCTION_LITERAL, LIST_DISPLAY_LIMIT};

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::{EvalResult, Lazy, LazyList};

pub type LazyValue = Lazy<Value>;

/// A type variable. Identity is the id; the name is for display only.
#[derive(Clone, Debug)]
pub struct TypeVariable {
    pub name: Rc<str>,
    pub id: u32,
}

static NEXT_VARIABLE_ID: AtomicU32 = AtomicU32::new(0);

impl TypeVariable {
    pub fn new(name: impl Into<Rc<str>>, id: u32) -> Self {
        TypeVariable {
            name: name.into(),
            id,
        }
    }

    /// A variable with an id never handed out before in this process.
    pub fn fresh(name: impl Into<Rc<str>>) -> Self {
        TypeVariable::new(name, NEXT_VARIABLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl PartialEq for TypeVariable {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeVariable {}

impl std::hash::Hash for TypeVariable {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Body of an interpreted function.
///
/// Implemented by the evaluator's closures; kept as a trait so this crate does
/// not depend on the evaluator.
pub trait Callable {
    fn call(&self, arguments: Vec<LazyValue>) -> EvalResult;
}

/// A host function taking exactly `arity` argument thunks.
pub type NativeBody = dyn Fn(&[LazyValue]) -> EvalResult;

#[derive(Clone)]
pub struct Lambda {
    pub parameters: Rc<[String]>,
    pub body: Rc<dyn Callable>,
}

impl Lambda {
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

#[derive(Clone)]
pub struct NativeLambda {
    pub name: Rc<str>,
    pub arity: usize,
    pub body: Rc<NativeBody>,
}

impl NativeLambda {
    pub fn new(
        name: impl Into<Rc<str>>,
        arity: usize,
        body: impl Fn(&[LazyValue]) -> EvalResult + 'static,
    ) -> Self {
        NativeLambda {
            name: name.into(),
            arity,
            body: Rc::new(body),
        }
    }
}

/// A callable with some argument slots filled.
///
/// `captured` has one slot per parameter consumed so far; `None` is a hole
/// left by a `_` placeholder, filled by later applications in order.
/// `remaining_arity` counts holes plus parameters not yet reached.
#[derive(Clone, Debug)]
pub struct PartialApplication {
    pub callee: Rc<Value>,
    pub captured: Vec<Option<LazyValue>>,
    pub remaining_arity: usize,
}

#[derive(Clone, Debug)]
pub enum Value {
    Anything,
    Nothing,
    Integer(i64),
    Float(f64),
    String(Rc<str>),
    Boolean(bool),
    /// A nominal base type such as `Integer` or `List`.
    UserDefinedLiteral(Rc<str>),
    UnboundVariable(TypeVariable),
    /// A function parameter's type, solved only through inferred substitutions.
    BoundVariable(TypeVariable),
    List(LazyList),
    Record(Rc<BTreeMap<String, LazyValue>>),
    Application {
        callee: LazyValue,
        parameters: Vec<LazyValue>,
    },
    Lambda(Lambda),
    NativeLambda(NativeLambda),
    PartialApplication(PartialApplication),
}

impl Value {
    pub fn string(text: &str) -> Value {
        Value::String(Rc::from(text))
    }

    pub fn literal(name: &str) -> Value {
        Value::UserDefinedLiteral(Rc::from(name))
    }

    pub fn list(values: Vec<Value>) -> Value {
        Value::List(LazyList::from(values))
    }

    pub fn record(fields: impl IntoIterator<Item = (String, LazyValue)>) -> Value {
        Value::Record(Rc::new(fields.into_iter().collect()))
    }

    /// `callee<parameters...>` with ready components.
    pub fn application(callee: Value, parameters: Vec<Value>) -> Value {
        Value::Application {
            callee: Lazy::ready(callee),
            parameters: parameters.into_iter().map(Lazy::ready).collect(),
        }
    }

    pub fn native(
        name: &str,
        arity: usize,
        body: impl Fn(&[LazyValue]) -> EvalResult + 'static,
    ) -> Value {
        Value::NativeLambda(NativeLambda::new(name, arity, body))
    }

    pub fn into_lazy(self) -> LazyValue {
        Lazy::ready(self)
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Value::UnboundVariable(_) | Value::BoundVariable(_))
    }

    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            Value::Lambda(_) | Value::NativeLambda(_) | Value::PartialApplication(_)
        )
    }

    /// Arguments still needed before the body runs.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Value::Lambda(lambda) => Some(lambda.arity()),
            Value::NativeLambda(native) => Some(native.arity),
            Value::PartialApplication(partial) => Some(partial.remaining_arity),
            _ => None,
        }
    }

    /// Name of a nominal literal.
    pub fn literal_name(&self) -> Option<&str> {
        match self {
            Value::UserDefinedLiteral(name) => Some(name),
            _ => None,
        }
    }

    /// Truthiness used by `if`, `&&`, `||` and `not`: `false`, zero, the empty
    /// string and `Nothing` are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Integer(n) => *n != 0,
            Value::Float(x) => *x != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Nothing => false,
            _ => true,
        }
    }

    /// Short kind name for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Anything => "Anything",
            Value::Nothing => "Nothing",
            Value::Integer(_) => "an integer",
            Value::Float(_) => "a float",
            Value::String(_) => "a string",
            Value::Boolean(_) => "a boolean",
            Value::UserDefinedLiteral(_) => "a type",
            Value::UnboundVariable(_) | Value::BoundVariable(_) => "a type variable",
            Value::List(_) => "a list",
            Value::Record(_) => "a record",
            Value::Application { .. } => "a type application",
            Value::Lambda(_) | Value::NativeLambda(_) | Value::PartialApplication(_) => {
                "a function"
            }
        }
    }
}

impl fmt::Debug for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lambda({})", self.parameters.join(", "))
    }
}

impl fmt::Debug for NativeLambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeLambda({}/{})", self.name, self.arity)
    }
}

#[cfg(test)]
mod tests;
