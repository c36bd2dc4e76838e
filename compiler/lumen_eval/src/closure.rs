//! Interpreted function bodies.

use std::rc::Rc;

use lumen_types::MonoExpression;
use lumen_value::errors::arity_exceeded;
use lumen_value::{Callable, EvalResult, EvaluationError, Lambda, LazyValue, Value};

use crate::eval::evaluate;
use crate::scope::Scope;

/// A function literal closed over its defining scope.
pub(crate) struct Closure {
    pub scope: Scope,
    pub parameters: Rc<[String]>,
    pub body: Rc<MonoExpression>,
}

impl Closure {
    /// Wrap the closure in a callable value.
    pub fn into_value(self) -> Value {
        Value::Lambda(Lambda {
            parameters: Rc::clone(&self.parameters),
            body: Rc::new(self),
        })
    }
}

/// Bind `names` to `arguments` in a child of `scope`.
fn bind_all(
    scope: &Scope,
    names: &[String],
    arguments: Vec<LazyValue>,
) -> Result<Scope, EvaluationError> {
    if names.len() != arguments.len() {
        return Err(arity_exceeded("<lambda>", names.len(), arguments.len()));
    }
    let mut scope = scope.child();
    for (name, argument) in names.iter().zip(arguments) {
        scope.bind(name.clone(), argument);
    }
    Ok(scope)
}

impl Callable for Closure {
    fn call(&self, arguments: Vec<LazyValue>) -> EvalResult {
        let scope = bind_all(&self.scope, &self.parameters, arguments)?;
        evaluate(&scope, &self.body).force()
    }
}

/// A constrained function literal: takes its dictionaries first and returns
/// the ordinary closure with them in scope.
pub(crate) struct ImplicitClosure {
    pub scope: Scope,
    pub implicit_parameters: Rc<[String]>,
    pub parameters: Rc<[String]>,
    pub body: Rc<MonoExpression>,
}

impl ImplicitClosure {
    pub fn into_value(self) -> Value {
        Value::Lambda(Lambda {
            parameters: Rc::clone(&self.implicit_parameters),
            body: Rc::new(self),
        })
    }
}

impl Callable for ImplicitClosure {
    fn call(&self, dictionaries: Vec<LazyValue>) -> EvalResult {
        let scope = bind_all(&self.scope, &self.implicit_parameters, dictionaries)?;
        Ok(Closure {
            scope,
            parameters: Rc::clone(&self.parameters),
            body: Rc::clone(&self.body),
        }
        .into_value())
    }
}
