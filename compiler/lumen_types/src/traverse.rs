//! Type traversal.
//!
//! - [`TypeFolder`]: rebuild a type, replacing variables
//! - [`variables`] / [`occurs`]: inspect the variables a type mentions
//!
//! Folding forces the whole structure of a type, list spines included. Type
//! values are finite; run-time lists never reach these functions.

use lumen_value::{EvaluationError, LazyList, LazyValue, TypeVariable, Value};
use rustc_hash::FxHashSet;

use lumen_stack::ensure_sufficient_stack;

/// Structural rewrite of a type value.
///
/// Implementors decide what each variable becomes; the default [`fold`]
/// rebuilds lists, records and applications around the results and keeps
/// every other value as it is.
///
/// [`fold`]: TypeFolder::fold
pub trait TypeFolder {
    /// Replacement for a variable, or `None` to keep it.
    fn fold_variable(
        &mut self,
        variable: &TypeVariable,
        bound: bool,
    ) -> Result<Option<LazyValue>, EvaluationError>;

    fn fold(&mut self, value: &LazyValue) -> Result<LazyValue, EvaluationError> {
        let forced = value.force()?;
        ensure_sufficient_stack(|| match &forced {
            Value::UnboundVariable(variable) => {
                Ok(self.fold_variable(variable, false)?.unwrap_or_else(|| value.clone()))
            }
            Value::BoundVariable(variable) => {
                Ok(self.fold_variable(variable, true)?.unwrap_or_else(|| value.clone()))
            }
            Value::List(list) => {
                let elements = self.fold_all(&list.to_vec()?)?;
                Ok(Value::List(LazyList::from_values(elements)).into_lazy())
            }
            Value::Record(fields) => {
                let mut folded = Vec::with_capacity(fields.len());
                for (name, field) in fields.iter() {
                    folded.push((name.clone(), self.fold(field)?));
                }
                Ok(Value::record(folded).into_lazy())
            }
            Value::Application { callee, parameters } => Ok(Value::Application {
                callee: self.fold(callee)?,
                parameters: self.fold_all(parameters)?,
            }
            .into_lazy()),
            _ => Ok(value.clone()),
        })
    }

    fn fold_all(&mut self, values: &[LazyValue]) -> Result<Vec<LazyValue>, EvaluationError> {
        values.iter().map(|value| self.fold(value)).collect()
    }
}

/// Every variable mentioned by `value`, in first-occurrence order.
pub fn variables(value: &LazyValue) -> Result<Vec<TypeVariable>, EvaluationError> {
    let mut collector = VariableCollector::default();
    collector.fold(value)?;
    Ok(collector.found)
}

/// Variables mentioned by any of `values`, deduplicated.
pub fn variables_of<'a>(
    values: impl IntoIterator<Item = &'a LazyValue>,
) -> Result<Vec<TypeVariable>, EvaluationError> {
    let mut collector = VariableCollector::default();
    for value in values {
        collector.fold(value)?;
    }
    Ok(collector.found)
}

/// Whether `variable` appears anywhere inside `value`.
pub fn occurs(variable: &TypeVariable, value: &LazyValue) -> Result<bool, EvaluationError> {
    Ok(variables(value)?.contains(variable))
}

pub fn has_variables(value: &LazyValue) -> Result<bool, EvaluationError> {
    Ok(!variables(value)?.is_empty())
}

#[derive(Default)]
struct VariableCollector {
    seen: FxHashSet<u32>,
    found: Vec<TypeVariable>,
}

impl TypeFolder for VariableCollector {
    fn fold_variable(
        &mut self,
        variable: &TypeVariable,
        _bound: bool,
    ) -> Result<Option<LazyValue>, EvaluationError> {
        if self.seen.insert(variable.id) {
            self.found.push(variable.clone());
        }
        Ok(None)
    }
}
