//! Convergence: unification of two type values.
//!
//! [`converge`] finds the most specific type both operands describe and the
//! substitutions that make them equal. Operands are first normalized so that
//! variables sit on the left; swapping operands flips the left and right
//! substitution channels, which keeps the case analysis one-sided.
//!
//! | left | right | outcome |
//! |---|---|---|
//! | same variable | same variable | unchanged |
//! | `BoundVariable(v)` | anything | inferred `v -> right` |
//! | `UnboundVariable(v)` | anything | left `v -> right` |
//! | `Anything` | anything | right |
//! | `Nothing` | `Nothing` | `Nothing` |
//! | literal | identical literal | left |
//! | list / record / application | same shape | lockstep |
//! | lambda | anything | never converges |
//!
//! When both operands are variables, an unbound variable is solved in favour
//! of a bound one, and between two of the same kind the younger (larger id)
//! is solved in favour of the older. That tie-break makes the result
//! independent of operand order.

use lumen_value::{EvaluationError, LazyList, LazyValue, TypeVariable, Value};

use lumen_stack::ensure_sufficient_stack;
use crate::substitution::{apply_substitutions, VariableSubstitution, VariableSubstitutions};
use crate::traverse::occurs;

/// A successful convergence.
#[derive(Clone, Debug)]
pub struct Convergence {
    pub substitutions: VariableSubstitutions,
    pub value: LazyValue,
}

impl Convergence {
    fn unchanged(value: &LazyValue) -> Self {
        Convergence {
            substitutions: VariableSubstitutions::new(),
            value: value.clone(),
        }
    }

    #[must_use]
    pub fn flip(self) -> Self {
        Convergence {
            substitutions: self.substitutions.flip(),
            value: self.value,
        }
    }
}

/// Unify `left` with `right`.
///
/// `Ok(None)` means the types do not converge; `Err` only reports a type
/// value that failed to evaluate.
#[tracing::instrument(level = "trace", skip_all)]
pub fn converge(
    left: &LazyValue,
    right: &LazyValue,
) -> Result<Option<Convergence>, EvaluationError> {
    ensure_sufficient_stack(|| converge_values(left, right))
}

fn converge_values(
    left_value: &LazyValue,
    right_value: &LazyValue,
) -> Result<Option<Convergence>, EvaluationError> {
    let left = left_value.force()?;
    let right = right_value.force()?;

    if should_swap(&left, &right) {
        return Ok(converge(right_value, left_value)?.map(Convergence::flip));
    }

    match (&left, &right) {
        (Value::UnboundVariable(a), Value::UnboundVariable(b))
        | (Value::BoundVariable(a), Value::BoundVariable(b))
            if a == b =>
        {
            Ok(Some(Convergence::unchanged(left_value)))
        }
        (Value::BoundVariable(variable), _) => {
            solve(variable, right_value, VariableSubstitutions::inferred)
        }
        (Value::UnboundVariable(variable), _) => {
            solve(variable, right_value, VariableSubstitutions::left)
        }
        (Value::Anything, _) => Ok(Some(Convergence::unchanged(right_value))),
        (_, Value::Anything) => Ok(Some(Convergence::unchanged(left_value))),
        (Value::Nothing, Value::Nothing) => Ok(Some(Convergence::unchanged(left_value))),
        (Value::Integer(a), Value::Integer(b)) if a == b => {
            Ok(Some(Convergence::unchanged(left_value)))
        }
        (Value::Float(a), Value::Float(b)) if a.to_bits() == b.to_bits() => {
            Ok(Some(Convergence::unchanged(left_value)))
        }
        (Value::String(a), Value::String(b)) if a == b => {
            Ok(Some(Convergence::unchanged(left_value)))
        }
        (Value::Boolean(a), Value::Boolean(b)) if a == b => {
            Ok(Some(Convergence::unchanged(left_value)))
        }
        (Value::UserDefinedLiteral(a), Value::UserDefinedLiteral(b)) if a == b => {
            Ok(Some(Convergence::unchanged(left_value)))
        }
        (Value::List(a), Value::List(b)) => {
            let Some((substitutions, elements)) = converge_all(a.iter(), b.iter())? else {
                return Ok(None);
            };
            Ok(Some(Convergence {
                substitutions,
                value: Value::List(LazyList::from_values(elements)).into_lazy(),
            }))
        }
        (Value::Record(a), Value::Record(b)) => {
            if !a.keys().eq(b.keys()) {
                return Ok(None);
            }
            let left_fields: Vec<LazyValue> = a.values().cloned().collect();
            let right_fields: Vec<LazyValue> = b.values().cloned().collect();
            let Some((substitutions, fields)) = converge_all(ready(&left_fields), ready(&right_fields))? else {
                return Ok(None);
            };
            Ok(Some(Convergence {
                substitutions,
                value: Value::record(a.keys().cloned().zip(fields)).into_lazy(),
            }))
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
        ) => {
            if left_parameters.len() != right_parameters.len() {
                return Ok(None);
            }
            let lefts: Vec<LazyValue> = std::iter::once(left_callee)
                .chain(left_parameters)
                .cloned()
                .collect();
            let rights: Vec<LazyValue> = std::iter::once(right_callee)
                .chain(right_parameters)
                .cloned()
                .collect();
            let Some((substitutions, mut parts)) = converge_all(ready(&lefts), ready(&rights))? else {
                return Ok(None);
            };
            let callee = parts.remove(0);
            Ok(Some(Convergence {
                substitutions,
                value: Value::Application {
                    callee,
                    parameters: parts,
                }
                .into_lazy(),
            }))
        }
        // Lambda and NativeLambda type values have no convergence rule.
        _ => Ok(None),
    }
}

fn should_swap(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::UnboundVariable(a), Value::UnboundVariable(b))
        | (Value::BoundVariable(a), Value::BoundVariable(b)) => a.id < b.id,
        (Value::BoundVariable(_), Value::UnboundVariable(_)) => true,
        (left, right) => !left.is_variable() && right.is_variable(),
    }
}

fn solve(
    variable: &TypeVariable,
    target: &LazyValue,
    channel: fn(VariableSubstitution) -> VariableSubstitutions,
) -> Result<Option<Convergence>, EvaluationError> {
    if occurs(variable, target)? {
        return Ok(None);
    }
    Ok(Some(Convergence {
        substitutions: channel(VariableSubstitution::new(variable.clone(), target.clone())),
        value: target.clone(),
    }))
}

fn ready(parts: &[LazyValue]) -> impl Iterator<Item = Result<LazyValue, EvaluationError>> + '_ {
    parts.iter().cloned().map(Ok)
}

/// Converge two sequences pairwise, pulling one element from each side at a
/// time so that a mismatch stops before the rest of either side is forced.
/// Substitutions learned from earlier pairs are applied to both sides of
/// later pairs before they are compared, and to every converged part at the
/// end. Sequences of different length do not converge.
fn converge_all(
    mut lefts: impl Iterator<Item = Result<LazyValue, EvaluationError>>,
    mut rights: impl Iterator<Item = Result<LazyValue, EvaluationError>>,
) -> Result<Option<(VariableSubstitutions, Vec<LazyValue>)>, EvaluationError> {
    let mut substitutions = VariableSubstitutions::new();
    let mut parts = Vec::new();
    loop {
        let (left, right) = match (lefts.next().transpose()?, rights.next().transpose()?) {
            (None, None) => break,
            (Some(left), Some(right)) => (left, right),
            _ => return Ok(None),
        };
        let learned = substitutions.all();
        let left = apply_substitutions(&learned, &left);
        let right = apply_substitutions(&learned, &right);
        let Some(convergence) = converge(&left, &right)? else {
            return Ok(None);
        };
        substitutions.append(convergence.substitutions);
        parts.push(convergence.value);
    }
    let all = substitutions.all();
    let parts = parts
        .iter()
        .map(|part| apply_substitutions(&all, part))
        .collect();
    Ok(Some((substitutions, parts)))
}
