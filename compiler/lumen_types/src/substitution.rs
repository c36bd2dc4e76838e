//! Variable substitutions.
//!
//! Convergence reports what it learned as three lists. `left` solves
//! variables that sat in the left operand, `right` those in the right
//! operand, and `inferred` solves bound variables (function parameters),
//! which are knowledge about an enclosing function rather than about either
//! operand. Variables are identified by id, so the channels never disagree:
//! applying every substitution of a successful convergence to both operands
//! yields the same type.

use std::ops::{Add, AddAssign};
use std::rc::Rc;

use lumen_value::{Lazy, LazyValue, TypeVariable, Value};
use rustc_hash::FxHashMap;

/// `from` is replaced by `to`.
#[derive(Clone, Debug)]
pub struct VariableSubstitution {
    pub from: TypeVariable,
    pub to: LazyValue,
}

impl VariableSubstitution {
    pub fn new(from: TypeVariable, to: LazyValue) -> Self {
        VariableSubstitution { from, to }
    }
}

#[derive(Clone, Debug, Default)]
pub struct VariableSubstitutions {
    pub left: Vec<VariableSubstitution>,
    pub right: Vec<VariableSubstitution>,
    pub inferred: Vec<VariableSubstitution>,
}

impl VariableSubstitutions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn left(substitution: VariableSubstitution) -> Self {
        VariableSubstitutions {
            left: vec![substitution],
            ..Self::default()
        }
    }

    pub fn inferred(substitution: VariableSubstitution) -> Self {
        VariableSubstitutions {
            inferred: vec![substitution],
            ..Self::default()
        }
    }

    /// Swap the left and right channels, as when the operands are swapped.
    #[must_use]
    pub fn flip(self) -> Self {
        VariableSubstitutions {
            left: self.right,
            right: self.left,
            inferred: self.inferred,
        }
    }

    pub fn append(&mut self, other: VariableSubstitutions) {
        self.left.extend(other.left);
        self.right.extend(other.right);
        self.inferred.extend(other.inferred);
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty() && self.inferred.is_empty()
    }

    pub fn len(&self) -> usize {
        self.left.len() + self.right.len() + self.inferred.len()
    }

    /// Every substitution, left first.
    pub fn all(&self) -> Vec<VariableSubstitution> {
        self.left
            .iter()
            .chain(&self.right)
            .chain(&self.inferred)
            .cloned()
            .collect()
    }
}

impl Add for VariableSubstitutions {
    type Output = VariableSubstitutions;

    fn add(mut self, rhs: VariableSubstitutions) -> Self::Output {
        self.append(rhs);
        self
    }
}

impl AddAssign for VariableSubstitutions {
    fn add_assign(&mut self, rhs: VariableSubstitutions) {
        self.append(rhs);
    }
}

type Table = Rc<FxHashMap<u32, LazyValue>>;

/// Rewrite `value` with `substitutions`, lazily.
///
/// Nothing is forced until the result is. Targets are rewritten too, so a
/// chain `T0 -> List<T1>, T1 -> Integer` resolves `T0` to `List<Integer>` and
/// applying the same set twice changes nothing. When a variable is listed
/// more than once the first entry wins. A cyclic set leaves the variable
/// that closes the cycle in place.
pub fn apply_substitutions(substitutions: &[VariableSubstitution], value: &LazyValue) -> LazyValue {
    if substitutions.is_empty() {
        return value.clone();
    }
    let mut table = FxHashMap::default();
    for substitution in substitutions {
        table
            .entry(substitution.from.id)
            .or_insert_with(|| substitution.to.clone());
    }
    rewrite(&Rc::new(table), value, &Rc::new(Vec::new()))
}

fn rewrite(table: &Table, value: &LazyValue, expanding: &Rc<Vec<u32>>) -> LazyValue {
    let table = Rc::clone(table);
    let value = value.clone();
    let expanding = Rc::clone(expanding);
    Lazy::new(move || {
        let forced = value.force()?;
        if let Value::UnboundVariable(variable) | Value::BoundVariable(variable) = &forced {
            if let Some(target) = table
                .get(&variable.id)
                .filter(|_| !expanding.contains(&variable.id))
            {
                let mut deeper = (*expanding).clone();
                deeper.push(variable.id);
                return rewrite(&table, target, &Rc::new(deeper)).force();
            }
        }
        Ok(match forced {
            Value::List(list) => {
                let table = Rc::clone(&table);
                let expanding = Rc::clone(&expanding);
                Value::List(list.map(Rc::new(move |element: LazyValue| {
                    rewrite(&table, &element, &expanding)
                })))
            }
            Value::Record(fields) => Value::record(
                fields
                    .iter()
                    .map(|(name, field)| (name.clone(), rewrite(&table, field, &expanding))),
            ),
            Value::Application { callee, parameters } => Value::Application {
                callee: rewrite(&table, &callee, &expanding),
                parameters: parameters
                    .iter()
                    .map(|parameter| rewrite(&table, parameter, &expanding))
                    .collect(),
            },
            other => other,
        })
    })
}
