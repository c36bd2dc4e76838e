//! Fresh type variable names.
//!
//! Identity of a variable is its id, but diagnostics show names, so names
//! handed out during one inference must not collide with each other or with
//! anything reachable from the scope. The generator picks the first unused
//! `prefix0`, `prefix1`, ... suffix.

use std::rc::Rc;

use lumen_value::{EvaluationError, LazyValue, TypeVariable};
use rustc_hash::FxHashSet;

use crate::scope::TypeScope;
use crate::traverse::variables;

#[derive(Clone, Debug, Default)]
pub struct FreeVariableGenerator {
    used: FxHashSet<Rc<str>>,
}

impl FreeVariableGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A generator that avoids every variable name mentioned in `scope`.
    pub fn for_scope(scope: &TypeScope) -> Result<Self, EvaluationError> {
        let mut generator = Self::new();
        let mut result = Ok(());
        scope.for_each_entry(|_, entry| {
            if result.is_err() {
                return;
            }
            result = generator.reserve_value(&entry.ty.value).and_then(|()| {
                entry
                    .ty
                    .constraints
                    .iter()
                    .try_for_each(|constraint| generator.reserve_value(&constraint.child))
            });
        });
        result.map(|()| generator)
    }

    pub fn reserve(&mut self, name: &str) {
        self.used.insert(Rc::from(name));
    }

    /// Reserve the name of every variable reachable from `value`.
    pub fn reserve_value(&mut self, value: &LazyValue) -> Result<(), EvaluationError> {
        for variable in variables(value)? {
            self.used.insert(variable.name);
        }
        Ok(())
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    /// The first unused `prefix{n}`, reserved.
    pub fn next_name(&mut self, prefix: &str) -> Rc<str> {
        let name: Rc<str> = (0u32..)
            .map(|suffix| format!("{prefix}{suffix}"))
            .find(|candidate| !self.used.contains(candidate.as_str()))
            .map_or_else(|| Rc::from(prefix), Rc::from);
        self.used.insert(Rc::clone(&name));
        name
    }

    /// A fresh variable named `prefix{n}`.
    pub fn variable(&mut self, prefix: &str) -> TypeVariable {
        TypeVariable::fresh(self.next_name(prefix))
    }
}

/// `T3` → `T`, `xT12` → `xT`: the prefix a name was generated from.
pub fn name_prefix(name: &str) -> &str {
    let trimmed = name.trim_end_matches(|c: char| c.is_ascii_digit());
    if trimmed.is_empty() {
        "T"
    } else {
        trimmed
    }
}
