//! Type inference.
//!
//! Inference walks the untyped tree once, producing a [`TypedExpression`].
//! This module holds the per-run state; the node handlers are split into:
//! - `expr.rs`: literals, identifiers, arrays, calls
//! - `function.rs`: function literals, `let` and generalization
//! - `declaration.rs`: interfaces, implementations and type syntax
//!
//! Variables are solved in an assignment table keyed by variable id. The
//! table is owned by one [`Inference`] and dropped with it; once the walk is
//! finished every type in the tree is rewritten through it.

mod declaration;
mod expr;
mod function;

pub use declaration::resolve_type;

use lumen_diagnostic::Log;
use lumen_ir::{SourceSpan, UntypedExpression};
use lumen_value::{EvaluationError, LazyValue, TypeVariable, Value};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::converge::converge;
use crate::fresh::{name_prefix, FreeVariableGenerator};
use crate::implicit::resolve_implicits;
use crate::scope::{TypeEntry, TypeScope};
use crate::substitution::{apply_substitutions, VariableSubstitution};
use crate::traverse::{occurs, TypeFolder};
use crate::ty::{Type, TypeConstraint};
use crate::typed::{TypedExpression, TypedKind};

use expr::infer_expression;

/// Infer the type of `expression` in `scope`.
///
/// Returns the typed tree with every type resolved and, when inference
/// reported no errors, every identifier's constraints resolved to
/// implementations or implicit parameters.
#[tracing::instrument(level = "debug", skip_all)]
pub fn type_expression(scope: &TypeScope, expression: &UntypedExpression) -> (Log, TypedExpression) {
    let mut inference = match Inference::new(scope) {
        Ok(inference) => inference,
        Err(error) => {
            let mut log = Log::new();
            log.error(error.to_string(), expression.span);
            let typed = TypedExpression::new(
                TypedKind::Unrecognized,
                Type::nothing(),
                expression.tokens,
                expression.span,
            );
            return (log, typed);
        }
    };

    let typed = infer_expression(&mut inference, scope, expression);
    let typed = inference.zonk(typed);
    let mut log = inference.log;

    if log.has_errors() {
        debug!(errors = log.len(), "inference failed");
        return (log, typed);
    }
    let (resolution, typed) = resolve_implicits(scope, typed);
    log += resolution;
    debug!(ty = %typed.ty, errors = log.len(), "typed");
    (log, typed)
}

/// State of one inference run.
pub(crate) struct Inference {
    assignments: FxHashMap<u32, LazyValue>,
    generator: FreeVariableGenerator,
    pub(crate) log: Log,
    /// Constraints collected per enclosing function, innermost last.
    frames: Vec<Vec<TypeConstraint>>,
    /// Types of monomorphic names in scope: parameters and non-function
    /// `let` bindings. Their variables are never generalized.
    environment: Vec<LazyValue>,
}

impl Inference {
    fn new(scope: &TypeScope) -> Result<Self, EvaluationError> {
        Ok(Inference {
            assignments: FxHashMap::default(),
            generator: FreeVariableGenerator::for_scope(scope)?,
            log: Log::new(),
            frames: vec![Vec::new()],
            environment: Vec::new(),
        })
    }

    pub(crate) fn fresh_variable(&mut self, prefix: &str) -> TypeVariable {
        self.generator.variable(prefix)
    }

    pub(crate) fn fresh_unbound(&mut self, prefix: &str) -> LazyValue {
        Value::UnboundVariable(self.fresh_variable(prefix)).into_lazy()
    }

    pub(crate) fn report(&mut self, error: &EvaluationError, span: SourceSpan) {
        self.log.error(error.to_string(), span);
    }

    // ========================================
    // Assignments
    // ========================================

    /// `value` with every assigned variable replaced, transitively.
    pub(crate) fn resolve(&self, value: &LazyValue) -> Result<LazyValue, EvaluationError> {
        if self.assignments.is_empty() {
            return Ok(value.clone());
        }
        Resolve {
            assignments: &self.assignments,
        }
        .fold(value)
    }

    /// Unify two types, recording what was learned. `Ok(false)` means the
    /// types do not converge.
    pub(crate) fn unify(
        &mut self,
        left: &LazyValue,
        right: &LazyValue,
    ) -> Result<bool, EvaluationError> {
        let left = self.resolve(left)?;
        let right = self.resolve(right)?;
        let Some(convergence) = converge(&left, &right)? else {
            trace!("no convergence");
            return Ok(false);
        };
        for substitution in convergence.substitutions.all() {
            if !self.assign(&substitution.from, &substitution.to)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// [`Inference::unify`] with evaluation failures reported at `span`.
    pub(crate) fn unify_at(&mut self, left: &LazyValue, right: &LazyValue, span: SourceSpan) -> bool {
        match self.unify(left, right) {
            Ok(unified) => unified,
            Err(error) => {
                self.report(&error, span);
                false
            }
        }
    }

    fn assign(&mut self, variable: &TypeVariable, value: &LazyValue) -> Result<bool, EvaluationError> {
        let value = self.resolve(value)?;
        if let Some(existing) = self.assignments.get(&variable.id).cloned() {
            return self.unify(&existing, &value);
        }
        if let Value::UnboundVariable(other) | Value::BoundVariable(other) = value.force()? {
            if other == *variable {
                return Ok(true);
            }
        }
        if occurs(variable, &value)? {
            return Ok(false);
        }
        trace!(variable = %variable.name, id = variable.id, "assigned");
        self.assignments.insert(variable.id, value);
        Ok(true)
    }

    // ========================================
    // Entries and constraints
    // ========================================

    /// The type of a use of `entry`: generics replaced by fresh variables.
    pub(crate) fn instantiate(&mut self, entry: &TypeEntry) -> Result<Type, EvaluationError> {
        if entry.generics.is_empty() {
            return Ok(entry.ty.clone());
        }
        let substitutions: Vec<VariableSubstitution> = entry
            .generics
            .iter()
            .map(|generic| {
                let fresh = self.fresh_unbound(name_prefix(&generic.name));
                VariableSubstitution::new(generic.clone(), fresh)
            })
            .collect();
        let value = apply_substitutions(&substitutions, &entry.ty.value);
        let constraints = entry
            .ty
            .constraints
            .iter()
            .map(|constraint| {
                constraint.try_map(|side| {
                    Ok::<_, EvaluationError>(apply_substitutions(&substitutions, side))
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(Type::new(value).with_constraints(constraints))
    }

    pub(crate) fn constrain(&mut self, constraints: &[TypeConstraint]) {
        if let Some(frame) = self.frames.last_mut() {
            frame.extend(constraints.iter().cloned());
        }
    }

    fn enter_frame(&mut self) {
        self.frames.push(Vec::new());
    }

    fn leave_frame(&mut self) -> Vec<TypeConstraint> {
        self.frames.pop().unwrap_or_default()
    }

    // ========================================
    // Finishing
    // ========================================

    /// Rewrite every type in the tree through the assignments.
    fn zonk(&mut self, mut expression: TypedExpression) -> TypedExpression {
        let mut failures = Vec::new();
        self.zonk_node(&mut expression, &mut failures);
        for (error, span) in failures {
            self.report(&error, span);
        }
        expression
    }

    fn zonk_node(
        &self,
        expression: &mut TypedExpression,
        failures: &mut Vec<(EvaluationError, SourceSpan)>,
    ) {
        lumen_stack::ensure_sufficient_stack(|| {
            if let Err(error) = self.zonk_type(&mut expression.ty) {
                failures.push((error, expression.span));
            }
            match &mut expression.kind {
                TypedKind::Array(elements) => {
                    for element in elements {
                        self.zonk_node(element, failures);
                    }
                }
                TypedKind::Function {
                    parameters, body, ..
                } => {
                    for parameter in parameters.iter_mut() {
                        match self.resolve(&parameter.ty) {
                            Ok(resolved) => parameter.ty = resolved,
                            Err(error) => failures.push((error, expression.span)),
                        }
                    }
                    self.zonk_node(body, failures);
                }
                TypedKind::FunctionCall { callee, arguments } => {
                    self.zonk_node(callee, failures);
                    for argument in arguments.iter_mut().flatten() {
                        self.zonk_node(argument, failures);
                    }
                }
                TypedKind::Binding { value, body, .. } => {
                    self.zonk_node(value, failures);
                    self.zonk_node(body, failures);
                }
                TypedKind::Interface { body, .. } => self.zonk_node(body, failures),
                TypedKind::Implementation { members, body, .. } => {
                    for (_, member) in members.iter_mut() {
                        self.zonk_node(member, failures);
                    }
                    self.zonk_node(body, failures);
                }
                TypedKind::Integer(_)
                | TypedKind::Float(_)
                | TypedKind::String(_)
                | TypedKind::Boolean(_)
                | TypedKind::Identifier { .. }
                | TypedKind::Method { .. }
                | TypedKind::Unrecognized => {}
            }
        });
    }

    fn zonk_type(&self, ty: &mut Type) -> Result<(), EvaluationError> {
        ty.value = self.resolve(&ty.value)?;
        for constraint in &mut ty.constraints {
            *constraint = constraint.try_map(|side| self.resolve(side))?;
        }
        Ok(())
    }
}

struct Resolve<'a> {
    assignments: &'a FxHashMap<u32, LazyValue>,
}

impl TypeFolder for Resolve<'_> {
    fn fold_variable(
        &mut self,
        variable: &TypeVariable,
        _bound: bool,
    ) -> Result<Option<LazyValue>, EvaluationError> {
        match self.assignments.get(&variable.id) {
            Some(assigned) => {
                let assigned = assigned.clone();
                self.fold(&assigned).map(Some)
            }
            None => Ok(None),
        }
    }
}
