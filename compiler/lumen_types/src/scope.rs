//! Type scopes.
//!
//! A [`TypeScope`] maps names to typed entries and records the interfaces and
//! implementations visible at a point of the program. Scopes are linked to
//! their parent through `Rc`; entering a lexical construct creates a child,
//! and a scope shared with a child is never edited.

use std::rc::Rc;

use lumen_ir::SourceSpan;
use lumen_value::{EvaluationError, LazyValue, TypeVariable, Value};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::traverse::{variables_of, TypeFolder};
use crate::ty::{implementation_key, Type, TypeConstraint};

/// How an entry is used by inference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    /// A `let` binding or library value. Its generics are instantiated with
    /// fresh variables at every use.
    Value,
    /// A function parameter. Never instantiated.
    Parameter,
    /// A member of an interface. Each use is dispatched to an implementation.
    Method { interface: Rc<str> },
}

#[derive(Clone, Debug)]
pub struct TypeEntry {
    pub ty: Type,
    pub kind: EntryKind,
    /// Variables of `ty` that are replaced at each use.
    pub generics: Rc<[TypeVariable]>,
    pub declaration: Option<SourceSpan>,
}

impl TypeEntry {
    /// A monomorphic value.
    pub fn value(ty: Type) -> Self {
        TypeEntry {
            ty,
            kind: EntryKind::Value,
            generics: Rc::from(Vec::new()),
            declaration: None,
        }
    }

    /// A value generic over every variable its type mentions.
    pub fn generic(ty: Type) -> Result<Self, EvaluationError> {
        let generics = variables_of(
            std::iter::once(&ty.value).chain(
                ty.constraints
                    .iter()
                    .flat_map(|constraint| [&constraint.child, &constraint.parent]),
            ),
        )?;
        Ok(TypeEntry::with_generics(ty, generics))
    }

    pub fn with_generics(ty: Type, generics: Vec<TypeVariable>) -> Self {
        TypeEntry {
            ty,
            kind: EntryKind::Value,
            generics: Rc::from(generics),
            declaration: None,
        }
    }

    pub fn parameter(value: LazyValue) -> Self {
        TypeEntry {
            ty: Type::new(value),
            kind: EntryKind::Parameter,
            generics: Rc::from(Vec::new()),
            declaration: None,
        }
    }

    #[must_use]
    pub fn declared_at(mut self, span: SourceSpan) -> Self {
        self.declaration = Some(span);
        self
    }
}

/// `interface Name<T, ...> { member: Signature, ... }`
#[derive(Clone, Debug)]
pub struct TypeInterface {
    pub name: Rc<str>,
    pub parameters: Vec<TypeVariable>,
    pub members: Vec<(String, LazyValue)>,
}

impl TypeInterface {
    pub fn member(&self, name: &str) -> Option<&LazyValue> {
        self.members
            .iter()
            .find(|(member, _)| member == name)
            .map(|(_, signature)| signature)
    }

    /// The constraint every member carries, over the interface's own
    /// parameters.
    pub fn constraint(&self) -> Option<TypeConstraint> {
        let (child, rest) = self.parameters.split_first()?;
        Some(TypeConstraint::new(
            &self.name,
            Value::UnboundVariable(child.clone()).into_lazy(),
            rest.iter()
                .map(|parameter| Value::UnboundVariable(parameter.clone()).into_lazy())
                .collect(),
        ))
    }

    /// Scope entry of a member: generic over the interface parameters and
    /// constrained by the interface.
    pub fn member_entry(&self, signature: &LazyValue) -> TypeEntry {
        let constraints = self.constraint().into_iter().collect();
        TypeEntry {
            ty: Type::new(signature.clone()).with_constraints(constraints),
            kind: EntryKind::Method {
                interface: Rc::clone(&self.name),
            },
            generics: Rc::from(self.parameters.clone()),
            declaration: None,
        }
    }

    /// Signature of `member` with the parameters replaced by `arguments`.
    pub fn instantiate_member(
        &self,
        member: &str,
        arguments: &[LazyValue],
    ) -> Result<Option<LazyValue>, EvaluationError> {
        let Some(signature) = self.member(member) else {
            return Ok(None);
        };
        let mut replace = ReplaceParameters {
            parameters: &self.parameters,
            arguments,
        };
        replace.fold(signature).map(Some)
    }
}

struct ReplaceParameters<'a> {
    parameters: &'a [TypeVariable],
    arguments: &'a [LazyValue],
}

impl TypeFolder for ReplaceParameters<'_> {
    fn fold_variable(
        &mut self,
        variable: &TypeVariable,
        _bound: bool,
    ) -> Result<Option<LazyValue>, EvaluationError> {
        Ok(self
            .parameters
            .iter()
            .position(|parameter| parameter == variable)
            .and_then(|index| self.arguments.get(index).cloned()))
    }
}

/// `implement Interface<Types...> { ... }`
#[derive(Clone, Debug)]
pub struct TypeImplementation {
    pub interface: Rc<str>,
    pub arguments: Vec<LazyValue>,
    /// Name the implementation's dictionary is bound under.
    pub key: String,
}

impl TypeImplementation {
    pub fn new(interface: &str, arguments: Vec<LazyValue>) -> Result<Self, EvaluationError> {
        Ok(TypeImplementation {
            key: implementation_key(interface, &arguments)?,
            interface: Rc::from(interface),
            arguments,
        })
    }
}

#[derive(Clone, Debug, Default)]
struct TypeScopeInner {
    variables: FxHashMap<String, TypeEntry>,
    interfaces: FxHashMap<Rc<str>, Rc<TypeInterface>>,
    implementations: FxHashMap<String, Rc<TypeImplementation>>,
    parent: Option<TypeScope>,
}

/// Parent-linked scope of typed entries.
#[derive(Clone, Debug, Default)]
pub struct TypeScope(Rc<TypeScopeInner>);

impl TypeScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a child scope. O(1).
    #[must_use]
    pub fn child(&self) -> Self {
        TypeScope(Rc::new(TypeScopeInner {
            parent: Some(self.clone()),
            ..TypeScopeInner::default()
        }))
    }

    pub fn parent(&self) -> Option<&TypeScope> {
        self.0.parent.as_ref()
    }

    /// Bind a name in this scope. Copies the local tables if the scope is
    /// shared.
    pub fn bind(&mut self, name: impl Into<String>, entry: TypeEntry) {
        Rc::make_mut(&mut self.0).variables.insert(name.into(), entry);
    }

    /// A child scope with one extra binding.
    #[must_use]
    pub fn with(&self, name: impl Into<String>, entry: TypeEntry) -> Self {
        let mut child = self.child();
        child.bind(name, entry);
        child
    }

    pub fn declare_interface(&mut self, interface: Rc<TypeInterface>) {
        Rc::make_mut(&mut self.0)
            .interfaces
            .insert(Rc::clone(&interface.name), interface);
    }

    pub fn declare_implementation(&mut self, implementation: Rc<TypeImplementation>) {
        Rc::make_mut(&mut self.0)
            .implementations
            .insert(implementation.key.clone(), implementation);
    }

    /// Look up a name, innermost scope first.
    pub fn lookup(&self, name: &str) -> Option<&TypeEntry> {
        self.0
            .variables
            .get(name)
            .or_else(|| self.0.parent.as_ref().and_then(|parent| parent.lookup(name)))
    }

    pub fn interface(&self, name: &str) -> Option<Rc<TypeInterface>> {
        self.0
            .interfaces
            .get(name)
            .cloned()
            .or_else(|| self.0.parent.as_ref().and_then(|parent| parent.interface(name)))
    }

    /// Implementations of `interface`, innermost scope first. Within one
    /// scope they are ordered by key; an inner implementation hides an outer
    /// one with the same key.
    pub fn implementations_of(&self, interface: &str) -> Vec<Rc<TypeImplementation>> {
        let mut seen = FxHashSet::default();
        let mut found = Vec::new();
        let mut scope = Some(self);
        while let Some(current) = scope {
            let mut local: Vec<&Rc<TypeImplementation>> = current
                .0
                .implementations
                .values()
                .filter(|implementation| &*implementation.interface == interface)
                .collect();
            local.sort_by(|a, b| a.key.cmp(&b.key));
            for implementation in local {
                if seen.insert(implementation.key.as_str()) {
                    found.push(Rc::clone(implementation));
                }
            }
            scope = current.0.parent.as_ref();
        }
        found
    }

    /// Visit every entry of the chain, shadowed ones included.
    pub fn for_each_entry(&self, mut f: impl FnMut(&str, &TypeEntry)) {
        let mut scope = Some(self);
        while let Some(current) = scope {
            for (name, entry) in &current.0.variables {
                f(name, entry);
            }
            scope = current.0.parent.as_ref();
        }
    }
}
