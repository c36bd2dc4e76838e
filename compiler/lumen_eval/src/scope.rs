//! Evaluation scope.
//!
//! Bindings map names to thunks. Extending a scope creates a child linked to
//! its parent, so closures keep seeing exactly the bindings they were
//! created with.

use std::fmt;
use std::rc::Rc;

use lumen_value::LazyValue;
use rustc_hash::FxHashMap;

#[derive(Clone, Default)]
struct ScopeInner {
    values: FxHashMap<String, LazyValue>,
    parent: Option<Scope>,
}

/// Parent-linked scope of value thunks.
#[derive(Clone, Default)]
pub struct Scope(Rc<ScopeInner>);

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a child scope. O(1).
    #[must_use]
    pub fn child(&self) -> Self {
        Scope(Rc::new(ScopeInner {
            values: FxHashMap::default(),
            parent: Some(self.clone()),
        }))
    }

    /// Bind a name in this scope. Copies the local table if the scope is
    /// shared.
    pub fn bind(&mut self, name: impl Into<String>, value: LazyValue) {
        Rc::make_mut(&mut self.0).values.insert(name.into(), value);
    }

    /// A child scope with one extra binding.
    #[must_use]
    pub fn with(&self, name: impl Into<String>, value: LazyValue) -> Self {
        let mut child = self.child();
        child.bind(name, value);
        child
    }

    /// Look up a name, innermost scope first.
    pub fn lookup(&self, name: &str) -> Option<&LazyValue> {
        let mut scope = self;
        loop {
            if let Some(value) = scope.0.values.get(name) {
                return Some(value);
            }
            scope = scope.0.parent.as_ref()?;
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Names visible from this scope, innermost first, without duplicates.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let mut scope = Some(self);
        while let Some(current) = scope {
            let mut local: Vec<&String> = current.0.values.keys().collect();
            local.sort();
            for name in local {
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
            scope = current.0.parent.as_ref();
        }
        names
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("names", &self.names())
            .finish()
    }
}
