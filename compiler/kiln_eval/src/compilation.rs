//! Per-compilation state touched by class evaluation.
//!
//! A `Compilation` is created when a compilation starts and dropped when it
//! ends. It owns the scope tree, remembers the scope each evaluated class was
//! given (the singleton memo), and records tags. Evaluators borrow it mutably,
//! so a compilation cannot be shared between concurrent evaluations.

use rustc_hash::{FxHashMap, FxHashSet};

use kiln_ir::{ClassId, Name};

use crate::scope::{ScopeId, ScopeTree};

/// Mutable state of one compilation run.
#[derive(Debug, Default)]
pub struct Compilation {
    scopes: ScopeTree,
    class_scopes: FxHashMap<ClassId, ScopeId>,
    /// Classes in the order their scopes were registered.
    evaluated: Vec<ClassId>,
    tags: Vec<Name>,
    tag_set: FxHashSet<Name>,
}

impl Compilation {
    pub fn new() -> Self {
        Self::default()
    }

    /// The outermost scope, owned by the top-level container resource.
    #[inline]
    pub fn top_scope(&self) -> ScopeId {
        self.scopes.top()
    }

    #[inline]
    pub fn scopes(&self) -> &ScopeTree {
        &self.scopes
    }

    #[inline]
    pub fn scopes_mut(&mut self) -> &mut ScopeTree {
        &mut self.scopes
    }

    /// Scope registered for `class`, if it has been evaluated.
    #[inline]
    pub fn class_scope(&self, class: ClassId) -> Option<ScopeId> {
        self.class_scopes.get(&class).copied()
    }

    #[inline]
    pub fn is_evaluated(&self, class: ClassId) -> bool {
        self.class_scopes.contains_key(&class)
    }

    /// Register the scope of `class`, just before its body runs.
    ///
    /// Registration happens once per class; a second call keeps the first
    /// scope.
    pub fn set_class_scope(&mut self, class: ClassId, scope: ScopeId) {
        if let Some(&existing) = self.class_scopes.get(&class) {
            tracing::warn!(?class, ?existing, ?scope, "class scope registered twice; keeping the first");
            return;
        }
        self.class_scopes.insert(class, scope);
        self.evaluated.push(class);
    }

    /// Evaluated classes, in registration order.
    pub fn evaluated_classes(&self) -> &[ClassId] {
        &self.evaluated
    }

    /// Mark `name` as applied. Idempotent.
    pub fn tag(&mut self, name: Name) {
        if self.tag_set.insert(name) {
            self.tags.push(name);
        }
    }

    #[inline]
    pub fn tagged(&self, name: Name) -> bool {
        self.tag_set.contains(&name)
    }

    /// Tags in the order they were first recorded.
    pub fn tags(&self) -> &[Name] {
        &self.tags
    }
}
