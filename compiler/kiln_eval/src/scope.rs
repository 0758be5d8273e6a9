//! Scope tree for class evaluation.
//!
//! Scopes live in an arena owned by the compilation and are addressed by
//! [`ScopeId`]. A scope links to its parent but does not own it; the tree
//! owns every node until the compilation is dropped.
//!
//! Each scope carries:
//! - the resource it is bound to (absent only for the top scope)
//! - an ordered, append-only set of namespaces for unqualified lookups
//! - single-assignment variable bindings

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use kiln_ir::{Name, Resource};

use crate::{ScopeError, Value};

/// Index of a scope in its [`ScopeTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    /// The top scope every tree starts with.
    pub const TOP: ScopeId = ScopeId(0);

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, Default)]
struct ScopeData {
    /// Never changes after creation.
    parent: Option<ScopeId>,
    resource: Option<Resource>,
    namespaces: SmallVec<[Name; 2]>,
    bindings: FxHashMap<Name, Value>,
}

/// Arena of scopes belonging to one compilation.
#[derive(Clone, Debug)]
pub struct ScopeTree {
    scopes: Vec<ScopeData>,
}

impl ScopeTree {
    /// Create a tree holding only the top scope.
    pub fn new() -> Self {
        ScopeTree {
            scopes: vec![ScopeData::default()],
        }
    }

    #[inline]
    pub fn top(&self) -> ScopeId {
        ScopeId::TOP
    }

    /// Number of scopes, including the top scope.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Always false: the top scope exists from construction.
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    fn data(&self, scope: ScopeId) -> &ScopeData {
        &self.scopes[scope.index()]
    }

    fn data_mut(&mut self, scope: ScopeId) -> &mut ScopeData {
        &mut self.scopes[scope.index()]
    }

    /// Create a scope nested under `parent`, bound to `resource`, with no
    /// namespaces.
    ///
    /// # Panics
    /// Panics if `parent` belongs to another tree.
    pub fn subscope(&mut self, parent: ScopeId, resource: Resource) -> ScopeId {
        assert!(parent.index() < self.scopes.len(), "scope {parent:?} is not in this tree");
        let raw = u32::try_from(self.scopes.len())
            .unwrap_or_else(|_| panic!("scope tree exceeded capacity: {} scopes", self.scopes.len()));
        self.scopes.push(ScopeData {
            parent: Some(parent),
            resource: Some(resource),
            ..ScopeData::default()
        });
        ScopeId(raw)
    }

    #[inline]
    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.data(scope).parent
    }

    /// The resource this scope was created for.
    #[inline]
    pub fn resource(&self, scope: ScopeId) -> Option<&Resource> {
        self.data(scope).resource.as_ref()
    }

    /// Append `ns` unless it is already present.
    pub fn add_namespace(&mut self, scope: ScopeId, ns: Name) {
        let namespaces = &mut self.data_mut(scope).namespaces;
        if !namespaces.contains(&ns) {
            namespaces.push(ns);
        }
    }

    /// Namespaces added to this scope, in insertion order. Not inherited from
    /// enclosing scopes.
    #[inline]
    pub fn namespaces(&self, scope: ScopeId) -> &[Name] {
        &self.data(scope).namespaces
    }

    /// Bind a variable in `scope`.
    pub fn define(&mut self, scope: ScopeId, name: Name, value: Value) -> Result<(), ScopeError> {
        let bindings = &mut self.data_mut(scope).bindings;
        if bindings.contains_key(&name) {
            return Err(ScopeError::Reassignment { name });
        }
        bindings.insert(name, value);
        Ok(())
    }

    /// Look up a variable in `scope` only.
    #[inline]
    pub fn lookup_local(&self, scope: ScopeId, name: Name) -> Option<&Value> {
        self.data(scope).bindings.get(&name)
    }

    /// Look up a variable in `scope` and then in each enclosing scope.
    pub fn lookup(&self, scope: ScopeId, name: Name) -> Option<&Value> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let data = self.data(id);
            if let Some(value) = data.bindings.get(&name) {
                return Some(value);
            }
            current = data.parent;
        }
        None
    }

    /// `scope` followed by each enclosing scope up to the top.
    pub fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), |&id| self.parent(id))
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
