//! Class declarations and the class table.
//!
//! Classes are stored in an arena and addressed by [`ClassId`]. A class names
//! its parent rather than pointing at it; the table resolves the name when the
//! class is evaluated, so declarations can appear in any order.
//!
//! Class names are normalized on the way in (lowercased, leading `::`
//! stripped) and compared as interned [`Name`]s afterwards.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::{Name, SharedInterner};

/// Index of a class in its [`ClassTable`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId(u32);

impl ClassId {
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Parent chain of a class, nearest parent first.
pub type ParentChain = SmallVec<[ClassId; 4]>;

/// Errors found while resolving class declarations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InheritanceError {
    #[error("class '{class}' is already defined")]
    DuplicateClass { class: String },
    #[error("could not find class '{class}'")]
    UnknownClass { class: String },
    #[error("could not find parent class '{parent}' of class '{class}'")]
    UnknownParent { class: String, parent: String },
    #[error("cyclic inheritance: {}", chain.join(" -> "))]
    CyclicInheritance { chain: Vec<String> },
}

/// One declared class.
#[derive(Clone, Debug)]
pub struct HostClass<B> {
    name: Name,
    parent: Option<Name>,
    body: Option<B>,
}

impl<B> HostClass<B> {
    #[inline]
    pub fn name(&self) -> Name {
        self.name
    }

    /// Name of the declared parent class, unresolved.
    #[inline]
    pub fn parent_name(&self) -> Option<Name> {
        self.parent
    }

    #[inline]
    pub fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Whether this is the top-level class (the one with the empty name).
    #[inline]
    pub fn is_main(&self) -> bool {
        self.name == Name::EMPTY
    }
}

/// Immutable-after-parse registry of declared classes.
pub struct ClassTable<B> {
    interner: SharedInterner,
    classes: Vec<HostClass<B>>,
    by_name: FxHashMap<Name, ClassId>,
}

/// Lowercase and strip the leading `::` of a fully-qualified class name.
pub fn normalize_class_name(name: &str) -> String {
    name.trim_start_matches("::").to_lowercase()
}

impl<B> ClassTable<B> {
    pub fn new(interner: SharedInterner) -> Self {
        ClassTable {
            interner,
            classes: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// Declare a class. The parent is not resolved until evaluation.
    pub fn define(
        &mut self,
        name: &str,
        parent: Option<&str>,
        body: Option<B>,
    ) -> Result<ClassId, InheritanceError> {
        let name = self.interner.intern(&normalize_class_name(name));
        if self.by_name.contains_key(&name) {
            return Err(InheritanceError::DuplicateClass {
                class: self.display_name_of(name).to_owned(),
            });
        }
        let parent = parent.map(|p| self.interner.intern(&normalize_class_name(p)));

        let raw = u32::try_from(self.classes.len()).unwrap_or_else(|_| {
            panic!("class table exceeded capacity: {} classes", self.classes.len())
        });
        let id = ClassId(raw);
        self.classes.push(HostClass { name, parent, body });
        self.by_name.insert(name, id);
        Ok(id)
    }

    /// Find a class by (unnormalized) name.
    pub fn lookup(&self, name: &str) -> Option<ClassId> {
        let name = self.interner.get(&normalize_class_name(name))?;
        self.by_name.get(&name).copied()
    }

    /// Find a class by interned, already-normalized name.
    pub fn lookup_name(&self, name: Name) -> Option<ClassId> {
        self.by_name.get(&name).copied()
    }

    /// # Panics
    /// Panics if `id` was issued by another table.
    pub fn get(&self, id: ClassId) -> &HostClass<B> {
        &self.classes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &HostClass<B>)> {
        (0u32..).map(ClassId).zip(self.classes.iter())
    }

    /// Name used in diagnostics; the top-level class shows as `main`.
    pub fn display_name(&self, id: ClassId) -> &str {
        self.display_name_of(self.get(id).name)
    }

    fn display_name_of(&self, name: Name) -> &str {
        if name == Name::EMPTY {
            "main"
        } else {
            self.interner.lookup(name)
        }
    }

    /// Resolve the declared parent of `id`.
    pub fn lookup_parent(&self, id: ClassId) -> Result<Option<ClassId>, InheritanceError> {
        let Some(parent) = self.get(id).parent else {
            return Ok(None);
        };
        match self.lookup_name(parent) {
            Some(parent_id) => Ok(Some(parent_id)),
            None => Err(InheritanceError::UnknownParent {
                class: self.display_name(id).to_owned(),
                parent: self.display_name_of(parent).to_owned(),
            }),
        }
    }

    /// Resolve every ancestor of `id`, nearest first.
    ///
    /// Fails on the first unknown parent, or when the chain loops back on
    /// itself.
    pub fn parent_chain(&self, id: ClassId) -> Result<ParentChain, InheritanceError> {
        let mut chain = ParentChain::new();
        let mut visited = FxHashSet::default();
        visited.insert(id);
        let mut current = id;
        while let Some(parent) = self.lookup_parent(current)? {
            if !visited.insert(parent) {
                let mut names: Vec<String> = std::iter::once(id)
                    .chain(chain.iter().copied())
                    .map(|c| self.display_name(c).to_owned())
                    .collect();
                names.push(self.display_name(parent).to_owned());
                return Err(InheritanceError::CyclicInheritance { chain: names });
            }
            chain.push(parent);
            current = parent;
        }
        Ok(chain)
    }

    /// Whether `ancestor` appears anywhere above `id` in its parent chain.
    ///
    /// Unknown parents end the walk. Cyclic chains terminate: each class is
    /// visited at most once.
    pub fn child_of(&self, id: ClassId, ancestor: ClassId) -> bool {
        let mut visited = FxHashSet::default();
        visited.insert(id);
        let mut current = id;
        while let Ok(Some(parent)) = self.lookup_parent(current) {
            if parent == ancestor {
                return true;
            }
            if !visited.insert(parent) {
                return false;
            }
            current = parent;
        }
        false
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
