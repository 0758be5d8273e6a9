//! String interner for class, namespace and variable names.
//!
//! Interning happens while declarations are collected; evaluation only reads.
//! The table sits behind a `parking_lot::RwLock` so one interner can serve
//! several compilations running on different threads.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    /// More than `u32::MAX` distinct strings.
    #[error("interner exceeded capacity: {count} strings, max is {}", u32::MAX)]
    Overflow { count: usize },
}

#[derive(Default)]
struct InternTable {
    map: FxHashMap<&'static str, Name>,
    strings: Vec<&'static str>,
}

impl InternTable {
    fn insert(&mut self, s: &str) -> Result<Name, InternError> {
        if let Some(&name) = self.map.get(s) {
            return Ok(name);
        }
        let raw = u32::try_from(self.strings.len()).map_err(|_| InternError::Overflow {
            count: self.strings.len(),
        })?;
        // Interned strings live as long as the process; names are plain indices.
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let name = Name::from_raw(raw);
        self.strings.push(leaked);
        self.map.insert(leaked, name);
        Ok(name)
    }
}

/// Thread-safe string interner.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create a new interner with `""` and `main` pre-interned.
    pub fn new() -> Self {
        let mut table = InternTable::default();
        for s in ["", "main"] {
            // Two strings cannot overflow a u32 index.
            let _ = table.insert(s);
        }
        debug_assert_eq!(table.map.get(""), Some(&Name::EMPTY));
        debug_assert_eq!(table.map.get("main"), Some(&Name::MAIN));
        StringInterner {
            table: RwLock::new(table),
        }
    }

    /// Try to intern a string, returning its Name or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        if let Some(&name) = self.table.read().map.get(s) {
            return Ok(name);
        }
        // `insert` re-checks under the write lock.
        self.table.write().insert(s)
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if the interner exceeds capacity. Use `try_intern` for
    /// fallible interning.
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up a string without interning it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.table.read().map.get(s).copied()
    }

    /// Look up the string for a Name.
    ///
    /// Names from another interner may resolve to an unrelated string or to
    /// `""` when out of range.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("")
    }

    /// Number of interned strings, including the pre-interned ones.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Check if only the pre-interned strings are present.
    pub fn is_empty(&self) -> bool {
        self.len() <= 2
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for looking up interned string names.
///
/// Lets the evaluator render class names in diagnostics without depending on
/// a concrete interner handle.
pub trait StringLookup {
    /// Look up the string for an interned name.
    fn lookup(&self, name: Name) -> &str;
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        StringInterner::lookup(self, name)
    }
}

/// Shared interner handle, cloned into every compilation that needs one.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    /// Create a new shared interner.
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl StringLookup for SharedInterner {
    fn lookup(&self, name: Name) -> &str {
        self.0.lookup(name)
    }
}
