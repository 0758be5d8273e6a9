//! Singleton class evaluation.
//!
//! A class body runs at most once per compilation. Evaluating a class:
//!
//! 1. returns immediately if the class already has a registered scope
//! 2. resolves the parent chain, rejecting unknown parents and cycles
//! 3. tags the class
//! 4. evaluates the parent first and starts from the parent's own scope
//! 5. nests a fresh scope for the resource, unless it is the main resource
//! 6. copies the parent scope's namespaces into the new scope
//! 7. registers the scope, then runs the body in it
//!
//! The scope is registered before the body runs so the body can find its own
//! scope through the compilation.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use kiln_ir::{ClassId, ClassTable, Name, Resource};

use crate::compilation::Compilation;
use crate::scope::ScopeId;
use crate::stack::ensure_sufficient_stack;
use crate::ClassError;

/// Executable body of a class.
///
/// The evaluator's error type is the body's: class errors convert into it
/// through `From<ClassError>`, body errors pass through untouched.
pub trait ClassBody: Sized {
    type Output;
    type Error: From<ClassError>;

    /// Run the body in `scope`. `cx` gives access to the compilation and
    /// lets the body include further classes.
    fn execute(
        &self,
        cx: &mut ClassEvaluator<'_, Self>,
        scope: ScopeId,
    ) -> Result<Self::Output, Self::Error>;
}

/// Evaluates classes from one table into one compilation.
pub struct ClassEvaluator<'a, B> {
    classes: &'a ClassTable<B>,
    compilation: &'a mut Compilation,
    /// Classes whose parents are being evaluated on their behalf.
    in_progress: FxHashSet<ClassId>,
}

impl<'a, B: ClassBody> ClassEvaluator<'a, B> {
    pub fn new(classes: &'a ClassTable<B>, compilation: &'a mut Compilation) -> Self {
        ClassEvaluator {
            classes,
            compilation,
            in_progress: FxHashSet::default(),
        }
    }

    #[inline]
    pub fn classes(&self) -> &'a ClassTable<B> {
        self.classes
    }

    #[inline]
    pub fn compilation(&self) -> &Compilation {
        &*self.compilation
    }

    #[inline]
    pub fn compilation_mut(&mut self) -> &mut Compilation {
        &mut *self.compilation
    }

    /// Evaluate `class` from `scope` on behalf of `resource`.
    ///
    /// Returns `Ok(None)` when the class was already evaluated in this
    /// compilation or has no body.
    pub fn evaluate(
        &mut self,
        class: ClassId,
        scope: ScopeId,
        resource: Option<&Resource>,
    ) -> Result<Option<B::Output>, B::Error> {
        let Some(resource) = resource else {
            return Err(ClassError::MissingResource {
                class: self.classes.display_name(class).to_owned(),
            }
            .into());
        };
        if self.compilation.is_evaluated(class) {
            tracing::debug!(
                class = self.classes.display_name(class),
                "class already evaluated; not evaluating again"
            );
            return Ok(None);
        }
        // Resolved once here; recursive parent evaluation walks the slice.
        let ancestors = self
            .classes
            .parent_chain(class)
            .map_err(ClassError::from)?;
        self.evaluate_resolved(class, &ancestors, scope, resource)
    }

    /// Evaluate `class` whose ancestors (nearest first) are already resolved.
    #[tracing::instrument(level = "debug", skip_all, fields(class = self.classes.display_name(class)))]
    fn evaluate_resolved(
        &mut self,
        class: ClassId,
        ancestors: &[ClassId],
        scope: ScopeId,
        resource: &Resource,
    ) -> Result<Option<B::Output>, B::Error> {
        let classes = self.classes;

        if self.compilation.is_evaluated(class) {
            tracing::debug!("class already evaluated; not evaluating again");
            return Ok(None);
        }
        if self.in_progress.contains(&class) {
            return Err(ClassError::ReentrantEvaluation {
                class: classes.display_name(class).to_owned(),
            }
            .into());
        }

        let host = classes.get(class);
        self.compilation.tag(host.name());

        self.in_progress.insert(class);
        let working = self.class_scope_for(class, ancestors, scope, resource);
        self.in_progress.remove(&class);
        let working = working?;

        self.compilation.set_class_scope(class, working);

        match host.body() {
            Some(body) => body.execute(self, working).map(Some),
            None => Ok(None),
        }
    }

    /// Evaluate the class called `name`, as the language's `include` does.
    pub fn include(
        &mut self,
        name: &str,
        scope: ScopeId,
        resource: Option<&Resource>,
    ) -> Result<Option<B::Output>, B::Error> {
        let Some(class) = self.classes.lookup(name) else {
            return Err(ClassError::from(kiln_ir::InheritanceError::UnknownClass {
                class: kiln_ir::normalize_class_name(name),
            })
            .into());
        };
        self.evaluate(class, scope, resource)
    }

    /// Build the scope `class` will be registered with.
    fn class_scope_for(
        &mut self,
        class: ClassId,
        ancestors: &[ClassId],
        scope: ScopeId,
        resource: &Resource,
    ) -> Result<ScopeId, B::Error> {
        let mut working = scope;
        let mut inherited: Option<SmallVec<[Name; 2]>> = None;

        if let Some((&parent, grandparents)) = ancestors.split_first() {
            // The parent's result is discarded; only its scope matters here.
            ensure_sufficient_stack(|| {
                self.evaluate_resolved(parent, grandparents, scope, resource)
            })?;

            working = self.compilation.class_scope(parent).ok_or_else(|| {
                ClassError::ParentScopeMissing {
                    class: self.classes.display_name(class).to_owned(),
                    parent: self.classes.display_name(parent).to_owned(),
                }
            })?;
            inherited = Some(SmallVec::from_slice(
                self.compilation.scopes().namespaces(working),
            ));
        }

        // The main resource already owns the outermost scope.
        if !resource.is_main() {
            let outer = working;
            working = self.compilation.scopes_mut().subscope(outer, *resource);
            tracing::trace!(?outer, scope = ?working, "created class subscope");
        }

        if let Some(namespaces) = inherited {
            tracing::trace!(count = namespaces.len(), "propagating parent namespaces");
            let scopes = self.compilation.scopes_mut();
            for ns in namespaces {
                scopes.add_namespace(working, ns);
            }
        }

        Ok(working)
    }
}
