//! Errors raised by class evaluation.
//!
//! Class and parent names are rendered when the error is built, so errors
//! display without access to the interner.

use kiln_ir::{InheritanceError, Name};

/// Failure of `ClassEvaluator::evaluate`.
///
/// Body failures are not represented here: they are returned in the body's
/// own error type, which every `ClassError` converts into.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClassError {
    /// `evaluate` was called without a resource to bind the class scope to.
    #[error("class '{class}' requires a resource")]
    MissingResource { class: String },

    /// The parent was evaluated but left no registered scope.
    #[error("internal compiler error: could not find scope for parent class '{parent}' of class '{class}'")]
    ParentScopeMissing { class: String, parent: String },

    /// The class was evaluated again while its parent classes were still
    /// being evaluated on its behalf.
    #[error("class '{class}' was included while evaluating its own parent classes")]
    ReentrantEvaluation { class: String },

    #[error(transparent)]
    Inheritance(#[from] InheritanceError),
}

impl ClassError {
    /// Whether this is a bug in the evaluator rather than in the program.
    pub fn is_internal(&self) -> bool {
        matches!(self, ClassError::ParentScopeMissing { .. })
    }
}

/// Failure of a scope mutation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScopeError {
    /// Variables are single-assignment within a scope.
    #[error("variable is already bound in this scope")]
    Reassignment { name: Name },
}
