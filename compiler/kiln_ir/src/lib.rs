//! Kiln IR - declaration types shared by the Kiln compiler crates.
//!
//! - [`Name`] and the interners: compact identifiers for class, namespace and
//!   variable names
//! - [`ClassTable`]: the registry of declared classes and their parents
//! - [`Resource`]: the resource a class is evaluated against

mod class;
mod interner;
mod name;
mod resource;

pub use class::{normalize_class_name, ClassId, ClassTable, HostClass, InheritanceError, ParentChain};
pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use resource::{Resource, ResourceTitle};
