//! Resources that classes are evaluated against.

use crate::Name;

/// Title of a resource.
///
/// `Main` is the sentinel title of the unique top-level container resource.
/// It is distinct from a resource that happens to be titled `"main"`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResourceTitle {
    /// The top-level container resource.
    Main,
    /// Any other resource.
    Named(Name),
}

/// A catalog resource, referenced by class evaluation but owned elsewhere.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Resource {
    type_name: Name,
    title: ResourceTitle,
}

impl Resource {
    /// A resource with an ordinary title.
    pub fn new(type_name: Name, title: Name) -> Self {
        Resource {
            type_name,
            title: ResourceTitle::Named(title),
        }
    }

    /// The top-level container resource.
    pub fn main(type_name: Name) -> Self {
        Resource {
            type_name,
            title: ResourceTitle::Main,
        }
    }

    #[inline]
    pub fn type_name(&self) -> Name {
        self.type_name
    }

    #[inline]
    pub fn title(&self) -> ResourceTitle {
        self.title
    }

    /// Whether this is the top-level container resource.
    #[inline]
    pub fn is_main(&self) -> bool {
        matches!(self.title, ResourceTitle::Main)
    }
}
