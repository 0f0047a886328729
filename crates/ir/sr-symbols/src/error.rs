//! Errors raised while building the symbol graph

use sr_intern::Symbol;

/// Structural errors detected during declaration processing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A package already owns a child with this name
    #[error("duplicate name {name:?} in enclosing package")]
    DuplicateChild {
        /// The colliding child name
        name: Symbol,
    },

    /// A module already declares a top-level symbol with this name
    #[error("duplicate declaration {name:?} at module scope")]
    DuplicateDecl {
        /// The colliding declaration name
        name: Symbol,
    },

    /// An aggregate already declares a member with this name
    #[error("duplicate member {name:?}")]
    DuplicateMember {
        /// The colliding member name
        name: Symbol,
    },

    /// Base classes are only valid on classes, not structs
    #[error("struct {name:?} cannot have a base class")]
    BaseOnStruct {
        /// The offending struct
        name: Symbol,
    },

    /// The base edge would make the class inherit from itself
    #[error("class {name:?} cannot inherit from itself")]
    BaseCycle {
        /// The class the edge was added to
        name: Symbol,
    },
}
