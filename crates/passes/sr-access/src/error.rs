//! Access denial diagnostics

use miette::Diagnostic;
use thiserror::Error;

/// An access check that failed
///
/// Formatted into the message routed through the diagnostic context; the
/// checker returns `false` alongside.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum AccessError {
    /// Member of an aggregate is not visible from the accessing scope
    #[error("member {name} is not accessible")]
    #[diagnostic(
        code(access::member_not_accessible),
        help("the member's protection does not admit this scope")
    )]
    MemberNotAccessible {
        /// The member that was accessed
        name: String,
    },

    /// Free-standing declaration is not visible from the accessing module
    #[error("{kind} {name} is not accessible from module {module}")]
    #[diagnostic(code(access::not_accessible_from_module))]
    NotAccessibleFromModule {
        /// Declaration kind, e.g. "function"
        kind: &'static str,
        /// The declaration that was accessed
        name: String,
        /// The module doing the accessing
        module: String,
    },
}
