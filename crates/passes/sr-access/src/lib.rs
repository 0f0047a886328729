//! Access checking for member references
//!
//! This crate decides, for any member access expression, whether the access
//! is legal given the enclosing scope. It runs over the read-only symbol
//! graph from `sr-symbols` and reports denials through the diagnostic
//! context from `sr-diagnostics`.
//!
//! # Architecture
//!
//! - **Effective access** ([`effective_access`]): the protection of a member
//!   as seen through a given aggregate, recursing across base-class edges
//!   with the tightening rule and combining paths by loosest access.
//! - **Friendship** ([`is_friend_of`], [`has_private_access`]): identity and
//!   same-module grants for private members.
//! - **Package containment** ([`has_package_access`]): whether a scope sits
//!   inside the package a symbol belongs to.
//! - **The checker** ([`AccessChecker`]): top-level entry points invoked by
//!   semantic analysis for member and expression accesses.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sr_access::AccessChecker;
//!
//! let checker = AccessChecker::new(&graph, &interner, &diag);
//! if !checker.check_member_access(aggregate, &loc, &scope, member) {
//!     // denial already reported through `diag`
//! }
//! ```

pub mod check;
pub mod error;
pub mod friend;
pub mod package;
pub mod resolve;

pub use check::{AccessChecker, Receiver, ReceiverType};
pub use error::AccessError;
pub use friend::{has_private_access, is_friend_of};
pub use package::has_package_access;
pub use resolve::effective_access;
