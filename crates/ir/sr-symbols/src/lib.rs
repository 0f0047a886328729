//! Symbol graph consumed by access checking
//!
//! This crate defines the read-only symbol structures that semantic analysis
//! builds during declaration processing: packages, modules, aggregates
//! (classes and structs) with their base-class edges, members, and functions.
//! Ownership always runs downward (package owns modules, aggregate owns
//! members); back-references are arena indices, never owning pointers.
//!
//! Once analysis starts the graph is only read; the access-checking pass in
//! `sr-access` answers visibility questions over it without mutating it.

pub mod error;
pub mod graph;
pub mod protection;
pub mod scope;

pub use error::GraphError;
pub use graph::{
    Aggregate, AggregateId, AggregateKind, BaseEdge, Function, FunctionId, Member, MemberId,
    MemberKind, Module, ModuleId, Package, PackageId, ScopeParent, SymbolGraph,
};
pub use protection::Protection;
pub use scope::Scope;
