//! Transient analysis scope

use crate::graph::{AggregateId, FunctionId, ModuleId};

/// The scope an access expression is analyzed in
///
/// Stack-allocated per analysis context; captures the enclosing function
/// and aggregate (when inside a method body) plus the current module.
#[derive(Copy, Clone, Debug)]
pub struct Scope {
    /// Enclosing function, if inside a function body
    pub function: Option<FunctionId>,
    /// Enclosing struct or class, used for private-access grants
    pub aggregate: Option<AggregateId>,
    /// Module the analyzed code belongs to
    pub module: ModuleId,
    /// Skip access checks entirely, for internally generated code
    pub no_access_check: bool,
}

impl Scope {
    /// Scope at module level, outside any function or aggregate
    pub fn module_level(module: ModuleId) -> Self {
        Self {
            function: None,
            aggregate: None,
            module,
            no_access_check: false,
        }
    }

    /// Same scope, inside the given function
    pub fn in_function(self, function: FunctionId) -> Self {
        Self {
            function: Some(function),
            ..self
        }
    }

    /// Same scope, inside the given aggregate body
    pub fn in_aggregate(self, aggregate: AggregateId) -> Self {
        Self {
            aggregate: Some(aggregate),
            ..self
        }
    }

    /// Same scope with access checks disabled
    pub fn without_access_checks(self) -> Self {
        Self {
            no_access_check: true,
            ..self
        }
    }
}
