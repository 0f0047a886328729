//! Top-level access checking entry points

use crate::error::AccessError;
use crate::friend::{has_private_access, is_friend_of};
use crate::package::has_package_access;
use crate::resolve::effective_access;
use sr_diagnostics::DiagnosticContext;
use sr_intern::Interner;
use sr_span::Loc;
use sr_symbols::{
    AggregateId, AggregateKind, FunctionId, MemberId, MemberKind, Protection, Scope, ScopeParent,
    SymbolGraph,
};
use tracing::debug;

/// Static type of the receiver in a member access expression
#[derive(Copy, Clone, Debug)]
pub enum ReceiverType {
    /// Receiver is a class instance
    Class(AggregateId),
    /// Receiver is a struct instance
    Struct(AggregateId),
    /// Anything else; no aggregate access applies
    Other,
}

/// The receiver side of `receiver.member`
#[derive(Copy, Clone, Debug)]
pub struct Receiver {
    pub ty: ReceiverType,
    /// Whether the receiver is a `super` reference inside a method
    pub is_super: bool,
}

impl Receiver {
    pub fn new(ty: ReceiverType) -> Self {
        Self {
            ty,
            is_super: false,
        }
    }

    pub fn super_reference(ty: ReceiverType) -> Self {
        Self { ty, is_super: true }
    }
}

/// Decides accessibility of member references and reports denials
pub struct AccessChecker<'a> {
    graph: &'a SymbolGraph,
    interner: &'a Interner,
    diag: &'a DiagnosticContext,
}

impl<'a> AccessChecker<'a> {
    pub fn new(
        graph: &'a SymbolGraph,
        interner: &'a Interner,
        diag: &'a DiagnosticContext,
    ) -> Self {
        Self {
            graph,
            interner,
            diag,
        }
    }

    /// Check access to `member` through an instance of `aggregate`
    ///
    /// The aggregate is the static type of the receiver the member is
    /// reached through. On denial a diagnostic is emitted at `loc` and
    /// `false` is returned.
    pub fn check_member_access(
        &self,
        aggregate: AggregateId,
        loc: &Loc,
        scope: &Scope,
        member: MemberId,
    ) -> bool {
        let caller = scope.function;
        let scope_aggregate = scope.aggregate;
        let decl = self.graph.member(member);

        debug!(?aggregate, ?member, "member access check");

        // Not an aggregate member at all, nothing to check
        if decl.owner().is_none() {
            return true;
        }

        let granted = if decl.owner() == Some(aggregate) {
            let protection = decl.protection;
            protection >= Protection::Public
                || has_private_access(self.graph, aggregate, caller)
                || is_friend_of(self.graph, aggregate, scope_aggregate)
                || (protection == Protection::Package
                    && has_package_access(self.graph, scope, ScopeParent::Aggregate(aggregate)))
                || self.graph.access_module(ScopeParent::Aggregate(aggregate))
                    == Some(scope.module)
        } else {
            let access = effective_access(self.graph, aggregate, member);
            if access >= Protection::Public {
                true
            } else if access == Protection::Package
                && has_package_access(self.graph, scope, ScopeParent::Aggregate(aggregate))
            {
                true
            } else {
                self.access_through_bases(member, caller, aggregate, scope_aggregate)
            }
        };

        if !granted {
            let err = AccessError::MemberNotAccessible {
                name: self.interner.resolve(decl.name).to_owned(),
            };
            self.diag.error(loc, &err.to_string());
        }
        granted
    }

    /// Recursive fallback over the base-class hierarchy
    ///
    /// With private or friend standing on the current aggregate, a direct
    /// member is granted outright and bases are searched for anything at
    /// least protected; without standing, the search can still succeed
    /// through a base on which the caller does have standing.
    fn access_through_bases(
        &self,
        member: MemberId,
        caller: Option<FunctionId>,
        aggregate: AggregateId,
        scope_aggregate: Option<AggregateId>,
    ) -> bool {
        let owner = self.graph.member(member).owner();

        if has_private_access(self.graph, aggregate, caller)
            || is_friend_of(self.graph, aggregate, scope_aggregate)
        {
            if owner == Some(aggregate) {
                return true;
            }
            for edge in &self.graph.aggregate(aggregate).bases {
                if effective_access(self.graph, edge.base, member) >= Protection::Protected
                    || self.access_through_bases(member, caller, edge.base, scope_aggregate)
                {
                    return true;
                }
            }
        } else if owner != Some(aggregate) {
            for edge in &self.graph.aggregate(aggregate).bases {
                if self.access_through_bases(member, caller, edge.base, scope_aggregate) {
                    return true;
                }
            }
        }
        false
    }

    /// Check access to `decl` for the expression `receiver.decl`
    ///
    /// Without a receiver this is a free reference, checked against the
    /// declaration's module and package only. A `super` receiver inside a
    /// method accesses through the method's own class rather than the
    /// receiver's nominal type.
    pub fn check_expr_access(
        &self,
        loc: &Loc,
        scope: &Scope,
        receiver: Option<Receiver>,
        decl: MemberId,
    ) -> bool {
        if scope.no_access_check {
            return true;
        }

        let member = self.graph.member(decl);

        // Unit tests are always accessible
        if member.kind == MemberKind::UnitTest {
            return true;
        }

        let Some(receiver) = receiver else {
            let decl_module = self.graph.access_module(member.parent);
            let denied = (member.protection == Protection::Private
                && decl_module != Some(scope.module))
                || (member.protection == Protection::Package
                    && !has_package_access(self.graph, scope, member.parent));
            if denied {
                let err = AccessError::NotAccessibleFromModule {
                    kind: member.kind.as_str(),
                    name: self.interner.resolve(member.name).to_owned(),
                    module: self
                        .interner
                        .resolve(self.graph.module(scope.module).name)
                        .to_owned(),
                };
                self.diag.error(loc, &err.to_string());
                return false;
            }
            return true;
        };

        match receiver.ty {
            ReceiverType::Class(class) => {
                let mut target = class;
                if receiver.is_super {
                    // Inside a method, super.member goes through the
                    // method's own class
                    if let Some(enclosing) = self.enclosing_class(scope.function) {
                        target = enclosing;
                    }
                }
                self.check_member_access(target, loc, scope, decl)
            }
            ReceiverType::Struct(strukt) => self.check_member_access(strukt, loc, scope, decl),
            ReceiverType::Other => true,
        }
    }

    /// Report use of a deprecated declaration, unless the use site is
    /// itself inside a deprecated declaration
    pub fn check_deprecated(&self, loc: &Loc, scope: &Scope, decl: MemberId) {
        let member = self.graph.member(decl);
        if !member.is_deprecated || self.scope_is_deprecated(scope) {
            return;
        }
        self.diag.deprecation_with_context(
            loc,
            member.kind.as_str(),
            self.interner.resolve(member.name),
            "is deprecated",
        );
    }

    fn enclosing_class(&self, function: Option<FunctionId>) -> Option<AggregateId> {
        let function = function?;
        match self.graph.function(function).parent {
            ScopeParent::Aggregate(id)
                if self.graph.aggregate(id).kind == AggregateKind::Class =>
            {
                Some(id)
            }
            _ => None,
        }
    }

    fn scope_is_deprecated(&self, scope: &Scope) -> bool {
        if let Some(function) = scope.function {
            if self.graph.function(function).is_deprecated {
                return true;
            }
        }
        let mut parent = scope
            .function
            .map(|f| self.graph.function(f).parent)
            .or(scope.aggregate.map(ScopeParent::Aggregate));
        while let Some(current) = parent {
            match current {
                ScopeParent::Aggregate(id) => {
                    let aggregate = self.graph.aggregate(id);
                    if aggregate.is_deprecated {
                        return true;
                    }
                    parent = Some(aggregate.parent);
                }
                ScopeParent::Function(id) => {
                    let function = self.graph.function(id);
                    if function.is_deprecated {
                        return true;
                    }
                    parent = Some(function.parent);
                }
                ScopeParent::Module(_) | ScopeParent::Package(_) => parent = None,
            }
        }
        false
    }
}
