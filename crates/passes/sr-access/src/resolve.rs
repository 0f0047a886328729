//! Effective protection of a member as seen through an aggregate

use sr_symbols::{AggregateId, MemberId, Protection, SymbolGraph};
use tracing::trace;

/// Compute the protection of `member` as seen through `aggregate`
///
/// A member declared directly in the aggregate, or a static member, reports
/// its declared protection. Anything else is searched for across the
/// base-class edges: private members of a base never propagate, and every
/// other inherited level is capped at the edge's own protection. When
/// several inheritance paths reach the member, the loosest surviving path
/// wins; if no path survives the result is [`Protection::None`].
///
/// Multiple paths to a shared ancestor are each evaluated independently;
/// the result only depends on the loosest one.
pub fn effective_access(
    graph: &SymbolGraph,
    aggregate: AggregateId,
    member: MemberId,
) -> Protection {
    let decl = graph.member(member);
    let mut result = Protection::None;

    if decl.owner() == Some(aggregate) || decl.is_static {
        result = decl.protection;
    }

    for edge in &graph.aggregate(aggregate).bases {
        let inherited = effective_access(graph, edge.base, member);
        match inherited {
            Protection::None => {}
            // Private members of a base class are not accessible, even if
            // some other path already produced a looser level
            Protection::Private => result = Protection::None,
            _ => {
                let through_edge = inherited.tightened_by(edge.protection);
                result = result.loosest(through_edge);
            }
        }
    }

    trace!(?aggregate, ?member, %result, "effective access");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use sr_intern::Interner;
    use sr_span::{FileId, Loc};
    use sr_symbols::{MemberKind, ScopeParent};

    struct Fixture {
        graph: SymbolGraph,
        interner: Interner,
        module: ScopeParent,
    }

    fn fixture() -> Fixture {
        let interner = Interner::new();
        let mut graph = SymbolGraph::new();
        let module = graph
            .add_module(interner.intern("app"), FileId::new(0), None)
            .unwrap();
        Fixture {
            graph,
            interner,
            module: ScopeParent::Module(module),
        }
    }

    #[test]
    fn test_direct_member_reports_declared_protection() {
        let mut fx = fixture();
        let class = fx.graph.add_class(fx.interner.intern("A"), fx.module);
        let member = fx
            .graph
            .add_member(
                class,
                fx.interner.intern("x"),
                Protection::Protected,
                MemberKind::Field,
                Loc::none(),
            )
            .unwrap();

        assert_eq!(
            effective_access(&fx.graph, class, member),
            Protection::Protected
        );
    }

    #[test]
    fn test_edge_tightens_inherited_access() {
        let mut fx = fixture();
        let base = fx.graph.add_class(fx.interner.intern("Base"), fx.module);
        let derived = fx.graph.add_class(fx.interner.intern("Derived"), fx.module);
        fx.graph
            .add_base(derived, base, Protection::Protected)
            .unwrap();
        let member = fx
            .graph
            .add_member(
                base,
                fx.interner.intern("y"),
                Protection::Public,
                MemberKind::Field,
                Loc::none(),
            )
            .unwrap();

        assert_eq!(
            effective_access(&fx.graph, derived, member),
            Protection::Protected
        );
    }

    #[test]
    fn test_private_base_edge_hides_member() {
        let mut fx = fixture();
        let base = fx.graph.add_class(fx.interner.intern("Base"), fx.module);
        let derived = fx.graph.add_class(fx.interner.intern("Derived"), fx.module);
        fx.graph
            .add_base(derived, base, Protection::Private)
            .unwrap();
        let member = fx
            .graph
            .add_member(
                base,
                fx.interner.intern("y"),
                Protection::Public,
                MemberKind::Field,
                Loc::none(),
            )
            .unwrap();

        // Tightened down to private, which the next derived level erases
        assert_eq!(
            effective_access(&fx.graph, derived, member),
            Protection::Private
        );
        let grand = fx.graph.add_class(fx.interner.intern("Grand"), fx.module);
        fx.graph.add_base(grand, derived, Protection::Public).unwrap();
        assert_eq!(effective_access(&fx.graph, grand, member), Protection::None);
    }

    #[test]
    fn test_base_private_member_never_propagates() {
        let mut fx = fixture();
        let base = fx.graph.add_class(fx.interner.intern("Base"), fx.module);
        let derived = fx.graph.add_class(fx.interner.intern("Derived"), fx.module);
        fx.graph.add_base(derived, base, Protection::Public).unwrap();
        let member = fx
            .graph
            .add_member(
                base,
                fx.interner.intern("secret"),
                Protection::Private,
                MemberKind::Field,
                Loc::none(),
            )
            .unwrap();

        assert_eq!(effective_access(&fx.graph, derived, member), Protection::None);
    }

    #[test]
    fn test_loosest_path_wins_across_multiple_bases() {
        let mut fx = fixture();
        let top = fx.graph.add_class(fx.interner.intern("Top"), fx.module);
        let member = fx
            .graph
            .add_member(
                top,
                fx.interner.intern("z"),
                Protection::Public,
                MemberKind::Field,
                Loc::none(),
            )
            .unwrap();

        // Diamond: one private edge, one protected edge
        let left = fx.graph.add_class(fx.interner.intern("Left"), fx.module);
        fx.graph.add_base(left, top, Protection::Private).unwrap();
        let right = fx.graph.add_class(fx.interner.intern("Right"), fx.module);
        fx.graph.add_base(right, top, Protection::Protected).unwrap();
        let bottom = fx.graph.add_class(fx.interner.intern("Bottom"), fx.module);
        fx.graph.add_base(bottom, left, Protection::Public).unwrap();
        fx.graph.add_base(bottom, right, Protection::Public).unwrap();

        assert_eq!(
            effective_access(&fx.graph, bottom, member),
            Protection::Protected
        );
    }

    #[test]
    fn test_static_member_reports_declared_protection_anywhere() {
        let mut fx = fixture();
        let base = fx.graph.add_class(fx.interner.intern("Base"), fx.module);
        let member = fx
            .graph
            .add_member(
                base,
                fx.interner.intern("counter"),
                Protection::Package,
                MemberKind::Variable,
                Loc::none(),
            )
            .unwrap();
        fx.graph.set_static(member);

        // Edge tightening does not apply to statics
        let derived = fx.graph.add_class(fx.interner.intern("Derived"), fx.module);
        fx.graph
            .add_base(derived, base, Protection::Private)
            .unwrap();
        assert_eq!(
            effective_access(&fx.graph, derived, member),
            Protection::Package
        );

        // Even an aggregate unrelated to the owner sees the declared level
        let other = fx.graph.add_class(fx.interner.intern("Other"), fx.module);
        assert_eq!(
            effective_access(&fx.graph, other, member),
            Protection::Package
        );
    }

    #[test]
    fn test_monotonic_along_each_edge() {
        let mut fx = fixture();
        let base = fx.graph.add_class(fx.interner.intern("Base"), fx.module);
        let member = fx
            .graph
            .add_member(
                base,
                fx.interner.intern("w"),
                Protection::Package,
                MemberKind::Field,
                Loc::none(),
            )
            .unwrap();

        for edge_protection in [
            Protection::Private,
            Protection::Package,
            Protection::Protected,
            Protection::Public,
        ] {
            let derived = fx.graph.add_class(fx.interner.intern("D"), fx.module);
            fx.graph.add_base(derived, base, edge_protection).unwrap();
            let through = effective_access(&fx.graph, derived, member);
            let bound = effective_access(&fx.graph, base, member).tightened_by(edge_protection);
            assert!(through <= bound);
        }
    }
}
