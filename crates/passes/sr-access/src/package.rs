//! Package-level access containment

use sr_symbols::{Scope, ScopeParent, SymbolGraph};
use tracing::trace;

/// Whether `scope` has package-level access to `symbol`
///
/// Finds the nearest package on the symbol's enclosing chain (resolving a
/// module that doubles as a package node to that package) and grants access
/// when the scope's module lives in that package directly, *is* the
/// package's own module, or is nested anywhere below the package. This is
/// a containment test, not symmetric friendship: a sibling package's
/// module gets nothing.
pub fn has_package_access(graph: &SymbolGraph, scope: &Scope, symbol: ScopeParent) -> bool {
    let Some(pkg) = graph.nearest_package_of(symbol) else {
        trace!("symbol has no enclosing package");
        return false;
    };

    let scope_module = graph.module(scope.module);
    if scope_module.parent == Some(pkg) {
        trace!("scope module is in the same package");
        return true;
    }
    if graph.package(pkg).package_module == Some(scope.module) {
        trace!("scope module is the package's own module");
        return true;
    }
    if graph.is_ancestor_package(pkg, scope_module.parent) {
        trace!("scope is nested inside the package");
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use sr_intern::Interner;
    use sr_span::FileId;
    use sr_symbols::ModuleId;

    struct Tree {
        graph: SymbolGraph,
        /// module `net.http.client` inside package `net.http`
        client: ModuleId,
        /// module `net.ftp` inside sibling package chain
        ftp: ModuleId,
        /// the `net.http` package's own module
        http_module: ModuleId,
        /// module `net.http.tls.session`, nested below `net.http`
        session: ModuleId,
        /// unrelated root module
        lone: ModuleId,
    }

    fn tree() -> Tree {
        let interner = Interner::new();
        let mut graph = SymbolGraph::new();
        let net = graph.add_package(interner.intern("net"), None).unwrap();
        let http = graph.add_package(interner.intern("http"), Some(net)).unwrap();
        let tls = graph.add_package(interner.intern("tls"), Some(http)).unwrap();

        let http_module = graph.add_package_module(http, FileId::new(0)).unwrap();
        let client = graph
            .add_module(interner.intern("client"), FileId::new(1), Some(http))
            .unwrap();
        let ftp = graph
            .add_module(interner.intern("ftp"), FileId::new(2), Some(net))
            .unwrap();
        let session = graph
            .add_module(interner.intern("session"), FileId::new(3), Some(tls))
            .unwrap();
        let lone = graph
            .add_module(interner.intern("lone"), FileId::new(4), None)
            .unwrap();

        Tree {
            graph,
            client,
            ftp,
            http_module,
            session,
            lone,
        }
    }

    #[test]
    fn test_sibling_module_in_same_package_is_granted() {
        let tree = tree();
        let scope = Scope::module_level(tree.client);
        assert!(has_package_access(
            &tree.graph,
            &scope,
            ScopeParent::Module(tree.client)
        ));
    }

    #[test]
    fn test_package_module_is_granted() {
        let tree = tree();
        let scope = Scope::module_level(tree.http_module);
        // Symbol in package net.http, scope is the package's own module
        assert!(has_package_access(
            &tree.graph,
            &scope,
            ScopeParent::Module(tree.client)
        ));
    }

    #[test]
    fn test_nested_module_is_granted() {
        let tree = tree();
        let scope = Scope::module_level(tree.session);
        assert!(has_package_access(
            &tree.graph,
            &scope,
            ScopeParent::Module(tree.client)
        ));
    }

    #[test]
    fn test_sibling_package_is_denied() {
        let tree = tree();
        let scope = Scope::module_level(tree.ftp);
        assert!(!has_package_access(
            &tree.graph,
            &scope,
            ScopeParent::Module(tree.client)
        ));
    }

    #[test]
    fn test_unrelated_and_unpackaged_are_denied() {
        let tree = tree();
        let scope = Scope::module_level(tree.lone);
        assert!(!has_package_access(
            &tree.graph,
            &scope,
            ScopeParent::Module(tree.client)
        ));

        // A symbol without any enclosing package grants nothing
        let scope = Scope::module_level(tree.client);
        assert!(!has_package_access(
            &tree.graph,
            &scope,
            ScopeParent::Module(tree.lone)
        ));
    }

    #[test]
    fn test_containment_is_asymmetric() {
        let tree = tree();
        // Symbol in the outer package, scope nested below it: granted
        let scope = Scope::module_level(tree.session);
        assert!(has_package_access(
            &tree.graph,
            &scope,
            ScopeParent::Module(tree.ftp)
        ));
        // Symbol nested deep, scope in the outer package only: denied,
        // ftp's package is net, not net.http.tls
        let scope = Scope::module_level(tree.ftp);
        assert!(!has_package_access(
            &tree.graph,
            &scope,
            ScopeParent::Module(tree.session)
        ));
    }
}
