//! Friendship and private-access grants

use sr_symbols::{AggregateId, FunctionId, ScopeParent, SymbolGraph};

/// Whether `aggregate` and `other` are the same or friends
///
/// All aggregates defined in one module are mutual friends.
pub fn is_friend_of(
    graph: &SymbolGraph,
    aggregate: AggregateId,
    other: Option<AggregateId>,
) -> bool {
    let Some(other) = other else {
        return false;
    };
    if aggregate == other {
        return true;
    }

    let module = graph.access_module(ScopeParent::Aggregate(aggregate));
    module.is_some() && module == graph.access_module(ScopeParent::Aggregate(other))
}

/// Whether `caller` may access private members of `aggregate`
///
/// Granted when the caller is a method of the aggregate, or when the caller
/// is not inside any aggregate and shares the aggregate's enclosing scope
/// or defining module. Nested local functions count as their outermost
/// enclosing function.
pub fn has_private_access(
    graph: &SymbolGraph,
    aggregate: AggregateId,
    caller: Option<FunctionId>,
) -> bool {
    let Some(caller) = caller else {
        return false;
    };

    let caller_aggregate = match graph.function(caller).parent {
        ScopeParent::Aggregate(id) => Some(id),
        _ => None,
    };
    if caller_aggregate == Some(aggregate) {
        return true;
    }

    // Collapse chains of nested local functions to the outermost one
    let mut outermost = caller;
    while let ScopeParent::Function(parent) = graph.function(outermost).parent {
        outermost = parent;
    }

    if caller_aggregate.is_none() {
        let caller_parent = graph.function(outermost).parent;
        if graph.aggregate(aggregate).parent == caller_parent {
            return true;
        }
        let module = graph.access_module(ScopeParent::Aggregate(aggregate));
        if module.is_some() && module == graph.access_module(caller_parent) {
            return true;
        }
    }
    false
}
