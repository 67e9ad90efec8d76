//! Finding the naming rules that apply to a type.

use nomen_model::{InterfaceId, NamingRule, SymbolGraph, TypeId};

/// A naming rule together with the interface that declares it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedRule<'g> {
    /// The rule-bearing interface.
    pub interface: InterfaceId,
    /// Its rule.
    pub rule: &'g NamingRule,
}

impl ResolvedRule<'_> {
    /// The required suffix.
    pub fn suffix(&self) -> &str {
        self.rule.suffix()
    }
}

/// Resolves naming rules through a type's interface closure.
///
/// Rules are yielded in closure order: directly implemented interfaces in
/// declaration order, each followed depth-first by what it extends. An
/// interface reached along several paths is visited once. Interfaces whose
/// rule argument was missing, malformed, or empty carry no rule and are
/// skipped.
#[derive(Clone, Copy)]
pub struct RuleResolver<'g> {
    graph: &'g dyn SymbolGraph,
}

impl<'g> RuleResolver<'g> {
    /// Creates a resolver over `graph`.
    pub fn new(graph: &'g dyn SymbolGraph) -> Self {
        Self { graph }
    }

    /// Every applicable rule, in resolution order.
    pub fn resolve(&self, ty: TypeId) -> Vec<ResolvedRule<'g>> {
        let graph = self.graph;
        graph
            .all_interfaces(ty)
            .into_iter()
            .filter_map(|interface| {
                graph
                    .attached_rule(interface)
                    .map(|rule| ResolvedRule { interface, rule })
            })
            .collect()
    }

    /// The first applicable rule, the only one analysis evaluates.
    pub fn first(&self, ty: TypeId) -> Option<ResolvedRule<'g>> {
        let graph = self.graph;
        graph.all_interfaces(ty).into_iter().find_map(|interface| {
            graph
                .attached_rule(interface)
                .map(|rule| ResolvedRule { interface, rule })
        })
    }
}
