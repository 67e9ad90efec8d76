//! Evaluating a type's first naming rule against its name.

use crate::resolver::RuleResolver;
use crate::rules::suffix_convention::{self, SUFFIX_PROPERTY};
use nomen_config::{NamingConfig, SuffixComparison};
use nomen_diagnostics::{Diagnostic, Label, Severity, SuggestedFix};
use nomen_model::{InterfaceId, SymbolGraph, TypeId};
use nomen_source::Span;
use rayon::prelude::*;

/// A type whose name lacks the suffix its first naming rule requires.
///
/// Violations are computed fresh on every analysis pass and never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// The offending type.
    pub type_id: TypeId,
    /// Its current simple name.
    pub current_name: String,
    /// The suffix the name must end with.
    pub required_suffix: String,
    /// The interface whose rule was violated.
    pub interface: InterfaceId,
    /// The type's name token.
    pub span: Span,
}

impl Violation {
    /// The name the fix renames the type to.
    pub fn new_name(&self) -> String {
        format!("{}{}", self.current_name, self.required_suffix)
    }

    /// Builds the NC001 diagnostic for this violation.
    pub fn to_diagnostic(&self, graph: &dyn SymbolGraph, severity: Severity) -> Diagnostic {
        let new_name = self.new_name();
        let mut diag = Diagnostic::new(
            severity,
            suffix_convention::code(),
            suffix_convention::message(&self.current_name, &self.required_suffix),
            self.span,
        )
        .with_label(Label::primary(
            self.span,
            format!("does not end with '{}'", self.required_suffix),
        ));
        if let Some(iface) = graph.interface_symbol(self.interface) {
            if !iface.name_span.is_dummy() {
                diag = diag.with_label(Label::secondary(
                    iface.name_span,
                    format!("suffix '{}' required by this interface", self.required_suffix),
                ));
            }
        }
        diag.with_note(suffix_convention::DESCRIPTION)
            .with_help(format!("rename to '{new_name}'"))
            .with_property(SUFFIX_PROPERTY, self.required_suffix.as_str())
            .with_fix(SuggestedFix::on_request(
                suffix_convention::FIX_TITLE,
                SUFFIX_PROPERTY,
            ))
    }

    /// Rebuilds a violation from an NC001 diagnostic of the same revision.
    ///
    /// The suffix comes from the diagnostic's `suffix` property, and the type
    /// from the declaration enclosing its span. Returns `None` if the
    /// diagnostic is not NC001, lacks the property, or no longer points at a
    /// type whose closure has a rule with that suffix.
    pub fn from_diagnostic(diag: &Diagnostic, graph: &dyn SymbolGraph) -> Option<Violation> {
        if diag.code != suffix_convention::code() {
            return None;
        }
        let suffix = diag.property(SUFFIX_PROPERTY)?;
        let type_id = graph.declared_type_at(diag.primary_span)?;
        let ty = graph.type_symbol(type_id)?;
        let rule = RuleResolver::new(graph)
            .resolve(type_id)
            .into_iter()
            .find(|r| r.suffix() == suffix)?;
        Some(Violation {
            type_id,
            current_name: graph.interner().resolve(ty.name).to_string(),
            required_suffix: suffix.to_string(),
            interface: rule.interface,
            span: diag.primary_span,
        })
    }
}

/// Returns `true` if `name` ends with `suffix` under `comparison`.
pub fn suffix_matches(name: &str, suffix: &str, comparison: SuffixComparison) -> bool {
    match comparison {
        SuffixComparison::Ordinal => name.ends_with(suffix),
        SuffixComparison::OrdinalIgnoreCase => name
            .len()
            .checked_sub(suffix.len())
            .and_then(|start| name.get(start..))
            .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix)),
    }
}

/// Checks one type against the first naming rule in its closure.
///
/// Only class declarations are checked, and generated code is skipped unless
/// `config.include_generated` is set. Pure: reads the graph, writes nothing.
pub fn analyze(graph: &dyn SymbolGraph, ty: TypeId, config: &NamingConfig) -> Option<Violation> {
    let symbol = graph.type_symbol(ty)?;
    if !symbol.kind.is_class_like() || (symbol.generated && !config.include_generated) {
        return None;
    }
    let rule = RuleResolver::new(graph).first(ty)?;
    let name = graph.interner().resolve(symbol.name);
    if suffix_matches(name, rule.suffix(), config.comparison) {
        return None;
    }
    tracing::debug!(
        name,
        suffix = rule.suffix(),
        interface = %rule.interface,
        "name lacks required suffix"
    );
    Some(Violation {
        type_id: ty,
        current_name: name.to_string(),
        required_suffix: rule.suffix().to_string(),
        interface: rule.interface,
        span: symbol.name_span,
    })
}

/// Analyzes every type in parallel, returning violations in type order.
pub fn find_violations(graph: &dyn SymbolGraph, config: &NamingConfig) -> Vec<Violation> {
    graph
        .type_ids()
        .par_iter()
        .filter_map(|&ty| analyze(graph, ty, config))
        .collect()
}
