//! Naming-convention analysis.
//!
//! [`RuleResolver`] walks a type's interface closure and finds the naming
//! rules attached along the way. [`analyze`] turns the first of them into at
//! most one [`Violation`]. The [`LintEngine`] runs every registered
//! [`LintRule`] over all types of a program in parallel and reports
//! diagnostics through a [`DiagnosticSink`].
//!
//! # Rules
//!
//! - **NC001 `suffix-convention`:** a class implementing an interface with a
//!   naming rule must end its name with the rule's suffix.

#![warn(missing_docs)]

mod engine;
mod error;
mod resolver;
mod rules;
mod violation;

pub use engine::LintEngine;
pub use error::AnalysisError;
pub use resolver::{ResolvedRule, RuleResolver};
pub use rules::{register_builtin_rules, SuffixConvention};
pub use violation::{analyze, find_violations, suffix_matches, Violation};

use nomen_diagnostics::{DiagnosticCode, DiagnosticSink, Severity};
use nomen_model::{SymbolGraph, TypeId};

/// A single lint rule that checks one type at a time.
///
/// Rules must not keep state between calls: the engine invokes
/// `check_type` for many types concurrently.
pub trait LintRule: Send + Sync {
    /// Returns the diagnostic code for this rule (e.g., NC001).
    fn code(&self) -> DiagnosticCode;

    /// Returns the short kebab-case name of this rule (e.g., "suffix-convention").
    fn name(&self) -> &str;

    /// Returns a one-line title of what this rule checks.
    fn description(&self) -> &str;

    /// Returns a longer explanation, shown by `nomen explain`.
    fn explanation(&self) -> &str {
        self.description()
    }

    /// Returns the default severity for diagnostics emitted by this rule.
    fn default_severity(&self) -> Severity;

    /// Checks a single type and emits diagnostics to the sink.
    fn check_type(&self, ty: TypeId, graph: &dyn SymbolGraph, sink: &DiagnosticSink);
}
