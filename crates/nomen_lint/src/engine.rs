//! Lint engine that manages rule registration, configuration, and execution.
//!
//! The `LintEngine` accepts a `LintConfig` to control which rules are denied
//! or allowed, then checks every type of the program with each enabled rule.
//! Types are checked in parallel; diagnostics are reported in type order.

use std::collections::HashSet;

use nomen_config::{LintConfig, NamingConfig};
use nomen_diagnostics::{Diagnostic, DiagnosticSink, Severity};
use nomen_model::{SymbolGraph, TypeId};
use rayon::prelude::*;
use tokio_util::sync::CancellationToken;

use crate::error::AnalysisError;
use crate::rules::register_builtin_rules;
use crate::LintRule;

/// The lint engine that orchestrates running lint rules on a program.
///
/// Rules are registered at construction time. The engine respects the
/// `LintConfig` to suppress rules (allow) or promote them to errors (deny).
/// Entries match either a rule's name or its code.
pub struct LintEngine {
    /// All registered lint rules.
    rules: Vec<Box<dyn LintRule>>,
    /// Rule names or codes that should be promoted to error severity.
    denied: HashSet<String>,
    /// Rule names or codes that should be suppressed (not reported).
    allowed: HashSet<String>,
}

impl LintEngine {
    /// Creates a new lint engine configured by `lint` and `naming`.
    ///
    /// All builtin rules are registered automatically.
    pub fn new(lint: &LintConfig, naming: &NamingConfig) -> Self {
        let mut engine = Self {
            rules: Vec::new(),
            denied: lint.deny.iter().cloned().collect(),
            allowed: lint.allow.iter().cloned().collect(),
        };
        register_builtin_rules(&mut engine, naming);
        engine
    }

    /// Creates a new lint engine with default configuration (no overrides).
    pub fn with_defaults() -> Self {
        Self::new(&LintConfig::default(), &NamingConfig::default())
    }

    /// Registers a lint rule with the engine.
    pub fn register(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }

    /// Returns the number of registered rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the names of all registered rules.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Finds a registered rule by name or code.
    pub fn find_rule(&self, key: &str) -> Option<&dyn LintRule> {
        self.rules
            .iter()
            .find(|r| r.name() == key || r.code().to_string() == key)
            .map(|r| r.as_ref())
    }

    /// Runs all enabled rules on every type of the program.
    pub fn run(&self, graph: &dyn SymbolGraph, sink: &DiagnosticSink) {
        let per_type: Vec<Vec<Diagnostic>> = graph
            .type_ids()
            .par_iter()
            .map(|&ty| self.check_type(ty, graph))
            .collect();
        for diag in per_type.into_iter().flatten() {
            sink.emit(diag);
        }
    }

    /// Like [`run`](Self::run), but abandons the pass when `cancel` fires.
    ///
    /// A cancelled pass reports nothing.
    pub fn run_cancellable(
        &self,
        graph: &dyn SymbolGraph,
        sink: &DiagnosticSink,
        cancel: &CancellationToken,
    ) -> Result<(), AnalysisError> {
        let per_type: Option<Vec<Vec<Diagnostic>>> = graph
            .type_ids()
            .par_iter()
            .map(|&ty| (!cancel.is_cancelled()).then(|| self.check_type(ty, graph)))
            .collect();
        match per_type {
            Some(per_type) if !cancel.is_cancelled() => {
                for diag in per_type.into_iter().flatten() {
                    sink.emit(diag);
                }
                Ok(())
            }
            _ => {
                tracing::debug!("analysis cancelled");
                Err(AnalysisError::Cancelled)
            }
        }
    }

    /// Runs every enabled rule on one type, applying allow/deny overrides.
    fn check_type(&self, ty: TypeId, graph: &dyn SymbolGraph) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        for rule in &self.rules {
            if self.matches(&self.allowed, rule.as_ref()) {
                continue;
            }

            // Use a temporary sink to capture and possibly modify diagnostics
            let temp_sink = DiagnosticSink::new();
            rule.check_type(ty, graph, &temp_sink);

            let is_denied = self.matches(&self.denied, rule.as_ref());
            for mut diag in temp_sink.take_all() {
                if is_denied {
                    diag.severity = Severity::Error;
                }
                out.push(diag);
            }
        }
        out
    }

    fn matches(&self, set: &HashSet<String>, rule: &dyn LintRule) -> bool {
        set.contains(rule.name()) || set.contains(&rule.code().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nomen_diagnostics::{Category, DiagnosticCode};
    use nomen_model::fixture;
    use nomen_source::Span;

    const PROGRAM: &str = "[FamilyName(\"Strategy\")] interface IStrategy { }\nclass Bad : IStrategy { }\nclass Worse : IStrategy { }\nclass FineStrategy : IStrategy { }\n";

    struct DummyRule;
    impl LintRule for DummyRule {
        fn code(&self) -> DiagnosticCode {
            DiagnosticCode::new(Category::Naming, 999)
        }
        fn name(&self) -> &str {
            "dummy-rule"
        }
        fn description(&self) -> &str {
            "a test rule"
        }
        fn default_severity(&self) -> Severity {
            Severity::Warning
        }
        fn check_type(&self, _ty: TypeId, _graph: &dyn SymbolGraph, sink: &DiagnosticSink) {
            sink.emit(Diagnostic::warning(self.code(), "dummy warning", Span::DUMMY));
        }
    }

    fn lint(deny: &[&str], allow: &[&str]) -> LintConfig {
        LintConfig {
            deny: deny.iter().map(|s| s.to_string()).collect(),
            allow: allow.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn engine_registers_builtin_rules() {
        let engine = LintEngine::with_defaults();
        assert_eq!(engine.rule_count(), 1);
        assert_eq!(engine.rule_names(), vec!["suffix-convention"]);
    }

    #[test]
    fn engine_custom_rule() {
        let mut engine = LintEngine::with_defaults();
        engine.register(Box::new(DummyRule));
        assert_eq!(engine.rule_count(), 2);
        assert!(engine.find_rule("NC999").is_some());
    }

    #[test]
    fn run_reports_in_type_order() {
        let ws = fixture::single(PROGRAM).unwrap();
        let sink = DiagnosticSink::new();
        LintEngine::with_defaults().run(ws.graph(), &sink);
        let diags = sink.take_all();
        assert_eq!(diags.len(), 2);
        assert!(diags[0].message.contains("'Bad'"));
        assert!(diags[1].message.contains("'Worse'"));
    }

    #[test]
    fn allow_by_name_suppresses_rule() {
        let ws = fixture::single(PROGRAM).unwrap();
        let sink = DiagnosticSink::new();
        LintEngine::new(&lint(&[], &["suffix-convention"]), &NamingConfig::default())
            .run(ws.graph(), &sink);
        assert!(sink.take_all().is_empty());
    }

    #[test]
    fn deny_by_code_promotes_severity() {
        let ws = fixture::single(PROGRAM).unwrap();
        let sink = DiagnosticSink::new();
        LintEngine::new(&lint(&["NC001"], &[]), &NamingConfig::default()).run(ws.graph(), &sink);
        assert_eq!(sink.error_count(), 2);
    }

    #[test]
    fn find_rule_by_name_or_code() {
        let engine = LintEngine::with_defaults();
        assert_eq!(engine.find_rule("NC001").map(|r| r.name()), Some("suffix-convention"));
        assert!(engine.find_rule("suffix-convention").is_some());
        assert!(engine.find_rule("NC404").is_none());
    }

    #[test]
    fn cancelled_pass_reports_nothing() {
        let ws = fixture::single(PROGRAM).unwrap();
        let sink = DiagnosticSink::new();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = LintEngine::with_defaults().run_cancellable(ws.graph(), &sink, &cancel);
        assert_eq!(result, Err(AnalysisError::Cancelled));
        assert!(sink.take_all().is_empty());
    }

    #[test]
    fn uncancelled_pass_matches_run() {
        let ws = fixture::single(PROGRAM).unwrap();
        let sink = DiagnosticSink::new();
        LintEngine::with_defaults()
            .run_cancellable(ws.graph(), &sink, &CancellationToken::new())
            .unwrap();
        assert_eq!(sink.take_all().len(), 2);
    }
}
