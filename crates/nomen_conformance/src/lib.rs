//! Conformance test helpers for the Nomen naming-convention checker.
//!
//! Provides shared pipeline functions that take source text through the full
//! pipeline (load → lint → rename → apply) and return structured results for
//! assertion in integration tests.

#![warn(missing_docs)]

use nomen_config::{LintConfig, NamingConfig, RenameConfig};
use nomen_diagnostics::{Diagnostic, DiagnosticSink, Severity};
use nomen_lint::{analyze, LintEngine, Violation};
use nomen_model::{fixture, EditSet, Workspace};
use nomen_rename::{RenameError, RenameTransform};
use nomen_source::Span;
use tokio_util::sync::CancellationToken;

/// The naming-rule attribute definition every test program starts with.
///
/// It is fourteen lines long, so a test body starts on line 15.
pub const ATTRIBUTE_DEFINITION: &str = "\
using System;

namespace NamedConventions;

[AttributeUsage(AttributeTargets.Class | AttributeTargets.Interface, Inherited = false)]
public sealed class FamilyNameAttribute : Attribute
{
    public string Suffix { get; }

    public FamilyNameAttribute(string suffix)
    {
        Suffix = suffix;
    }
}
";

/// Result of running the lint engine over a program.
pub struct CheckResult {
    /// The analyzed revision.
    pub workspace: Workspace,
    /// All diagnostics, in type order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

impl CheckResult {
    /// `(line, column)` of the start of the diagnostic's primary span, both 1-indexed.
    pub fn start(&self, diag: &Diagnostic) -> (u32, u32) {
        let resolved = self.workspace.sources().resolve_span(diag.primary_span);
        (resolved.start_line, resolved.start_col)
    }

    /// `(line, column)` just past the end of the diagnostic's primary span.
    pub fn end(&self, diag: &Diagnostic) -> (u32, u32) {
        let span = diag.primary_span;
        self.workspace.sources().get_file(span.file).line_col(span.end)
    }

    /// The source text under the diagnostic's primary span.
    pub fn snippet(&self, diag: &Diagnostic) -> &str {
        self.workspace
            .sources()
            .snippet(diag.primary_span)
            .unwrap_or_default()
    }
}

/// Builds a single-file program prefixed with [`ATTRIBUTE_DEFINITION`].
///
/// # Panics
///
/// Panics if the snippet frontend rejects `body`.
pub fn program(body: &str) -> Workspace {
    fixture::single(&format!("{ATTRIBUTE_DEFINITION}{body}")).unwrap()
}

/// Runs the default lint rules over a single-file program.
pub fn check(body: &str) -> CheckResult {
    check_workspace(program(body), &LintConfig::default(), &NamingConfig::default())
}

/// Runs the lint engine with explicit configuration.
pub fn check_workspace(workspace: Workspace, lint: &LintConfig, naming: &NamingConfig) -> CheckResult {
    let sink = DiagnosticSink::new();
    LintEngine::new(lint, naming).run(workspace.graph(), &sink);
    CheckResult {
        error_count: sink.error_count(),
        warning_count: sink.count(Severity::Warning),
        diagnostics: sink.take_all(),
        workspace,
    }
}

/// Analyzes the type named `name` with default settings.
pub fn violation_of(workspace: &Workspace, name: &str) -> Option<Violation> {
    let ty = workspace.graph().type_named(name)?;
    analyze(workspace.graph(), ty, &NamingConfig::default())
}

/// Computes the fix for the type named `name`, which must be violating.
pub async fn compute_fix(workspace: &Workspace, name: &str) -> Result<EditSet, RenameError> {
    let violation = violation_of(workspace, name)
        .ok_or_else(|| RenameError::InvalidTarget(format!("'{name}' has no violation")))?;
    RenameTransform::new(RenameConfig::default())
        .compute_fix(workspace.view(), &violation, &CancellationToken::new())
        .await
}

/// Computes and applies the fix for the type named `name`.
///
/// # Panics
///
/// Panics if the fix cannot be computed or applied.
pub async fn fix(workspace: &Workspace, name: &str) -> Workspace {
    let set = compute_fix(workspace, name).await.unwrap();
    workspace.apply(&set).unwrap()
}

/// The full text of the only file of a single-file program.
pub fn text(workspace: &Workspace) -> &str {
    workspace
        .sources()
        .files()
        .next()
        .map_or("", |file| file.content.as_str())
}

/// The text under `span` in `workspace`.
pub fn snippet(workspace: &Workspace, span: Span) -> &str {
    workspace.sources().snippet(span).unwrap_or_default()
}
