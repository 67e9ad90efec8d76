//! Structured diagnostic messages with severity, codes, labels, and fixes.

use crate::code::DiagnosticCode;
use crate::label::Label;
use crate::severity::Severity;
use crate::suggested_fix::SuggestedFix;
use nomen_source::Span;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A structured diagnostic message.
///
/// Besides the human-readable parts (message, labels, notes, help), a
/// diagnostic carries `properties`: string key/value pairs that a fix
/// provider reads instead of re-parsing the message text.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The stable code identifying the rule that produced it.
    pub code: DiagnosticCode,
    /// The rendered message.
    pub message: String,
    /// The span the diagnostic points at.
    pub primary_span: Span,
    /// Additional annotated spans.
    pub labels: Vec<Label>,
    /// Explanatory footnotes.
    pub notes: Vec<String>,
    /// Actionable suggestions.
    pub help: Vec<String>,
    /// Structured data for fix providers.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// An auto-applicable fix, if available.
    pub fix: Option<SuggestedFix>,
}

impl Diagnostic {
    /// Creates a diagnostic with an explicit severity.
    pub fn new(
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            primary_span: span,
            labels: Vec::new(),
            notes: Vec::new(),
            help: Vec::new(),
            properties: BTreeMap::new(),
            fix: None,
        }
    }

    /// Creates a new error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Error, code, message, span)
    }

    /// Creates a new warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Warning, code, message, span)
    }

    /// Adds a label to this diagnostic.
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    /// Attaches a structured property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Sets the suggested fix for this diagnostic.
    pub fn with_fix(mut self, fix: SuggestedFix) -> Self {
        self.fix = Some(fix);
        self
    }

    /// Looks up a structured property.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;

    fn nc001() -> DiagnosticCode {
        DiagnosticCode::new(Category::Naming, 1)
    }

    #[test]
    fn create_warning() {
        let diag = Diagnostic::warning(nc001(), "type name 'Bad' is off", Span::DUMMY);
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(format!("{}", diag.code), "NC001");
    }

    #[test]
    fn create_error() {
        let diag = Diagnostic::error(nc001(), "denied", Span::DUMMY);
        assert!(diag.severity.is_error());
    }

    #[test]
    fn builder_methods() {
        let diag = Diagnostic::warning(nc001(), "msg", Span::DUMMY)
            .with_label(Label::secondary(Span::DUMMY, "suffix required here"))
            .with_note("note")
            .with_help("rename to 'BadStrategy'")
            .with_property("suffix", "Strategy");
        assert_eq!(diag.labels.len(), 1);
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.help.len(), 1);
        assert_eq!(diag.property("suffix"), Some("Strategy"));
        assert_eq!(diag.property("missing"), None);
        assert!(diag.fix.is_none());
    }

    #[test]
    fn properties_survive_json() {
        let diag =
            Diagnostic::warning(nc001(), "msg", Span::DUMMY).with_property("suffix", "Strategy");
        let json = serde_json::to_string(&diag).unwrap();
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(back.property("suffix"), Some("Strategy"));
    }
}
