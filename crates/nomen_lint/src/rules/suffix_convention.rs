//! NC001: type name lacks the suffix its interface requires.

use nomen_config::NamingConfig;
use nomen_diagnostics::{Category, DiagnosticCode, DiagnosticSink, Severity};
use nomen_model::{SymbolGraph, TypeId};

use crate::violation::analyze;
use crate::LintRule;

/// Diagnostic property carrying the required suffix.
pub(crate) const SUFFIX_PROPERTY: &str = "suffix";

pub(crate) const TITLE: &str = "Type name does not follow convention";

pub(crate) const DESCRIPTION: &str = "The implementation does not match the style-lines.";

pub(crate) const FIX_TITLE: &str = "Add expected name suffix";

const EXPLANATION: &str = "\
An interface can declare a naming convention with a naming-rule attribute:

    [FamilyName(\"Strategy\")]
    public interface IStrategy { }

Every class implementing that interface, directly or through another
interface or a base class, must end its name with the suffix. When a class
reaches several rule-bearing interfaces, the first one in declaration order
(depth-first through extended interfaces) decides.

`nomen fix` renames offending classes by appending the suffix, updating every
reference, comment mention and string-literal mention of the old name.";

pub(crate) fn code() -> DiagnosticCode {
    DiagnosticCode::new(Category::Naming, 1)
}

pub(crate) fn message(name: &str, suffix: &str) -> String {
    format!(
        "Type name '{name}' should end with '{suffix}' because it implements an interface expecting this suffix"
    )
}

/// Checks class names against the suffix their interfaces require.
pub struct SuffixConvention {
    config: NamingConfig,
}

impl SuffixConvention {
    /// Creates the rule with the given comparison settings.
    pub fn new(config: NamingConfig) -> Self {
        Self { config }
    }
}

impl LintRule for SuffixConvention {
    fn code(&self) -> DiagnosticCode {
        code()
    }

    fn name(&self) -> &str {
        "suffix-convention"
    }

    fn description(&self) -> &str {
        TITLE
    }

    fn explanation(&self) -> &str {
        EXPLANATION
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check_type(&self, ty: TypeId, graph: &dyn SymbolGraph, sink: &DiagnosticSink) {
        if let Some(violation) = analyze(graph, ty, &self.config) {
            sink.emit(violation.to_diagnostic(graph, self.default_severity()));
        }
    }
}
