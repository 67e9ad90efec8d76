//! How loudly a diagnostic is reported.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity, ordered from quietest to loudest.
///
/// NC001 reports at [`Warning`](Severity::Warning); a `deny` entry raises it
/// to [`Error`](Severity::Error), which makes `nomen check` exit non-zero.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only.
    Note,
    /// A naming convention is not followed.
    Warning,
    /// A denied rule fired.
    Error,
}

impl Severity {
    /// Returns `true` for [`Error`](Severity::Error).
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }

    fn as_str(self) -> &'static str {
        match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deny_is_louder_than_default() {
        assert!(Severity::Note < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(!Severity::Warning.is_error());
    }

    #[test]
    fn json_uses_display_name() {
        for s in [Severity::Note, Severity::Warning, Severity::Error] {
            assert_eq!(serde_json::to_string(&s).unwrap(), format!("\"{s}\""));
        }
    }
}
