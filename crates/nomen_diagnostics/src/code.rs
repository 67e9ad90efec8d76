//! Stable diagnostic identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The family a diagnostic code belongs to, determining its prefix.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Naming-convention diagnostics, prefixed with `NC`.
    Naming,
}

impl Category {
    /// Returns the prefix for this category.
    pub fn prefix(self) -> &'static str {
        match self {
            Category::Naming => "NC",
        }
    }
}

/// A stable diagnostic identifier such as `NC001`.
///
/// Hosts match on the rendered string, so the display format (prefix plus a
/// zero-padded 3-digit number) must never change for an existing rule.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

impl FromStr for DiagnosticCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix(Category::Naming.prefix())
            .ok_or_else(|| format!("unknown diagnostic code '{s}'"))?;
        let number = digits
            .parse::<u16>()
            .map_err(|_| format!("unknown diagnostic code '{s}'"))?;
        Ok(DiagnosticCode::new(Category::Naming, number))
    }
}
