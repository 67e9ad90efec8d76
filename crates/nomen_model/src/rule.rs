//! Naming rules attached to interfaces.

use serde::{Deserialize, Serialize};

/// The decoded argument of a naming-rule attribute on an interface.
///
/// Frontends decode the raw attribute argument exactly once, while the
/// program graph is built, so analysis never inspects untyped argument
/// lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleArgument {
    /// The attribute carried a string argument (possibly empty).
    Valid(String),
    /// The attribute's argument was missing, `null`, or not a string.
    Invalid,
}

impl RuleArgument {
    /// Decodes a raw JSON attribute argument.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => RuleArgument::Valid(s.clone()),
            _ => RuleArgument::Invalid,
        }
    }
}

/// A naming rule: implementing types must end their name with `suffix`.
///
/// The suffix is never empty. An attribute with an empty or invalid argument
/// produces no `NamingRule` at all, and deserializing one from `""` fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NamingRule {
    suffix: String,
}

/// A naming rule was built from an empty suffix.
#[derive(Debug, thiserror::Error)]
#[error("naming rule suffix must not be empty")]
pub struct EmptySuffix;

impl TryFrom<String> for NamingRule {
    type Error = EmptySuffix;

    fn try_from(suffix: String) -> Result<Self, Self::Error> {
        NamingRule::from_argument(RuleArgument::Valid(suffix)).ok_or(EmptySuffix)
    }
}

impl From<NamingRule> for String {
    fn from(rule: NamingRule) -> String {
        rule.suffix
    }
}

impl NamingRule {
    /// Builds a rule from a decoded attribute argument.
    ///
    /// Returns `None` for [`RuleArgument::Invalid`] and for an empty suffix.
    pub fn from_argument(argument: RuleArgument) -> Option<NamingRule> {
        match argument {
            RuleArgument::Valid(suffix) if !suffix.is_empty() => Some(NamingRule { suffix }),
            _ => None,
        }
    }

    /// The required name suffix.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}
