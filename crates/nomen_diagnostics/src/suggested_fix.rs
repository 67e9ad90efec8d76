//! Code actions offered alongside diagnostics.

use serde::{Deserialize, Serialize};

/// A fix a host can request for a diagnostic.
///
/// The action carries no text edits. A rename has to touch every reference,
/// comment, and string mention at once, so the edit set is computed on
/// request from the diagnostic property named by `property`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedFix {
    /// Title shown in code-action menus.
    pub message: String,
    /// The diagnostic property the fix provider reads its input from.
    pub property: String,
}

impl SuggestedFix {
    /// Creates an action titled `message` that is computed from `property`.
    pub fn on_request(message: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            property: property.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_serializes_without_edits() {
        let fix = SuggestedFix::on_request("Add expected name suffix", "suffix");
        let json = serde_json::to_value(&fix).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "message": "Add expected name suffix", "property": "suffix" })
        );
    }
}
