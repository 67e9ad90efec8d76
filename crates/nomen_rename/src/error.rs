//! Rename failures.

use nomen_model::{ApplyError, IndexError, SymbolId, TypeId};

/// Why a fix could not be computed. No edit set exists when any of these is
/// returned.
#[derive(Debug, thiserror::Error)]
pub enum RenameError {
    /// The violation no longer points at the type it was reported for.
    #[error("invalid rename target: {0}")]
    InvalidTarget(String),

    /// The new name already belongs to another symbol in the same scope.
    #[error("cannot rename '{old_name}' to '{new_name}': {existing} already has that name")]
    NameCollision {
        /// The current name.
        old_name: String,
        /// The name the fix wanted.
        new_name: String,
        /// The symbol already using `new_name`.
        existing: SymbolId,
    },

    /// The reference index failed; retrying may succeed.
    #[error(transparent)]
    ReferenceIndexUnavailable(#[from] IndexError),

    /// The reference index returned occurrences that cannot all be rewritten.
    #[error("reference index is inconsistent: {0}")]
    InconsistentIndex(String),

    /// Another rename of the same type is in progress.
    #[error("a rename of {0} is already in progress")]
    TargetBusy(TypeId),

    /// The request was cancelled before an edit set was produced.
    #[error("rename cancelled")]
    Cancelled,
}

impl RenameError {
    /// Returns `true` if the same request may succeed when retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RenameError::ReferenceIndexUnavailable(_) | RenameError::TargetBusy(_)
        )
    }
}

/// A failed step of [`fix_all`](crate::fix_all).
#[derive(Debug, thiserror::Error)]
pub enum FixError {
    /// Computing the edit set failed.
    #[error(transparent)]
    Rename(#[from] RenameError),
    /// Applying the edit set failed.
    #[error(transparent)]
    Apply(#[from] ApplyError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use nomen_model::InterfaceId;

    #[test]
    fn retryable_errors() {
        assert!(RenameError::ReferenceIndexUnavailable(IndexError::Unavailable("down".into()))
            .is_retryable());
        assert!(RenameError::TargetBusy(TypeId::from_raw(0)).is_retryable());
        assert!(!RenameError::Cancelled.is_retryable());
        assert!(!RenameError::InvalidTarget("gone".into()).is_retryable());
    }

    #[test]
    fn collision_message() {
        let err = RenameError::NameCollision {
            old_name: "Bad".into(),
            new_name: "BadStrategy".into(),
            existing: SymbolId::Interface(InterfaceId::from_raw(2)),
        };
        assert_eq!(
            err.to_string(),
            "cannot rename 'Bad' to 'BadStrategy': interface#2 already has that name"
        );
    }
}
