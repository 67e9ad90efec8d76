//! Errors raised while building a program graph or applying edits to it.

use crate::ids::SymbolId;
use nomen_common::InternalError;
use nomen_source::FileId;
use std::path::PathBuf;

/// Errors from constructing a program graph (builder, snapshot, fixture).
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A snapshot or source file could not be read.
    #[error("failed to read program: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot JSON is malformed.
    #[error("failed to parse program snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// A reference names a symbol that was never declared.
    #[error("unknown symbol '{0}'")]
    UnknownSymbol(String),

    /// Two snapshot entries share the same key.
    #[error("duplicate symbol key '{0}'")]
    DuplicateSymbol(String),

    /// Interfaces or base classes inherit from themselves.
    #[error("cyclic inheritance through '{0}'")]
    CyclicInheritance(String),

    /// A span does not fit inside its file, or does not cover what it claims to.
    #[error("span {start}..{end} of '{symbol}' in file {file} is invalid")]
    InvalidSpan {
        /// The symbol the span belongs to.
        symbol: String,
        /// The file index the span refers to.
        file: u32,
        /// Span start.
        start: u32,
        /// Span end.
        end: u32,
    },
}

/// A failure of the reference index collaborator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum IndexError {
    /// The index could not answer right now; the request may be retried.
    #[error("reference index unavailable: {0}")]
    Unavailable(String),
}

/// Reasons an edit set cannot be applied to a workspace.
///
/// A failed apply leaves the workspace it was called on untouched.
#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    /// The edit set was computed against a different revision.
    #[error("edit set computed for revision {expected}, workspace is at revision {found}")]
    StaleRevision {
        /// The revision the edit set was computed against.
        expected: u64,
        /// The workspace's current revision.
        found: u64,
    },

    /// A file's text changed since the edit set was computed.
    #[error("'{}' changed since the rename was computed", path.display())]
    StaleFile {
        /// The changed file.
        path: PathBuf,
    },

    /// An edit refers to a file that does not exist.
    #[error("edit refers to unknown file {0:?}")]
    OutOfBounds(FileId),

    /// An edited range no longer holds the old name.
    #[error("expected '{expected}' at {}:{start}, found '{found}'", path.display())]
    TextMismatch {
        /// The file containing the range.
        path: PathBuf,
        /// Byte offset of the range.
        start: u32,
        /// The old name the range should hold.
        expected: String,
        /// What the range actually holds.
        found: String,
    },

    /// The rename target is not a symbol of this workspace.
    #[error("rename target {0} does not exist")]
    UnknownTarget(SymbolId),

    /// An invariant inside Nomen was broken.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::TypeId;

    #[test]
    fn stale_revision_message() {
        let err = ApplyError::StaleRevision {
            expected: 1,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "edit set computed for revision 1, workspace is at revision 2"
        );
    }

    #[test]
    fn text_mismatch_message() {
        let err = ApplyError::TextMismatch {
            path: PathBuf::from("Bad.cs"),
            start: 6,
            expected: "Bad".into(),
            found: "Bed".into(),
        };
        assert_eq!(err.to_string(), "expected 'Bad' at Bad.cs:6, found 'Bed'");
    }

    #[test]
    fn unknown_target_message() {
        let err = ApplyError::UnknownTarget(SymbolId::Type(TypeId::from_raw(4)));
        assert_eq!(err.to_string(), "rename target type#4 does not exist");
    }

    #[test]
    fn cyclic_message() {
        let err = ModelError::CyclicInheritance("Shop.IA".into());
        assert_eq!(err.to_string(), "cyclic inheritance through 'Shop.IA'");
    }
}
