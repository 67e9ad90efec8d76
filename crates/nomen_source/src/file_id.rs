//! Opaque identifier for files in a [`SourceDb`](crate::SourceDb).

use serde::{Deserialize, Serialize};

/// Opaque identifier for a source file.
///
/// `FileId`s are dense indices assigned in load order and stay stable across
/// revisions: applying an edit set rewrites a file's text but keeps its id.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct FileId(u32);

impl FileId {
    /// Placeholder for spans that don't belong to any file.
    pub const DUMMY: FileId = FileId(u32::MAX);

    /// Creates a `FileId` from a raw `u32` value.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw `u32` value of this `FileId`.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}
