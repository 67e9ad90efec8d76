//! The set of source files making up one revision of the analyzed program.

use crate::file_id::FileId;
use crate::resolved_span::ResolvedSpan;
use crate::source_file::SourceFile;
use crate::span::Span;
use std::path::PathBuf;
use std::sync::Arc;

/// Owns the text of every file in one program revision and resolves
/// [`Span`]s to line/column coordinates for diagnostics.
///
/// Files are shared behind `Arc`, so deriving the next revision with
/// [`with_file`](Self::with_file) only copies the files an edit touched.
#[derive(Clone, Default)]
pub struct SourceDb {
    files: Vec<Arc<SourceFile>>,
}

impl SourceDb {
    /// Creates an empty source database.
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Adds a source file from an in-memory string.
    ///
    /// The `name` is used as the file path in diagnostics.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files
            .push(Arc::new(SourceFile::new(id, name.into(), content)));
        id
    }

    /// Returns the [`SourceFile`] for the given [`FileId`].
    ///
    /// # Panics
    ///
    /// Panics if the `FileId` does not belong to this database.
    pub fn get_file(&self, id: FileId) -> &SourceFile {
        &self.files[id.as_raw() as usize]
    }

    /// Returns the [`SourceFile`] for the given [`FileId`], if it exists.
    pub fn try_file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.as_raw() as usize).map(|f| f.as_ref())
    }

    /// Iterates over all files in load order.
    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter().map(|f| f.as_ref())
    }

    /// Returns the number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if no files are loaded.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns a copy of this database with one file replaced by `file`.
    ///
    /// # Panics
    ///
    /// Panics if `file.id` does not belong to this database.
    pub fn with_file(&self, file: SourceFile) -> SourceDb {
        let mut files = self.files.clone();
        let idx = file.id.as_raw() as usize;
        files[idx] = Arc::new(file);
        SourceDb { files }
    }

    /// Resolves a [`Span`] to human-readable line/column coordinates.
    pub fn resolve_span(&self, span: Span) -> ResolvedSpan {
        let file = self.get_file(span.file);
        let (start_line, start_col) = file.line_col(span.start);
        let (end_line, end_col) = file.line_col(span.end.saturating_sub(1).max(span.start));
        ResolvedSpan {
            file_path: file.path.clone(),
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Returns the source text covered by a [`Span`], if the span is valid.
    pub fn snippet(&self, span: Span) -> Option<&str> {
        self.try_file(span.file)?.snippet(span.start, span.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_file::TextEdit;

    const STRATEGIES: &str = "[FamilyName(\"Strategy\")]\npublic interface IStrategy { }\n\npublic class Bad : IStrategy { }\n";

    #[test]
    fn add_and_get() {
        let mut db = SourceDb::new();
        let id = db.add_source("Strategies.cs", STRATEGIES.to_string());
        assert_eq!(db.get_file(id).content, STRATEGIES);
        assert_eq!(db.len(), 1);
    }

    #[test]
    fn resolve_name_token() {
        let mut db = SourceDb::new();
        let id = db.add_source("Strategies.cs", STRATEGIES.to_string());
        let start = STRATEGIES.find("Bad").unwrap() as u32;
        let resolved = db.resolve_span(Span::new(id, start, start + 3));
        assert_eq!(resolved.start_line, 4);
        assert_eq!(resolved.start_col, 14);
        assert_eq!(resolved.end_col, 16);
    }

    #[test]
    fn snippet_and_invalid_span() {
        let mut db = SourceDb::new();
        let id = db.add_source("a.cs", "class Bad { }".to_string());
        assert_eq!(db.snippet(Span::new(id, 6, 9)), Some("Bad"));
        assert_eq!(db.snippet(Span::new(FileId::from_raw(9), 0, 1)), None);
    }

    #[test]
    fn with_file_leaves_original_untouched() {
        let mut db = SourceDb::new();
        let id = db.add_source("a.cs", "class Bad { }".to_string());
        let next_file = db
            .get_file(id)
            .with_edits(&[TextEdit::new(6, 9, "BadStrategy")])
            .unwrap();
        let next = db.with_file(next_file);
        assert_eq!(db.get_file(id).content, "class Bad { }");
        assert_eq!(next.get_file(id).content, "class BadStrategy { }");
    }
}
