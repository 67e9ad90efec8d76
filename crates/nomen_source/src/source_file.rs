//! Source file text with line-start indexing and edit splicing.

use crate::file_id::FileId;
use nomen_common::{ContentHash, InternalError, NomenResult};
use std::path::PathBuf;

/// A single in-file text replacement: bytes `[start, end)` become `new_text`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEdit {
    /// Byte offset of the first replaced byte.
    pub start: u32,
    /// Byte offset one past the last replaced byte.
    pub end: u32,
    /// Replacement text.
    pub new_text: String,
}

impl TextEdit {
    /// Creates a new text edit.
    pub fn new(start: u32, end: u32, new_text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            new_text: new_text.into(),
        }
    }

    /// The change in file length this edit causes.
    fn delta(&self) -> i64 {
        self.new_text.len() as i64 - (self.end - self.start) as i64
    }
}

/// A source file in one revision of the program.
///
/// Stores the text together with precomputed line starts for line/column
/// lookup and a content hash used to detect edits computed against older
/// text.
#[derive(Clone, Debug)]
pub struct SourceFile {
    /// The identifier of this file within its [`SourceDb`](crate::SourceDb).
    pub id: FileId,
    /// The path of this file (or a synthetic name for in-memory sources).
    pub path: PathBuf,
    /// The full text of the file.
    pub content: String,
    /// Byte offsets of each line start (the first entry is always 0).
    line_starts: Vec<u32>,
    /// Hash of `content`.
    pub content_hash: ContentHash,
}

impl SourceFile {
    /// Creates a new `SourceFile` with precomputed line starts and content hash.
    pub fn new(id: FileId, path: PathBuf, content: String) -> Self {
        let line_starts = compute_line_starts(&content);
        let content_hash = ContentHash::of_text(&content);
        Self {
            id,
            path,
            content,
            line_starts,
            content_hash,
        }
    }

    /// Converts a byte offset into 1-indexed (line, column) coordinates.
    pub fn line_col(&self, byte_offset: u32) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line = (line_idx as u32) + 1;
        let col = byte_offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// Returns the text between two byte offsets, or `None` if the range is
    /// out of bounds or splits a UTF-8 character.
    pub fn snippet(&self, start: u32, end: u32) -> Option<&str> {
        self.content.get(start as usize..end as usize)
    }

    /// Returns the full line containing `byte_offset`, without its newline.
    pub fn line_text(&self, byte_offset: u32) -> &str {
        let offset = (byte_offset as usize).min(self.content.len());
        let start = self.content[..offset].rfind('\n').map_or(0, |pos| pos + 1);
        let end = self.content[offset..]
            .find('\n')
            .map_or(self.content.len(), |pos| offset + pos);
        &self.content[start..end]
    }

    /// Produces the next revision of this file with `edits` spliced in.
    ///
    /// `edits` must be sorted by start offset and must not overlap; callers
    /// validate this before building an edit list, so a violation here is an
    /// internal error.
    pub fn with_edits(&self, edits: &[TextEdit]) -> NomenResult<SourceFile> {
        let mut out = String::with_capacity(self.content.len());
        let mut cursor = 0usize;
        for edit in edits {
            let (start, end) = (edit.start as usize, edit.end as usize);
            if start < cursor || end < start {
                return Err(InternalError::new(format!(
                    "unsorted or overlapping edit {start}..{end} in {}",
                    self.path.display()
                )));
            }
            let kept = self.content.get(cursor..start).ok_or_else(|| {
                InternalError::new(format!(
                    "edit {start}..{end} outside {}",
                    self.path.display()
                ))
            })?;
            out.push_str(kept);
            out.push_str(&edit.new_text);
            cursor = end;
        }
        let tail = self.content.get(cursor..).ok_or_else(|| {
            InternalError::new(format!("edit past end of {}", self.path.display()))
        })?;
        out.push_str(tail);
        Ok(SourceFile::new(self.id, self.path.clone(), out))
    }
}

/// Maps a byte offset in the old text to the corresponding offset after
/// `edits` (sorted, non-overlapping) are applied.
///
/// Only edits that end at or before `offset` move it, so a span that exactly
/// covers an edited range maps onto the replacement text, and a span that
/// encloses an edit grows or shrinks with it.
pub fn remap_offset(edits: &[TextEdit], offset: u32) -> u32 {
    let delta: i64 = edits
        .iter()
        .take_while(|e| e.start <= offset)
        .filter(|e| e.end <= offset)
        .map(TextEdit::delta)
        .sum();
    (offset as i64 + delta).max(0) as u32
}

/// Computes the byte offsets of each line start in the given content.
fn compute_line_starts(content: &str) -> Vec<u32> {
    let mut starts = vec![0u32];
    for (i, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            starts.push((i + 1) as u32);
        }
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_file(content: &str) -> SourceFile {
        SourceFile::new(
            FileId::from_raw(0),
            PathBuf::from("Strategies.cs"),
            content.to_string(),
        )
    }

    #[test]
    fn line_col_resolution() {
        let f = make_file("abc\ndef\nghi");
        assert_eq!(f.line_col(0), (1, 1));
        assert_eq!(f.line_col(4), (2, 1));
        assert_eq!(f.line_col(5), (2, 2));
        assert_eq!(f.line_col(8), (3, 1));
    }

    #[test]
    fn snippet_bounds() {
        let f = make_file("class Bad { }");
        assert_eq!(f.snippet(6, 9), Some("Bad"));
        assert_eq!(f.snippet(6, 99), None);
    }

    #[test]
    fn line_text_extracts_line() {
        let f = make_file("namespace Shop;\npublic class Bad : IStrategy { }\n");
        assert_eq!(f.line_text(29), "public class Bad : IStrategy { }");
    }

    #[test]
    fn with_edits_splices_text() {
        let f = make_file("class Bad : IStrategy { } // Bad");
        let edits = vec![
            TextEdit::new(6, 9, "BadStrategy"),
            TextEdit::new(29, 32, "BadStrategy"),
        ];
        let next = f.with_edits(&edits).unwrap();
        assert_eq!(
            next.content,
            "class BadStrategy : IStrategy { } // BadStrategy"
        );
        assert_ne!(next.content_hash, f.content_hash);
        assert_eq!(next.id, f.id);
    }

    #[test]
    fn with_edits_rejects_overlap() {
        let f = make_file("class Bad { }");
        let edits = vec![TextEdit::new(6, 9, "X"), TextEdit::new(7, 8, "Y")];
        assert!(f.with_edits(&edits).is_err());
    }

    #[test]
    fn with_edits_rejects_out_of_bounds() {
        let f = make_file("class Bad { }");
        assert!(f.with_edits(&[TextEdit::new(40, 43, "X")]).is_err());
    }

    #[test]
    fn remap_offsets_around_edits() {
        // "Bad" at 6..9 becomes "BadStrategy" (+8)
        let edits = vec![TextEdit::new(6, 9, "BadStrategy")];
        assert_eq!(remap_offset(&edits, 0), 0);
        assert_eq!(remap_offset(&edits, 6), 6);
        assert_eq!(remap_offset(&edits, 9), 17);
        assert_eq!(remap_offset(&edits, 20), 28);
    }

    #[test]
    fn content_hash_computed() {
        let f = make_file("test content");
        assert_eq!(f.content_hash, ContentHash::of_text("test content"));
    }
}
