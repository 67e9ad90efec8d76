//! Edit sets: the planned text changes of one rename.

use crate::ids::TypeId;
use crate::index::OccurrenceCategory;
use nomen_common::ContentHash;
use nomen_source::{FileId, Span, TextEdit};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One range to overwrite with the new name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameEdit {
    /// The range holding the old name.
    pub span: Span,
    /// The kind of occurrence the range came from.
    pub category: OccurrenceCategory,
}

/// All edits of a rename that fall in one file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEdit {
    /// The edited file.
    pub file: FileId,
    /// Its path, for reporting.
    pub path: PathBuf,
    /// Hash of the text the edits were computed against.
    pub base_hash: ContentHash,
    /// Edits sorted by start offset, pairwise non-overlapping.
    pub edits: Vec<RenameEdit>,
}

impl FileEdit {
    /// The edits as plain text replacements with `new_name`.
    pub fn text_edits(&self, new_name: &str) -> Vec<TextEdit> {
        self.edits
            .iter()
            .map(|e| TextEdit::new(e.span.start, e.span.end, new_name))
            .collect()
    }
}

/// A whole-program rename, applied atomically or not at all.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSet {
    /// The renamed type.
    pub target: TypeId,
    /// The name being replaced.
    pub old_name: String,
    /// The replacement name.
    pub new_name: String,
    /// The workspace revision the edits were computed against.
    pub base_revision: u64,
    /// Per-file edits, sorted by file.
    pub files: Vec<FileEdit>,
}

impl EditSet {
    /// Total number of edited ranges.
    pub fn edit_count(&self) -> usize {
        self.files.iter().map(|f| f.edits.len()).sum()
    }

    /// Number of edited ranges of one category.
    pub fn count_of(&self, category: OccurrenceCategory) -> usize {
        self.files
            .iter()
            .flat_map(|f| &f.edits)
            .filter(|e| e.category == category)
            .count()
    }

    /// Every edited span, in file then offset order.
    pub fn spans(&self) -> impl Iterator<Item = Span> + '_ {
        self.files.iter().flat_map(|f| f.edits.iter().map(|e| e.span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EditSet {
        let file = FileId::from_raw(0);
        EditSet {
            target: TypeId::from_raw(0),
            old_name: "Bad".into(),
            new_name: "BadStrategy".into(),
            base_revision: 0,
            files: vec![FileEdit {
                file,
                path: PathBuf::from("Bad.cs"),
                base_hash: ContentHash::of_text("class Bad { } // Bad"),
                edits: vec![
                    RenameEdit {
                        span: Span::new(file, 6, 9),
                        category: OccurrenceCategory::Declaration,
                    },
                    RenameEdit {
                        span: Span::new(file, 17, 20),
                        category: OccurrenceCategory::Comment,
                    },
                ],
            }],
        }
    }

    #[test]
    fn counts() {
        let set = sample();
        assert_eq!(set.edit_count(), 2);
        assert_eq!(set.count_of(OccurrenceCategory::Comment), 1);
        assert_eq!(set.count_of(OccurrenceCategory::Usage), 0);
        assert_eq!(set.spans().count(), 2);
    }

    #[test]
    fn text_edits_use_new_name() {
        let set = sample();
        let edits = set.files[0].text_edits(&set.new_name);
        assert_eq!(edits[1], TextEdit::new(17, 20, "BadStrategy"));
    }
}
