//! Program revisions and atomic application of edit sets.

use crate::edit::EditSet;
use crate::error::ApplyError;
use crate::graph::{ProgramGraph, SymbolGraph};
use crate::ids::SymbolId;
use crate::index::{MemoryReferenceIndex, ReferenceIndex};
use nomen_source::SourceDb;
use std::collections::HashMap;
use std::sync::Arc;

/// A borrowed, read-only view of one program revision.
///
/// This is everything analysis and rename planning may look at.
#[derive(Clone, Copy)]
pub struct ProgramView<'a> {
    /// The revision number the view was taken at.
    pub revision: u64,
    /// The declarations.
    pub graph: &'a dyn SymbolGraph,
    /// The reference index.
    pub index: &'a dyn ReferenceIndex,
    /// The source text.
    pub sources: &'a SourceDb,
}

/// One immutable revision of an analyzed program.
///
/// Revisions are never modified in place. [`Workspace::apply`] returns the
/// next revision and leaves `self` untouched, so readers holding an older
/// revision keep a consistent picture.
#[derive(Clone)]
pub struct Workspace {
    revision: u64,
    sources: SourceDb,
    graph: Arc<ProgramGraph>,
    index: Arc<MemoryReferenceIndex>,
}

impl Workspace {
    /// Creates revision 0 of a program.
    pub fn new(sources: SourceDb, graph: ProgramGraph, index: MemoryReferenceIndex) -> Self {
        Self {
            revision: 0,
            sources,
            graph: Arc::new(graph),
            index: Arc::new(index),
        }
    }

    /// This revision's number. Every successful apply increments it.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The source text of this revision.
    pub fn sources(&self) -> &SourceDb {
        &self.sources
    }

    /// The declarations of this revision.
    pub fn graph(&self) -> &ProgramGraph {
        &self.graph
    }

    /// The reference index of this revision.
    pub fn index(&self) -> &MemoryReferenceIndex {
        &self.index
    }

    /// Borrows this revision as a [`ProgramView`].
    pub fn view(&self) -> ProgramView<'_> {
        ProgramView {
            revision: self.revision,
            graph: self.graph.as_ref(),
            index: self.index.as_ref(),
            sources: &self.sources,
        }
    }

    /// Applies a rename, producing the next revision.
    ///
    /// Every file is checked before any text is produced: the revision must
    /// match, each file must still hash to the edit set's base hash, and each
    /// edited range must still hold the old name. On any failure no revision
    /// is produced.
    pub fn apply(&self, set: &EditSet) -> Result<Workspace, ApplyError> {
        if set.base_revision != self.revision {
            return Err(ApplyError::StaleRevision {
                expected: set.base_revision,
                found: self.revision,
            });
        }
        if self.graph.type_symbol(set.target).is_none() {
            return Err(ApplyError::UnknownTarget(SymbolId::Type(set.target)));
        }

        for file_edit in &set.files {
            let file = self
                .sources
                .try_file(file_edit.file)
                .ok_or(ApplyError::OutOfBounds(file_edit.file))?;
            if file.content_hash != file_edit.base_hash {
                return Err(ApplyError::StaleFile {
                    path: file.path.clone(),
                });
            }
            for edit in &file_edit.edits {
                let found = file.snippet(edit.span.start, edit.span.end);
                if found != Some(set.old_name.as_str()) {
                    return Err(ApplyError::TextMismatch {
                        path: file.path.clone(),
                        start: edit.span.start,
                        expected: set.old_name.clone(),
                        found: found.unwrap_or_default().to_string(),
                    });
                }
            }
        }

        let mut sources = self.sources.clone();
        let mut by_file = HashMap::new();
        for file_edit in &set.files {
            let text_edits = file_edit.text_edits(&set.new_name);
            let next = sources.get_file(file_edit.file).with_edits(&text_edits)?;
            sources = sources.with_file(next);
            by_file.insert(file_edit.file, text_edits);
        }
        let graph = self.graph.renamed_type(set.target, &set.new_name, &by_file);
        let index = self.index.remapped(&by_file);

        tracing::info!(
            from = %set.old_name,
            to = %set.new_name,
            files = set.files.len(),
            edits = set.edit_count(),
            revision = self.revision + 1,
            "applied rename"
        );
        Ok(Workspace {
            revision: self.revision + 1,
            sources,
            graph: Arc::new(graph),
            index: Arc::new(index),
        })
    }
}
