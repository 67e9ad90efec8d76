//! The reference index: where in the program each symbol is mentioned.

use crate::error::IndexError;
use crate::ids::SymbolId;
use async_trait::async_trait;
use nomen_source::{remap_offset, FileId, Span, TextEdit};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What kind of text an occurrence sits in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OccurrenceCategory {
    /// The name token of the symbol's own declaration.
    Declaration,
    /// A code reference resolved to the symbol.
    Usage,
    /// A whole-word mention inside a comment.
    Comment,
    /// A whole-word mention inside a string literal.
    StringLiteral,
}

/// One mention of a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Occurrence {
    /// The exact range holding the symbol's name.
    pub span: Span,
    /// Where the mention sits.
    pub category: OccurrenceCategory,
}

impl Occurrence {
    /// Creates an occurrence.
    pub fn new(span: Span, category: OccurrenceCategory) -> Self {
        Self { span, category }
    }
}

/// Answers "where is this symbol mentioned?" for one program revision.
///
/// Implementations may be backed by a slow or remote service, so the query
/// is asynchronous and may fail with [`IndexError::Unavailable`].
#[async_trait]
pub trait ReferenceIndex: Send + Sync {
    /// Every occurrence of `symbol` across all files.
    async fn occurrences_of(&self, symbol: SymbolId) -> Result<Vec<Occurrence>, IndexError>;
}

/// A reference index held entirely in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryReferenceIndex {
    occurrences: HashMap<SymbolId, Vec<Occurrence>>,
}

impl MemoryReferenceIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence. Duplicates are ignored.
    pub fn insert(&mut self, symbol: SymbolId, occurrence: Occurrence) {
        let list = self.occurrences.entry(symbol).or_default();
        if let Err(pos) = list.binary_search(&occurrence) {
            list.insert(pos, occurrence);
        }
    }

    /// The occurrences recorded for `symbol`, sorted by span.
    pub fn get(&self, symbol: SymbolId) -> &[Occurrence] {
        self.occurrences.get(&symbol).map_or(&[], Vec::as_slice)
    }

    /// Returns `true` if `symbol` has a declaration occurrence.
    pub fn has_declaration(&self, symbol: SymbolId) -> bool {
        self.get(symbol)
            .iter()
            .any(|o| o.category == OccurrenceCategory::Declaration)
    }

    /// Total number of recorded occurrences.
    pub fn len(&self) -> usize {
        self.occurrences.values().map(Vec::len).sum()
    }

    /// Returns `true` if nothing is recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The index after the given text edits, with every span shifted.
    pub fn remapped(&self, edits: &HashMap<FileId, Vec<TextEdit>>) -> MemoryReferenceIndex {
        let occurrences = self
            .occurrences
            .iter()
            .map(|(&symbol, list)| {
                let moved = list
                    .iter()
                    .map(|o| match edits.get(&o.span.file) {
                        Some(file_edits) => Occurrence::new(
                            Span::new(
                                o.span.file,
                                remap_offset(file_edits, o.span.start),
                                remap_offset(file_edits, o.span.end),
                            ),
                            o.category,
                        ),
                        None => *o,
                    })
                    .collect();
                (symbol, moved)
            })
            .collect();
        MemoryReferenceIndex { occurrences }
    }
}

#[async_trait]
impl ReferenceIndex for MemoryReferenceIndex {
    async fn occurrences_of(&self, symbol: SymbolId) -> Result<Vec<Occurrence>, IndexError> {
        Ok(self.get(symbol).to_vec())
    }
}
