//! Source files, byte spans, and line/column resolution.
//!
//! [`SourceDb`] owns the text of every file in the analyzed program. Symbols,
//! occurrences, and diagnostics point into it with [`Span`]s, and the rename
//! pipeline produces a new `SourceDb` revision by splicing replacement text
//! into the affected [`SourceFile`]s.

#![warn(missing_docs)]

pub mod file_id;
pub mod resolved_span;
pub mod source_db;
pub mod source_file;
pub mod span;

pub use file_id::FileId;
pub use resolved_span::ResolvedSpan;
pub use source_db::SourceDb;
pub use source_file::{remap_offset, SourceFile, TextEdit};
pub use span::Span;
