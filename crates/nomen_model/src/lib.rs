//! The program model Nomen analyzes and rewrites.
//!
//! A [`Workspace`] is one immutable revision of a program: its source text
//! ([`SourceDb`](nomen_source::SourceDb)), its declarations
//! ([`ProgramGraph`], queried through the [`SymbolGraph`] trait), and a
//! [`ReferenceIndex`] of every place each symbol is mentioned. Renames are
//! planned as [`EditSet`]s and applied with [`Workspace::apply`], which
//! yields the next revision.
//!
//! Programs come from a JSON [`snapshot`] exported by a compiler frontend,
//! or, with the `fixture` feature, from a small C#-style snippet frontend
//! used in tests.

#![warn(missing_docs)]

pub mod arena;
pub mod edit;
pub mod error;
#[cfg(any(test, feature = "fixture"))]
pub mod fixture;
pub mod graph;
pub mod ids;
pub mod index;
pub mod rule;
pub mod snapshot;
pub mod symbol;
pub mod workspace;

pub use arena::{Arena, ArenaId};
pub use edit::{EditSet, FileEdit, RenameEdit};
pub use error::{ApplyError, IndexError, ModelError};
pub use graph::{GraphBuilder, InterfaceDecl, ProgramGraph, SymbolGraph, TypeDecl};
pub use ids::{InterfaceId, SymbolId, TypeId};
pub use index::{MemoryReferenceIndex, Occurrence, OccurrenceCategory, ReferenceIndex};
pub use rule::{EmptySuffix, NamingRule, RuleArgument};
pub use snapshot::{load_snapshot, parse_snapshot, workspace_from_snapshot, ProgramSnapshot};
pub use symbol::{InterfaceSymbol, TypeKind, TypeSymbol};
pub use workspace::{ProgramView, Workspace};
