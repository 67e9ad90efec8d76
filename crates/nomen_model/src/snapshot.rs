//! Loading a program from a JSON snapshot.
//!
//! A snapshot is what an external compiler frontend exports: the list of
//! source files, every interface and type with its spans and inheritance,
//! and the occurrences its reference resolver found. File contents are read
//! from disk, relative to the directory holding the project configuration.

use crate::error::ModelError;
use crate::graph::{GraphBuilder, InterfaceDecl, TypeDecl};
use crate::ids::SymbolId;
use crate::index::{MemoryReferenceIndex, Occurrence, OccurrenceCategory};
use crate::rule::RuleArgument;
use crate::symbol::TypeKind;
use crate::workspace::Workspace;
use nomen_common::Interner;
use nomen_source::{FileId, SourceDb, Span};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The deserialized snapshot document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgramSnapshot {
    /// Source files, indexed by position.
    pub files: Vec<PathBuf>,
    /// Interface declarations.
    #[serde(default)]
    pub interfaces: Vec<InterfaceEntry>,
    /// Type declarations.
    #[serde(default)]
    pub types: Vec<TypeEntry>,
    /// Occurrences found by the exporter's reference resolver.
    #[serde(default)]
    pub occurrences: Vec<OccurrenceEntry>,
}

/// One interface in a snapshot.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterfaceEntry {
    /// Unique key other entries refer to this interface by.
    pub key: String,
    /// Simple name.
    pub name: String,
    /// Enclosing namespace.
    #[serde(default)]
    pub scope: String,
    /// Index into `files`.
    pub file: u32,
    /// Byte range of the name token.
    pub name_span: [u32; 2],
    /// Keys of directly extended interfaces.
    #[serde(default)]
    pub extends: Vec<String>,
    /// The naming-rule attribute argument. Absent when the attribute is
    /// absent; `null` when the attribute is present without a usable value.
    #[serde(default, deserialize_with = "present")]
    pub naming_rule: Option<serde_json::Value>,
}

/// One type in a snapshot.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    /// Unique key other entries refer to this type by.
    pub key: String,
    /// Simple name.
    pub name: String,
    /// Enclosing namespace.
    #[serde(default)]
    pub scope: String,
    /// Declaration kind.
    #[serde(default = "default_kind")]
    pub kind: TypeKind,
    /// Index into `files`.
    pub file: u32,
    /// Byte range of the name token.
    pub name_span: [u32; 2],
    /// Byte range of the whole declaration.
    pub decl_span: [u32; 2],
    /// Key of the base class, if it is part of the program.
    #[serde(default)]
    pub base: Option<String>,
    /// Keys of directly implemented interfaces.
    #[serde(default)]
    pub implements: Vec<String>,
    /// Whether the declaration is generated code.
    #[serde(default)]
    pub generated: bool,
}

/// One occurrence in a snapshot.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OccurrenceEntry {
    /// Key of the mentioned symbol.
    pub symbol: String,
    /// Index into `files`.
    pub file: u32,
    /// Byte range of the mention.
    pub span: [u32; 2],
    /// What kind of text the mention sits in.
    pub category: OccurrenceCategory,
}

fn default_kind() -> TypeKind {
    TypeKind::Class
}

fn present<'de, D: Deserializer<'de>>(d: D) -> Result<Option<serde_json::Value>, D::Error> {
    serde_json::Value::deserialize(d).map(Some)
}

/// Parses snapshot JSON.
pub fn parse_snapshot(json: &str) -> Result<ProgramSnapshot, ModelError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads the snapshot at `path` and every file it lists, relative to
/// `project_dir`.
pub fn load_snapshot(project_dir: &Path, path: &Path) -> Result<Workspace, ModelError> {
    let json = std::fs::read_to_string(project_dir.join(path))?;
    let snapshot = parse_snapshot(&json)?;
    let mut sources = SourceDb::new();
    for file in &snapshot.files {
        let text = std::fs::read_to_string(project_dir.join(file))?;
        sources.add_source(file.clone(), text);
    }
    workspace_from_snapshot(snapshot, sources)
}

/// Builds revision 0 from a parsed snapshot and its already loaded files.
///
/// Every span is checked against its file. A declaration occurrence is added
/// for each symbol whose name token the exporter did not list.
pub fn workspace_from_snapshot(
    snapshot: ProgramSnapshot,
    sources: SourceDb,
) -> Result<Workspace, ModelError> {
    let spans = SpanChecker { sources: &sources };
    let mut builder = GraphBuilder::new(Arc::new(Interner::new()));
    let mut keys: HashMap<&str, SymbolId> = HashMap::new();
    let mut name_spans: Vec<(SymbolId, Span)> = Vec::new();

    for entry in &snapshot.interfaces {
        let name_span = spans.name(&entry.key, &entry.name, entry.file, entry.name_span)?;
        let id = builder.add_interface(InterfaceDecl {
            name: &entry.name,
            scope: &entry.scope,
            name_span,
            rule: entry.naming_rule.as_ref().map(RuleArgument::from_json),
        });
        if keys.insert(&entry.key, id.into()).is_some() {
            return Err(ModelError::DuplicateSymbol(entry.key.clone()));
        }
        name_spans.push((id.into(), name_span));
    }
    for entry in &snapshot.types {
        let name_span = spans.name(&entry.key, &entry.name, entry.file, entry.name_span)?;
        let decl_span = spans.check(&entry.key, entry.file, entry.decl_span)?;
        if !decl_span.contains(name_span) {
            return Err(invalid_span(&entry.key, entry.file, entry.decl_span));
        }
        let id = builder.add_type(TypeDecl {
            name: &entry.name,
            scope: &entry.scope,
            kind: entry.kind,
            name_span,
            decl_span,
            generated: entry.generated,
        });
        if keys.insert(&entry.key, id.into()).is_some() {
            return Err(ModelError::DuplicateSymbol(entry.key.clone()));
        }
        name_spans.push((id.into(), name_span));
    }

    let lookup = |key: &str| {
        keys.get(key)
            .copied()
            .ok_or_else(|| ModelError::UnknownSymbol(key.to_string()))
    };
    for entry in &snapshot.interfaces {
        let SymbolId::Interface(child) = lookup(entry.key.as_str())? else {
            continue;
        };
        for parent in &entry.extends {
            match lookup(parent.as_str())? {
                SymbolId::Interface(parent) => builder.add_extends(child, parent)?,
                SymbolId::Type(_) => return Err(ModelError::UnknownSymbol(parent.clone())),
            }
        }
    }
    for entry in &snapshot.types {
        let SymbolId::Type(ty) = lookup(entry.key.as_str())? else {
            continue;
        };
        for iface in &entry.implements {
            match lookup(iface.as_str())? {
                SymbolId::Interface(iface) => builder.add_implements(ty, iface)?,
                SymbolId::Type(_) => return Err(ModelError::UnknownSymbol(iface.clone())),
            }
        }
        if let Some(base) = &entry.base {
            match lookup(base.as_str())? {
                SymbolId::Type(base) => builder.set_base(ty, base)?,
                SymbolId::Interface(_) => return Err(ModelError::UnknownSymbol(base.clone())),
            }
        }
    }
    let graph = builder.build()?;

    let mut index = MemoryReferenceIndex::new();
    for entry in &snapshot.occurrences {
        let symbol = lookup(entry.symbol.as_str())?;
        let span = spans.check(&entry.symbol, entry.file, entry.span)?;
        index.insert(symbol, Occurrence::new(span, entry.category));
    }
    for (symbol, name_span) in name_spans {
        if !index.has_declaration(symbol) {
            index.insert(
                symbol,
                Occurrence::new(name_span, OccurrenceCategory::Declaration),
            );
        }
    }

    tracing::info!(
        files = sources.len(),
        interfaces = snapshot.interfaces.len(),
        types = snapshot.types.len(),
        occurrences = index.len(),
        "loaded program snapshot"
    );
    Ok(Workspace::new(sources, graph, index))
}

struct SpanChecker<'a> {
    sources: &'a SourceDb,
}

fn invalid_span(symbol: &str, file: u32, [start, end]: [u32; 2]) -> ModelError {
    ModelError::InvalidSpan {
        symbol: symbol.to_string(),
        file,
        start,
        end,
    }
}

impl SpanChecker<'_> {
    fn check(&self, symbol: &str, file: u32, range: [u32; 2]) -> Result<Span, ModelError> {
        let [start, end] = range;
        let source = self
            .sources
            .try_file(FileId::from_raw(file))
            .ok_or_else(|| invalid_span(symbol, file, range))?;
        if start > end || source.snippet(start, end).is_none() {
            return Err(invalid_span(symbol, file, range));
        }
        Ok(Span::new(source.id, start, end))
    }

    /// Like [`check`](Self::check), and the span's text must be exactly `name`.
    fn name(&self, symbol: &str, name: &str, file: u32, range: [u32; 2]) -> Result<Span, ModelError> {
        let span = self.check(symbol, file, range)?;
        if self.sources.snippet(span) != Some(name) {
            return Err(invalid_span(symbol, file, range));
        }
        Ok(span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SymbolGraph;

    const TEXT: &str = "interface IStrategy { }\nclass Bad : IStrategy { } // Bad\n";

    fn sources() -> SourceDb {
        let mut db = SourceDb::new();
        db.add_source("Strategies.cs", TEXT.to_string());
        db
    }

    const SNAPSHOT: &str = r#"{
        "files": ["Strategies.cs"],
        "interfaces": [
            {"key": "IStrategy", "name": "IStrategy", "scope": "Shop", "file": 0,
             "name_span": [10, 19], "naming_rule": "Strategy"}
        ],
        "types": [
            {"key": "Bad", "name": "Bad", "scope": "Shop", "file": 0,
             "name_span": [30, 33], "decl_span": [24, 49], "implements": ["IStrategy"]}
        ],
        "occurrences": [
            {"symbol": "Bad", "file": 0, "span": [53, 56], "category": "comment"}
        ]
    }"#;

    #[test]
    fn builds_graph_and_index() {
        let ws = workspace_from_snapshot(parse_snapshot(SNAPSHOT).unwrap(), sources()).unwrap();
        let g = ws.graph();
        let bad = g.type_named("Bad").unwrap();
        let iface = g.interface_named("IStrategy").unwrap();
        assert_eq!(g.attached_rule(iface).unwrap().suffix(), "Strategy");
        assert_eq!(g.all_interfaces(bad).len(), 1);
        let occs = ws.index().get(SymbolId::Type(bad));
        assert_eq!(occs.len(), 2);
        assert_eq!(occs[0].category, OccurrenceCategory::Declaration);
        for occ in occs {
            assert_eq!(ws.sources().snippet(occ.span), Some("Bad"));
        }
    }

    #[test]
    fn null_rule_is_present_but_invalid() {
        let json = SNAPSHOT.replace("\"Strategy\"", "null");
        let ws = workspace_from_snapshot(parse_snapshot(&json).unwrap(), sources()).unwrap();
        let iface = ws.graph().interface_named("IStrategy").unwrap();
        assert!(ws.graph().attached_rule(iface).is_none());
    }

    #[test]
    fn unknown_reference_rejected() {
        let json = SNAPSHOT.replace("\"implements\": [\"IStrategy\"]", "\"implements\": [\"IMissing\"]");
        let err = workspace_from_snapshot(parse_snapshot(&json).unwrap(), sources()).err().unwrap();
        assert!(matches!(err, ModelError::UnknownSymbol(key) if key == "IMissing"));
    }

    #[test]
    fn span_outside_file_rejected() {
        let json = SNAPSHOT.replace("[53, 56]", "[530, 560]");
        let err = workspace_from_snapshot(parse_snapshot(&json).unwrap(), sources()).err().unwrap();
        assert!(matches!(err, ModelError::InvalidSpan { start: 530, .. }));
    }

    #[test]
    fn name_span_must_cover_the_name() {
        let json = SNAPSHOT.replace("[30, 33]", "[24, 27]");
        let err = workspace_from_snapshot(parse_snapshot(&json).unwrap(), sources()).err().unwrap();
        assert!(matches!(err, ModelError::InvalidSpan { symbol, start: 24, .. } if symbol == "Bad"));

        let json = SNAPSHOT.replace("[10, 19]", "[0, 9]");
        let err = workspace_from_snapshot(parse_snapshot(&json).unwrap(), sources()).err().unwrap();
        assert!(matches!(err, ModelError::InvalidSpan { symbol, .. } if symbol == "IStrategy"));
    }

    #[test]
    fn declaration_must_contain_name() {
        let json = SNAPSHOT.replace("[24, 49]", "[34, 49]");
        let err = workspace_from_snapshot(parse_snapshot(&json).unwrap(), sources()).err().unwrap();
        assert!(matches!(err, ModelError::InvalidSpan { start: 34, end: 49, .. }));
    }

    #[test]
    fn duplicate_key_rejected() {
        let json = SNAPSHOT.replace("\"key\": \"Bad\"", "\"key\": \"IStrategy\"");
        let err = workspace_from_snapshot(parse_snapshot(&json).unwrap(), sources()).err().unwrap();
        assert!(matches!(err, ModelError::DuplicateSymbol(_)));
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(matches!(
            parse_snapshot(r#"{"files": [], "modules": []}"#),
            Err(ModelError::Json(_))
        ));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Strategies.cs"), TEXT).unwrap();
        std::fs::write(dir.path().join("program.json"), SNAPSHOT).unwrap();
        let ws = load_snapshot(dir.path(), Path::new("program.json")).unwrap();
        assert_eq!(ws.sources().len(), 1);
        assert_eq!(ws.revision(), 0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("program.json"), SNAPSHOT).unwrap();
        let err = load_snapshot(dir.path(), Path::new("program.json")).err().unwrap();
        assert!(matches!(err, ModelError::Io(_)));
    }
}
