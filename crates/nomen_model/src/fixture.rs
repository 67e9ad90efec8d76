//! A small frontend for C#-style source snippets.
//!
//! It understands just enough of the language to build a [`Workspace`]:
//! namespaces, interface and type declarations with their base lists,
//! naming-rule attributes, comments, and string literals. Identifier
//! references are resolved by simple name, preferring a declaration in the
//! same file. It is meant for tests and small demos; real programs are
//! loaded from a [snapshot](crate::snapshot).

use crate::error::ModelError;
use crate::graph::{GraphBuilder, InterfaceDecl, TypeDecl};
use crate::ids::SymbolId;
use crate::index::{MemoryReferenceIndex, Occurrence, OccurrenceCategory};
use crate::rule::RuleArgument;
use crate::symbol::TypeKind;
use crate::workspace::Workspace;
use nomen_common::Interner;
use nomen_source::{FileId, SourceDb, Span};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

const RULE_ATTRIBUTES: &[&str] = &[
    "FamilyName",
    "FamilyNameAttribute",
    "NamingConvention",
    "NamingConventionAttribute",
];

const GENERATED_ATTRIBUTES: &[&str] = &[
    "GeneratedCode",
    "GeneratedCodeAttribute",
    "CompilerGenerated",
    "CompilerGeneratedAttribute",
];

const GENERATED_SUFFIXES: &[&str] = &[".g.cs", ".generated.cs", ".designer.cs"];

/// Builds a workspace from a single file named `Program.cs`.
pub fn single(text: &str) -> Result<Workspace, ModelError> {
    load([("Program.cs", text)])
}

/// Builds a workspace from `(path, text)` pairs.
pub fn load<I, P, S>(files: I) -> Result<Workspace, ModelError>
where
    I: IntoIterator<Item = (P, S)>,
    P: Into<PathBuf>,
    S: Into<String>,
{
    let mut sources = SourceDb::new();
    for (path, text) in files {
        sources.add_source(path, text.into());
    }
    from_sources(sources)
}

/// Builds a workspace from already loaded source files.
pub fn from_sources(sources: SourceDb) -> Result<Workspace, ModelError> {
    let mut parsed = Vec::new();
    for file in sources.files() {
        let generated_file = {
            let path = file.path.to_string_lossy().to_ascii_lowercase();
            GENERATED_SUFFIXES.iter().any(|s| path.ends_with(s))
        };
        let tokens = lex(&file.content);
        let decls = parse(file.id, &file.content, &tokens, generated_file);
        parsed.push((file.id, tokens, decls));
    }

    let interner = Arc::new(Interner::new());
    let mut builder = GraphBuilder::new(interner);
    let mut symbols: Vec<(SymbolId, &Decl)> = Vec::new();
    for (_, _, decls) in &parsed {
        for decl in decls.iter().filter(|d| d.kind.is_none()) {
            let id = builder.add_interface(InterfaceDecl {
                name: &decl.name,
                scope: &decl.scope,
                name_span: decl.name_span,
                rule: decl.rule.clone(),
            });
            symbols.push((id.into(), decl));
        }
    }
    for (_, _, decls) in &parsed {
        for decl in decls {
            if let Some(kind) = decl.kind {
                let id = builder.add_type(TypeDecl {
                    name: &decl.name,
                    scope: &decl.scope,
                    kind,
                    name_span: decl.name_span,
                    decl_span: decl.decl_span,
                    generated: decl.generated,
                });
                symbols.push((id.into(), decl));
            }
        }
    }

    let names = NameTable::new(&symbols);
    for &(id, decl) in &symbols {
        for base in &decl.bases {
            let Some(target) = names.resolve(base, decl.name_span.file) else {
                continue;
            };
            match (id, target) {
                (SymbolId::Interface(child), SymbolId::Interface(parent)) => {
                    builder.add_extends(child, parent)?
                }
                (SymbolId::Type(ty), SymbolId::Interface(iface)) => builder.add_implements(ty, iface)?,
                (SymbolId::Type(ty), SymbolId::Type(base)) if decl.kind == Some(TypeKind::Class) => {
                    builder.set_base(ty, base)?
                }
                _ => {}
            }
        }
    }
    let graph = builder.build()?;

    let declarations: HashMap<Span, SymbolId> = symbols
        .iter()
        .map(|&(id, decl)| (decl.name_span, id))
        .collect();
    let mut index = MemoryReferenceIndex::new();
    for (file_id, tokens, _) in &parsed {
        let text = &sources.get_file(*file_id).content;
        for tok in tokens {
            let span = Span::new(*file_id, tok.start, tok.end);
            let slice = &text[tok.start as usize..tok.end as usize];
            match tok.kind {
                TokKind::Ident => {
                    if let Some(&id) = declarations.get(&span) {
                        index.insert(id, Occurrence::new(span, OccurrenceCategory::Declaration));
                    } else if let Some(id) = names.resolve(slice, *file_id) {
                        index.insert(id, Occurrence::new(span, OccurrenceCategory::Usage));
                    }
                }
                TokKind::Comment | TokKind::Str => {
                    let category = if tok.kind == TokKind::Comment {
                        OccurrenceCategory::Comment
                    } else {
                        OccurrenceCategory::StringLiteral
                    };
                    for name in names.names() {
                        for start in whole_word_matches(slice, name) {
                            let begin = tok.start + start as u32;
                            let found = Span::new(*file_id, begin, begin + name.len() as u32);
                            if let Some(id) = names.resolve(name, *file_id) {
                                index.insert(id, Occurrence::new(found, category));
                            }
                        }
                    }
                }
                TokKind::Punct(_) | TokKind::Other => {}
            }
        }
    }

    tracing::debug!(
        files = sources.len(),
        symbols = symbols.len(),
        occurrences = index.len(),
        "loaded fixture program"
    );
    Ok(Workspace::new(sources, graph, index))
}

/// Simple-name lookup over every declared symbol.
struct NameTable<'a> {
    by_name: HashMap<&'a str, Vec<(SymbolId, FileId)>>,
}

impl<'a> NameTable<'a> {
    fn new(symbols: &[(SymbolId, &'a Decl)]) -> Self {
        let mut by_name: HashMap<&'a str, Vec<(SymbolId, FileId)>> = HashMap::new();
        for &(id, decl) in symbols {
            by_name
                .entry(decl.name.as_str())
                .or_default()
                .push((id, decl.name_span.file));
        }
        Self { by_name }
    }

    fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.by_name.keys().copied()
    }

    /// A qualified name resolves through its last segment.
    fn resolve(&self, name: &str, from: FileId) -> Option<SymbolId> {
        let simple = name.rsplit('.').next().unwrap_or(name);
        let candidates = self.by_name.get(simple)?;
        candidates
            .iter()
            .find(|(_, file)| *file == from)
            .or_else(|| candidates.first())
            .map(|(id, _)| *id)
    }
}

fn whole_word_matches<'t>(text: &'t str, word: &'t str) -> impl Iterator<Item = usize> + 't {
    text.match_indices(word).filter_map(move |(pos, _)| {
        let before = text[..pos].chars().next_back();
        let after = text[pos + word.len()..].chars().next();
        let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
        (!is_word(before) && !is_word(after)).then_some(pos)
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TokKind {
    Ident,
    Punct(u8),
    /// String literal; the token covers the contents between the quotes.
    Str,
    Comment,
    Other,
}

#[derive(Clone, Copy, Debug)]
struct Tok {
    kind: TokKind,
    start: u32,
    end: u32,
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

fn lex(text: &str) -> Vec<Tok> {
    let b = text.as_bytes();
    let mut toks = Vec::new();
    let mut i = 0;
    let tok = |kind, start: usize, end: usize| Tok {
        kind,
        start: start as u32,
        end: end as u32,
    };
    while i < b.len() {
        let c = b[i];
        let next = b.get(i + 1).copied();
        if c.is_ascii_whitespace() {
            i += 1;
        } else if c == b'/' && next == Some(b'/') {
            let end = text[i..].find('\n').map_or(b.len(), |p| i + p);
            toks.push(tok(TokKind::Comment, i, end));
            i = end;
        } else if c == b'/' && next == Some(b'*') {
            let end = text[i + 2..].find("*/").map_or(b.len(), |p| i + 2 + p + 2);
            toks.push(tok(TokKind::Comment, i, end));
            i = end;
        } else if let Some((quote, verbatim)) = string_start(b, i) {
            let mut j = quote + 1;
            while j < b.len() {
                if b[j] == b'\\' && !verbatim {
                    j += 2;
                } else if b[j] == b'"' {
                    if verbatim && b.get(j + 1) == Some(&b'"') {
                        j += 2;
                    } else {
                        break;
                    }
                } else {
                    j += 1;
                }
            }
            let end = j.min(b.len());
            toks.push(tok(TokKind::Str, quote + 1, end));
            i = end + 1;
        } else if c == b'\'' {
            let mut j = i + 1;
            while j < b.len() && b[j] != b'\'' && b[j] != b'\n' {
                j += if b[j] == b'\\' { 2 } else { 1 };
            }
            let end = (j + 1).min(b.len());
            toks.push(tok(TokKind::Other, i, end));
            i = end;
        } else if c.is_ascii_digit() {
            let start = i;
            while i < b.len() && (is_ident_byte(b[i]) || b[i] == b'.') {
                i += 1;
            }
            toks.push(tok(TokKind::Other, start, i));
        } else if is_ident_byte(c) {
            let start = i;
            while i < b.len() && is_ident_byte(b[i]) {
                i += 1;
            }
            toks.push(tok(TokKind::Ident, start, i));
        } else {
            toks.push(tok(TokKind::Punct(c), i, i + 1));
            i += 1;
        }
    }
    toks
}

/// Recognizes `"`, `@"`, `$"`, `$@"` and `@$"`, returning the quote position
/// and whether the literal is verbatim.
fn string_start(b: &[u8], i: usize) -> Option<(usize, bool)> {
    let mut j = i;
    let mut verbatim = false;
    while j < b.len() && j < i + 2 && (b[j] == b'@' || b[j] == b'$') {
        verbatim |= b[j] == b'@';
        j += 1;
    }
    (b.get(j) == Some(&b'"')).then_some((j, verbatim))
}

/// A parsed declaration. `kind` is `None` for interfaces.
#[derive(Debug)]
struct Decl {
    kind: Option<TypeKind>,
    name: String,
    scope: String,
    name_span: Span,
    decl_span: Span,
    bases: Vec<String>,
    rule: Option<RuleArgument>,
    generated: bool,
}

fn parse(file: FileId, text: &str, tokens: &[Tok], generated_file: bool) -> Vec<Decl> {
    let code: Vec<Tok> = tokens
        .iter()
        .copied()
        .filter(|t| t.kind != TokKind::Comment)
        .collect();
    let slice = |t: &Tok| &text[t.start as usize..t.end as usize];
    let is_ident = |idx: usize, word: &str| {
        code.get(idx)
            .is_some_and(|t| t.kind == TokKind::Ident && slice(t) == word)
    };
    let is_punct = |idx: usize, p: u8| code.get(idx).is_some_and(|t| t.kind == TokKind::Punct(p));

    let mut decls = Vec::new();
    let mut namespaces: Vec<(String, Option<usize>)> = Vec::new();
    let mut depth = 0usize;
    let mut pending_rule: Option<RuleArgument> = None;
    let mut pending_generated = false;
    let mut i = 0;

    while i < code.len() {
        let t = code[i];
        match t.kind {
            TokKind::Punct(b'{') => {
                depth += 1;
                pending_rule = None;
                pending_generated = false;
                i += 1;
            }
            TokKind::Punct(b'}') => {
                depth = depth.saturating_sub(1);
                if namespaces.last().is_some_and(|(_, d)| *d == Some(depth)) {
                    namespaces.pop();
                }
                pending_rule = None;
                pending_generated = false;
                i += 1;
            }
            TokKind::Punct(b';') => {
                pending_rule = None;
                pending_generated = false;
                i += 1;
            }
            TokKind::Punct(b'[') => {
                let (next, attrs) = parse_attributes(&code, text, i);
                for (name, argument) in attrs {
                    if RULE_ATTRIBUTES.contains(&name.as_str()) {
                        pending_rule = Some(argument);
                    } else if GENERATED_ATTRIBUTES.contains(&name.as_str()) {
                        pending_generated = true;
                    }
                }
                i = next;
            }
            TokKind::Ident if slice(&t) == "namespace" => {
                let (next, name) = dotted_name(&code, text, i + 1);
                if is_punct(next, b'{') {
                    namespaces.push((name, Some(depth)));
                    depth += 1;
                    i = next + 1;
                } else {
                    namespaces.push((name, None));
                    i = next;
                }
            }
            TokKind::Ident => {
                let keyword = slice(&t);
                let mut name_idx = i + 1;
                let kind = match keyword {
                    "interface" => None,
                    "class" => Some(TypeKind::Class),
                    "struct" => Some(TypeKind::Struct),
                    "enum" => Some(TypeKind::Enum),
                    "record" => {
                        if is_ident(name_idx, "class") || is_ident(name_idx, "struct") {
                            name_idx += 1;
                        }
                        Some(TypeKind::Record)
                    }
                    _ => {
                        i += 1;
                        continue;
                    }
                };
                let Some(name_tok) = code.get(name_idx).filter(|n| n.kind == TokKind::Ident) else {
                    i += 1;
                    continue;
                };
                let mut j = skip_generics(&code, name_idx + 1);
                if is_punct(j, b'(') {
                    j = skip_balanced(&code, j, b'(', b')');
                }
                let mut bases = Vec::new();
                if is_punct(j, b':') {
                    j += 1;
                    while j < code.len() && !is_punct(j, b'{') && !is_punct(j, b';') && !is_ident(j, "where") {
                        if code[j].kind == TokKind::Ident {
                            let (next, base) = dotted_name(&code, text, j);
                            bases.push(base);
                            j = skip_generics(&code, next);
                            if is_punct(j, b'(') {
                                j = skip_balanced(&code, j, b'(', b')');
                            }
                        } else {
                            j += 1;
                        }
                    }
                }
                while j < code.len() && !is_punct(j, b'{') && !is_punct(j, b';') {
                    j += 1;
                }
                let end = if is_punct(j, b'{') {
                    let close = skip_balanced(&code, j, b'{', b'}');
                    code.get(close.saturating_sub(1)).map_or(text.len() as u32, |c| c.end)
                } else {
                    code.get(j).map_or(text.len() as u32, |c| c.end)
                };
                let scope = namespaces
                    .iter()
                    .map(|(n, _)| n.as_str())
                    .collect::<Vec<_>>()
                    .join(".");
                decls.push(Decl {
                    kind,
                    name: slice(name_tok).to_string(),
                    scope,
                    name_span: Span::new(file, name_tok.start, name_tok.end),
                    decl_span: Span::new(file, t.start, end),
                    bases,
                    rule: if kind.is_none() { pending_rule.take() } else { None },
                    generated: generated_file || pending_generated,
                });
                pending_rule = None;
                pending_generated = false;
                i = name_idx + 1;
            }
            _ => i += 1,
        }
    }
    decls
}

/// Reads `A.B.C` starting at `start`, returning the index after it.
fn dotted_name(code: &[Tok], text: &str, start: usize) -> (usize, String) {
    let mut name = String::new();
    let mut i = start;
    while let Some(t) = code.get(i).filter(|t| t.kind == TokKind::Ident) {
        name.push_str(&text[t.start as usize..t.end as usize]);
        if code.get(i + 1).is_some_and(|t| t.kind == TokKind::Punct(b'.'))
            && code.get(i + 2).is_some_and(|t| t.kind == TokKind::Ident)
        {
            name.push('.');
            i += 2;
        } else {
            i += 1;
            break;
        }
    }
    (i, name)
}

fn skip_generics(code: &[Tok], i: usize) -> usize {
    if code.get(i).is_some_and(|t| t.kind == TokKind::Punct(b'<')) {
        skip_balanced(code, i, b'<', b'>')
    } else {
        i
    }
}

/// Given `code[i]` is `open`, returns the index after the matching `close`.
fn skip_balanced(code: &[Tok], i: usize, open: u8, close: u8) -> usize {
    let mut depth = 0usize;
    let mut j = i;
    while j < code.len() {
        match code[j].kind {
            TokKind::Punct(p) if p == open => depth += 1,
            TokKind::Punct(p) if p == close => {
                depth -= 1;
                if depth == 0 {
                    return j + 1;
                }
            }
            _ => {}
        }
        j += 1;
    }
    code.len()
}

/// Parses `[Attr(args), Other]` starting at `[`.
fn parse_attributes(code: &[Tok], text: &str, open: usize) -> (usize, Vec<(String, RuleArgument)>) {
    let close = skip_balanced(code, open, b'[', b']');
    let mut attrs = Vec::new();
    let mut i = open + 1;
    if code
        .get(i)
        .is_some_and(|t| t.kind == TokKind::Ident)
        && code.get(i + 1).is_some_and(|t| t.kind == TokKind::Punct(b':'))
    {
        // attribute target such as `type:`
        i += 2;
    }
    while i + 1 < close {
        if code[i].kind != TokKind::Ident {
            i += 1;
            continue;
        }
        let (next, name) = dotted_name(code, text, i);
        let simple = name.rsplit('.').next().unwrap_or(&name).to_string();
        i = next;
        let argument = if code.get(i).is_some_and(|t| t.kind == TokKind::Punct(b'(')) {
            let end = skip_balanced(code, i, b'(', b')');
            let inner = code.get(i + 1..end.saturating_sub(1)).unwrap_or(&[]);
            i = end;
            decode_argument(inner, text)
        } else {
            RuleArgument::Invalid
        };
        attrs.push((simple, argument));
        while i + 1 < close && code[i].kind != TokKind::Punct(b',') {
            i += 1;
        }
        i += 1;
    }
    (close, attrs)
}

/// The first positional argument, or a named `suffix:` argument.
fn decode_argument(args: &[Tok], text: &str) -> RuleArgument {
    let first = match args {
        [name, colon, value, ..]
            if name.kind == TokKind::Ident && colon.kind == TokKind::Punct(b':') =>
        {
            Some(value)
        }
        [value, ..] => Some(value),
        [] => None,
    };
    match first {
        Some(t) if t.kind == TokKind::Str => {
            RuleArgument::Valid(text[t.start as usize..t.end as usize].to_string())
        }
        _ => RuleArgument::Invalid,
    }
}
