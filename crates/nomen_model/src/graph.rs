//! The program's type/interface graph and the builder that produces it.

use crate::arena::Arena;
use crate::error::ModelError;
use crate::ids::{InterfaceId, SymbolId, TypeId};
use crate::rule::{NamingRule, RuleArgument};
use crate::symbol::{InterfaceSymbol, TypeKind, TypeSymbol};
use indexmap::IndexSet;
use nomen_common::{Ident, Interner};
use nomen_source::{remap_offset, FileId, Span, TextEdit};
use petgraph::graphmap::DiGraphMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Read access to the declarations of one program revision.
///
/// Analysis and rename planning only ever see a program through this trait,
/// so they can run against any frontend that can answer these queries.
pub trait SymbolGraph: Send + Sync {
    /// The interner every [`Ident`] in this graph resolves through.
    fn interner(&self) -> &Interner;

    /// Looks up a type by id.
    fn type_symbol(&self, id: TypeId) -> Option<&TypeSymbol>;

    /// Looks up an interface by id.
    fn interface_symbol(&self, id: InterfaceId) -> Option<&InterfaceSymbol>;

    /// All declared types, in declaration order.
    fn type_ids(&self) -> Vec<TypeId>;

    /// The innermost type whose declaration encloses `span`.
    fn declared_type_at(&self, span: Span) -> Option<TypeId>;

    /// The transitive closure of interfaces `id` implements.
    ///
    /// Directly implemented interfaces come first in declaration order, each
    /// followed depth-first by the interfaces it extends, then the closure of
    /// the base class. Every interface appears once.
    fn all_interfaces(&self, id: TypeId) -> IndexSet<InterfaceId>;

    /// The naming rule attached to an interface, if any.
    fn attached_rule(&self, id: InterfaceId) -> Option<&NamingRule>;

    /// Every symbol in `scope` whose simple name is `name`.
    fn symbols_named(&self, scope: Ident, name: &str) -> Vec<SymbolId>;

    /// The simple name of a symbol.
    fn name_of(&self, id: SymbolId) -> Option<&str> {
        let name = match id {
            SymbolId::Type(ty) => self.type_symbol(ty)?.name,
            SymbolId::Interface(iface) => self.interface_symbol(iface)?.name,
        };
        Some(self.interner().resolve(name))
    }

    /// The namespace-qualified name of a symbol, for messages and logs.
    fn qualified_name(&self, id: SymbolId) -> Option<String> {
        let scope = match id {
            SymbolId::Type(ty) => self.type_symbol(ty)?.scope,
            SymbolId::Interface(iface) => self.interface_symbol(iface)?.scope,
        };
        let scope = self.interner().resolve(scope);
        let name = self.name_of(id)?;
        if scope.is_empty() {
            Some(name.to_string())
        } else {
            Some(format!("{scope}.{name}"))
        }
    }
}

/// An immutable program revision's declarations.
#[derive(Clone)]
pub struct ProgramGraph {
    interner: Arc<Interner>,
    types: Arena<TypeId, TypeSymbol>,
    interfaces: Arena<InterfaceId, InterfaceSymbol>,
    by_name: HashMap<(Ident, Ident), Vec<SymbolId>>,
}

impl ProgramGraph {
    /// The shared interner.
    pub fn shared_interner(&self) -> &Arc<Interner> {
        &self.interner
    }

    /// Number of declared types.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Number of declared interfaces.
    pub fn interface_count(&self) -> usize {
        self.interfaces.len()
    }

    /// The first type with the given simple name, in declaration order.
    pub fn type_named(&self, name: &str) -> Option<TypeId> {
        let ident = self.interner.get(name)?;
        self.types
            .iter()
            .find(|(_, ty)| ty.name == ident)
            .map(|(id, _)| id)
    }

    /// The first interface with the given simple name, in declaration order.
    pub fn interface_named(&self, name: &str) -> Option<InterfaceId> {
        let ident = self.interner.get(name)?;
        self.interfaces
            .iter()
            .find(|(_, iface)| iface.name == ident)
            .map(|(id, _)| id)
    }

    /// The graph after `target` is renamed to `new_name` and every span is
    /// moved past the given per-file text edits.
    pub fn renamed_type(
        &self,
        target: TypeId,
        new_name: &str,
        edits: &HashMap<FileId, Vec<TextEdit>>,
    ) -> ProgramGraph {
        let mut next = self.clone();
        for ty in next.types.values_mut() {
            ty.name_span = remap_span(ty.name_span, edits);
            ty.decl_span = remap_span(ty.decl_span, edits);
        }
        for iface in next.interfaces.values_mut() {
            iface.name_span = remap_span(iface.name_span, edits);
        }
        if let Some(ty) = next.types.try_get(target).cloned() {
            next.types[target].name = next.interner.get_or_intern(new_name);
            next.by_name = index_names(&next.types, &next.interfaces);
            tracing::trace!(from = self.interner.resolve(ty.name), to = new_name, "renamed type in graph");
        }
        next
    }

    fn visit_interface(&self, id: InterfaceId, seen: &mut IndexSet<InterfaceId>) {
        if !seen.insert(id) {
            return;
        }
        if let Some(iface) = self.interfaces.try_get(id) {
            for &parent in &iface.extends {
                self.visit_interface(parent, seen);
            }
        }
    }
}

impl SymbolGraph for ProgramGraph {
    fn interner(&self) -> &Interner {
        &self.interner
    }

    fn type_symbol(&self, id: TypeId) -> Option<&TypeSymbol> {
        self.types.try_get(id)
    }

    fn interface_symbol(&self, id: InterfaceId) -> Option<&InterfaceSymbol> {
        self.interfaces.try_get(id)
    }

    fn type_ids(&self) -> Vec<TypeId> {
        self.types.ids().collect()
    }

    fn declared_type_at(&self, span: Span) -> Option<TypeId> {
        self.types
            .iter()
            .filter(|(_, ty)| ty.decl_span.contains(span))
            .min_by_key(|(_, ty)| ty.decl_span.len())
            .map(|(id, _)| id)
    }

    fn all_interfaces(&self, id: TypeId) -> IndexSet<InterfaceId> {
        let mut seen = IndexSet::new();
        let mut visited_types = IndexSet::new();
        let mut current = Some(id);
        while let Some(ty_id) = current {
            if !visited_types.insert(ty_id) {
                break;
            }
            let Some(ty) = self.types.try_get(ty_id) else {
                break;
            };
            for &iface in &ty.implements {
                self.visit_interface(iface, &mut seen);
            }
            current = ty.base;
        }
        seen
    }

    fn attached_rule(&self, id: InterfaceId) -> Option<&NamingRule> {
        self.interfaces.try_get(id)?.rule.as_ref()
    }

    fn symbols_named(&self, scope: Ident, name: &str) -> Vec<SymbolId> {
        let Some(name) = self.interner.get(name) else {
            return Vec::new();
        };
        self.by_name.get(&(scope, name)).cloned().unwrap_or_default()
    }
}

fn remap_span(span: Span, edits: &HashMap<FileId, Vec<TextEdit>>) -> Span {
    match edits.get(&span.file) {
        Some(file_edits) => Span::new(
            span.file,
            remap_offset(file_edits, span.start),
            remap_offset(file_edits, span.end),
        ),
        None => span,
    }
}

fn index_names(
    types: &Arena<TypeId, TypeSymbol>,
    interfaces: &Arena<InterfaceId, InterfaceSymbol>,
) -> HashMap<(Ident, Ident), Vec<SymbolId>> {
    let mut by_name: HashMap<(Ident, Ident), Vec<SymbolId>> = HashMap::new();
    for (id, iface) in interfaces.iter() {
        by_name
            .entry((iface.scope, iface.name))
            .or_default()
            .push(id.into());
    }
    for (id, ty) in types.iter() {
        by_name.entry((ty.scope, ty.name)).or_default().push(id.into());
    }
    by_name
}

/// An interface declaration handed to [`GraphBuilder::add_interface`].
#[derive(Clone, Debug)]
pub struct InterfaceDecl<'a> {
    /// Simple name.
    pub name: &'a str,
    /// Enclosing namespace (empty for the global scope).
    pub scope: &'a str,
    /// Span of the name token.
    pub name_span: Span,
    /// The naming-rule attribute argument, if the attribute is present.
    pub rule: Option<RuleArgument>,
}

/// A type declaration handed to [`GraphBuilder::add_type`].
#[derive(Clone, Debug)]
pub struct TypeDecl<'a> {
    /// Simple name.
    pub name: &'a str,
    /// Enclosing namespace (empty for the global scope).
    pub scope: &'a str,
    /// Declaration kind.
    pub kind: TypeKind,
    /// Span of the name token.
    pub name_span: Span,
    /// Span of the whole declaration.
    pub decl_span: Span,
    /// Whether the declaration is generated code.
    pub generated: bool,
}

/// Incrementally assembles a [`ProgramGraph`].
///
/// Frontends declare every symbol first and then wire up inheritance with
/// [`add_extends`](Self::add_extends), [`add_implements`](Self::add_implements)
/// and [`set_base`](Self::set_base). [`build`](Self::build) rejects
/// inheritance cycles.
pub struct GraphBuilder {
    interner: Arc<Interner>,
    types: Arena<TypeId, TypeSymbol>,
    interfaces: Arena<InterfaceId, InterfaceSymbol>,
}

impl GraphBuilder {
    /// Creates an empty builder interning names into `interner`.
    pub fn new(interner: Arc<Interner>) -> Self {
        Self {
            interner,
            types: Arena::new(),
            interfaces: Arena::new(),
        }
    }

    /// Declares an interface and decodes its naming rule.
    pub fn add_interface(&mut self, decl: InterfaceDecl<'_>) -> InterfaceId {
        let rule = decl.rule.and_then(|argument| {
            if argument == RuleArgument::Invalid {
                tracing::debug!(
                    interface = decl.name,
                    "naming rule argument is not a string, ignoring the rule"
                );
            }
            NamingRule::from_argument(argument)
        });
        let name = self.interner.get_or_intern(decl.name);
        let scope = self.interner.get_or_intern(decl.scope);
        let id = InterfaceId::from_raw(self.interfaces.len() as u32);
        self.interfaces.alloc(InterfaceSymbol {
            id,
            name,
            scope,
            name_span: decl.name_span,
            extends: Vec::new(),
            rule,
        })
    }

    /// Declares a type.
    pub fn add_type(&mut self, decl: TypeDecl<'_>) -> TypeId {
        let name = self.interner.get_or_intern(decl.name);
        let scope = self.interner.get_or_intern(decl.scope);
        let id = TypeId::from_raw(self.types.len() as u32);
        self.types.alloc(TypeSymbol {
            id,
            name,
            scope,
            kind: decl.kind,
            name_span: decl.name_span,
            decl_span: decl.decl_span,
            base: None,
            implements: Vec::new(),
            generated: decl.generated,
        })
    }

    /// Records that `child` extends `parent`.
    pub fn add_extends(&mut self, child: InterfaceId, parent: InterfaceId) -> Result<(), ModelError> {
        self.check_interface(parent)?;
        self.check_interface(child)?;
        let extends = &mut self.interfaces[child].extends;
        if !extends.contains(&parent) {
            extends.push(parent);
        }
        Ok(())
    }

    /// Records that `ty` directly implements `iface`.
    pub fn add_implements(&mut self, ty: TypeId, iface: InterfaceId) -> Result<(), ModelError> {
        self.check_interface(iface)?;
        self.check_type(ty)?;
        let implements = &mut self.types[ty].implements;
        if !implements.contains(&iface) {
            implements.push(iface);
        }
        Ok(())
    }

    /// Records `base` as the base class of `ty`.
    pub fn set_base(&mut self, ty: TypeId, base: TypeId) -> Result<(), ModelError> {
        self.check_type(ty)?;
        self.check_type(base)?;
        self.types[ty].base = Some(base);
        Ok(())
    }

    /// Finishes the graph.
    ///
    /// Fails with [`ModelError::CyclicInheritance`] if an interface extends
    /// itself or a class derives from itself, directly or transitively.
    pub fn build(self) -> Result<ProgramGraph, ModelError> {
        let mut inheritance: DiGraphMap<SymbolId, ()> = DiGraphMap::new();
        for (id, iface) in self.interfaces.iter() {
            inheritance.add_node(id.into());
            for &parent in &iface.extends {
                inheritance.add_edge(id.into(), parent.into(), ());
            }
        }
        for (id, ty) in self.types.iter() {
            inheritance.add_node(id.into());
            if let Some(base) = ty.base {
                inheritance.add_edge(id.into(), base.into(), ());
            }
        }
        if let Err(cycle) = petgraph::algo::toposort(&inheritance, None) {
            let at = cycle.node_id();
            let name = match at {
                SymbolId::Type(id) => self.interner.resolve(self.types[id].name),
                SymbolId::Interface(id) => self.interner.resolve(self.interfaces[id].name),
            };
            return Err(ModelError::CyclicInheritance(name.to_string()));
        }

        let by_name = index_names(&self.types, &self.interfaces);
        tracing::debug!(
            types = self.types.len(),
            interfaces = self.interfaces.len(),
            "built program graph"
        );
        Ok(ProgramGraph {
            interner: self.interner,
            types: self.types,
            interfaces: self.interfaces,
            by_name,
        })
    }

    fn check_interface(&self, id: InterfaceId) -> Result<(), ModelError> {
        self.interfaces
            .try_get(id)
            .map(|_| ())
            .ok_or_else(|| ModelError::UnknownSymbol(id.to_string()))
    }

    fn check_type(&self, id: TypeId) -> Result<(), ModelError> {
        self.types
            .try_get(id)
            .map(|_| ())
            .ok_or_else(|| ModelError::UnknownSymbol(id.to_string()))
    }
}
