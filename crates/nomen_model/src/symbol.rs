//! Type and interface symbols.

use crate::ids::{InterfaceId, TypeId};
use crate::rule::NamingRule;
use nomen_common::Ident;
use nomen_source::Span;
use serde::{Deserialize, Serialize};

/// The declaration kind of a type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// A class. The only kind naming rules apply to.
    Class,
    /// A value type.
    Struct,
    /// A record.
    Record,
    /// An enumeration.
    Enum,
}

impl TypeKind {
    /// Returns `true` if naming rules are checked for this kind.
    pub fn is_class_like(self) -> bool {
        self == TypeKind::Class
    }
}

/// A declared type.
#[derive(Clone, Debug)]
pub struct TypeSymbol {
    /// This symbol's identity.
    pub id: TypeId,
    /// The simple name.
    pub name: Ident,
    /// The enclosing namespace, or the empty name for the global scope.
    pub scope: Ident,
    /// The declaration kind.
    pub kind: TypeKind,
    /// The span of the name token in the declaration.
    pub name_span: Span,
    /// The span of the whole declaration.
    pub decl_span: Span,
    /// The base class, if it is declared in the program.
    pub base: Option<TypeId>,
    /// Directly implemented interfaces, in declaration order.
    pub implements: Vec<InterfaceId>,
    /// Whether the declaration lives in generated code.
    pub generated: bool,
}

/// A declared interface.
#[derive(Clone, Debug)]
pub struct InterfaceSymbol {
    /// This symbol's identity.
    pub id: InterfaceId,
    /// The simple name.
    pub name: Ident,
    /// The enclosing namespace, or the empty name for the global scope.
    pub scope: Ident,
    /// The span of the name token in the declaration.
    pub name_span: Span,
    /// Directly extended interfaces, in declaration order.
    pub extends: Vec<InterfaceId>,
    /// The naming rule attached to this interface, if any.
    pub rule: Option<NamingRule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_classes_are_checked() {
        assert!(TypeKind::Class.is_class_like());
        assert!(!TypeKind::Struct.is_class_like());
        assert!(!TypeKind::Record.is_class_like());
        assert!(!TypeKind::Enum.is_class_like());
    }

    #[test]
    fn kind_serde_lowercase() {
        let kind: TypeKind = serde_json::from_str("\"record\"").unwrap();
        assert_eq!(kind, TypeKind::Record);
    }
}
