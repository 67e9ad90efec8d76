//! Opaque ID newtypes for symbols.

use crate::arena::ArenaId;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $tag:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                Self(index)
            }

            fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "#{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Identity of a declared class-like type.
    TypeId,
    "type"
);

define_id!(
    /// Identity of a declared interface.
    InterfaceId,
    "interface"
);

/// Identity of any symbol that can own occurrences or collide by name.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum SymbolId {
    /// A class-like type.
    Type(TypeId),
    /// An interface.
    Interface(InterfaceId),
}

impl From<TypeId> for SymbolId {
    fn from(id: TypeId) -> Self {
        SymbolId::Type(id)
    }
}

impl From<InterfaceId> for SymbolId {
    fn from(id: InterfaceId) -> Self {
        SymbolId::Interface(id)
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolId::Type(id) => write!(f, "{id}"),
            SymbolId::Interface(id) => write!(f, "{id}"),
        }
    }
}
