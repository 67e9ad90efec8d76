//! Shared foundational types used across the Nomen naming-convention toolchain.
//!
//! This crate provides interned identifiers for symbol and scope names, content
//! hashing for edit-set staleness checks, and the common internal result type.

#![warn(missing_docs)]

pub mod hash;
pub mod ident;
pub mod result;

pub use hash::ContentHash;
pub use ident::{Ident, Interner};
pub use result::{InternalError, NomenResult};
