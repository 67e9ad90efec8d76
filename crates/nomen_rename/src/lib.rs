//! Whole-program renames that fix naming violations.
//!
//! [`RenameTransform::compute_fix`] turns a [`Violation`](nomen_lint::Violation)
//! into an [`EditSet`](nomen_model::EditSet) that appends the required suffix
//! to the type's declaration and to every occurrence the reference index
//! reports. The transform never applies edits itself; callers hand the edit
//! set to [`Workspace::apply`](nomen_model::Workspace::apply). [`fix_all`]
//! drives analyze, fix and apply until a program is clean.

#![warn(missing_docs)]

mod error;
mod fix_all;
mod transform;

pub use error::{FixError, RenameError};
pub use fix_all::{fix_all, AppliedFix, FixFailure, FixReport};
pub use transform::RenameTransform;
