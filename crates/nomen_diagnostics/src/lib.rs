//! Diagnostics reported by the naming checker.
//!
//! Every [`Diagnostic`] is keyed by a stable [`DiagnosticCode`] such as
//! `NC001` and points at one name token. Fix providers read the required
//! suffix from its property map rather than from the message text.
//! [`DiagnosticSink`] gathers what the lint rules emit, and
//! [`TerminalRenderer`] prints it with source excerpts.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod renderer;
pub mod severity;
pub mod sink;
pub mod suggested_fix;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use label::{Label, LabelStyle};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
pub use suggested_fix::SuggestedFix;
