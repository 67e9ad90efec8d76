//! Spans a diagnostic points at besides its message.

use nomen_source::Span;
use serde::{Deserialize, Serialize};

/// Whether a label marks the problem or the context that explains it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LabelStyle {
    /// The offending name token, underlined with `^`.
    Primary,
    /// Supporting context such as the interface that carries the rule,
    /// underlined with `-`.
    Secondary,
}

/// A span with a short message rendered under it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Label {
    /// Where the label points.
    pub span: Span,
    /// Text shown beside the underline.
    pub message: String,
    /// Primary or secondary.
    pub style: LabelStyle,
}

impl Label {
    fn styled(style: LabelStyle, span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            style,
        }
    }

    /// Marks the offending span.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self::styled(LabelStyle::Primary, span, message)
    }

    /// Marks a span that explains the diagnostic.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self::styled(LabelStyle::Secondary, span, message)
    }
}
