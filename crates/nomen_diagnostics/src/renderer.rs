//! Diagnostic rendering for terminal output.

use crate::diagnostic::Diagnostic;
use crate::label::LabelStyle;
use nomen_source::{SourceDb, Span};

/// Formats diagnostics into strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// Renders diagnostics in a rustc-style terminal format:
///
/// ```text
/// warning[NC001]: Type name 'Bad' should end with 'Strategy' because ...
///   --> src/Strategies.cs:4:14
///   |
/// 4 | public class Bad : IStrategy { }
///   |              ^^^
///   ::: src/Strategies.cs:2:18 suffix 'Strategy' required by this interface
///    = help: rename to 'BadStrategy'
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, ansi: &str) -> String {
        if self.color {
            format!("\x1b[{ansi}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn is_resolvable(span: Span, source_db: &SourceDb) -> bool {
        !span.is_dummy() && source_db.try_file(span.file).is_some()
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let mut out = String::new();

        let header = format!("{}[{}]", diag.severity, diag.code);
        let header_color = if diag.severity.is_error() { "1;31" } else { "1;33" };
        out.push_str(&format!(
            "{}: {}\n",
            self.paint(&header, header_color),
            diag.message
        ));

        if Self::is_resolvable(diag.primary_span, source_db) {
            let resolved = source_db.resolve_span(diag.primary_span);
            out.push_str(&format!("  --> {resolved}\n"));

            let file = source_db.get_file(diag.primary_span.file);
            let (line, col) = file.line_col(diag.primary_span.start);
            let line_num = format!("{line}");
            let padding = " ".repeat(line_num.len());
            let line_content = file.line_text(diag.primary_span.start);

            out.push_str(&format!("{padding} |\n"));
            out.push_str(&format!("{line_num} | {line_content}\n"));

            let carets = "^".repeat(diag.primary_span.len().max(1) as usize);
            let col_padding = " ".repeat((col as usize).saturating_sub(1));
            let primary_msg = diag
                .labels
                .iter()
                .find(|l| l.style == LabelStyle::Primary)
                .map(|l| format!(" {}", l.message))
                .unwrap_or_default();
            out.push_str(&format!(
                "{padding} | {col_padding}{}{primary_msg}\n",
                self.paint(&carets, header_color)
            ));

            for label in diag
                .labels
                .iter()
                .filter(|l| l.style == LabelStyle::Secondary)
                .filter(|l| Self::is_resolvable(l.span, source_db))
            {
                let at = source_db.resolve_span(label.span);
                out.push_str(&format!("{padding} ::: {at} {}\n", label.message));
            }
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};
    use crate::label::Label;

    const SRC: &str = "public interface IStrategy { }\npublic class Bad : IStrategy { }\n";

    #[test]
    fn render_warning_with_secondary_label() {
        let mut db = SourceDb::new();
        let file = db.add_source("Strategies.cs", SRC.to_string());
        let bad = SRC.find("Bad").unwrap() as u32;
        let iface = SRC.find("IStrategy").unwrap() as u32;

        let diag = Diagnostic::warning(
            DiagnosticCode::new(Category::Naming, 1),
            "Type name 'Bad' should end with 'Strategy'",
            Span::new(file, bad, bad + 3),
        )
        .with_label(Label::secondary(
            Span::new(file, iface, iface + 9),
            "suffix 'Strategy' required by this interface",
        ))
        .with_help("rename to 'BadStrategy'");

        let output = TerminalRenderer::new(false).render(&diag, &db);
        assert!(output.contains("warning[NC001]: Type name 'Bad' should end with 'Strategy'"));
        assert!(output.contains("--> Strategies.cs:2:14"));
        assert!(output.contains("2 | public class Bad : IStrategy { }"));
        assert!(output.contains("             ^^^"));
        assert!(output.contains("::: Strategies.cs:1:18 suffix 'Strategy' required"));
        assert!(output.contains("= help: rename to 'BadStrategy'"));
    }

    #[test]
    fn render_dummy_span_no_source() {
        let db = SourceDb::new();
        let diag = Diagnostic::error(
            DiagnosticCode::new(Category::Naming, 1),
            "general",
            Span::DUMMY,
        );
        let output = TerminalRenderer::new(false).render(&diag, &db);
        assert!(output.contains("error[NC001]: general"));
        assert!(!output.contains("-->"));
    }

    #[test]
    fn color_wraps_header() {
        let db = SourceDb::new();
        let diag = Diagnostic::warning(
            DiagnosticCode::new(Category::Naming, 1),
            "m",
            Span::DUMMY,
        );
        let output = TerminalRenderer::new(true).render(&diag, &db);
        assert!(output.starts_with("\x1b[1;33mwarning[NC001]\x1b[0m"));
    }
}
