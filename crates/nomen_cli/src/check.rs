//! `nomen check` — report naming-convention violations.
//!
//! 1. Find project root (walk up looking for `nomen.toml`)
//! 2. Load config and the program snapshot
//! 3. Run the lint engine
//! 4. Render diagnostics

use nomen_config::LintConfig;
use nomen_diagnostics::{DiagnosticRenderer, DiagnosticSink, Severity, TerminalRenderer};
use nomen_lint::LintEngine;

use crate::pipeline::load_project;
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Runs the `nomen check` command.
///
/// Returns exit code 0 if no errors, 1 if there are errors.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = load_project(global)?;
    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!("   Checking {}", project.config.project.name);
    }

    let lint = merge_lint_config(&project.config.lint, args);
    let engine = LintEngine::new(&lint, &project.config.naming);
    let sink = DiagnosticSink::new();
    engine.run(project.workspace.graph(), &sink);

    let diagnostics = sink.diagnostics();
    let sources = project.workspace.sources();
    match args.format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(global.color);
            for diag in &diagnostics {
                eprintln!("{}", renderer.render(diag, sources));
            }
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&diagnostics)?);
        }
    }

    let error_count = sink.error_count();
    let warning_count = sink.count(Severity::Warning);
    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!("   Result: {error_count} error(s), {warning_count} warning(s)");
    }

    Ok(i32::from(sink.has_errors()))
}

/// Merges CLI `--allow`/`--deny` flags with the config file's lint section.
///
/// CLI flags take precedence: a rule named on the command line is removed
/// from the opposite config list.
pub(crate) fn merge_lint_config(config: &LintConfig, args: &CheckArgs) -> LintConfig {
    let mut deny = config.deny.clone();
    let mut allow = config.allow.clone();
    for rule in &args.deny {
        allow.retain(|r| r != rule);
        if !deny.contains(rule) {
            deny.push(rule.clone());
        }
    }
    for rule in &args.allow {
        deny.retain(|r| r != rule);
        if !allow.contains(rule) {
            allow.push(rule.clone());
        }
    }
    LintConfig { deny, allow }
}
