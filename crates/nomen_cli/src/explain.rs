//! `nomen explain` — print what a rule checks.

use nomen_lint::LintEngine;

/// Runs the `nomen explain` command for a rule code or name.
pub fn run(rule: &str) -> Result<i32, Box<dyn std::error::Error>> {
    println!("{}", render(rule)?);
    Ok(0)
}

fn render(rule: &str) -> Result<String, Box<dyn std::error::Error>> {
    let engine = LintEngine::with_defaults();
    let found = engine
        .find_rule(rule)
        .or_else(|| engine.find_rule(&rule.to_ascii_uppercase()))
        .ok_or_else(|| format!("unknown rule '{rule}'"))?;
    Ok(format!(
        "{} ({}): {}\ndefault severity: {}\n\n{}",
        found.code(),
        found.name(),
        found.description(),
        found.default_severity(),
        found.explanation()
    ))
}
