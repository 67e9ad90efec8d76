//! Configuration types deserialized from `nomen.toml`.

use serde::Deserialize;

/// The top-level configuration parsed from `nomen.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct NomenConfig {
    /// Project metadata and the snapshot location.
    pub project: ProjectMeta,
    /// Rule severity overrides.
    #[serde(default)]
    pub lint: LintConfig,
    /// Suffix-matching behavior.
    #[serde(default)]
    pub naming: NamingConfig,
    /// Rename behavior.
    #[serde(default)]
    pub rename: RenameConfig,
}

/// Core project metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectMeta {
    /// The project name.
    pub name: String,
    /// Path (relative to the project directory) of the program snapshot
    /// produced by the language frontend.
    #[serde(default = "default_snapshot")]
    pub snapshot: String,
}

fn default_snapshot() -> String {
    "program.json".to_string()
}

/// Rule severity overrides, by rule name (`suffix-convention`) or code (`NC001`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LintConfig {
    /// Rules whose diagnostics are promoted to errors.
    #[serde(default)]
    pub deny: Vec<String>,
    /// Rules that are not run at all.
    #[serde(default)]
    pub allow: Vec<String>,
}

/// How a type name is compared against a required suffix.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SuffixComparison {
    /// Exact, case-sensitive byte comparison.
    #[default]
    Ordinal,
    /// ASCII case-insensitive comparison.
    OrdinalIgnoreCase,
}

/// Settings for the suffix-convention rule.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamingConfig {
    /// The comparison used when checking a name against a suffix.
    #[serde(default)]
    pub comparison: SuffixComparison,
    /// Whether types marked as generated code are analyzed.
    #[serde(default)]
    pub include_generated: bool,
}

/// Which occurrence categories a rename rewrites besides declarations and usages.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RenameConfig {
    /// Rewrite mentions of the old name inside comments.
    #[serde(default = "enabled")]
    pub comments: bool,
    /// Rewrite mentions of the old name inside string literals.
    #[serde(default = "enabled")]
    pub strings: bool,
}

fn enabled() -> bool {
    true
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            comments: true,
            strings: true,
        }
    }
}
