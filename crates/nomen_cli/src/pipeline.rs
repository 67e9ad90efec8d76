//! Shared pipeline helpers for CLI commands.
//!
//! Project root resolution, config loading, and loading the program snapshot
//! into a [`Workspace`].

use std::path::{Path, PathBuf};

use nomen_config::{NomenConfig, CONFIG_FILE_NAME};
use nomen_model::Workspace;

use crate::GlobalArgs;

/// A loaded project: its directory, configuration, and first revision.
pub struct Project {
    /// The directory containing `nomen.toml`.
    pub dir: PathBuf,
    /// The parsed configuration.
    pub config: NomenConfig,
    /// The program read from the configured snapshot.
    pub workspace: Workspace,
}

/// Walks up from `start` looking for the nearest directory containing `nomen.toml`.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE_NAME).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {CONFIG_FILE_NAME} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the project root directory from global CLI args.
///
/// If `--config` is specified, uses that path (file → parent dir, dir → itself).
/// Otherwise walks up from the current directory looking for `nomen.toml`.
pub fn resolve_project_root(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            Ok(p.parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")))
        } else {
            Ok(p)
        }
    } else {
        find_project_root(&std::env::current_dir()?)
    }
}

/// Loads the config and snapshot of the project selected by `global`.
pub fn load_project(global: &GlobalArgs) -> Result<Project, Box<dyn std::error::Error>> {
    let dir = resolve_project_root(global)?;
    let config = nomen_config::load_config(&dir)?;
    let workspace = nomen_model::load_snapshot(&dir, Path::new(&config.project.snapshot))?;
    tracing::debug!(
        project = %config.project.name,
        files = workspace.sources().len(),
        types = workspace.graph().type_count(),
        "loaded snapshot"
    );
    Ok(Project {
        dir,
        config,
        workspace,
    })
}

#[cfg(test)]
pub(crate) mod testing {
    //! A throwaway project on disk.

    use std::fs;
    use tempfile::TempDir;

    pub const STRATEGIES: &str = "namespace Shop;\n\n[FamilyName(\"Strategy\")]\npublic interface IStrategy { }\n\npublic class Fast : IStrategy { }\n";

    pub const USES: &str = "namespace Shop;\n\n// Fast is the default\npublic class Checkout { Fast pick = new Fast(); }\n";

    /// Offsets: `IStrategy` at 59..68 and `Fast` at 87..91 in `STRATEGIES`;
    /// `Fast` at 20..24 (comment), 64..68 and 80..84 in `USES`.
    pub const SNAPSHOT: &str = r#"{
  "files": ["src/Strategies.cs", "src/Checkout.cs"],
  "interfaces": [
    { "key": "IStrategy", "name": "IStrategy", "scope": "Shop",
      "file": 0, "name_span": [59, 68], "naming_rule": "Strategy" }
  ],
  "types": [
    { "key": "Fast", "name": "Fast", "scope": "Shop", "file": 0,
      "name_span": [87, 91], "decl_span": [74, 107],
      "implements": ["IStrategy"] }
  ],
  "occurrences": [
    { "symbol": "Fast", "file": 1, "span": [20, 24], "category": "comment" },
    { "symbol": "Fast", "file": 1, "span": [64, 68], "category": "usage" },
    { "symbol": "Fast", "file": 1, "span": [80, 84], "category": "usage" }
  ]
}"#;

    /// Writes `nomen.toml`, the snapshot, and both source files.
    pub fn project(config_extra: &str) -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(
            root.join("nomen.toml"),
            format!("[project]\nname = \"shop\"\n{config_extra}"),
        )
        .unwrap();
        fs::write(root.join("program.json"), SNAPSHOT).unwrap();
        fs::write(root.join("src/Strategies.cs"), STRATEGIES).unwrap();
        fs::write(root.join("src/Checkout.cs"), USES).unwrap();
        tmp
    }
}
