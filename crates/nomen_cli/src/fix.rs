//! `nomen fix` — rename every violating type and write the result.

use std::collections::BTreeSet;
use std::path::PathBuf;

use nomen_model::Workspace;
use nomen_rename::{fix_all, FixReport, RenameTransform};
use tokio_util::sync::CancellationToken;

use crate::pipeline::{load_project, Project};
use crate::{FixArgs, GlobalArgs};

/// Runs the `nomen fix` command.
///
/// Ctrl-C cancels the pass before anything is written. Returns exit code 1
/// if any violation could not be fixed.
pub fn run(args: &FixArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = load_project(global)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let cancel = CancellationToken::new();
    let transform = RenameTransform::new(project.config.rename);
    let report = runtime.block_on(async {
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                on_interrupt.cancel();
            }
        });
        fix_all(
            project.workspace.clone(),
            &transform,
            &project.config.naming,
            &cancel,
        )
        .await
    })?;

    if !global.quiet {
        for fix in &report.applied {
            eprintln!(
                "    Renamed {} -> {} ({} edit(s) in {} file(s))",
                fix.old_name,
                fix.new_name,
                fix.edits.edit_count(),
                fix.edits.files.len()
            );
        }
    }
    for failure in &report.failures {
        eprintln!("warning: could not rename '{}': {}", failure.type_name, failure.error);
    }

    let changed = changed_files(&project.workspace, &report);
    if args.dry_run {
        if !global.quiet {
            for path in &changed {
                eprintln!("   Would write {}", path.display());
            }
        }
    } else {
        write_files(&project, &report, &changed)?;
    }

    Ok(i32::from(!report.is_clean()))
}

/// Paths whose text differs between the loaded and the final revision.
fn changed_files(before: &Workspace, report: &FixReport) -> BTreeSet<PathBuf> {
    report
        .workspace
        .sources()
        .files()
        .filter(|file| {
            before
                .sources()
                .try_file(file.id)
                .map_or(true, |old| old.content_hash != file.content_hash)
        })
        .map(|file| file.path.clone())
        .collect()
}

fn write_files(
    project: &Project,
    report: &FixReport,
    changed: &BTreeSet<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    for file in report.workspace.sources().files() {
        if changed.contains(&file.path) {
            std::fs::write(project.dir.join(&file.path), &file.content)?;
            tracing::debug!(path = %file.path.display(), "wrote file");
        }
    }
    Ok(())
}
