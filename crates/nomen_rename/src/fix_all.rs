//! Fixing every violation of a program, one rename per revision.

use std::collections::HashSet;

use nomen_config::NamingConfig;
use nomen_lint::find_violations;
use nomen_model::{EditSet, TypeId, Workspace};
use tokio_util::sync::CancellationToken;

use crate::error::{FixError, RenameError};
use crate::transform::RenameTransform;

/// One rename that was applied.
#[derive(Debug, Clone)]
pub struct AppliedFix {
    /// The type's name before the rename.
    pub old_name: String,
    /// The type's name after the rename.
    pub new_name: String,
    /// The edits that were applied.
    pub edits: EditSet,
}

/// One violation that could not be fixed.
#[derive(Debug)]
pub struct FixFailure {
    /// The name of the type that kept its name.
    pub type_name: String,
    /// Why the fix failed.
    pub error: FixError,
}

/// The outcome of [`fix_all`].
pub struct FixReport {
    /// The last revision produced.
    pub workspace: Workspace,
    /// Renames in the order they were applied.
    pub applied: Vec<AppliedFix>,
    /// Violations left in place.
    pub failures: Vec<FixFailure>,
}

impl FixReport {
    /// Returns `true` if every violation was fixed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Repeatedly analyzes `workspace`, fixes the first remaining violation, and
/// applies the result until no fixable violation is left.
///
/// Each rename is planned against the revision the previous one produced.
/// A type whose fix fails is recorded once and skipped afterwards.
/// Cancellation stops the loop and discards the partial report.
pub async fn fix_all(
    workspace: Workspace,
    transform: &RenameTransform,
    config: &NamingConfig,
    cancel: &CancellationToken,
) -> Result<FixReport, RenameError> {
    let mut workspace = workspace;
    let mut applied = Vec::new();
    let mut failures = Vec::new();
    let mut skipped: HashSet<TypeId> = HashSet::new();

    loop {
        if cancel.is_cancelled() {
            return Err(RenameError::Cancelled);
        }
        let Some(violation) = find_violations(workspace.graph(), config)
            .into_iter()
            .find(|v| !skipped.contains(&v.type_id))
        else {
            break;
        };

        let planned = transform
            .compute_fix(workspace.view(), &violation, cancel)
            .await;
        let outcome = match planned {
            Err(RenameError::Cancelled) => return Err(RenameError::Cancelled),
            Err(err) => Err(FixError::from(err)),
            Ok(set) => workspace
                .apply(&set)
                .map(|next| (next, set))
                .map_err(FixError::from),
        };
        match outcome {
            Ok((next, set)) => {
                workspace = next;
                applied.push(AppliedFix {
                    old_name: set.old_name.clone(),
                    new_name: set.new_name.clone(),
                    edits: set,
                });
            }
            Err(error) => {
                tracing::warn!(name = %violation.current_name, %error, "could not fix violation");
                skipped.insert(violation.type_id);
                failures.push(FixFailure {
                    type_name: violation.current_name,
                    error,
                });
            }
        }
    }

    tracing::info!(
        applied = applied.len(),
        failed = failures.len(),
        revision = workspace.revision(),
        "fix pass finished"
    );
    Ok(FixReport {
        workspace,
        applied,
        failures,
    })
}
