//! Planning the rename that fixes one violation.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use nomen_config::RenameConfig;
use nomen_diagnostics::Diagnostic;
use nomen_lint::Violation;
use nomen_model::{
    EditSet, FileEdit, Occurrence, OccurrenceCategory, ProgramView, RenameEdit, SymbolId, TypeId,
};
use tokio_util::sync::CancellationToken;

use crate::error::RenameError;

/// Computes edit sets that append a required suffix to a type's name.
///
/// Clones share one in-flight set, so at most one rename per target type is
/// being planned at any time across all clones.
#[derive(Clone)]
pub struct RenameTransform {
    config: RenameConfig,
    in_flight: Arc<Mutex<HashSet<TypeId>>>,
}

impl RenameTransform {
    /// Creates a transform with the given occurrence-category settings.
    pub fn new(config: RenameConfig) -> Self {
        Self {
            config,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Plans the rename of `violation.current_name` to
    /// `current_name + required_suffix` against `view`.
    ///
    /// The returned edit set covers the declaration, every usage, and (when
    /// enabled) every comment and string-literal mention the reference index
    /// reports. Nothing is produced on failure.
    #[tracing::instrument(
        skip_all,
        fields(name = %violation.current_name, suffix = %violation.required_suffix)
    )]
    pub async fn compute_fix(
        &self,
        view: ProgramView<'_>,
        violation: &Violation,
        cancel: &CancellationToken,
    ) -> Result<EditSet, RenameError> {
        let graph = view.graph;
        let target = graph
            .declared_type_at(violation.span)
            .filter(|&ty| ty == violation.type_id)
            .ok_or_else(|| {
                RenameError::InvalidTarget(format!(
                    "span does not resolve to the declaration of '{}'",
                    violation.current_name
                ))
            })?;
        let symbol = graph
            .type_symbol(target)
            .ok_or_else(|| RenameError::InvalidTarget(format!("{target} does not exist")))?;
        let current = graph.interner().resolve(symbol.name);
        if current != violation.current_name || symbol.name_span != violation.span {
            return Err(RenameError::InvalidTarget(format!(
                "'{}' has been renamed to '{current}'",
                violation.current_name
            )));
        }
        if violation.required_suffix.is_empty() {
            return Err(RenameError::InvalidTarget("empty suffix".to_string()));
        }
        let new_name = violation.new_name();

        let _guard = InFlight::acquire(&self.in_flight, target)?;

        let occurrences = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(RenameError::Cancelled),
            found = view.index.occurrences_of(SymbolId::Type(target)) => found?,
        };
        if !occurrences
            .iter()
            .any(|o| o.category == OccurrenceCategory::Declaration && o.span == symbol.name_span)
        {
            return Err(RenameError::InvalidTarget(format!(
                "reference index has no declaration of '{current}'"
            )));
        }

        if let Some(existing) = graph
            .symbols_named(symbol.scope, &new_name)
            .into_iter()
            .find(|&id| id != SymbolId::Type(target))
        {
            tracing::debug!(%existing, new_name, "rename would collide");
            return Err(RenameError::NameCollision {
                old_name: current.to_string(),
                new_name,
                existing,
            });
        }

        let edits = self.plan_edits(&view, current, occurrences)?;
        if cancel.is_cancelled() {
            return Err(RenameError::Cancelled);
        }

        let set = EditSet {
            target,
            old_name: current.to_string(),
            new_name,
            base_revision: view.revision,
            files: group_by_file(&view, edits),
        };
        tracing::debug!(
            files = set.files.len(),
            edits = set.edit_count(),
            "planned rename"
        );
        Ok(set)
    }

    /// Like [`compute_fix`](Self::compute_fix), starting from an NC001
    /// diagnostic instead of a violation.
    ///
    /// The suffix is read from the diagnostic's `suffix` property.
    pub async fn compute_fix_for_diagnostic(
        &self,
        view: ProgramView<'_>,
        diagnostic: &Diagnostic,
        cancel: &CancellationToken,
    ) -> Result<EditSet, RenameError> {
        let violation = Violation::from_diagnostic(diagnostic, view.graph).ok_or_else(|| {
            RenameError::InvalidTarget(format!(
                "diagnostic '{}' does not describe a current naming violation",
                diagnostic.code
            ))
        })?;
        self.compute_fix(view, &violation, cancel).await
    }

    /// Filters, sorts, and validates occurrences into rename edits.
    fn plan_edits(
        &self,
        view: &ProgramView<'_>,
        old_name: &str,
        occurrences: Vec<Occurrence>,
    ) -> Result<Vec<RenameEdit>, RenameError> {
        let mut edits: Vec<RenameEdit> = occurrences
            .into_iter()
            .filter(|o| match o.category {
                OccurrenceCategory::Comment => self.config.comments,
                OccurrenceCategory::StringLiteral => self.config.strings,
                OccurrenceCategory::Declaration | OccurrenceCategory::Usage => true,
            })
            .map(|o| RenameEdit {
                span: o.span,
                category: o.category,
            })
            .collect();
        edits.sort_by_key(|e| (e.span, e.category));
        edits.dedup_by_key(|e| e.span);

        for pair in edits.windows(2) {
            if pair[0].span.overlaps(pair[1].span) {
                return Err(RenameError::InconsistentIndex(format!(
                    "occurrences {}..{} and {}..{} overlap",
                    pair[0].span.start, pair[0].span.end, pair[1].span.start, pair[1].span.end
                )));
            }
        }
        for edit in &edits {
            let text = view.sources.snippet(edit.span);
            if text != Some(old_name) {
                return Err(RenameError::InconsistentIndex(format!(
                    "occurrence at {}..{} holds '{}', not '{old_name}'",
                    edit.span.start,
                    edit.span.end,
                    text.unwrap_or_default()
                )));
            }
        }
        Ok(edits)
    }
}

fn group_by_file(view: &ProgramView<'_>, edits: Vec<RenameEdit>) -> Vec<FileEdit> {
    let mut files: Vec<FileEdit> = Vec::new();
    for edit in edits {
        match files.last_mut() {
            Some(last) if last.file == edit.span.file => last.edits.push(edit),
            _ => {
                let source = view.sources.get_file(edit.span.file);
                files.push(FileEdit {
                    file: source.id,
                    path: source.path.clone(),
                    base_hash: source.content_hash,
                    edits: vec![edit],
                });
            }
        }
    }
    files
}

/// Marks a target as being renamed until dropped.
struct InFlight {
    set: Arc<Mutex<HashSet<TypeId>>>,
    target: TypeId,
}

impl InFlight {
    fn acquire(set: &Arc<Mutex<HashSet<TypeId>>>, target: TypeId) -> Result<Self, RenameError> {
        if !lock(set).insert(target) {
            return Err(RenameError::TargetBusy(target));
        }
        Ok(Self {
            set: Arc::clone(set),
            target,
        })
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        lock(&self.set).remove(&self.target);
    }
}

fn lock(set: &Mutex<HashSet<TypeId>>) -> MutexGuard<'_, HashSet<TypeId>> {
    set.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
