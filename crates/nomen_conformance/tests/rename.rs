//! Tests for rename fixes through the full pipeline.
//!
//! Each test analyzes a program, plans the rename for a violation, applies
//! it, and checks the resulting revision.

use std::time::Duration;

use async_trait::async_trait;
use nomen_config::{NamingConfig, RenameConfig};
use nomen_conformance::{check, compute_fix, fix, program, text, violation_of};
use nomen_model::{
    fixture, ApplyError, IndexError, Occurrence, OccurrenceCategory, ProgramView, ReferenceIndex,
    SymbolGraph, SymbolId,
};
use nomen_rename::{fix_all, FixError, RenameError, RenameTransform};
use tokio_util::sync::CancellationToken;

const STRATEGY: &str = "[FamilyName(\"Strategy\")]\npublic interface IStrategy { }\n\n";

#[tokio::test]
async fn scenario_a_fix_renames_to_suffixed_name() {
    let ws = program(&format!("{STRATEGY}public class Bad : IStrategy {{ }}\n"));
    let set = compute_fix(&ws, "Bad").await.unwrap();
    assert_eq!(set.old_name, "Bad");
    assert_eq!(set.new_name, "BadStrategy");
    let next = ws.apply(&set).unwrap();
    assert!(text(&next).contains("public class BadStrategy : IStrategy { }"));
}

#[tokio::test]
async fn fixed_type_has_no_violation() {
    let ws = program(&format!(
        "{STRATEGY}public class Bad : IStrategy {{ }}\npublic class Holder {{ Bad inner = new Bad(); }}\n"
    ));
    let next = fix(&ws, "Bad").await;
    assert!(next.graph().type_named("Bad").is_none());
    assert!(violation_of(&next, "BadStrategy").is_none());
    assert!(!text(&next).contains("Bad "));
    assert!(text(&next).contains("BadStrategy inner = new BadStrategy();"));
    assert_eq!(next.revision(), ws.revision() + 1);
}

#[tokio::test]
async fn original_revision_is_untouched() {
    let ws = program(&format!("{STRATEGY}public class Bad : IStrategy {{ }}\n"));
    let before = text(&ws).to_string();
    let _next = fix(&ws, "Bad").await;
    assert_eq!(text(&ws), before);
    assert!(violation_of(&ws, "Bad").is_some());
}

#[tokio::test]
async fn collision_with_existing_type_produces_no_edit() {
    let ws = program(&format!(
        "{STRATEGY}public class Bad : IStrategy {{ }}\npublic class BadStrategy {{ }}\n"
    ));
    let err = compute_fix(&ws, "Bad").await.unwrap_err();
    match err {
        RenameError::NameCollision {
            old_name,
            new_name,
            existing,
        } => {
            assert_eq!(old_name, "Bad");
            assert_eq!(new_name, "BadStrategy");
            assert_eq!(existing, SymbolId::Type(ws.graph().type_named("BadStrategy").unwrap()));
        }
        other => panic!("expected NameCollision, got {other:?}"),
    }
    assert!(violation_of(&ws, "Bad").is_some());
}

#[tokio::test]
async fn collision_with_existing_interface() {
    let ws = program(&format!(
        "{STRATEGY}public class Bad : IStrategy {{ }}\npublic interface BadStrategy {{ }}\n"
    ));
    let err = compute_fix(&ws, "Bad").await.unwrap_err();
    assert!(matches!(
        err,
        RenameError::NameCollision { existing: SymbolId::Interface(_), .. }
    ));
}

#[tokio::test]
async fn rename_covers_usages_comments_and_strings_across_files() {
    let ws = fixture::load([
        (
            "Strategies.cs",
            "namespace Shop;\n\n[FamilyName(\"Strategy\")]\npublic interface IStrategy { }\n\n/// <summary>Fast picks the first route.</summary>\npublic class Fast : IStrategy { }\n",
        ),
        (
            "Registry.cs",
            "namespace Shop;\n\npublic class Registry\n{\n    private readonly Fast _fast = new Fast();\n    public string Describe() => \"uses Fast\";\n}\n",
        ),
        ("Unrelated.cs", "namespace Shop;\n\npublic class Faster { }\n"),
    ])
    .unwrap();

    let set = compute_fix(&ws, "Fast").await.unwrap();
    assert_eq!(set.files.len(), 2);
    assert_eq!(set.count_of(OccurrenceCategory::Declaration), 1);
    assert_eq!(set.count_of(OccurrenceCategory::Usage), 2);
    assert_eq!(set.count_of(OccurrenceCategory::Comment), 1);
    assert_eq!(set.count_of(OccurrenceCategory::StringLiteral), 1);

    let next = ws.apply(&set).unwrap();
    let file = |i: usize| next.sources().files().nth(i).unwrap().content.clone();
    assert!(file(0).contains("/// <summary>FastStrategy picks the first route.</summary>"));
    assert!(file(0).contains("public class FastStrategy : IStrategy { }"));
    assert_eq!(
        file(1),
        "namespace Shop;\n\npublic class Registry\n{\n    private readonly FastStrategy _fast = new FastStrategy();\n    public string Describe() => \"uses FastStrategy\";\n}\n"
    );
    assert_eq!(file(2), "namespace Shop;\n\npublic class Faster { }\n");
}

#[tokio::test]
async fn comment_and_string_rewriting_can_be_disabled() {
    let ws = program(&format!(
        "{STRATEGY}// Bad is old\npublic class Bad : IStrategy {{ string name = \"Bad\"; }}\n"
    ));
    let violation = violation_of(&ws, "Bad").unwrap();
    let set = RenameTransform::new(RenameConfig {
        comments: false,
        strings: false,
    })
    .compute_fix(ws.view(), &violation, &CancellationToken::new())
    .await
    .unwrap();
    let next = ws.apply(&set).unwrap();
    assert!(text(&next).contains("// Bad is old"));
    assert!(text(&next).contains("string name = \"Bad\";"));
    assert!(text(&next).contains("class BadStrategy"));
}

#[tokio::test]
async fn applying_twice_is_rejected_as_stale() {
    let ws = program(&format!("{STRATEGY}public class Bad : IStrategy {{ }}\n"));
    let set = compute_fix(&ws, "Bad").await.unwrap();
    let next = ws.apply(&set).unwrap();
    let err = next.apply(&set).err().unwrap();
    assert!(matches!(err, ApplyError::StaleRevision { expected: 0, found: 1 }));
}

#[tokio::test]
async fn edit_planned_on_old_revision_is_rejected() {
    let ws = program(&format!(
        "{STRATEGY}public class Bad : IStrategy {{ }}\npublic class Worse : IStrategy {{ }}\n"
    ));
    let bad = compute_fix(&ws, "Bad").await.unwrap();
    let worse = compute_fix(&ws, "Worse").await.unwrap();
    let next = ws.apply(&bad).unwrap();
    assert!(matches!(next.apply(&worse), Err(ApplyError::StaleRevision { .. })));

    let replanned = compute_fix(&next, "Worse").await.unwrap();
    let last = next.apply(&replanned).unwrap();
    assert!(text(&last).contains("class BadStrategy"));
    assert!(text(&last).contains("class WorseStrategy"));
}

#[tokio::test]
async fn second_request_observes_completed_rename() {
    let ws = program(&format!("{STRATEGY}public class Bad : IStrategy {{ }}\n"));
    let next = fix(&ws, "Bad").await;
    assert!(violation_of(&next, "Bad").is_none());
    assert!(matches!(
        compute_fix(&next, "Bad").await,
        Err(RenameError::InvalidTarget(_))
    ));
}

#[tokio::test]
async fn fix_driven_by_reported_diagnostic() {
    let result = check(&format!("{STRATEGY}public class Bad : IStrategy {{ }}\n"));
    let diag = &result.diagnostics[0];
    let set = RenameTransform::new(RenameConfig::default())
        .compute_fix_for_diagnostic(result.workspace.view(), diag, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(set.new_name, "BadStrategy");
}

#[tokio::test]
async fn fix_all_leaves_program_clean() {
    let ws = program(
        "[FamilyName(\"Strategy\")] interface IStrategy { }\n[FamilyName(\"Handler\")] interface IHandler { }\nclass Fast : IStrategy { }\nclass Slow : IStrategy { }\nclass Click : IHandler { }\nclass Taken : IHandler { }\nclass TakenHandler { }\n",
    );
    let report = fix_all(
        ws,
        &RenameTransform::new(RenameConfig::default()),
        &NamingConfig::default(),
        &CancellationToken::new(),
    )
    .await
    .unwrap();
    let renamed: Vec<_> = report.applied.iter().map(|f| f.new_name.as_str()).collect();
    assert_eq!(renamed, vec!["FastStrategy", "SlowStrategy", "ClickHandler"]);
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        report.failures[0].error,
        FixError::Rename(RenameError::NameCollision { .. })
    ));
    let remaining = nomen_lint::find_violations(report.workspace.graph(), &NamingConfig::default());
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].current_name, "Taken");
}

struct Unavailable;

#[async_trait]
impl ReferenceIndex for Unavailable {
    async fn occurrences_of(&self, _symbol: SymbolId) -> Result<Vec<Occurrence>, IndexError> {
        Err(IndexError::Unavailable("indexer restarting".into()))
    }
}

#[tokio::test]
async fn unavailable_index_is_retryable_and_produces_nothing() {
    let ws = program(&format!("{STRATEGY}public class Bad : IStrategy {{ }}\n"));
    let violation = violation_of(&ws, "Bad").unwrap();
    let view = ProgramView {
        index: &Unavailable,
        ..ws.view()
    };
    let err = RenameTransform::new(RenameConfig::default())
        .compute_fix(view, &violation, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(err.is_retryable());

    // a later attempt against a working index succeeds
    assert!(compute_fix(&ws, "Bad").await.is_ok());
}

struct Stalled;

#[async_trait]
impl ReferenceIndex for Stalled {
    async fn occurrences_of(&self, _symbol: SymbolId) -> Result<Vec<Occurrence>, IndexError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn cancellation_aborts_stalled_lookup() {
    let ws = program(&format!("{STRATEGY}public class Bad : IStrategy {{ }}\n"));
    let violation = violation_of(&ws, "Bad").unwrap();
    let view = ProgramView {
        index: &Stalled,
        ..ws.view()
    };
    let transform = RenameTransform::new(RenameConfig::default());
    let cancel = CancellationToken::new();
    let (result, _) = tokio::join!(transform.compute_fix(view, &violation, &cancel), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        cancel.cancel();
    });
    assert!(matches!(result, Err(RenameError::Cancelled)));
}

#[tokio::test]
async fn concurrent_requests_for_same_target_are_serialized() {
    struct Slow<'a>(&'a dyn ReferenceIndex);

    #[async_trait]
    impl<'a> ReferenceIndex for Slow<'a> {
        async fn occurrences_of(&self, symbol: SymbolId) -> Result<Vec<Occurrence>, IndexError> {
            tokio::time::sleep(Duration::from_millis(100)).await;
            self.0.occurrences_of(symbol).await
        }
    }

    let ws = program(&format!("{STRATEGY}public class Bad : IStrategy {{ }}\n"));
    let violation = violation_of(&ws, "Bad").unwrap();
    let slow = Slow(ws.index());
    let view = ProgramView {
        index: &slow,
        ..ws.view()
    };
    let transform = RenameTransform::new(RenameConfig::default());
    let cancel = CancellationToken::new();
    let (a, b) = tokio::join!(transform.compute_fix(view, &violation, &cancel), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        transform.compute_fix(view, &violation, &cancel).await
    });
    assert!(a.is_ok());
    assert!(matches!(b, Err(RenameError::TargetBusy(_))));
    assert!(ws.graph().type_symbol(violation.type_id).is_some());
}
