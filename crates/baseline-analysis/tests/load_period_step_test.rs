//! End-to-end tests for the load-period step: precedence, override
//! reconciliation, conflict notices, first-analysis short-circuits, and
//! failure propagation.

use std::path::PathBuf;
use std::sync::Mutex;

use baseline_analysis::{AnalysisContext, LoadPeriodStep, PeriodResolver};
use baseline_core::errors::{HolderError, ResolveError, StepError};
use baseline_core::messages::TaskMessages;
use baseline_core::period::{NewCodePeriod, NewCodePeriodKind, Period, PeriodHolder};
use baseline_core::traits::Clock;
use baseline_storage::queries::new_code_periods;
use baseline_storage::DatabaseManager;
use rusqlite::{params, Connection};
use tempfile::TempDir;

struct FixedClock(i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

/// Records every definition handed to it and returns a canned period.
#[derive(Default)]
struct RecordingResolver {
    calls: Mutex<Vec<(String, NewCodePeriod, String)>>,
}

impl RecordingResolver {
    fn calls(&self) -> Vec<(String, NewCodePeriod, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl PeriodResolver for RecordingResolver {
    fn resolve(
        &self,
        _conn: &Connection,
        branch_uuid: &str,
        period: &NewCodePeriod,
        project_version: &str,
    ) -> Result<Period, ResolveError> {
        self.calls.lock().unwrap().push((
            branch_uuid.to_string(),
            period.clone(),
            project_version.to_string(),
        ));
        Ok(Period::new(
            period.kind(),
            period.value().map(str::to_string),
            Some(1_700_000_000_000),
        ))
    }
}

/// Always fails the way a materializer does when no snapshot matches.
struct FailingResolver;

impl PeriodResolver for FailingResolver {
    fn resolve(
        &self,
        _conn: &Connection,
        _branch_uuid: &str,
        _period: &NewCodePeriod,
        _project_version: &str,
    ) -> Result<Period, ResolveError> {
        Err(ResolveError::NoMatchingSnapshot {
            message: "no analysis found before the configured period".to_string(),
        })
    }
}

struct Harness {
    _dir: TempDir,
    db_path: PathBuf,
    db: DatabaseManager,
}

impl Harness {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("baseline.db");
        let db = DatabaseManager::open(&db_path).unwrap();
        Self {
            _dir: dir,
            db_path,
            db,
        }
    }

    /// A side connection for fixtures the store API cannot produce.
    fn raw_conn(&self) -> Connection {
        Connection::open(&self.db_path).unwrap()
    }

    fn run(
        &self,
        context: &AnalysisContext,
        resolver: &dyn PeriodResolver,
    ) -> (Result<(), StepError>, PeriodHolder, TaskMessages) {
        let holder = PeriodHolder::new();
        let messages = TaskMessages::new();
        let clock = FixedClock(42);
        let step = LoadPeriodStep::new(&self.db, context, resolver, &holder, &messages, &clock);
        let result = step.execute();
        (result, holder, messages)
    }
}

fn branch_context() -> AnalysisContext {
    AnalysisContext {
        branch_analysis: true,
        first_analysis: false,
        reference_branch_override: None,
        branch_uuid: "branch-1".to_string(),
        project_uuid: "project-1".to_string(),
        project_version: "1.2.0".to_string(),
    }
}

#[test]
fn non_branch_analysis_publishes_no_period_without_touching_the_store() {
    let harness = Harness::new();
    // Any store lookup would now fail loudly.
    harness
        .raw_conn()
        .execute_batch("DROP TABLE new_code_periods;")
        .unwrap();

    let context = AnalysisContext {
        branch_analysis: false,
        ..branch_context()
    };
    let resolver = RecordingResolver::default();
    let (result, holder, messages) = harness.run(&context, &resolver);

    result.unwrap();
    assert_eq!(holder.period().unwrap(), None);
    assert!(resolver.calls().is_empty());
    assert!(messages.is_empty());
}

#[test]
fn first_analysis_without_override_or_settings_publishes_no_period() {
    let harness = Harness::new();
    let context = AnalysisContext {
        first_analysis: true,
        ..branch_context()
    };
    let resolver = RecordingResolver::default();
    let (result, holder, _messages) = harness.run(&context, &resolver);

    result.unwrap();
    assert_eq!(holder.period().unwrap(), None);
    assert!(resolver.calls().is_empty());
}

#[test]
fn no_settings_anywhere_resolves_the_default_definition() {
    let harness = Harness::new();
    let resolver = RecordingResolver::default();
    let (result, holder, _messages) = harness.run(&branch_context(), &resolver);

    result.unwrap();
    let calls = resolver.calls();
    assert_eq!(
        calls,
        vec![(
            "branch-1".to_string(),
            NewCodePeriod::PreviousVersion,
            "1.2.0".to_string()
        )]
    );
    assert_eq!(
        holder.period().unwrap().unwrap().mode(),
        NewCodePeriodKind::PreviousVersion
    );
}

#[test]
fn branch_setting_outranks_project_setting() {
    let harness = Harness::new();
    harness
        .db
        .with_writer(|conn| {
            new_code_periods::upsert_branch(
                conn,
                "project-1",
                "branch-1",
                &NewCodePeriod::NumberOfDays("30".to_string()),
                1000,
            )?;
            new_code_periods::upsert_project(
                conn,
                "project-1",
                &NewCodePeriod::Version("2.0".to_string()),
                1000,
            )
        })
        .unwrap();

    let resolver = RecordingResolver::default();
    let (result, holder, messages) = harness.run(&branch_context(), &resolver);

    result.unwrap();
    assert_eq!(
        resolver.calls()[0].1,
        NewCodePeriod::NumberOfDays("30".to_string())
    );
    assert!(messages.is_empty());
    assert!(holder.has_period().unwrap());
}

#[test]
fn branch_hit_short_circuits_the_project_lookup() {
    let harness = Harness::new();
    harness
        .db
        .with_writer(|conn| {
            new_code_periods::upsert_branch(
                conn,
                "project-1",
                "branch-1",
                &NewCodePeriod::NumberOfDays("30".to_string()),
                1000,
            )
        })
        .unwrap();
    // A project-level row that errors if it is ever read.
    harness
        .raw_conn()
        .execute(
            "INSERT INTO new_code_periods (project_uuid, branch_uuid, kind, value, updated_at)
             VALUES (?1, NULL, 'BOGUS', 'x', 0)",
            params!["project-1"],
        )
        .unwrap();

    let resolver = RecordingResolver::default();
    let (result, _holder, _messages) = harness.run(&branch_context(), &resolver);

    result.unwrap();
    assert_eq!(
        resolver.calls()[0].1,
        NewCodePeriod::NumberOfDays("30".to_string())
    );
}

#[test]
fn specific_hit_skips_the_global_lookup() {
    let harness = Harness::new();
    harness
        .db
        .with_writer(|conn| {
            new_code_periods::upsert_project(
                conn,
                "project-1",
                &NewCodePeriod::Version("2.0".to_string()),
                1000,
            )
        })
        .unwrap();
    // A global row that errors if it is ever read.
    harness
        .raw_conn()
        .execute(
            "INSERT INTO new_code_periods (project_uuid, branch_uuid, kind, value, updated_at)
             VALUES (NULL, NULL, 'BOGUS', 'x', 0)",
            [],
        )
        .unwrap();

    let resolver = RecordingResolver::default();
    let (result, _holder, _messages) = harness.run(&branch_context(), &resolver);

    result.unwrap();
    assert_eq!(
        resolver.calls()[0].1,
        NewCodePeriod::Version("2.0".to_string())
    );
}

#[test]
fn global_setting_is_the_fallback_for_unconfigured_projects() {
    let harness = Harness::new();
    harness
        .db
        .with_writer(|conn| {
            new_code_periods::upsert_global(
                conn,
                &NewCodePeriod::NumberOfDays("21".to_string()),
                1000,
            )
        })
        .unwrap();

    let resolver = RecordingResolver::default();
    let (result, _holder, messages) = harness.run(&branch_context(), &resolver);

    result.unwrap();
    assert_eq!(
        resolver.calls()[0].1,
        NewCodePeriod::NumberOfDays("21".to_string())
    );
    assert!(messages.is_empty());
}

#[test]
fn override_wins_and_flags_the_conflict_once() {
    let harness = Harness::new();
    harness
        .db
        .with_writer(|conn| {
            new_code_periods::upsert_project(
                conn,
                "project-1",
                &NewCodePeriod::Version("1.0".to_string()),
                1000,
            )
        })
        .unwrap();

    let context = AnalysisContext {
        reference_branch_override: Some("main".to_string()),
        ..branch_context()
    };
    let resolver = RecordingResolver::default();
    let (result, holder, messages) = harness.run(&context, &resolver);

    result.unwrap();
    assert_eq!(
        resolver.calls(),
        vec![(
            "branch-1".to_string(),
            NewCodePeriod::ReferenceBranch("main".to_string()),
            "1.2.0".to_string()
        )]
    );

    let notices = messages.all();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].text.contains("reference branch"));
    assert_eq!(notices[0].timestamp_ms, 42);

    assert_eq!(
        holder.period().unwrap().unwrap().mode(),
        NewCodePeriodKind::ReferenceBranch
    );
}

#[test]
fn override_against_global_only_is_not_a_conflict() {
    let harness = Harness::new();
    // Even a poisoned global row stays untouched on the override path.
    harness
        .raw_conn()
        .execute(
            "INSERT INTO new_code_periods (project_uuid, branch_uuid, kind, value, updated_at)
             VALUES (NULL, NULL, 'BOGUS', 'x', 0)",
            [],
        )
        .unwrap();

    let context = AnalysisContext {
        reference_branch_override: Some("main".to_string()),
        ..branch_context()
    };
    let resolver = RecordingResolver::default();
    let (result, _holder, messages) = harness.run(&context, &resolver);

    result.unwrap();
    assert!(messages.is_empty());
    assert_eq!(
        resolver.calls()[0].1,
        NewCodePeriod::ReferenceBranch("main".to_string())
    );
}

#[test]
fn blank_override_is_treated_as_absent() {
    let harness = Harness::new();
    let context = AnalysisContext {
        reference_branch_override: Some("   ".to_string()),
        ..branch_context()
    };
    let resolver = RecordingResolver::default();
    let (result, _holder, messages) = harness.run(&context, &resolver);

    result.unwrap();
    assert!(messages.is_empty());
    assert_eq!(resolver.calls()[0].1, NewCodePeriod::PreviousVersion);
}

#[test]
fn first_analysis_suppresses_non_reference_branch_settings() {
    let harness = Harness::new();
    harness
        .db
        .with_writer(|conn| {
            new_code_periods::upsert_branch(
                conn,
                "project-1",
                "branch-1",
                &NewCodePeriod::NumberOfDays("30".to_string()),
                1000,
            )
        })
        .unwrap();

    let context = AnalysisContext {
        first_analysis: true,
        ..branch_context()
    };
    let resolver = RecordingResolver::default();
    let (result, holder, _messages) = harness.run(&context, &resolver);

    result.unwrap();
    assert_eq!(holder.period().unwrap(), None);
    assert!(resolver.calls().is_empty());
}

#[test]
fn first_analysis_still_materializes_a_reference_branch_setting() {
    let harness = Harness::new();
    harness
        .db
        .with_writer(|conn| {
            new_code_periods::upsert_branch(
                conn,
                "project-1",
                "branch-1",
                &NewCodePeriod::ReferenceBranch("develop".to_string()),
                1000,
            )
        })
        .unwrap();

    let context = AnalysisContext {
        first_analysis: true,
        ..branch_context()
    };
    let resolver = RecordingResolver::default();
    let (result, holder, _messages) = harness.run(&context, &resolver);

    result.unwrap();
    assert_eq!(
        resolver.calls()[0].1,
        NewCodePeriod::ReferenceBranch("develop".to_string())
    );
    assert!(holder.has_period().unwrap());
}

#[test]
fn first_analysis_with_override_materializes_normally() {
    let harness = Harness::new();
    let context = AnalysisContext {
        first_analysis: true,
        reference_branch_override: Some("main".to_string()),
        ..branch_context()
    };
    let resolver = RecordingResolver::default();
    let (result, holder, messages) = harness.run(&context, &resolver);

    result.unwrap();
    assert_eq!(
        resolver.calls()[0].1,
        NewCodePeriod::ReferenceBranch("main".to_string())
    );
    assert!(messages.is_empty());
    assert!(holder.has_period().unwrap());
}

#[test]
fn resolver_failure_propagates_verbatim_and_publishes_nothing() {
    let harness = Harness::new();
    let (result, holder, _messages) = harness.run(&branch_context(), &FailingResolver);

    let err = result.unwrap_err();
    assert!(matches!(
        err,
        StepError::Resolve(ResolveError::NoMatchingSnapshot { .. })
    ));
    // Transparent propagation: the user sees the resolver's message.
    assert_eq!(
        err.to_string(),
        "no analysis found before the configured period"
    );
    assert_eq!(holder.period().unwrap_err(), HolderError::NotSet);
}

#[test]
fn identical_inputs_resolve_the_same_effective_definition() {
    let harness = Harness::new();
    harness
        .db
        .with_writer(|conn| {
            new_code_periods::upsert_project(
                conn,
                "project-1",
                &NewCodePeriod::Version("3.1".to_string()),
                1000,
            )
        })
        .unwrap();

    let resolver = RecordingResolver::default();
    let context = branch_context();
    let (first, ..) = harness.run(&context, &resolver);
    let (second, ..) = harness.run(&context, &resolver);

    first.unwrap();
    second.unwrap();
    let calls = resolver.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
}
