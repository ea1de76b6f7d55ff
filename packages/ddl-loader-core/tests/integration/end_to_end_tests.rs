//! Parse → reconcile → emit workflows.

use ntest::timeout;

use ddl_loader_core::{
    Crosswalk, LoaderConfig, LoaderError, MismatchPolicy, Reconciler, SchemaParser,
    StatementEmitter, TargetTable, Value,
};

use super::helpers::{dataset, reference_up_to, SMALL_DDL, SURVEY_EVENT_DDL};

/// Two new rows after a reference maximum of 100 yield a four-line script.
#[timeout(1000)]
#[test]
fn test_two_row_script() {
    let parsed = SchemaParser::parse(SMALL_DDL).unwrap();
    let schema = parsed.requirements;
    assert_eq!(schema.columns.len(), 3);

    let config = LoaderConfig::default();
    let rows = dataset(
        &["SurveyRecID", "SiteRecID", "SDate"],
        vec![
            vec![Value::Null, Value::Integer(46), Value::from("2024-06-23")],
            vec![Value::Null, Value::Integer(47), Value::from("2024-06-24")],
        ],
    );

    let reconciled = Reconciler::new(&schema, &config)
        .reconcile(&Crosswalk::new(), rows, &reference_up_to(100), "SurveyRecID")
        .unwrap();
    let statements = StatementEmitter::new(&config).emit(&schema.table_name, &reconciled);

    assert_eq!(
        statements,
        vec![
            "SET IDENTITY_INSERT dbo.SurveyEvent ON",
            "INSERT INTO dbo.SurveyEvent (SurveyRecID, SiteRecID, SDate) VALUES (101, 46, '20240623')",
            "INSERT INTO dbo.SurveyEvent (SurveyRecID, SiteRecID, SDate) VALUES (102, 47, '20240624')",
            "SET IDENTITY_INSERT dbo.SurveyEvent OFF",
        ]
    );
}

/// Full SQL Server export with a trailing constraint clause.
#[timeout(1000)]
#[test]
fn test_exported_ddl_requirements() {
    let parsed = SchemaParser::parse(SURVEY_EVENT_DDL).unwrap();
    let schema = &parsed.requirements;

    assert!(parsed.warnings.is_empty());
    assert_eq!(schema.table_name, "[dbo].[SurveyEvent]");
    assert_eq!(schema.columns.len(), 9);
    assert_eq!(schema.columns[0].name, "SurveyRecID");
    assert_eq!(schema.columns[8].name, "SurveyNotes");
    assert_eq!(schema.column("PIID").unwrap().max_length, Some(3));
    assert_eq!(schema.column("UnitID").unwrap().max_length, None);
    assert!(schema.column("UnitID").unwrap().nullable);
    assert!(!schema.column("ObsName1").unwrap().nullable);
    assert_eq!(schema.identity_column().unwrap().name, "SurveyRecID");
}

/// Crosswalk-renamed dummy survey events against the exported table.
#[timeout(1000)]
#[test]
fn test_target_prepare_with_crosswalk() {
    let mut target = TargetTable::from_ddl(SURVEY_EVENT_DDL, LoaderConfig::default()).unwrap();
    target.set_crosswalk(
        Crosswalk::new()
            .with("visit_date", "SDate")
            .with("location_id", "SiteRecID"),
    );

    let survey_events = dataset(
        &["id", "visit_date", "location_id"],
        vec![
            vec![
                Value::Integer(1),
                Value::from("2023-06-01"),
                Value::Integer(1),
            ],
            vec![
                Value::Integer(2),
                Value::from("2023-06-02"),
                Value::Integer(2),
            ],
        ],
    );
    let reference = dataset(
        &["SurveyRecID", "SiteRecID", "PIID", "SDate"],
        vec![vec![
            Value::Integer(46),
            Value::Integer(9),
            Value::from("NE1"),
            Value::from("2022-05-01"),
        ]],
    );

    let reconciled = target.reconcile(survey_events.clone(), &reference).unwrap();
    assert_eq!(reconciled.columns, vec!["SurveyRecID", "SiteRecID", "SDate"]);
    assert!(reconciled
        .report
        .violations
        .iter()
        .any(|v| v.to_string().contains("'PIID' is not supplied")));

    let statements = target.prepare(survey_events, &reference).unwrap();
    assert_eq!(statements.len(), 4);
    assert_eq!(
        statements[1],
        "INSERT INTO [dbo].[SurveyEvent] (SurveyRecID, SiteRecID, SDate) VALUES (47, 1, '20230601')"
    );
    assert_eq!(
        statements[2],
        "INSERT INTO [dbo].[SurveyEvent] (SurveyRecID, SiteRecID, SDate) VALUES (48, 2, '20230602')"
    );
}

/// Unmapped columns abort by default and are dropped on request.
#[timeout(1000)]
#[test]
fn test_mismatch_policies() {
    let rows = || {
        dataset(
            &["SiteRecID", "SDate", "observer"],
            vec![vec![Value::Integer(1), Value::Null, Value::from("Brander")]],
        )
    };

    let target = TargetTable::from_ddl(SMALL_DDL, LoaderConfig::default()).unwrap();
    match target.prepare(rows(), &reference_up_to(10)).unwrap_err() {
        LoaderError::SchemaMismatch { columns, .. } => assert_eq!(columns, vec!["observer"]),
        other => panic!("unexpected error: {:?}", other),
    }

    let lenient = TargetTable::from_ddl(
        SMALL_DDL,
        LoaderConfig {
            mismatch_policy: MismatchPolicy::DropColumns,
            ..Default::default()
        },
    )
    .unwrap();
    let statements = lenient.prepare(rows(), &reference_up_to(10)).unwrap();
    assert_eq!(
        statements[1],
        "INSERT INTO dbo.SurveyEvent (SurveyRecID, SiteRecID, SDate) VALUES (11, 1, NULL)"
    );
}

/// Identical inputs produce identical scripts.
#[timeout(1000)]
#[test]
fn test_deterministic_output() {
    let target = TargetTable::from_ddl(SMALL_DDL, LoaderConfig::default()).unwrap();
    let rows = dataset(
        &["SiteRecID", "SDate"],
        vec![vec![Value::Integer(3), Value::from("2024-01-31")]],
    );

    let first = target.prepare(rows.clone(), &reference_up_to(5)).unwrap();
    let second = target.prepare(rows, &reference_up_to(5)).unwrap();
    assert_eq!(first, second);
}
