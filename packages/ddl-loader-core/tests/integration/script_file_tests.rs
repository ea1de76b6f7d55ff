//! Script files on disk and post-load validation.

use std::fs;

use ntest::timeout;
use tempfile::tempdir;

use ddl_loader_core::{Crosswalk, Dataset, LoaderConfig, LoaderError, TargetTable, Value};

use super::helpers::{dataset, reference_up_to, SMALL_DDL, SURVEY_EVENT_DDL};

#[timeout(1000)]
#[test]
fn test_targets_from_files() {
    let temp_dir = tempdir().unwrap();
    let ddl_path = temp_dir.path().join("create_SurveyEvent.sql");
    fs::write(&ddl_path, SURVEY_EVENT_DDL).unwrap();

    let target = TargetTable::from_ddl_file(&ddl_path, LoaderConfig::default()).unwrap();
    assert_eq!(target.table_name(), "[dbo].[SurveyEvent]");
    assert_eq!(target.ddl_path.as_deref(), Some(ddl_path.as_path()));
}

#[timeout(1000)]
#[test]
fn test_missing_ddl_file() {
    let temp_dir = tempdir().unwrap();
    let err = TargetTable::from_ddl_file(
        &temp_dir.path().join("missing.sql"),
        LoaderConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, LoaderError::IoError(_)));
}

#[timeout(1000)]
#[test]
fn test_write_script_one_statement_per_line() {
    let temp_dir = tempdir().unwrap();
    let mut target = TargetTable::from_ddl(SMALL_DDL, LoaderConfig::default()).unwrap();
    target
        .set_insert_path(temp_dir.path().join("insert_SurveyEvent.sql"))
        .unwrap();

    let rows = dataset(
        &["SiteRecID", "SDate"],
        vec![
            vec![Value::Integer(1), Value::from("2024-06-23")],
            vec![Value::Integer(2), Value::Null],
        ],
    );
    let statements = target.prepare(rows, &reference_up_to(100)).unwrap();
    let path = target.write_script(&statements).unwrap().to_path_buf();

    let text = fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "SET IDENTITY_INSERT dbo.SurveyEvent ON");
    assert!(lines[1].ends_with("VALUES (101, 1, '20240623')"));
    assert!(lines[2].ends_with("VALUES (102, 2, NULL)"));
    assert_eq!(lines[3], "SET IDENTITY_INSERT dbo.SurveyEvent OFF");
    assert!(!text.ends_with('\n'));
}

#[timeout(1000)]
#[test]
fn test_json_inputs_and_load_validation() {
    let temp_dir = tempdir().unwrap();
    let dataset_path = temp_dir.path().join("survey_events.json");
    let xwalk_path = temp_dir.path().join("xwalk.json");
    fs::write(
        &dataset_path,
        r#"{"columns": ["id", "visit_date", "location_id"],
            "rows": [[1, "2023-06-01", 1], [2, "2023-06-02", 2]]}"#,
    )
    .unwrap();
    fs::write(
        &xwalk_path,
        r#"{"visit_date": "SDate", "location_id": "SiteRecID"}"#,
    )
    .unwrap();

    let survey_events = Dataset::from_json_file(&dataset_path).unwrap();
    let mut target = TargetTable::from_ddl(SMALL_DDL, LoaderConfig::default()).unwrap();
    target.set_crosswalk(Crosswalk::from_json_file(&xwalk_path).unwrap());

    let reference = reference_up_to(100);
    let added = survey_events.row_count();
    let statements = target.prepare(survey_events, &reference).unwrap();
    assert_eq!(statements.len(), added + 2);

    let before = reference.row_count();
    assert!(target.validate_load(before, before + added, added).is_ok());
    assert!(matches!(
        target.validate_load(before, before, added),
        Err(LoaderError::LoadCountMismatch { .. })
    ));
}
