use std::fs;
use std::path::Path;
use tempfile::TempDir;
use ucl_stats_csvs::ReadOptions;
use ucl_stats_db::{ingest_directory, DbError, StatsDatabase, Value};

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn fixture_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "players_data.csv",
        "id_player,player_name,team,field_position\n\
         1,Raphinha,Barcelona,Forward\n\
         2,Serhou Guirassy,Dortmund,Forward\n\
         3,Harry Kane,Bayern,Forward\n",
    );
    write(
        dir.path(),
        "goals_data.csv",
        "id_player;goals;penalties\n1;13;\n2;13;4\n3;11;NaN\n",
    );
    write(
        dir.path(),
        "key_stats_data.csv",
        "id_player\tage\tmatches_appareance\n1\t28\t14\n2\t29\t14\n3\t31\t\n",
    );
    write(dir.path(), "empty.csv", "");
    write(dir.path(), "header_only.csv", "a,b,c\n");
    write(dir.path(), "README.md", "not a csv");
    dir
}

#[test]
fn test_each_file_becomes_a_table_with_all_rows() {
    let dir = fixture_dir();
    let mut db = StatsDatabase::create_in_memory().unwrap();

    let report = ingest_directory(&mut db, dir.path(), &ReadOptions::default()).unwrap();

    assert_eq!(report.loaded.len(), 3);
    assert_eq!(report.skipped.len(), 2);
    assert!(report.failed.is_empty());
    assert_eq!(report.total_rows(), 9);
    assert_eq!(report.files_seen(), 5);

    assert_eq!(
        db.table_names().unwrap(),
        vec!["goals_data", "key_stats_data", "players_data"]
    );
    for table in ["goals_data", "key_stats_data", "players_data"] {
        assert_eq!(db.row_count(table).unwrap(), 3, "{table}");
    }
    assert!(!db.table_exists("empty").unwrap());
    assert!(!db.table_exists("header_only").unwrap());
}

#[test]
fn test_reingesting_is_idempotent() {
    let dir = fixture_dir();
    let mut db = StatsDatabase::create_in_memory().unwrap();

    ingest_directory(&mut db, dir.path(), &ReadOptions::default()).unwrap();
    let first: Vec<_> = db
        .table_names()
        .unwrap()
        .iter()
        .map(|t| db.table_rows(t).unwrap())
        .collect();

    ingest_directory(&mut db, dir.path(), &ReadOptions::default()).unwrap();
    let second: Vec<_> = db
        .table_names()
        .unwrap()
        .iter()
        .map(|t| db.table_rows(t).unwrap())
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_missing_values_load_as_null() {
    let dir = fixture_dir();
    let mut db = StatsDatabase::create_in_memory().unwrap();
    ingest_directory(&mut db, dir.path(), &ReadOptions::default()).unwrap();

    let penalties = db.table_rows("goals_data").unwrap();
    let column = penalties.column("penalties").unwrap();
    assert_eq!(column, vec![&Value::Null, &Value::Real(4.0), &Value::Null]);

    let appearances = db
        .query("SELECT matches_appareance FROM key_stats_data WHERE id_player = 3")
        .unwrap();
    assert_eq!(appearances.rows, vec![vec![Value::Null]]);
}

#[test]
fn test_first_value_fixes_column_type() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "mixed.csv", "rating,note\n7.5,good\nunrated,9\n");
    let mut db = StatsDatabase::create_in_memory().unwrap();

    let report = ingest_directory(&mut db, dir.path(), &ReadOptions::default()).unwrap();

    // "unrated" cannot go into the numeric column, so the file fails as a whole
    assert!(report.loaded.is_empty());
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].error.contains("unrated"));

    write(dir.path(), "mixed.csv", "rating,note\n7.5,good\n8,9\n");
    ingest_directory(&mut db, dir.path(), &ReadOptions::default()).unwrap();
    assert_eq!(
        db.column_types("mixed").unwrap(),
        vec![
            ("rating".to_string(), "DOUBLE".to_string()),
            ("note".to_string(), "VARCHAR(255)".to_string()),
        ]
    );
    let notes = db.table_rows("mixed").unwrap();
    assert_eq!(notes.rows[1][1], Value::Text("9".into()));
}

#[test]
fn test_missing_first_value_keeps_column_numeric() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "goals_data.csv", "id_player,goals\n1,\n2,9\n3,13\n4,2\n");
    let mut db = StatsDatabase::create_in_memory().unwrap();

    ingest_directory(&mut db, dir.path(), &ReadOptions::default()).unwrap();

    assert_eq!(
        db.column_types("goals_data").unwrap()[1],
        ("goals".to_string(), "DOUBLE".to_string())
    );
    let top = db
        .query("SELECT goals FROM goals_data ORDER BY goals DESC LIMIT 3")
        .unwrap();
    assert_eq!(
        top.rows,
        vec![
            vec![Value::Real(13.0)],
            vec![Value::Real(9.0)],
            vec![Value::Real(2.0)]
        ]
    );
}

#[test]
fn test_short_row_in_semicolon_file() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "goals_data.csv",
        "id_player;player_name;goals\n1;Raphinha;13\n2;Kane\n3;Salah;4\n",
    );
    let mut db = StatsDatabase::create_in_memory().unwrap();

    let report = ingest_directory(&mut db, dir.path(), &ReadOptions::default()).unwrap();

    assert_eq!(report.loaded.len(), 1);
    assert_eq!(report.loaded[0].delimiter, b';');
    let rows = db.table_rows("goals_data").unwrap();
    assert_eq!(rows.columns, vec!["id_player", "player_name", "goals"]);
    assert_eq!(
        rows.rows[1],
        vec![Value::Real(2.0), Value::Text("Kane".into()), Value::Null]
    );
}

#[test]
fn test_quoted_newline_in_tab_file() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "players_data.csv",
        "id_player\tbio\n1\t\"Left back,\nformer winger\"\n2\tCaptain\n",
    );
    let mut db = StatsDatabase::create_in_memory().unwrap();

    let report = ingest_directory(&mut db, dir.path(), &ReadOptions::default()).unwrap();

    assert_eq!(report.loaded[0].delimiter, b'\t');
    let rows = db.table_rows("players_data").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows.rows[0][1], Value::Text("Left back,\nformer winger".into()));
}

#[test]
fn test_failing_file_does_not_stop_the_run() {
    let dir = fixture_dir();
    write(
        dir.path(),
        "attempts_data.csv",
        "id_player,total_attempts\n1,40\n2,35,extra\n",
    );
    let mut db = StatsDatabase::create_in_memory().unwrap();

    let report = ingest_directory(&mut db, dir.path(), &ReadOptions::default()).unwrap();

    assert_eq!(report.loaded.len(), 3);
    assert!(report.has_failures());
    assert_eq!(report.failed[0].table_name, "attempts_data");
    assert!(!db.table_exists("attempts_data").unwrap());
}

#[test]
fn test_colliding_table_names_keep_first_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Goals Data.csv", "id_player,goals\n1,13\n");
    write(dir.path(), "goals_data.csv", "id_player,goals\n2,9\n3,4\n");
    let mut db = StatsDatabase::create_in_memory().unwrap();

    let report = ingest_directory(&mut db, dir.path(), &ReadOptions::default()).unwrap();

    assert_eq!(report.loaded.len(), 1);
    assert_eq!(report.loaded[0].source, dir.path().join("Goals Data.csv"));
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].path, dir.path().join("goals_data.csv"));
    assert!(report.failed[0].error.contains("already loaded"));
    assert_eq!(db.row_count("goals_data").unwrap(), 1);
}

#[test]
fn test_unnamed_headers_get_placeholders() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "distribution_data.csv", ",Passing Accuracy(%),\n0,81.2,x\n");
    let mut db = StatsDatabase::create_in_memory().unwrap();

    ingest_directory(&mut db, dir.path(), &ReadOptions::default()).unwrap();

    let columns: Vec<String> = db
        .column_types("distribution_data")
        .unwrap()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(columns, vec!["col1", "passing_accuracypct", "col3"]);
}

#[test]
fn test_missing_directory_fails_the_run() {
    let dir = TempDir::new().unwrap();
    let mut db = StatsDatabase::create_in_memory().unwrap();

    let result = ingest_directory(&mut db, &dir.path().join("csv"), &ReadOptions::default());
    assert!(matches!(result, Err(DbError::Csv(_))));
}
