//! File-level formatting tests

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use rust_sqlfmt::{files, format_sql_file, format_sql_files, FormatError, FormattingOptions};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_format_file_reports_change() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "query.sql", b"select a+b from t\n");

    let file = format_sql_file(&path, &FormattingOptions::default()).unwrap();

    assert_eq!(file.path, path);
    assert_eq!(file.original, "select a+b from t\n");
    assert_eq!(file.formatted, "SELECT a + b FROM t\n");
    assert!(file.is_changed());

    // The file on disk is not modified
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "select a+b from t\n"
    );
}

#[test]
fn test_formatted_file_is_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "clean.sql", b"SELECT a + b FROM t\n");

    let file = format_sql_file(&path, &FormattingOptions::default()).unwrap();
    assert!(!file.is_changed());
}

#[test]
fn test_bom_is_dropped_before_formatting() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "bom.sql", b"\xEF\xBB\xBFselect 1\r\n");

    let file = format_sql_file(&path, &FormattingOptions::default()).unwrap();
    assert_eq!(file.formatted, "SELECT 1\r\n");
}

#[test]
fn test_windows_1252_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "legacy.sql", b"select 'caf\xE9'\n");

    let file = format_sql_file(&path, &FormattingOptions::default()).unwrap();
    assert_eq!(file.formatted, "SELECT 'café'\n");
}

#[test]
fn test_write_back_then_reformat_is_stable() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "query.sql", b"select id,name\nfrom users   \n\n\n\nwhere id=1");
    let options = FormattingOptions::default();

    let first = format_sql_file(&path, &options).unwrap();
    files::write_sql_file(&path, &first.formatted).unwrap();

    let second = format_sql_file(&path, &options).unwrap();
    assert!(!second.is_changed());
    assert_eq!(
        second.formatted,
        "SELECT id, name\nFROM users\n\n\nWHERE id = 1\n"
    );
}

#[test]
fn test_format_many_files_keeps_order() {
    let dir = TempDir::new().unwrap();
    // Enough files to take the parallel path
    let paths: Vec<PathBuf> = (0..12)
        .map(|i| {
            let sql = format!("select {i} as n\n");
            write_file(&dir, &format!("q{i:02}.sql"), sql.as_bytes())
        })
        .collect();

    let results = format_sql_files(&paths, &FormattingOptions::default());

    assert_eq!(results.len(), paths.len());
    for (i, result) in results.iter().enumerate() {
        let file = result.as_ref().unwrap();
        assert_eq!(file.path, paths[i]);
        assert_eq!(file.formatted, format!("SELECT {i} AS n\n"));
    }
}

#[test]
fn test_one_missing_file_does_not_stop_the_rest() {
    let dir = TempDir::new().unwrap();
    let good = write_file(&dir, "good.sql", b"select 1\n");
    let missing = dir.path().join("missing.sql");

    let results = format_sql_files(&[good, missing], &FormattingOptions::default());

    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(FormatError::FileRead { .. })));
}
