//! Batch splitting and parsing tests

use rust_sqlfmt::parser::{parse_sql, split_batches};

// ============================================================================
// Batch Separator Tests
// ============================================================================

#[test]
fn test_split_batches_basic() {
    let sql = "CREATE TABLE t1 (id INT)\nGO\nCREATE TABLE t2 (id INT)";
    let batches = split_batches(sql);

    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].content, "CREATE TABLE t1 (id INT)\n");
    assert_eq!(batches[0].start_line, 1);
    assert_eq!(batches[1].content, "CREATE TABLE t2 (id INT)");
    assert_eq!(batches[1].start_line, 3);
}

#[test]
fn test_split_batches_case_insensitive_go() {
    let sql = "SELECT 1\ngo\nSELECT 2\n  Go;  \nSELECT 3";
    let batches = split_batches(sql);

    assert_eq!(batches.len(), 3);
    assert_eq!(batches[2].start_line, 5);
}

#[test]
fn test_split_batches_crlf() {
    let sql = "SELECT 1\r\nGO\r\nSELECT 2\r\n";
    let batches = split_batches(sql);

    assert_eq!(batches.len(), 2);
    assert_eq!(batches[1].content, "SELECT 2\r\n");
    assert_eq!(batches[1].start_line, 3);
}

#[test]
fn test_go_inside_identifier_is_not_a_separator() {
    let sql = "SELECT GOAL FROM t\nGOTO label";
    assert_eq!(split_batches(sql).len(), 1);
}

// ============================================================================
// Parse Tests
// ============================================================================

#[test]
fn test_parse_multiple_batches() {
    let sql = "CREATE TABLE t1 (id INT)\nGO\nSELECT id FROM t1;\nSELECT 2";
    let parsed = parse_sql(sql).expect("script should parse");

    assert_eq!(parsed.batches().len(), 2);
    assert_eq!(parsed.statement_count(), 3);
    assert_eq!(parsed.batches()[1].start_line, 3);
}

#[test]
fn test_parse_skips_empty_batches() {
    let parsed = parse_sql("GO\n\nGO\nSELECT 1").expect("script should parse");
    assert_eq!(parsed.batches().len(), 1);
}

#[test]
fn test_parse_failure_returns_none() {
    assert!(parse_sql("SELECT FROM WHERE (").is_none());
    assert!(parse_sql("SELECT 'unterminated").is_none());
}

#[test]
fn test_one_bad_batch_fails_the_script() {
    assert!(parse_sql("SELECT 1\nGO\nSELECT (").is_none());
}

#[test]
fn test_token_positions_are_script_level() {
    let sql = "SELECT 1\nGO\nSELECT a";
    let parsed = parse_sql(sql).expect("script should parse");
    let batch = &parsed.batches()[1];
    let first = &batch.tokens.tokens()[0];

    assert_eq!(batch.start_line, 3);
    assert_eq!(first.start.line, 3);
    assert_eq!(first.start.column, 1);
}
