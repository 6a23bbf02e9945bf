//! Casing pass tests through the public API

use pretty_assertions::assert_eq;
use rust_sqlfmt::format::casing::apply_casing;
use rust_sqlfmt::format::apply_casing_pass;
use rust_sqlfmt::{format_sql, parse_sql, ElementCasing, FormattingOptions};

fn case(sql: &str, options: &FormattingOptions) -> String {
    apply_casing_pass(sql, options, parse_sql(sql).as_ref())
}

// ============================================================================
// Word-level transforms
// ============================================================================

#[test]
fn test_apply_casing_policies() {
    assert_eq!(apply_casing("userName", ElementCasing::Upper), "USERNAME");
    assert_eq!(apply_casing("userName", ElementCasing::Lower), "username");
    assert_eq!(apply_casing("userName", ElementCasing::Pascal), "Username");
    assert_eq!(apply_casing("UserName", ElementCasing::Camel), "username");
    assert_eq!(apply_casing("UserName", ElementCasing::None), "UserName");
    assert_eq!(apply_casing("UserName", ElementCasing::Preserve), "UserName");
}

#[test]
fn test_apply_casing_keeps_char_count() {
    let word = "straße";
    assert_eq!(
        apply_casing(word, ElementCasing::Upper).chars().count(),
        word.chars().count()
    );
}

// ============================================================================
// Script-level casing
// ============================================================================

#[test]
fn test_keyword_casing_lower() {
    let options = FormattingOptions {
        keyword_casing: ElementCasing::Lower,
        ..FormattingOptions::preserve_casing()
    };
    assert_eq!(case("SELECT A FROM B", &options), "select A from B");
}

#[test]
fn test_create_table_columns_and_types() {
    let options = FormattingOptions {
        table_casing: ElementCasing::Upper,
        column_casing: ElementCasing::Lower,
        ..FormattingOptions::default()
    };
    assert_eq!(
        case(
            "create table Users (UserId int, UserName varchar(20))",
            &options
        ),
        "CREATE TABLE USERS (userid INT, username VARCHAR(20))"
    );
}

#[test]
fn test_casing_across_go_batches() {
    let options = FormattingOptions {
        table_casing: ElementCasing::Upper,
        column_casing: ElementCasing::Lower,
        ..FormattingOptions::default()
    };
    assert_eq!(
        case(
            "select Name from Users\ngo\nselect Name from Users",
            &options
        ),
        "SELECT name FROM USERS\nGO\nSELECT name FROM USERS"
    );
}

#[test]
fn test_exec_scenario() {
    let options = FormattingOptions {
        keyword_casing: ElementCasing::Upper,
        stored_procedure_casing: ElementCasing::None,
        ..FormattingOptions::preserve_casing()
    };
    assert_eq!(
        case("EXEC myProc1; EXEC myProc2;", &options),
        "EXEC myProc1; EXEC myProc2;"
    );
}

#[test]
fn test_casing_never_touches_protected_text() {
    let options = FormattingOptions {
        column_casing: ElementCasing::Upper,
        ..FormattingOptions::default()
    };
    let sql = "select [MixedCase], 'text' /* comment */ from t";
    assert_eq!(
        case(sql, &options),
        "SELECT [MixedCase], 'text' /* comment */ FROM t"
    );
}

#[test]
fn test_char_type_and_char_function_are_told_apart() {
    let options = FormattingOptions {
        data_type_casing: ElementCasing::Lower,
        builtin_function_casing: ElementCasing::Upper,
        insert_final_newline: false,
        ..FormattingOptions::default()
    };
    assert_eq!(
        format_sql(
            "DECLARE @c CHAR(10), @d VARCHAR(10); SELECT CHAR(65)",
            &options
        ),
        "DECLARE @c char(10), @d varchar(10); SELECT CHAR(65)"
    );
    assert_eq!(
        format_sql("SELECT CAST(x AS NCHAR(5)) AS y FROM t", &options),
        "SELECT CAST(x AS nchar(5)) AS y FROM t"
    );
}
