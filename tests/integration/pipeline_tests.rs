//! End-to-end formatting tests through `format_sql`

use pretty_assertions::assert_eq;
use rust_sqlfmt::{
    format_sql, CommaStyle, ElementCasing, FormattingOptions, IndentStyle, LineEnding,
};

fn exact() -> FormattingOptions {
    FormattingOptions {
        insert_final_newline: false,
        ..FormattingOptions::default()
    }
}

// ============================================================================
// Reference Scenarios
// ============================================================================

#[test]
fn test_operator_spacing_scenario() {
    assert_eq!(
        format_sql("SELECT a+b WHERE x=1", &exact()),
        "SELECT a + b WHERE x = 1"
    );
}

#[test]
fn test_blank_line_scenario() {
    let options = FormattingOptions {
        max_consecutive_blank_lines: 1,
        ..exact()
    };
    assert_eq!(
        format_sql("SELECT id,\n\n\n\nname", &options),
        "SELECT id,\n\nname"
    );
}

#[test]
fn test_function_casing_scenario() {
    let options = FormattingOptions {
        builtin_function_casing: ElementCasing::Upper,
        keyword_casing: ElementCasing::Upper,
        function_paren_spacing: true,
        ..exact()
    };
    assert_eq!(
        format_sql("select count (*) from users", &options),
        "SELECT COUNT(*) FROM users"
    );
}

#[test]
fn test_indent_style_scenario() {
    let spaces = FormattingOptions {
        indent_style: IndentStyle::Spaces,
        indent_size: 4,
        ..exact()
    };
    assert_eq!(format_sql("\tSELECT", &spaces), "    SELECT");

    let tabs = FormattingOptions {
        indent_style: IndentStyle::Tabs,
        indent_size: 4,
        ..exact()
    };
    assert_eq!(format_sql("\tSELECT", &tabs), "\tSELECT");
}

#[test]
fn test_exec_scenario() {
    let options = FormattingOptions {
        stored_procedure_casing: ElementCasing::None,
        keyword_casing: ElementCasing::Upper,
        ..exact()
    };
    assert_eq!(
        format_sql("exec myProc1; exec myProc2;", &options),
        "EXEC myProc1; EXEC myProc2;"
    );
}

// ============================================================================
// Protected Regions
// ============================================================================

#[test]
fn test_string_contents_are_untouched() {
    let sql = "SELECT 'a,b',  'test  string'";
    assert_eq!(format_sql(sql, &exact()), sql);
}

#[test]
fn test_comments_and_quoted_names_are_untouched() {
    let sql = "select [a+b],\"x=y\" -- a+b,c  \nfrom t /* WHERE x=1 */";
    assert_eq!(
        format_sql(sql, &exact()),
        "SELECT [a+b], \"x=y\" -- a+b,c  \nFROM t /* WHERE x=1 */"
    );
}

#[test]
fn test_multiline_string_keeps_inner_lines() {
    let sql = "SELECT 'line one   \n\n\n\n\tline two'\nFROM t";
    let options = FormattingOptions {
        max_consecutive_blank_lines: 1,
        ..exact()
    };
    assert_eq!(format_sql(sql, &options), sql);
}

// ============================================================================
// Whitespace, Line Endings, Comma Style
// ============================================================================

#[test]
fn test_auto_line_ending_follows_input() {
    let options = FormattingOptions::default();
    assert_eq!(
        format_sql("SELECT 1\r\nFROM t   \nWHERE x=1", &options),
        "SELECT 1\r\nFROM t\r\nWHERE x = 1\r\n"
    );
}

#[test]
fn test_explicit_lf() {
    let options = FormattingOptions {
        line_ending: LineEnding::Lf,
        ..FormattingOptions::default()
    };
    assert_eq!(format_sql("SELECT 1\r\nFROM t", &options), "SELECT 1\nFROM t\n");
}

#[test]
fn test_leading_blank_lines_trimmed() {
    assert_eq!(format_sql("\n\n\nSELECT 1", &exact()), "SELECT 1");
}

#[test]
fn test_leading_comma_style() {
    let options = FormattingOptions {
        comma_style: CommaStyle::Leading,
        ..exact()
    };
    assert_eq!(
        format_sql("SELECT\n    id,\n    name,\n    email\nFROM users", &options),
        "SELECT\n    id\n    , name\n    , email\nFROM users"
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(format_sql("", &FormattingOptions::default()), "");
}

// ============================================================================
// Idempotence
// ============================================================================

const SCRIPT: &str = "\
create table dbo.Users (id int not null, name nvarchar(50))
go


select u.id,count (*) as cnt ,max(o.total)*2 as doubled
from dbo.Users u
left   join dbo.Orders o on o.user_id=u.id
where u.id>=10 and o.total<>-1   -- skip refunds
group by u.id



order by cnt desc
";

#[test]
fn test_full_pipeline_is_idempotent() {
    let options = FormattingOptions::default();
    let once = format_sql(SCRIPT, &options);
    let twice = format_sql(&once, &options);
    assert_eq!(twice, once);
}

#[test]
fn test_full_pipeline_is_idempotent_with_leading_commas() {
    let options = FormattingOptions {
        comma_style: CommaStyle::Leading,
        indent_style: IndentStyle::Tabs,
        line_ending: LineEnding::CrLf,
        ..FormattingOptions::default()
    };
    let once = format_sql(SCRIPT, &options);
    let twice = format_sql(&once, &options);
    assert_eq!(twice, once);
}

#[test]
fn test_full_pipeline_reference_output() {
    let options = FormattingOptions {
        line_ending: LineEnding::Lf,
        ..FormattingOptions::default()
    };
    let formatted = format_sql(SCRIPT, &options);

    assert!(formatted
        .starts_with("CREATE TABLE dbo.Users (id INT NOT NULL, name NVARCHAR(50))\nGO\n"));
    assert!(formatted
        .contains("SELECT u.id, COUNT(*) AS cnt , MAX(o.total) * 2 AS doubled\n"));
    assert!(formatted.contains("LEFT JOIN dbo.Orders o ON o.user_id = u.id\n"));
    assert!(formatted.contains("WHERE u.id >= 10 AND o.total <> -1   -- skip refunds\n"));
    assert!(formatted.contains("GROUP BY u.id\n\n\nORDER BY cnt DESC\n"));
    assert!(!formatted.contains("\n\n\n\n"));
}

#[test]
fn test_unparsable_script_is_idempotent() {
    let sql = "select a+b,(c from t\n\n\n\nwhere x=-1";
    let options = FormattingOptions::default();
    let once = format_sql(sql, &options);
    assert_eq!(format_sql(&once, &options), once);
}
