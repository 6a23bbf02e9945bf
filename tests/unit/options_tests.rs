//! Formatting option loading tests

use std::io::Write;

use rust_sqlfmt::{
    load_options, CommaStyle, ElementCasing, FormatError, FormattingOptions, IndentStyle,
    LineEnding,
};
use tempfile::NamedTempFile;

/// Helper to create a temp TOML file with content
fn create_config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".toml").unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_defaults() {
    let options = FormattingOptions::default();

    assert_eq!(options.indent_style, IndentStyle::Spaces);
    assert_eq!(options.indent_size, 4);
    assert_eq!(options.line_ending, LineEnding::Auto);
    assert!(options.insert_final_newline);
    assert!(options.trim_trailing_whitespace);
    assert_eq!(options.max_consecutive_blank_lines, 2);
    assert_eq!(options.comma_style, CommaStyle::Preserve);
    assert_eq!(options.keyword_casing, ElementCasing::Upper);
    assert_eq!(options.column_casing, ElementCasing::Preserve);
}

#[test]
fn test_load_options_from_file() {
    let file = create_config_file(
        r#"
indent-style = "tabs"
indent-size = 2
line-ending = "crlf"
comma-style = "leading"
keyword-casing = "lower"
table-casing = "pascal"
operator-spacing = false
"#,
    );

    let options = load_options(file.path()).unwrap();

    assert_eq!(options.indent_style, IndentStyle::Tabs);
    assert_eq!(options.effective_indent_size(), 2);
    assert_eq!(options.line_ending, LineEnding::CrLf);
    assert_eq!(options.comma_style, CommaStyle::Leading);
    assert_eq!(options.keyword_casing, ElementCasing::Lower);
    assert_eq!(options.table_casing, ElementCasing::Pascal);
    assert!(!options.operator_spacing);
    assert!(options.keyword_spacing);
}

#[test]
fn test_empty_file_gives_defaults() {
    let file = create_config_file("");
    assert_eq!(load_options(file.path()).unwrap(), FormattingOptions::default());
}

#[test]
fn test_invalid_value_is_a_parse_error() {
    let file = create_config_file("indent-style = \"both\"\n");
    let err = load_options(file.path()).unwrap_err();
    assert!(matches!(err, FormatError::ConfigParse { .. }));
}

#[test]
fn test_missing_file_is_a_read_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = load_options(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, FormatError::ConfigRead { .. }));
}
