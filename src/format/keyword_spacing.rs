//! Keyword-phrase spacing.
//!
//! Multi-word phrases such as `LEFT OUTER JOIN` or `GROUP BY` get exactly one
//! space between their words. Only runs of spaces and tabs are collapsed; a
//! line break inside a phrase is left where it is.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::protected::{overlaps_protected, protected_ranges};

/// Phrases whose internal spacing is normalized. Longer phrases come first
/// so they win over their own suffixes.
const KEYWORD_PHRASES: &[&[&str]] = &[
    &["LEFT", "OUTER", "JOIN"],
    &["RIGHT", "OUTER", "JOIN"],
    &["FULL", "OUTER", "JOIN"],
    &["IS", "NOT", "NULL"],
    &["IF", "NOT", "EXISTS"],
    &["BEGIN", "DISTRIBUTED", "TRANSACTION"],
    &["LEFT", "JOIN"],
    &["RIGHT", "JOIN"],
    &["FULL", "JOIN"],
    &["INNER", "JOIN"],
    &["CROSS", "JOIN"],
    &["CROSS", "APPLY"],
    &["OUTER", "APPLY"],
    &["GROUP", "BY"],
    &["ORDER", "BY"],
    &["PARTITION", "BY"],
    &["IS", "NULL"],
    &["NOT", "IN"],
    &["NOT", "EXISTS"],
    &["NOT", "BETWEEN"],
    &["NOT", "LIKE"],
    &["NOT", "NULL"],
    &["INSERT", "INTO"],
    &["DELETE", "FROM"],
    &["UNION", "ALL"],
    &["CREATE", "TABLE"],
    &["ALTER", "TABLE"],
    &["DROP", "TABLE"],
    &["CREATE", "VIEW"],
    &["ALTER", "VIEW"],
    &["CREATE", "PROCEDURE"],
    &["ALTER", "PROCEDURE"],
    &["CREATE", "FUNCTION"],
    &["ALTER", "FUNCTION"],
    &["CREATE", "INDEX"],
    &["PRIMARY", "KEY"],
    &["FOREIGN", "KEY"],
    &["BEGIN", "TRANSACTION"],
    &["BEGIN", "TRAN"],
    &["COMMIT", "TRANSACTION"],
    &["COMMIT", "TRAN"],
    &["ROLLBACK", "TRANSACTION"],
    &["ROLLBACK", "TRAN"],
    &["BEGIN", "TRY"],
    &["END", "TRY"],
    &["BEGIN", "CATCH"],
    &["END", "CATCH"],
    &["IF", "EXISTS"],
    &["WITH", "TIES"],
];

static PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<String> = KEYWORD_PHRASES
        .iter()
        .map(|words| words.join(r"[ \t]+"))
        .collect();
    let pattern = format!(r"(?i)\b(?:{})\b", alternatives.join("|"));
    Regex::new(&pattern).expect("Invalid keyword phrase regex")
});

static BLANKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("Invalid blank run regex"));

/// Collapse the spacing inside known keyword phrases outside protected
/// regions.
pub fn normalize_keyword_spacing(text: &str) -> String {
    if !PHRASE_RE.is_match(text) {
        return text.to_string();
    }

    let ranges = protected_ranges(text);
    PHRASE_RE
        .replace_all(text, |caps: &Captures| {
            let Some(m) = caps.get(0) else {
                return String::new();
            };
            if overlaps_protected(&ranges, &m.range()) {
                m.as_str().to_string()
            } else {
                BLANKS_RE.replace_all(m.as_str(), " ").into_owned()
            }
        })
        .into_owned()
}
