//! Operator spacing.
//!
//! Puts exactly one space on each side of binary arithmetic and comparison
//! operators where spacing is missing. Existing spacing is never removed or
//! collapsed, which keeps hand-aligned code intact and makes the pass
//! idempotent. Unary signs and the various `*` wildcards never get a space
//! inserted before them.

use crate::parser::Position;

use super::line_endings::split_lines;
use super::operator_context::{OperatorContext, OperatorContextMap};
use super::protected::{Cursor, ProtectedRegionTracker};

/// Keywords after which a `+`/`-` starts an expression.
const UNARY_PRECEDING_KEYWORDS: &[&str] = &[
    "SELECT", "WHERE", "AND", "OR", "NOT", "ON", "WHEN", "THEN", "ELSE", "RETURN", "HAVING",
    "BETWEEN", "LIKE", "IN", "BY", "TOP", "CASE", "IS", "VALUES", "PRINT", "DEFAULT",
];

/// Keywords after which a `*` is a select-list wildcard.
const STAR_PRECEDING_KEYWORDS: &[&str] = &["SELECT", "DISTINCT", "ALL"];

/// Normalize operator spacing line by line.
///
/// `contexts` is the AST-derived map, or `None` when the input did not
/// parse; unknown positions fall back to a lexical heuristic.
pub fn normalize_operator_spacing(text: &str, contexts: Option<&OperatorContextMap>) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 16);
    let mut tracker = ProtectedRegionTracker::new();

    for (idx, line) in split_lines(text).iter().enumerate() {
        space_line(line.content, idx + 1, contexts, &mut tracker, &mut out);
        out.push_str(line.terminator);
    }

    out
}

fn space_line(
    content: &str,
    line_number: usize,
    contexts: Option<&OperatorContextMap>,
    tracker: &mut ProtectedRegionTracker,
    out: &mut String,
) {
    let mut cursor = Cursor::new(content);
    let line_start = out.len();
    let mut column = 1;

    // Leading indentation is copied verbatim
    if !tracker.is_active() {
        while let Some(ch @ (' ' | '\t')) = cursor.current() {
            out.push(ch);
            cursor.advance();
            column += 1;
        }
    }

    while !cursor.is_at_end() {
        let start = cursor.pos();
        if tracker.skip_protected(&mut cursor, out) {
            column += content[start..cursor.pos()].chars().count();
            continue;
        }

        let width = operator_width(&cursor);
        if width == 0 {
            cursor.bump_into(out);
            column += 1;
            continue;
        }

        let before = &content[..start];
        let mut context = contexts
            .map(|map| map.get_context(Position::new(line_number, column)))
            .unwrap_or_default();
        if context == OperatorContext::Unknown {
            context = lexical_context(&cursor, width, before);
        }

        if context.is_spaced() {
            let at_line_start = out[line_start..].trim().is_empty();
            if !at_line_start && !out.ends_with(char::is_whitespace) {
                out.push(' ');
            }
            cursor.consume_into(width, out);
            if matches!(cursor.current(), Some(next) if !next.is_whitespace()) {
                out.push(' ');
            }
        } else {
            cursor.consume_into(width, out);
        }
        column += width;
    }
}

/// Width in characters of the operator at the cursor, 0 if none.
fn operator_width(cursor: &Cursor) -> usize {
    let Some(ch) = cursor.current() else {
        return 0;
    };
    let next = cursor.peek(1);
    match (ch, next) {
        ('<', Some('>' | '=')) | ('>', Some('=')) | ('!', Some('=' | '<' | '>')) => 2,
        ('+' | '-' | '*' | '/' | '%', Some('=')) => 2,
        ('+' | '-' | '*' | '/' | '%' | '=' | '<' | '>', _) => 1,
        _ => 0,
    }
}

/// Lexical fallback used when the AST has nothing to say about a position.
fn lexical_context(cursor: &Cursor, width: usize, before: &str) -> OperatorContext {
    if width == 2 {
        return OperatorContext::Comparison;
    }
    let Some(ch) = cursor.current() else {
        return OperatorContext::Unknown;
    };
    let prev = before.trim_end_matches([' ', '\t']);
    let prev_char = prev.chars().last();

    match ch {
        '+' | '-' => {
            if is_scientific_exponent(before) {
                return OperatorContext::UnarySign;
            }
            match prev_char {
                None => OperatorContext::UnarySign,
                Some('(' | ',' | '=' | '<' | '>' | '!' | '+' | '-' | '*' | '/' | '%') => {
                    OperatorContext::UnarySign
                }
                Some(_) if ends_with_keyword(prev, UNARY_PRECEDING_KEYWORDS) => {
                    OperatorContext::UnarySign
                }
                Some(_) => OperatorContext::BinaryArithmetic,
            }
        }
        '*' => match prev_char {
            None | Some(',') => OperatorContext::SelectStar,
            Some('(') => OperatorContext::FunctionStar,
            Some('.') => OperatorContext::QualifiedStar,
            Some(_) if ends_with_keyword(prev, STAR_PRECEDING_KEYWORDS) => {
                OperatorContext::SelectStar
            }
            Some(_) => OperatorContext::BinaryArithmetic,
        },
        '/' | '%' => OperatorContext::BinaryArithmetic,
        '=' | '<' | '>' => OperatorContext::Comparison,
        _ => OperatorContext::Unknown,
    }
}

/// `1e-3`, `2.5E+10`: the sign belongs to a numeric literal.
fn is_scientific_exponent(before: &str) -> bool {
    let mut chars = before.chars().rev();
    if !matches!(chars.next(), Some('e' | 'E')) {
        return false;
    }
    let word: String = before
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '.')
        .collect();
    // `word` is reversed; its last char is the literal's first
    let starts_with_digit = word.chars().last().is_some_and(|c| c.is_ascii_digit());
    let digit_before_e = chars.next().is_some_and(|c| c.is_ascii_digit() || c == '.');
    starts_with_digit && digit_before_e
}

fn ends_with_keyword(prev: &str, keywords: &[&str]) -> bool {
    let word_start = prev
        .char_indices()
        .rev()
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let word = &prev[word_start..];
    !word.is_empty() && keywords.iter().any(|k| k.eq_ignore_ascii_case(word))
}
