//! Casing pass.
//!
//! Rewrites the letter case of every bare word according to its category's
//! policy. Words are found lexically outside protected regions; categories
//! come from a [`WordClassifier`], which is AST-aware when the script parsed
//! and keyword-only otherwise. Casing never changes the character count, so
//! positions recorded from the AST stay valid for later passes.

mod case;
mod classifier;
mod context;

pub use case::apply_casing;
pub use classifier::{AstClassifier, KeywordOnlyClassifier, Word, WordClassifier};
pub use context::{CasingContext, WordCategory};

use crate::options::{ElementCasing, FormattingOptions};
use crate::parser::{ParsedSql, Position};

use super::protected::{Cursor, ProtectedRegionTracker};

/// Apply the configured casing policies to `text`.
pub fn apply_casing_pass(
    text: &str,
    options: &FormattingOptions,
    ast: Option<&ParsedSql>,
) -> String {
    if !has_active_policy(options) {
        return text.to_string();
    }

    match ast {
        Some(ast) => {
            let mut classifier = AstClassifier::new(ast);
            recase(text, options, &mut classifier)
        }
        None => {
            tracing::debug!("No AST available, using keyword-only casing");
            recase(text, options, &mut KeywordOnlyClassifier)
        }
    }
}

fn has_active_policy(options: &FormattingOptions) -> bool {
    [
        options.keyword_casing,
        options.builtin_function_casing,
        options.data_type_casing,
        options.schema_casing,
        options.table_casing,
        options.column_casing,
        options.variable_casing,
        options.system_table_casing,
        options.stored_procedure_casing,
    ]
    .iter()
    .any(|c| !matches!(c, ElementCasing::None | ElementCasing::Preserve))
}

/// Scan `text` word by word, recasing through `classifier`.
pub fn recase(
    text: &str,
    options: &FormattingOptions,
    classifier: &mut dyn WordClassifier,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut tracker = ProtectedRegionTracker::new();
    let mut cursor = Cursor::new(text);
    let mut line = 1;
    let mut column = 1;

    while !cursor.is_at_end() {
        let start = cursor.pos();
        if tracker.skip_protected(&mut cursor, &mut out) {
            let region = &text[start..cursor.pos()];
            if region.starts_with(['[', '"']) {
                classifier.observe_quoted_identifier();
            }
            advance_position(region, &mut line, &mut column);
            continue;
        }

        let Some(ch) = cursor.current() else {
            break;
        };

        if ch.is_ascii_digit() {
            // Numeric literal, including hex and exponent suffixes
            let len = scan_while(cursor.rest(), |c| c.is_alphanumeric() || c == '.' || c == '_');
            out.push_str(&cursor.rest()[..len]);
            column += cursor.rest()[..len].chars().count();
            skip_bytes(&mut cursor, len);
            continue;
        }

        if is_word_start(ch) {
            let rest = cursor.rest();
            let len = scan_while(rest, is_word_char);
            let text_of_word = &rest[..len];
            let after = &rest[len..];

            // N'...' and similar literal prefixes stay as written
            if after.starts_with('\'') {
                out.push_str(text_of_word);
            } else {
                let word = Word {
                    text: text_of_word,
                    position: Position::new(line, column),
                    followed_by_paren: after.trim_start().starts_with('('),
                    followed_by_dot: after.starts_with('.'),
                };
                match classifier.classify(&word) {
                    Some(category) => {
                        out.push_str(&apply_casing(text_of_word, category.policy(options)))
                    }
                    None => out.push_str(text_of_word),
                }
            }

            column += text_of_word.chars().count();
            skip_bytes(&mut cursor, len);
            continue;
        }

        if !ch.is_whitespace() {
            classifier.observe_punctuation(ch);
        }
        cursor.bump_into(&mut out);
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    out
}

fn is_word_start(ch: char) -> bool {
    ch.is_alphabetic() || matches!(ch, '_' | '@' | '#')
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '@' | '#' | '$')
}

/// Byte length of the leading run of `text` matching `pred`.
fn scan_while(text: &str, pred: impl Fn(char) -> bool) -> usize {
    text.char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(text.len(), |(i, _)| i)
}

fn skip_bytes(cursor: &mut Cursor, len: usize) {
    let target = cursor.pos() + len;
    while cursor.pos() < target {
        cursor.advance();
    }
}

fn advance_position(consumed: &str, line: &mut usize, column: &mut usize) {
    for ch in consumed.chars() {
        if ch == '\n' {
            *line += 1;
            *column = 1;
        } else {
            *column += 1;
        }
    }
}
