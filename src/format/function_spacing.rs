//! Function-parenthesis spacing.
//!
//! Removes spaces and tabs between a function name and its opening
//! parenthesis: `COUNT (*)` becomes `COUNT(*)`. A name counts as a function
//! when it is a built-in function, or when it is a dotted name (`dbo.fn`) that
//! does not follow a keyword introducing a table or other object reference.
//! Keywords such as `CASE`, `IN` or `VALUES` are never function names.

use super::protected::{Cursor, ProtectedRegionTracker};
use super::registry::is_builtin_function;

/// Keywords after which a name followed by `(` is an object with a column
/// list, not a call.
const OBJECT_INTRODUCERS: &[&str] = &[
    "INTO", "TABLE", "REFERENCES", "VIEW", "JOIN", "FROM", "UPDATE", "ON", "EXEC", "EXECUTE",
    "INDEX", "PROCEDURE", "PROC", "FUNCTION", "TYPE", "APPLY", "WITH",
];

pub fn normalize_function_spacing(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut tracker = ProtectedRegionTracker::new();
    let mut cursor = Cursor::new(text);
    // Last word before the current name, uppercased
    let mut previous_word = String::new();

    while !cursor.is_at_end() {
        if tracker.skip_protected(&mut cursor, &mut out) {
            continue;
        }
        let Some(ch) = cursor.current() else {
            break;
        };

        if ch.is_ascii_digit() {
            while cursor
                .current()
                .is_some_and(|c| c.is_alphanumeric() || c == '.' || c == '_')
            {
                cursor.bump_into(&mut out);
            }
            continue;
        }

        if !is_name_start(ch) {
            cursor.bump_into(&mut out);
            continue;
        }

        let rest = cursor.rest();
        let name_len = dotted_name_len(rest);
        let name = &rest[..name_len];
        out.push_str(name);
        for _ in 0..name.chars().count() {
            cursor.advance();
        }

        let after = cursor.rest();
        let gap = after.len() - after.trim_start_matches([' ', '\t']).len();
        if gap > 0
            && after[gap..].starts_with('(')
            && is_function_name(name, &previous_word)
        {
            for _ in 0..gap {
                cursor.advance();
            }
        }

        previous_word = name
            .rsplit('.')
            .next()
            .unwrap_or(name)
            .to_ascii_uppercase();
    }

    out
}

fn is_name_start(ch: char) -> bool {
    ch.is_alphabetic() || matches!(ch, '_' | '@' | '#')
}

fn is_name_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '@' | '#' | '$')
}

/// Byte length of a bare or dotted name (`a`, `dbo.fn`) at the start of
/// `text`. A trailing dot is not part of the name.
fn dotted_name_len(text: &str) -> usize {
    let mut end = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, ch)) = chars.next() {
        if is_name_char(ch) {
            end = i + ch.len_utf8();
        } else if ch == '.'
            && end == i
            && chars.peek().is_some_and(|&(_, next)| is_name_start(next))
        {
            continue;
        } else {
            break;
        }
    }
    end
}

fn is_function_name(name: &str, previous_word: &str) -> bool {
    if name.starts_with('@') || OBJECT_INTRODUCERS.contains(&previous_word) {
        return false;
    }
    name.contains('.') || is_builtin_function(name)
}
