//! Comma-style transformation.
//!
//! Moves trailing list commas to the start of the following line:
//!
//! ```text
//! SELECT id,          SELECT id
//!     name       =>       , name
//! ```
//!
//! The opposite direction is not supported: a line-based view cannot tell
//! where a clause ends, so [`to_trailing_commas`] always fails.

use crate::error::FormatError;

use super::line_endings::split_lines;
use super::protected::{Cursor, ProtectedRegionTracker};

/// Convert trailing commas to leading commas.
///
/// A comma is moved only when it is the last non-whitespace character of a
/// line outside any protected region and a following non-blank line exists.
/// The comma lands after that line's existing indentation.
pub fn to_leading_commas(text: &str) -> String {
    let lines = split_lines(text);
    let mut tracker = ProtectedRegionTracker::new();
    // Whether each line starts inside an open region
    let mut starts_inside = Vec::with_capacity(lines.len());
    let mut comma_at = Vec::with_capacity(lines.len());

    for line in &lines {
        starts_inside.push(tracker.is_active());
        comma_at.push(trailing_comma(line.content, &mut tracker));
    }

    let mut strip = vec![None; lines.len()];
    let mut lead = vec![false; lines.len()];
    for (idx, comma) in comma_at.iter().enumerate() {
        let Some(comma) = *comma else {
            continue;
        };
        let Some(target) = (idx + 1..lines.len())
            .find(|&j| starts_inside[j] || !lines[j].content.trim().is_empty())
        else {
            continue;
        };
        if starts_inside[target] || lines[target].content.trim_start().starts_with(',') {
            continue;
        }
        strip[idx] = Some(comma);
        lead[target] = true;
    }

    let mut out = String::with_capacity(text.len() + 8);
    for (idx, line) in lines.iter().enumerate() {
        let content = match strip[idx] {
            Some(comma) => line.content[..comma].trim_end(),
            None => line.content,
        };
        if lead[idx] {
            let indent_len = content.len() - content.trim_start_matches([' ', '\t']).len();
            let (indent, rest) = content.split_at(indent_len);
            out.push_str(indent);
            out.push_str(", ");
            out.push_str(rest);
        } else {
            out.push_str(content);
        }
        out.push_str(line.terminator);
    }
    out
}

/// Convert leading commas to trailing commas. Always fails.
pub fn to_trailing_commas(_text: &str) -> Result<String, FormatError> {
    Err(FormatError::UnsupportedCommaDirection)
}

/// Byte offset of a comma that ends `content` outside protected regions,
/// advancing `tracker` over the line.
fn trailing_comma(content: &str, tracker: &mut ProtectedRegionTracker) -> Option<usize> {
    let mut cursor = Cursor::new(content);
    let mut sink = String::new();
    let mut last_code: Option<(usize, char)> = None;

    while !cursor.is_at_end() {
        let start = cursor.pos();
        if tracker.skip_protected(&mut cursor, &mut sink) {
            last_code = None;
            sink.clear();
            continue;
        }
        if let Some(ch) = cursor.current() {
            if !ch.is_whitespace() {
                last_code = Some((start, ch));
            }
        }
        cursor.advance();
    }

    match last_code {
        Some((pos, ',')) if !tracker.is_active() => Some(pos),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_comma_to_next_line() {
        assert_eq!(
            to_leading_commas("SELECT id,\n    name"),
            "SELECT id\n    , name"
        );
    }

    #[test]
    fn test_multiple_columns() {
        assert_eq!(
            to_leading_commas("SELECT\n    a,\n    b,  \n    c\nFROM t"),
            "SELECT\n    a\n    , b\n    , c\nFROM t"
        );
    }

    #[test]
    fn test_last_line_comma_stays() {
        assert_eq!(to_leading_commas("SELECT a,"), "SELECT a,");
        assert_eq!(to_leading_commas("SELECT a,\n\n"), "SELECT a,\n\n");
    }

    #[test]
    fn test_skips_blank_lines() {
        assert_eq!(
            to_leading_commas("SELECT a,\n\n  b"),
            "SELECT a\n\n  , b"
        );
    }

    #[test]
    fn test_commas_in_protected_regions_stay() {
        let sql = "SELECT 'a,\nb' AS s, -- note,\n    c";
        assert_eq!(to_leading_commas(sql), sql);
        let sql = "SELECT [x,]\n, y";
        assert_eq!(to_leading_commas(sql), sql);
    }

    #[test]
    fn test_crlf_is_kept() {
        assert_eq!(
            to_leading_commas("SELECT id,\r\n    name\r\n"),
            "SELECT id\r\n    , name\r\n"
        );
    }

    #[test]
    fn test_trailing_direction_is_unsupported() {
        assert!(matches!(
            to_trailing_commas("SELECT id\n    , name"),
            Err(FormatError::UnsupportedCommaDirection)
        ));
    }

    #[test]
    fn test_idempotent() {
        let once = to_leading_commas("SELECT a,\n  b,\n  c");
        assert_eq!(to_leading_commas(&once), once);
    }
}
