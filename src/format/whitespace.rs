//! Indentation, trailing whitespace and line endings.
//!
//! This is the last pass of the pipeline. Leading indentation is converted
//! to a column count and re-emitted in the configured style, trailing
//! whitespace outside protected regions is trimmed, and lines are rejoined
//! with the resolved line ending. Inline whitespace is never touched.

use crate::options::{FormattingOptions, IndentStyle};

use super::line_endings::{resolve_newline, split_lines};
use super::protected::{Cursor, ProtectedRegionTracker};

pub fn normalize_whitespace(text: &str, options: &FormattingOptions) -> String {
    if text.is_empty() {
        return String::new();
    }

    let newline = resolve_newline(options.line_ending, text).as_str();
    let indent_size = options.effective_indent_size();
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut tracker = ProtectedRegionTracker::new();

    for line in split_lines(text) {
        let starts_inside = tracker.is_active();
        let protected_end = scan_line(line.content, &mut tracker);
        let ends_inside = tracker.is_active();

        // A line that continues a string or comment is not indentation
        let (indent, body) = if starts_inside {
            ("", line.content)
        } else {
            split_indent(line.content)
        };

        let body = if options.trim_trailing_whitespace {
            let keep = protected_end.saturating_sub(indent.len());
            &body[..body.trim_end().len().max(keep)]
        } else {
            body
        };

        let emit_indent =
            !starts_inside && !(body.is_empty() && options.trim_trailing_whitespace);
        if emit_indent {
            push_indent(&mut out, indent_width(indent, indent_size), options, indent_size);
        }
        out.push_str(body);

        if !line.terminator.is_empty() {
            // Breaks inside an open region are part of its text
            out.push_str(if ends_inside { line.terminator } else { newline });
        } else if options.insert_final_newline
            && !ends_inside
            && !(body.is_empty() && !emit_indent)
        {
            out.push_str(newline);
        }
    }

    out
}

/// Split a line into its leading tabs/spaces and the rest.
fn split_indent(content: &str) -> (&str, &str) {
    let len = content.len() - content.trim_start_matches([' ', '\t']).len();
    content.split_at(len)
}

/// Column width of an indentation string. A tab advances to the next
/// multiple of `indent_size`.
fn indent_width(indent: &str, indent_size: usize) -> usize {
    indent.chars().fold(0, |col, ch| match ch {
        '\t' => (col / indent_size + 1) * indent_size,
        _ => col + 1,
    })
}

/// Emit `width` columns of indentation. In tab style a partial indent level
/// rounds up to a whole tab, so the output is pure tabs.
fn push_indent(out: &mut String, width: usize, options: &FormattingOptions, indent_size: usize) {
    match options.indent_style {
        IndentStyle::Spaces => out.push_str(&" ".repeat(width)),
        IndentStyle::Tabs => out.push_str(&"\t".repeat(width.div_ceil(indent_size))),
    }
}

/// Replay the tracker over one line, returning the byte offset where the
/// last protected text on the line ends (0 if there is none).
fn scan_line(content: &str, tracker: &mut ProtectedRegionTracker) -> usize {
    let mut cursor = Cursor::new(content);
    let mut sink = String::new();
    let mut end = 0;

    while !cursor.is_at_end() {
        if tracker.skip_protected(&mut cursor, &mut sink) {
            end = cursor.pos();
            sink.clear();
        } else {
            cursor.advance();
        }
    }
    end
}
