//! Line-ending detection and line splitting.

use crate::options::LineEnding;

/// A concrete line break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Newline {
    Lf,
    CrLf,
}

impl Newline {
    pub fn as_str(self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::CrLf => "\r\n",
        }
    }
}

/// One line of text together with the terminator that followed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub content: &'a str,
    /// `"\r\n"`, `"\n"`, or `""` for the final line
    pub terminator: &'a str,
}

/// Detect the dominant line ending: CRLF when the first `\n` is preceded by
/// `\r`, LF otherwise, `None` when the text has no line break at all.
pub fn detect_newline(text: &str) -> Option<Newline> {
    let idx = text.find('\n')?;
    if text[..idx].ends_with('\r') {
        Some(Newline::CrLf)
    } else {
        Some(Newline::Lf)
    }
}

/// Resolve the configured line ending against the input text.
///
/// `Auto` reuses the input's line ending and falls back to CRLF when the
/// input has none.
pub fn resolve_newline(option: LineEnding, text: &str) -> Newline {
    match option {
        LineEnding::Lf => Newline::Lf,
        LineEnding::CrLf => Newline::CrLf,
        LineEnding::Auto => detect_newline(text).unwrap_or(Newline::CrLf),
    }
}

/// Split text into lines, keeping each line's own terminator.
///
/// A trailing line break does not produce an extra empty line; joining the
/// `content` and `terminator` of every line reproduces the input exactly.
pub fn split_lines(text: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::with_capacity(text.len() / 40 + 1);
    let mut rest = text;

    while !rest.is_empty() {
        match rest.find('\n') {
            Some(idx) => {
                let (content, terminator) = if rest[..idx].ends_with('\r') {
                    (&rest[..idx - 1], &rest[idx - 1..=idx])
                } else {
                    (&rest[..idx], &rest[idx..=idx])
                };
                lines.push(Line {
                    content,
                    terminator,
                });
                rest = &rest[idx + 1..];
            }
            None => {
                lines.push(Line {
                    content: rest,
                    terminator: "",
                });
                rest = "";
            }
        }
    }

    lines
}
