//! Protected-region tracking.
//!
//! String literals, quoted and bracketed identifiers, and comments are
//! protected: every pass copies them verbatim. This module is the single
//! authority on where those regions start and end. Passes drive a [`Cursor`]
//! over their input and hand it to a [`ProtectedRegionTracker`] before
//! looking at any character themselves.
//!
//! Rules:
//! - `'` opens a string; `''` inside it is an escape and stays open.
//! - `"` opens a quoted identifier; the next `"` closes it.
//! - `[` opens a bracketed identifier; `]]` is an escape, `]` closes.
//! - `/*` opens a block comment; the first `*/` closes it (no nesting).
//! - `--` opens a line comment that runs to end-of-line.
//!
//! An unterminated region stays open through end of input.

use std::ops::Range;

/// Character cursor over a string slice. Positions are byte offsets.
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Remaining input from the current position.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Get current character without consuming.
    #[inline]
    pub fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Peek at a character `offset` characters ahead of the current one.
    #[inline]
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    /// Advance past the current character.
    #[inline]
    pub fn advance(&mut self) {
        if let Some(ch) = self.current() {
            self.pos += ch.len_utf8();
        }
    }

    /// Consume the current character, appending it to `out`.
    #[inline]
    pub fn bump_into(&mut self, out: &mut String) -> Option<char> {
        let ch = self.current()?;
        out.push(ch);
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Consume up to `count` characters into `out`.
    pub fn consume_into(&mut self, count: usize, out: &mut String) {
        for _ in 0..count {
            if self.bump_into(out).is_none() {
                break;
            }
        }
    }
}

/// The kind of protected region currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionState {
    #[default]
    None,
    SingleQuoteString,
    DoubleQuoteIdentifier,
    BracketIdentifier,
    LineComment,
    BlockComment,
}

/// Tracks which protected region (if any) is open while scanning.
///
/// State persists across calls, so line-based passes can carry a block
/// comment or multi-line string from one line to the next.
#[derive(Debug, Clone, Default)]
pub struct ProtectedRegionTracker {
    state: RegionState,
}

impl ProtectedRegionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> RegionState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state != RegionState::None
    }

    /// Open a string, quoted identifier, bracketed identifier or block
    /// comment at the cursor, copying the opening delimiter to `out`.
    ///
    /// Returns false (consuming nothing) when no region starts here. A lone
    /// `/` is not a region start.
    pub fn try_start_protected_region(&mut self, cursor: &mut Cursor, out: &mut String) -> bool {
        if self.is_active() {
            return false;
        }
        let state = match (cursor.current(), cursor.peek(1)) {
            (Some('\''), _) => RegionState::SingleQuoteString,
            (Some('"'), _) => RegionState::DoubleQuoteIdentifier,
            (Some('['), _) => RegionState::BracketIdentifier,
            (Some('/'), Some('*')) => RegionState::BlockComment,
            _ => return false,
        };
        let width = if state == RegionState::BlockComment { 2 } else { 1 };
        cursor.consume_into(width, out);
        self.state = state;
        true
    }

    /// Consume one step inside the open region, applying escape rules.
    ///
    /// Returns false when no region is open or the cursor is at the end.
    pub fn try_consume(&mut self, cursor: &mut Cursor, out: &mut String) -> bool {
        let Some(ch) = cursor.current() else {
            return false;
        };
        let next = cursor.peek(1);

        match self.state {
            RegionState::None => return false,
            RegionState::SingleQuoteString => {
                if ch == '\'' && next == Some('\'') {
                    cursor.consume_into(2, out);
                } else {
                    cursor.bump_into(out);
                    if ch == '\'' {
                        self.state = RegionState::None;
                    }
                }
            }
            RegionState::DoubleQuoteIdentifier => {
                cursor.bump_into(out);
                if ch == '"' {
                    self.state = RegionState::None;
                }
            }
            RegionState::BracketIdentifier => {
                if ch == ']' && next == Some(']') {
                    cursor.consume_into(2, out);
                } else {
                    cursor.bump_into(out);
                    if ch == ']' {
                        self.state = RegionState::None;
                    }
                }
            }
            RegionState::BlockComment => {
                if ch == '*' && next == Some('/') {
                    cursor.consume_into(2, out);
                    self.state = RegionState::None;
                } else {
                    cursor.bump_into(out);
                }
            }
            RegionState::LineComment => {
                if ch == '\n' || (ch == '\r' && next == Some('\n')) {
                    self.state = RegionState::None;
                    return false;
                }
                cursor.bump_into(out);
            }
        }
        true
    }

    /// Consume a `--` comment through end of line (the line break itself is
    /// left for the caller) or end of input.
    pub fn try_start_line_comment(&mut self, cursor: &mut Cursor, out: &mut String) -> bool {
        if self.is_active() || cursor.current() != Some('-') || cursor.peek(1) != Some('-') {
            return false;
        }
        self.state = RegionState::LineComment;
        while self.try_consume(cursor, out) {}
        self.state = RegionState::None;
        true
    }

    /// Copy any protected text at the cursor to `out`.
    ///
    /// Continues a region left open by a previous call, or starts a new one,
    /// and consumes until the region closes or the input runs out. Returns
    /// true if anything was consumed.
    pub fn skip_protected(&mut self, cursor: &mut Cursor, out: &mut String) -> bool {
        let started = self.is_active()
            || self.try_start_line_comment(cursor, out)
            || self.try_start_protected_region(cursor, out);
        if !started {
            return false;
        }
        while self.is_active() && self.try_consume(cursor, out) {}
        true
    }

    /// Replay the tracker over `text`, discarding output. Used to carry
    /// region state across lines that a pass does not rewrite.
    pub fn advance_over(&mut self, text: &str) {
        let mut cursor = Cursor::new(text);
        let mut sink = String::new();
        while !cursor.is_at_end() {
            if !self.skip_protected(&mut cursor, &mut sink) {
                cursor.advance();
            }
            sink.clear();
        }
    }
}

/// Byte ranges of every protected region in `text`, in order.
///
/// An unterminated region extends to the end of the text.
pub fn protected_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = Vec::new();
    let mut tracker = ProtectedRegionTracker::new();
    let mut cursor = Cursor::new(text);
    let mut sink = String::new();

    while !cursor.is_at_end() {
        let start = cursor.pos();
        if tracker.skip_protected(&mut cursor, &mut sink) {
            let end = cursor.pos();
            match ranges.last_mut() {
                Some(last) if last.end == start => last.end = end,
                _ => ranges.push(start..end),
            }
            sink.clear();
        } else {
            cursor.advance();
        }
    }

    ranges
}

/// Whether `range` overlaps any of the (sorted) protected `ranges`.
pub fn overlaps_protected(ranges: &[Range<usize>], range: &Range<usize>) -> bool {
    ranges
        .iter()
        .any(|r| r.start < range.end && range.start < r.end)
}
