//! Position-ordered token lookup.
//!
//! AST nodes from sqlparser do not carry a span for every operator, so the
//! operator-context map anchors operators by searching the token stream
//! around the spans that do exist. `TokenIndex` keeps the non-whitespace
//! tokens of one batch, shifted to script-level positions, and answers
//! "first token like this at or after P" / "last token like this before P".

use sqlparser::tokenizer::{Token, TokenWithSpan};

use super::Position;

/// A non-whitespace token with its script-level start position.
#[derive(Debug, Clone)]
pub struct IndexedToken {
    pub token: Token,
    pub start: Position,
}

#[derive(Debug, Clone, Default)]
pub struct TokenIndex {
    tokens: Vec<IndexedToken>,
}

impl TokenIndex {
    /// Build an index from tokenizer output, shifting every line by
    /// `line_offset`.
    pub fn new(tokens: Vec<TokenWithSpan>, line_offset: usize) -> Self {
        let tokens = tokens
            .into_iter()
            .filter(|t| !matches!(t.token, Token::Whitespace(_) | Token::EOF))
            .map(|t| IndexedToken {
                start: Position::new(
                    t.span.start.line as usize + line_offset,
                    t.span.start.column as usize,
                ),
                token: t.token,
            })
            .collect();
        Self { tokens }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn tokens(&self) -> &[IndexedToken] {
        &self.tokens
    }

    /// Index of the first token starting at or after `pos`.
    fn lower_bound(&self, pos: Position) -> usize {
        self.tokens.partition_point(|t| t.start < pos)
    }

    /// First token at or after `pos` satisfying `pred`.
    pub fn first_at_or_after<F>(&self, pos: Position, pred: F) -> Option<&IndexedToken>
    where
        F: Fn(&Token) -> bool,
    {
        self.tokens[self.lower_bound(pos)..]
            .iter()
            .find(|t| pred(&t.token))
    }

    /// Last token strictly before `pos` satisfying `pred`.
    pub fn last_before<F>(&self, pos: Position, pred: F) -> Option<&IndexedToken>
    where
        F: Fn(&Token) -> bool,
    {
        self.tokens[..self.lower_bound(pos)]
            .iter()
            .rev()
            .find(|t| pred(&t.token))
    }

    /// The token immediately following the one that starts at `pos`.
    pub fn next_after(&self, pos: Position) -> Option<&IndexedToken> {
        let idx = self.lower_bound(pos);
        match self.tokens.get(idx) {
            Some(t) if t.start == pos => self.tokens.get(idx + 1),
            _ => None,
        }
    }
}
