//! T-SQL tokenizing and parsing
//!
//! The formatter does not own a SQL grammar: sqlparser's `MsSqlDialect`
//! supplies tokens and the AST. Scripts are split on `GO` first because
//! sqlparser does not understand batch separators. Every position handed to
//! the rest of the crate is script-level (1-based line, 1-based character
//! column), the same convention sqlparser uses for `Location`.

mod batches;
mod token_index;

use sqlparser::ast::Statement;
use sqlparser::dialect::MsSqlDialect;
use sqlparser::parser::Parser;
use sqlparser::tokenizer::{Location, Tokenizer};

pub use batches::{split_batches, Batch};
pub use token_index::{IndexedToken, TokenIndex};

/// A source position: 1-based line, 1-based character column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// One parsed `GO` batch.
#[derive(Debug)]
pub struct ParsedBatch {
    /// 1-based line where the batch starts in the script
    pub start_line: usize,
    pub statements: Vec<Statement>,
    pub tokens: TokenIndex,
}

impl ParsedBatch {
    /// Convert a batch-relative sqlparser location into a script position.
    ///
    /// Returns `None` for the empty location sqlparser uses when a node has
    /// no source span.
    pub fn position(&self, location: Location) -> Option<Position> {
        if location.line == 0 || location.column == 0 {
            return None;
        }
        Some(Position::new(
            location.line as usize + self.start_line - 1,
            location.column as usize,
        ))
    }
}

/// A successfully parsed script.
#[derive(Debug, Default)]
pub struct ParsedSql {
    batches: Vec<ParsedBatch>,
}

impl ParsedSql {
    pub fn batches(&self) -> &[ParsedBatch] {
        &self.batches
    }

    pub fn statement_count(&self) -> usize {
        self.batches.iter().map(|b| b.statements.len()).sum()
    }
}

/// Tokenize and parse a script.
///
/// Returns `None` when any batch fails to tokenize or parse; callers then
/// fall back to the AST-free formatting passes.
pub fn parse_sql(sql: &str) -> Option<ParsedSql> {
    let dialect = MsSqlDialect {};
    let batches = split_batches(sql);
    let mut parsed = Vec::with_capacity(batches.len());

    for batch in batches {
        if batch.content.trim().is_empty() {
            continue;
        }

        let tokens = match Tokenizer::new(&dialect, batch.content).tokenize_with_location() {
            Ok(tokens) => tokens,
            Err(e) => {
                tracing::debug!(
                    "Tokenizer error in batch at line {}: {}",
                    batch.start_line,
                    e
                );
                return None;
            }
        };

        let statements = match Parser::parse_sql(&dialect, batch.content) {
            Ok(statements) => statements,
            Err(e) => {
                tracing::debug!("Parse error in batch at line {}: {}", batch.start_line, e);
                return None;
            }
        };

        parsed.push(ParsedBatch {
            start_line: batch.start_line,
            statements,
            tokens: TokenIndex::new(tokens, batch.start_line - 1),
        });
    }

    Some(ParsedSql { batches: parsed })
}
