//! Operator context map.
//!
//! Built once per formatting call from the parsed script. It answers "what
//! role does the operator character at this position play?" so that the
//! operator-spacing pass can tell `-1` from `a - 1` and `COUNT(*)` from
//! `a * b`.

use std::collections::HashMap;
use std::ops::ControlFlow;

use sqlparser::ast::{
    BinaryOperator, Expr, Function, FunctionArg, FunctionArgExpr, FunctionArguments, Ident,
    Query, SelectItem, SetExpr, Spanned, UnaryOperator, Visit, Visitor,
};
use sqlparser::tokenizer::Token;

use crate::parser::{ParsedBatch, ParsedSql, Position};

/// Role of an operator-like character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum OperatorContext {
    #[default]
    Unknown,
    /// Prefix `+`/`-`
    UnarySign,
    /// `+ - * / %` between two operands
    BinaryArithmetic,
    /// `= <> != < > <= >=`
    Comparison,
    /// `SELECT *`
    SelectStar,
    /// `t.*`
    QualifiedStar,
    /// `COUNT(*)`
    FunctionStar,
}

impl OperatorContext {
    /// Whether this operator gets a space on each side.
    pub fn is_spaced(self) -> bool {
        matches!(
            self,
            OperatorContext::BinaryArithmetic | OperatorContext::Comparison
        )
    }
}

/// Position-to-context lookup derived from the AST.
#[derive(Debug, Default)]
pub struct OperatorContextMap {
    contexts: HashMap<Position, OperatorContext>,
}

impl OperatorContextMap {
    /// Build the map from a parsed script. `None` in means no AST is
    /// available, and `None` comes back out.
    pub fn build(ast: Option<&ParsedSql>) -> Option<Self> {
        let ast = ast?;
        let mut contexts = HashMap::new();

        for batch in ast.batches() {
            let mut collector = OperatorCollector {
                batch,
                contexts: &mut contexts,
            };
            for statement in &batch.statements {
                let _ = statement.visit(&mut collector);
            }
        }

        tracing::debug!("Operator context map has {} entries", contexts.len());
        Some(Self { contexts })
    }

    /// Context of the operator starting at `pos`. Unrecorded positions are
    /// `Unknown`.
    pub fn get_context(&self, pos: Position) -> OperatorContext {
        self.contexts.get(&pos).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

struct OperatorCollector<'a> {
    batch: &'a ParsedBatch,
    contexts: &'a mut HashMap<Position, OperatorContext>,
}

impl OperatorCollector<'_> {
    fn record(&mut self, pos: Position, context: OperatorContext) {
        self.contexts.insert(pos, context);
    }

    fn record_binary(&mut self, left: &Expr, op: &BinaryOperator, right: &Expr) {
        let Some(context) = binary_context(op) else {
            return;
        };
        let matches = |t: &Token| binary_token_matches(op, t);

        let anchored = match self.batch.position(left.span().end) {
            Some(end) => self.batch.tokens.first_at_or_after(end, matches),
            None => self
                .batch
                .position(right.span().start)
                .and_then(|start| self.batch.tokens.last_before(start, matches)),
        };

        if let Some(token) = anchored {
            let pos = token.start;
            self.record(pos, context);
        }
    }

    fn record_unary(&mut self, op: &UnaryOperator, operand: &Expr) {
        let want_minus = match op {
            UnaryOperator::Minus => true,
            UnaryOperator::Plus => false,
            _ => return,
        };
        let Some(start) = self.batch.position(operand.span().start) else {
            return;
        };
        let anchored = self.batch.tokens.last_before(start, |t| {
            if want_minus {
                matches!(t, Token::Minus)
            } else {
                matches!(t, Token::Plus)
            }
        });
        if let Some(token) = anchored {
            let pos = token.start;
            self.record(pos, OperatorContext::UnarySign);
        }
    }

    /// `*` right after the qualifier `ident.`.
    fn record_qualified_star(&mut self, qualifier: Option<&Ident>) {
        let Some(end) = qualifier.and_then(|ident| self.batch.position(ident.span.end)) else {
            return;
        };
        if let Some(token) = self
            .batch
            .tokens
            .first_at_or_after(end, |t| matches!(t, Token::Mul))
        {
            let pos = token.start;
            self.record(pos, OperatorContext::QualifiedStar);
        }
    }

    fn record_function_star(&mut self, function: &Function) {
        let FunctionArguments::List(list) = &function.args else {
            return;
        };
        for arg in &list.args {
            let FunctionArg::Unnamed(arg_expr) = arg else {
                continue;
            };
            match arg_expr {
                FunctionArgExpr::Wildcard => self.record_bare_function_star(function),
                FunctionArgExpr::QualifiedWildcard(name) => {
                    self.record_qualified_star(name.0.last())
                }
                _ => {}
            }
        }
    }

    /// `*` directly after the `(` that follows the function name.
    fn record_bare_function_star(&mut self, function: &Function) {
        let Some(name_end) = function
            .name
            .0
            .last()
            .and_then(|ident| self.batch.position(ident.span.end))
        else {
            return;
        };
        let tokens = &self.batch.tokens;
        let Some(lparen) = tokens.first_at_or_after(name_end, |t| matches!(t, Token::LParen))
        else {
            return;
        };
        let star = match tokens.next_after(lparen.start) {
            Some(next) if matches!(next.token, Token::Mul) => next.start,
            _ => return,
        };
        self.record(star, OperatorContext::FunctionStar);
    }

    fn record_select_stars(&mut self, body: &SetExpr) {
        match body {
            SetExpr::Select(select) => {
                for item in &select.projection {
                    match item {
                        SelectItem::Wildcard(_) => {
                            let Some(start) = self.batch.position(item.span().start) else {
                                continue;
                            };
                            if let Some(token) = self
                                .batch
                                .tokens
                                .first_at_or_after(start, |t| matches!(t, Token::Mul))
                            {
                                let pos = token.start;
                                self.record(pos, OperatorContext::SelectStar);
                            }
                        }
                        SelectItem::QualifiedWildcard(name, _) => {
                            self.record_qualified_star(name.0.last())
                        }
                        _ => {}
                    }
                }
            }
            SetExpr::SetOperation { left, right, .. } => {
                self.record_select_stars(left);
                self.record_select_stars(right);
            }
            // Nested queries are visited on their own
            _ => {}
        }
    }
}

impl Visitor for OperatorCollector<'_> {
    type Break = ();

    fn pre_visit_query(&mut self, query: &Query) -> ControlFlow<Self::Break> {
        self.record_select_stars(&query.body);
        ControlFlow::Continue(())
    }

    fn pre_visit_expr(&mut self, expr: &Expr) -> ControlFlow<Self::Break> {
        match expr {
            Expr::BinaryOp { left, op, right } => self.record_binary(left, op, right),
            Expr::UnaryOp { op, expr } => self.record_unary(op, expr),
            Expr::Function(function) => self.record_function_star(function),
            _ => {}
        }
        ControlFlow::Continue(())
    }
}

fn binary_context(op: &BinaryOperator) -> Option<OperatorContext> {
    match op {
        BinaryOperator::Plus
        | BinaryOperator::Minus
        | BinaryOperator::Multiply
        | BinaryOperator::Divide
        | BinaryOperator::Modulo => Some(OperatorContext::BinaryArithmetic),
        BinaryOperator::Eq
        | BinaryOperator::NotEq
        | BinaryOperator::Lt
        | BinaryOperator::Gt
        | BinaryOperator::LtEq
        | BinaryOperator::GtEq => Some(OperatorContext::Comparison),
        _ => None,
    }
}

fn binary_token_matches(op: &BinaryOperator, token: &Token) -> bool {
    matches!(
        (op, token),
        (BinaryOperator::Plus, Token::Plus)
            | (BinaryOperator::Minus, Token::Minus)
            | (BinaryOperator::Multiply, Token::Mul)
            | (BinaryOperator::Divide, Token::Div)
            | (BinaryOperator::Modulo, Token::Mod)
            | (BinaryOperator::Eq, Token::Eq)
            | (BinaryOperator::NotEq, Token::Neq)
            | (BinaryOperator::Lt, Token::Lt)
            | (BinaryOperator::Gt, Token::Gt)
            | (BinaryOperator::LtEq, Token::LtEq)
            | (BinaryOperator::GtEq, Token::GtEq)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_sql;

    fn map_for(sql: &str) -> OperatorContextMap {
        let ast = parse_sql(sql).expect("test SQL should parse");
        OperatorContextMap::build(Some(&ast)).unwrap()
    }

    #[test]
    fn test_no_ast_means_no_map() {
        assert!(OperatorContextMap::build(None).is_none());
    }

    #[test]
    fn test_binary_arithmetic() {
        let map = map_for("SELECT a+b FROM t");
        assert_eq!(
            map.get_context(Position::new(1, 9)),
            OperatorContext::BinaryArithmetic
        );
    }

    #[test]
    fn test_comparison() {
        let map = map_for("SELECT a FROM t WHERE x<>y");
        assert_eq!(
            map.get_context(Position::new(1, 24)),
            OperatorContext::Comparison
        );
    }

    #[test]
    fn test_unary_sign() {
        let map = map_for("SELECT -a FROM t");
        assert_eq!(map.get_context(Position::new(1, 8)), OperatorContext::UnarySign);
    }

    #[test]
    fn test_function_star() {
        let map = map_for("SELECT COUNT(*) FROM t");
        assert_eq!(
            map.get_context(Position::new(1, 14)),
            OperatorContext::FunctionStar
        );
    }

    #[test]
    fn test_qualified_star() {
        let map = map_for("SELECT t.* FROM t");
        assert_eq!(
            map.get_context(Position::new(1, 10)),
            OperatorContext::QualifiedStar
        );
    }

    #[test]
    fn test_star_as_multiplication() {
        let map = map_for("SELECT a*b FROM t");
        assert_eq!(
            map.get_context(Position::new(1, 9)),
            OperatorContext::BinaryArithmetic
        );
    }

    #[test]
    fn test_unrecorded_and_out_of_range_positions_are_unknown() {
        let map = map_for("SELECT a+b FROM t");
        assert_eq!(map.get_context(Position::new(1, 1)), OperatorContext::Unknown);
        assert_eq!(map.get_context(Position::new(99, 99)), OperatorContext::Unknown);
    }

    #[test]
    fn test_positions_in_later_batches() {
        let map = map_for("SELECT 1\nGO\nSELECT a*b FROM t");
        assert_eq!(
            map.get_context(Position::new(3, 9)),
            OperatorContext::BinaryArithmetic
        );
    }
}
