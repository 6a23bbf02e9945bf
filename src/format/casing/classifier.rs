//! Word classification for the casing pass.
//!
//! Two implementations sit behind [`WordClassifier`]: [`AstClassifier`] when
//! the script parsed, [`KeywordOnlyClassifier`] when it did not. The AST
//! classifier combines a position table collected from the syntax tree with a
//! [`CasingContext`] that follows the words in source order.

use std::collections::HashMap;
use std::ops::ControlFlow;

use sqlparser::ast::{
    AssignmentTarget, Expr, Ident, ObjectName, Query, SelectItem, SetExpr, Statement,
    TableFactor, Visit, Visitor,
};

use crate::parser::{ParsedBatch, ParsedSql, Position};

use super::super::registry::{
    is_builtin_function, is_data_type, is_keyword, is_paren_free_function, is_system_schema,
};
use super::context::{CasingContext, WordCategory};

/// A bare word found outside protected regions.
#[derive(Debug, Clone, Copy)]
pub struct Word<'a> {
    pub text: &'a str,
    pub position: Position,
    /// Next non-whitespace character is `(`
    pub followed_by_paren: bool,
    /// Next character is `.`
    pub followed_by_dot: bool,
}

/// Assigns casing categories to words, in source order.
pub trait WordClassifier {
    /// Category for `word`, or `None` to leave it unchanged.
    fn classify(&mut self, word: &Word<'_>) -> Option<WordCategory>;

    /// Called for every punctuation character between words.
    fn observe_punctuation(&mut self, _ch: char) {}

    /// Called for every `[bracketed]` or `"quoted"` identifier.
    fn observe_quoted_identifier(&mut self) {}
}

/// Fallback for scripts that did not parse.
///
/// Without a tree the identifier categories cannot be told apart, so every
/// word that is not a keyword gets the column policy.
#[derive(Debug, Default)]
pub struct KeywordOnlyClassifier;

impl WordClassifier for KeywordOnlyClassifier {
    fn classify(&mut self, word: &Word<'_>) -> Option<WordCategory> {
        if is_keyword(word.text) {
            Some(WordCategory::Keyword)
        } else {
            Some(WordCategory::Column)
        }
    }
}

/// Classifier backed by the parsed script.
#[derive(Debug)]
pub struct AstClassifier {
    categories: HashMap<Position, WordCategory>,
    context: CasingContext,
}

impl AstClassifier {
    pub fn new(ast: &ParsedSql) -> Self {
        let mut categories = HashMap::new();
        for batch in ast.batches() {
            let mut collector = CategoryCollector {
                batch,
                categories: &mut categories,
            };
            for statement in &batch.statements {
                let _ = statement.visit(&mut collector);
            }
        }
        tracing::debug!("Casing table has {} entries", categories.len());

        Self {
            categories,
            context: CasingContext::new(),
        }
    }

    /// Category recorded from the tree for the word starting at `pos`.
    pub fn recorded(&self, pos: Position) -> Option<WordCategory> {
        self.categories.get(&pos).copied()
    }

    fn resolve(
        &mut self,
        word: &Word<'_>,
        upper: &str,
        keyword: bool,
        type_position: bool,
    ) -> Option<WordCategory> {
        if is_paren_free_function(upper) {
            return Some(WordCategory::BuiltInFunction);
        }

        // The procedure name must be consumed even when the tree knows it
        let procedure = if keyword {
            None
        } else {
            self.context
                .take_procedure_part(word.text, word.followed_by_dot)
        };
        if let Some(category) = self.recorded(word.position).or(procedure) {
            return Some(category);
        }

        // CHAR(10) is a type here, not the CHAR() function
        if type_position && is_data_type(upper) {
            return Some(WordCategory::DataType);
        }
        if word.followed_by_paren && is_builtin_function(upper) {
            return Some(WordCategory::BuiltInFunction);
        }
        if is_data_type(upper) {
            return Some(WordCategory::DataType);
        }
        if keyword {
            return Some(WordCategory::Keyword);
        }

        if self.context.after_as_keyword {
            return Some(if self.context.in_table_context {
                WordCategory::Table
            } else {
                WordCategory::Column
            });
        }
        if let Some(category) = self
            .context
            .take_table_part(word.text, word.followed_by_dot)
        {
            return Some(category);
        }
        if self.context.in_table_column_list {
            return Some(WordCategory::Column);
        }
        None
    }
}

impl WordClassifier for AstClassifier {
    fn classify(&mut self, word: &Word<'_>) -> Option<WordCategory> {
        let type_position = std::mem::take(&mut self.context.expecting_type);

        if word.text.starts_with('@') {
            self.context.observe_variable();
            return Some(WordCategory::Variable);
        }

        let upper = word.text.to_ascii_uppercase();
        let category = self.resolve(word, &upper, is_keyword(&upper), type_position);
        if category == Some(WordCategory::Keyword) {
            self.context.observe_keyword(&upper);
            // DECLARE @c AS INT
            if type_position && upper == "AS" {
                self.context.expecting_type = true;
            }
        } else {
            self.context.observe_name(&upper, word.followed_by_paren);
        }
        category
    }

    fn observe_punctuation(&mut self, ch: char) {
        self.context.observe_punctuation(ch);
    }

    fn observe_quoted_identifier(&mut self) {
        self.context.observe_quoted_identifier();
    }
}

/// Collects categories for identifiers whose role the tree makes explicit.
struct CategoryCollector<'a> {
    batch: &'a ParsedBatch,
    categories: &'a mut HashMap<Position, WordCategory>,
}

impl CategoryCollector<'_> {
    fn record(&mut self, ident: &Ident, category: WordCategory) {
        // Quoted names are copied verbatim and variables are classified lexically
        if ident.quote_style.is_some() || ident.value.starts_with('@') {
            return;
        }
        if let Some(pos) = self.batch.position(ident.span.start) {
            self.categories.insert(pos, category);
        }
    }

    /// Record a possibly qualified object name whose last part is `last`.
    ///
    /// A name qualified by a system schema is a system object as a whole.
    fn record_object_name(&mut self, parts: &[Ident], last: WordCategory) {
        let Some((name, qualifiers)) = parts.split_last() else {
            return;
        };
        let Some((schema, outer)) = qualifiers.split_last() else {
            self.record(name, last);
            return;
        };

        for part in outer {
            self.record(part, WordCategory::Schema);
        }
        if is_system_schema(&schema.value) {
            self.record(schema, WordCategory::SystemTable);
            self.record(name, WordCategory::SystemTable);
        } else {
            self.record(schema, WordCategory::Schema);
            self.record(name, last);
        }
    }

    /// `col`, `t.col`, `dbo.t.col`
    fn record_column_reference(&mut self, parts: &[Ident]) {
        if let Some((column, table)) = parts.split_last() {
            self.record_object_name(table, WordCategory::Table);
            self.record(column, WordCategory::Column);
        }
    }

    fn record_function_name(&mut self, name: &ObjectName) {
        match name.0.split_last() {
            Some((function, [])) => {
                if is_builtin_function(&function.value) {
                    self.record(function, WordCategory::BuiltInFunction);
                }
            }
            Some((_, qualifiers)) => {
                for part in qualifiers {
                    let category = if is_system_schema(&part.value) {
                        WordCategory::SystemTable
                    } else {
                        WordCategory::Schema
                    };
                    self.record(part, category);
                }
            }
            None => {}
        }
    }

    fn record_select_aliases(&mut self, body: &SetExpr) {
        match body {
            SetExpr::Select(select) => {
                for item in &select.projection {
                    if let SelectItem::ExprWithAlias { alias, .. } = item {
                        self.record(alias, WordCategory::Column);
                    }
                }
            }
            SetExpr::SetOperation { left, right, .. } => {
                self.record_select_aliases(left);
                self.record_select_aliases(right);
            }
            _ => {}
        }
    }
}

impl Visitor for CategoryCollector<'_> {
    type Break = ();

    fn pre_visit_statement(&mut self, statement: &Statement) -> ControlFlow<Self::Break> {
        match statement {
            Statement::CreateTable(create_table) => {
                self.record_object_name(&create_table.name.0, WordCategory::Table);
                for column in &create_table.columns {
                    self.record(&column.name, WordCategory::Column);
                }
            }
            Statement::CreateView { name, .. } => {
                self.record_object_name(&name.0, WordCategory::Table);
            }
            Statement::CreateProcedure { name, .. } | Statement::Execute { name, .. } => {
                self.record_object_name(&name.0, WordCategory::StoredProcedure);
            }
            Statement::Insert(insert) => {
                for column in &insert.columns {
                    self.record(column, WordCategory::Column);
                }
            }
            Statement::Update { assignments, .. } => {
                for assignment in assignments {
                    if let AssignmentTarget::ColumnName(name) = &assignment.target {
                        self.record_column_reference(&name.0);
                    }
                }
            }
            _ => {}
        }
        ControlFlow::Continue(())
    }

    fn pre_visit_query(&mut self, query: &Query) -> ControlFlow<Self::Break> {
        if let Some(with) = &query.with {
            for cte in &with.cte_tables {
                self.record(&cte.alias.name, WordCategory::Table);
            }
        }
        self.record_select_aliases(&query.body);
        ControlFlow::Continue(())
    }

    fn pre_visit_relation(&mut self, relation: &ObjectName) -> ControlFlow<Self::Break> {
        self.record_object_name(&relation.0, WordCategory::Table);
        ControlFlow::Continue(())
    }

    fn pre_visit_table_factor(&mut self, table_factor: &TableFactor) -> ControlFlow<Self::Break> {
        let alias = match table_factor {
            TableFactor::Table { alias, .. } | TableFactor::Derived { alias, .. } => alias.as_ref(),
            _ => None,
        };
        if let Some(alias) = alias {
            self.record(&alias.name, WordCategory::Table);
        }
        ControlFlow::Continue(())
    }

    fn pre_visit_expr(&mut self, expr: &Expr) -> ControlFlow<Self::Break> {
        match expr {
            Expr::Identifier(ident) => self.record(ident, WordCategory::Column),
            Expr::CompoundIdentifier(parts) => self.record_column_reference(parts),
            Expr::Function(function) => self.record_function_name(&function.name),
            _ => {}
        }
        ControlFlow::Continue(())
    }
}
