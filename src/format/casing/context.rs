//! Casing categories and the traversal state used to pick them.

use crate::options::{ElementCasing, FormattingOptions};

use super::super::registry::is_system_schema;

/// The nine casing categories a word can fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordCategory {
    Keyword,
    BuiltInFunction,
    DataType,
    Schema,
    Table,
    Column,
    Variable,
    SystemTable,
    StoredProcedure,
}

impl WordCategory {
    /// The configured policy for this category.
    pub fn policy(self, options: &FormattingOptions) -> ElementCasing {
        match self {
            WordCategory::Keyword => options.keyword_casing,
            WordCategory::BuiltInFunction => options.builtin_function_casing,
            WordCategory::DataType => options.data_type_casing,
            WordCategory::Schema => options.schema_casing,
            WordCategory::Table => options.table_casing,
            WordCategory::Column => options.column_casing,
            WordCategory::Variable => options.variable_casing,
            WordCategory::SystemTable => options.system_table_casing,
            WordCategory::StoredProcedure => options.stored_procedure_casing,
        }
    }
}

/// Keywords after which object names of a table reference follow.
const TABLE_INTRODUCERS: &[&str] = &[
    "FROM", "JOIN", "INTO", "UPDATE", "TABLE", "MERGE", "USING", "APPLY",
];

/// Keywords that end a table reference list.
const TABLE_TERMINATORS: &[&str] = &[
    "SELECT", "WHERE", "ON", "SET", "VALUES", "GROUP", "ORDER", "HAVING", "UNION", "EXCEPT",
    "INTERSECT", "OUTPUT", "WHEN", "BEGIN", "END", "RETURN", "OPTION", "DEFAULT",
];

/// Mutable state threaded through one casing run in source order.
///
/// Fresh per formatting call and reset at every statement boundary.
#[derive(Debug, Default, Clone)]
pub struct CasingContext {
    /// Inside the object list of FROM/JOIN/INTO/UPDATE/TABLE
    pub in_table_context: bool,
    /// The previous word was `AS`
    pub after_as_keyword: bool,
    /// Schema part of the name currently being read
    pub last_schema_name: Option<String>,
    /// Reading the object name after EXEC/EXECUTE or PROC/PROCEDURE
    pub in_execute_context: bool,
    /// The procedure name of the current EXEC has been seen
    pub execute_procedure_processed: bool,
    /// Inside the column definition list of CREATE TABLE
    pub in_table_column_list: bool,
    /// Paren depth within the column definition list
    column_list_depth: usize,
    /// TABLE seen, column list not yet opened
    awaiting_column_list: bool,
    /// The next word sits where a data type is written
    pub expecting_type: bool,
    /// Inside a DECLARE statement
    in_declare: bool,
    /// Inside the parameter list of CREATE/ALTER PROCEDURE or FUNCTION
    in_routine_header: bool,
    /// The previous keyword was CREATE or ALTER (or `CREATE OR`)
    after_create: bool,
    /// A column name is the next word of the column definition list
    column_name_expected: bool,
    /// Open parenthesis depth
    paren_depth: usize,
    /// Depths of the open parentheses that belong to CAST/TRY_CAST
    cast_parens: Vec<usize>,
    /// CAST or CONVERT was just read and its `(` has not been seen
    pending_call: Option<TypedCall>,
}

/// Built-in calls whose arguments contain a data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypedCall {
    /// `CAST(expr AS type)`
    Cast,
    /// `CONVERT(type, expr)`
    Convert,
}

/// Keywords that start a new statement and so end a DECLARE.
const STATEMENT_STARTERS: &[&str] = &[
    "SELECT", "SET", "INSERT", "UPDATE", "DELETE", "MERGE", "IF", "WHILE", "BEGIN", "EXEC",
    "EXECUTE", "RETURN", "PRINT", "RAISERROR", "THROW", "CREATE", "ALTER", "DROP",
];

impl CasingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything at a statement boundary.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Update state for a keyword that was just read.
    pub fn observe_keyword(&mut self, upper: &str) {
        self.after_as_keyword = upper == "AS";
        self.column_name_expected = false;
        self.pending_call = None;

        if STATEMENT_STARTERS.contains(&upper) {
            self.in_declare = false;
        }
        let after_create = self.after_create;
        self.after_create =
            matches!(upper, "CREATE" | "ALTER") || (upper == "OR" && after_create);

        match upper {
            "DECLARE" => self.in_declare = true,
            "PROC" | "PROCEDURE" | "FUNCTION" if after_create => {
                self.in_routine_header = true;
            }
            "AS" | "BEGIN" if self.in_routine_header && self.paren_depth == 0 => {
                self.in_routine_header = false;
            }
            "RETURNS" => self.expecting_type = true,
            "AS" if self.in_cast_arguments() => self.expecting_type = true,
            _ => {}
        }

        match upper {
            "EXEC" | "EXECUTE" | "PROC" | "PROCEDURE" => {
                self.in_execute_context = true;
                self.execute_procedure_processed = false;
                self.last_schema_name = None;
            }
            // EXECUTE AS ... is not a procedure call
            "AS" if self.in_execute_context && !self.execute_procedure_processed => {
                self.in_execute_context = false;
            }
            "GO" => self.reset(),
            "TABLE" => self.awaiting_column_list = true,
            _ => {}
        }

        if TABLE_INTRODUCERS.contains(&upper) {
            self.in_table_context = true;
            self.last_schema_name = None;
        } else if TABLE_TERMINATORS.contains(&upper) {
            self.in_table_context = false;
        }
    }

    /// Update state for punctuation between words.
    pub fn observe_punctuation(&mut self, ch: char) {
        self.expecting_type = false;
        self.column_name_expected = false;

        match ch {
            ';' => self.reset(),
            '(' => {
                self.paren_depth += 1;
                match self.pending_call.take() {
                    Some(TypedCall::Cast) => self.cast_parens.push(self.paren_depth),
                    Some(TypedCall::Convert) => self.expecting_type = true,
                    None => {}
                }
                if self.in_execute_context && !self.execute_procedure_processed {
                    // EXEC ('...') runs dynamic SQL
                    self.in_execute_context = false;
                }
                self.in_table_context = false;
                if self.in_table_column_list {
                    self.column_list_depth += 1;
                } else if self.awaiting_column_list {
                    self.awaiting_column_list = false;
                    self.in_table_column_list = true;
                    self.column_list_depth = 1;
                    self.column_name_expected = true;
                }
            }
            ')' => {
                if self.in_cast_arguments() {
                    self.cast_parens.pop();
                }
                self.paren_depth = self.paren_depth.saturating_sub(1);
                if self.in_table_column_list {
                    self.column_list_depth -= 1;
                    if self.column_list_depth == 0 {
                        self.in_table_column_list = false;
                    }
                }
            }
            ',' if self.in_table_column_list && self.column_list_depth == 1 => {
                self.column_name_expected = true;
            }
            _ => {}
        }
    }

    /// Update state for a bracketed or double-quoted identifier.
    pub fn observe_quoted_identifier(&mut self) {
        self.expecting_type = std::mem::take(&mut self.column_name_expected);
        self.after_as_keyword = false;
    }

    /// Update state for a `@variable`.
    pub fn observe_variable(&mut self) {
        self.after_as_keyword = false;
        self.column_name_expected = false;
        self.expecting_type = self.in_declare || self.in_routine_header;
    }

    /// Update state for a word that is not a keyword or variable.
    pub fn observe_name(&mut self, upper: &str, followed_by_paren: bool) {
        self.after_as_keyword = false;
        self.expecting_type = std::mem::take(&mut self.column_name_expected);
        self.pending_call = match upper {
            "CAST" | "TRY_CAST" if followed_by_paren => Some(TypedCall::Cast),
            "CONVERT" | "TRY_CONVERT" if followed_by_paren => Some(TypedCall::Convert),
            _ => None,
        };
    }

    /// The innermost open parenthesis holds CAST arguments.
    fn in_cast_arguments(&self) -> bool {
        self.paren_depth > 0 && self.cast_parens.last() == Some(&self.paren_depth)
    }

    /// Whether the schema part just read names a system schema.
    pub fn under_system_schema(&self) -> bool {
        self.last_schema_name.as_deref().is_some_and(is_system_schema)
    }

    /// Classify the next part of an object name in EXEC/PROC position.
    ///
    /// Returns `None` when no procedure name is expected.
    pub fn take_procedure_part(
        &mut self,
        word: &str,
        followed_by_dot: bool,
    ) -> Option<WordCategory> {
        if !self.in_execute_context || self.execute_procedure_processed {
            return None;
        }
        if followed_by_dot {
            self.last_schema_name = Some(word.to_string());
            return Some(if is_system_schema(word) {
                WordCategory::SystemTable
            } else {
                WordCategory::Schema
            });
        }
        let category = if self.under_system_schema() {
            WordCategory::SystemTable
        } else {
            WordCategory::StoredProcedure
        };
        self.execute_procedure_processed = true;
        self.in_execute_context = false;
        Some(category)
    }

    /// Classify the next part of a table name in table-reference position.
    ///
    /// Returns `None` outside a table reference.
    pub fn take_table_part(&mut self, word: &str, followed_by_dot: bool) -> Option<WordCategory> {
        if !self.in_table_context {
            return None;
        }
        if followed_by_dot {
            if self.last_schema_name.is_none() {
                self.last_schema_name = Some(word.to_string());
            }
            return Some(if is_system_schema(word) {
                WordCategory::SystemTable
            } else {
                WordCategory::Schema
            });
        }
        let category = if self.under_system_schema() {
            WordCategory::SystemTable
        } else {
            WordCategory::Table
        };
        self.last_schema_name = None;
        Some(category)
    }
}
