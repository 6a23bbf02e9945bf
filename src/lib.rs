//! rust-sqlfmt: an idempotent T-SQL formatter
//!
//! This library normalizes SQL source text (indentation, line endings, blank
//! lines, comma placement, operator/keyword/function spacing and per-category
//! letter casing) without changing what the SQL means. Strings, quoted
//! identifiers and comments are never modified.

pub mod error;
pub mod files;
pub mod format;
pub mod options;
pub mod parser;

use std::path::{Path, PathBuf};

use rayon::prelude::*;

pub use error::FormatError;
pub use format::format;
pub use options::{
    load_options, CommaStyle, ElementCasing, FormattingOptions, IndentStyle, LineEnding,
};
pub use parser::{parse_sql, ParsedSql};

/// Minimum number of files to benefit from parallel processing.
/// Below this threshold, sequential processing is faster due to rayon overhead.
const PARALLEL_THRESHOLD: usize = 8;

/// A formatted file, with the text it was read as.
#[derive(Debug, Clone)]
pub struct FormattedFile {
    pub path: PathBuf,
    pub original: String,
    pub formatted: String,
}

impl FormattedFile {
    /// Whether formatting changed the file.
    pub fn is_changed(&self) -> bool {
        self.original != self.formatted
    }
}

/// Parse and format a SQL script.
pub fn format_sql(text: &str, options: &FormattingOptions) -> String {
    let ast = parse_sql(text);
    format(text, options, ast.as_ref())
}

/// Read and format one SQL file. The file itself is not modified.
pub fn format_sql_file(
    path: &Path,
    options: &FormattingOptions,
) -> Result<FormattedFile, FormatError> {
    let original = files::read_sql_file(path)?;
    let formatted = format_sql(&original, options);

    tracing::debug!(
        "Formatted {} ({})",
        path.display(),
        if formatted == original { "unchanged" } else { "changed" }
    );

    Ok(FormattedFile {
        path: path.to_path_buf(),
        original,
        formatted,
    })
}

/// Format many files, in parallel for larger sets. Results are returned in
/// input order; a failure on one file does not stop the others.
pub fn format_sql_files(
    paths: &[PathBuf],
    options: &FormattingOptions,
) -> Vec<Result<FormattedFile, FormatError>> {
    if paths.len() >= PARALLEL_THRESHOLD {
        paths
            .par_iter()
            .map(|path| format_sql_file(path, options))
            .collect()
    } else {
        paths
            .iter()
            .map(|path| format_sql_file(path, options))
            .collect()
    }
}
