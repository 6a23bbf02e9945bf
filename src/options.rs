//! Formatting options
//!
//! `FormattingOptions` is the only configuration surface of the formatter.
//! It can be built in code or deserialized from TOML; any subset of fields
//! may be given and the rest take their defaults.

use std::path::Path;

use serde::Deserialize;

use crate::error::FormatError;

/// Indent size used when the configured one is not positive.
pub const DEFAULT_INDENT_SIZE: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndentStyle {
    #[default]
    Spaces,
    Tabs,
}

/// Line ending written by the whitespace pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineEnding {
    /// Reuse the input's first line ending, CRLF if the input has none
    #[default]
    Auto,
    Lf,
    CrLf,
}

/// Letter-casing policy for one category of words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementCasing {
    #[default]
    None,
    Upper,
    Lower,
    Pascal,
    Camel,
    Preserve,
}

/// Where list-separator commas sit relative to line breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommaStyle {
    #[default]
    Preserve,
    Leading,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FormattingOptions {
    pub indent_style: IndentStyle,
    /// Columns per indent level; values <= 0 fall back to 4
    pub indent_size: i32,
    pub line_ending: LineEnding,
    pub insert_final_newline: bool,
    pub trim_trailing_whitespace: bool,
    /// Longest allowed run of blank lines; 0 disables collapsing
    pub max_consecutive_blank_lines: usize,
    pub trim_leading_blank_lines: bool,

    pub operator_spacing: bool,
    pub keyword_spacing: bool,
    pub function_paren_spacing: bool,
    pub inline_spacing: bool,

    pub comma_style: CommaStyle,

    pub keyword_casing: ElementCasing,
    pub builtin_function_casing: ElementCasing,
    pub data_type_casing: ElementCasing,
    pub schema_casing: ElementCasing,
    pub table_casing: ElementCasing,
    pub column_casing: ElementCasing,
    pub variable_casing: ElementCasing,
    pub system_table_casing: ElementCasing,
    pub stored_procedure_casing: ElementCasing,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            indent_style: IndentStyle::Spaces,
            indent_size: DEFAULT_INDENT_SIZE,
            line_ending: LineEnding::Auto,
            insert_final_newline: true,
            trim_trailing_whitespace: true,
            max_consecutive_blank_lines: 2,
            trim_leading_blank_lines: true,
            operator_spacing: true,
            keyword_spacing: true,
            function_paren_spacing: true,
            inline_spacing: true,
            comma_style: CommaStyle::Preserve,
            keyword_casing: ElementCasing::Upper,
            builtin_function_casing: ElementCasing::Upper,
            data_type_casing: ElementCasing::Upper,
            schema_casing: ElementCasing::Preserve,
            table_casing: ElementCasing::Preserve,
            column_casing: ElementCasing::Preserve,
            variable_casing: ElementCasing::Preserve,
            system_table_casing: ElementCasing::Preserve,
            stored_procedure_casing: ElementCasing::Preserve,
        }
    }
}

impl FormattingOptions {
    /// Options that leave every casing category untouched.
    pub fn preserve_casing() -> Self {
        Self {
            keyword_casing: ElementCasing::Preserve,
            builtin_function_casing: ElementCasing::Preserve,
            data_type_casing: ElementCasing::Preserve,
            ..Self::default()
        }
    }

    /// Indent size with non-positive values normalized to the default.
    pub fn effective_indent_size(&self) -> usize {
        if self.indent_size <= 0 {
            DEFAULT_INDENT_SIZE as usize
        } else {
            self.indent_size as usize
        }
    }

    /// Parse options from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}

/// Load formatting options from a TOML file.
pub fn load_options(path: &Path) -> Result<FormattingOptions, FormatError> {
    let source = std::fs::read_to_string(path).map_err(|e| FormatError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let options =
        FormattingOptions::from_toml_str(&source).map_err(|e| FormatError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::debug!("Loaded formatting options from {}", path.display());
    Ok(options)
}
