//! The formatting pipeline
//!
//! Every pass is a total function from text to text. The order below is
//! fixed: casing runs first so AST positions still line up for operator
//! spacing, and the whitespace pass runs last because it owns indentation
//! and line endings.

pub mod blank_lines;
pub mod casing;
pub mod comma_style;
pub mod function_spacing;
pub mod inline_spacing;
pub mod keyword_spacing;
pub mod line_endings;
pub mod operator_context;
pub mod operator_spacing;
pub mod protected;
pub mod registry;
pub mod whitespace;

use crate::options::{CommaStyle, FormattingOptions};
use crate::parser::ParsedSql;

pub use blank_lines::collapse_blank_lines;
pub use casing::apply_casing_pass;
pub use comma_style::{to_leading_commas, to_trailing_commas};
pub use function_spacing::normalize_function_spacing;
pub use inline_spacing::normalize_inline_spacing;
pub use keyword_spacing::normalize_keyword_spacing;
pub use operator_context::{OperatorContext, OperatorContextMap};
pub use operator_spacing::normalize_operator_spacing;
pub use protected::{ProtectedRegionTracker, RegionState};
pub use whitespace::normalize_whitespace;

/// Run the full pipeline over `text`.
///
/// `ast` is the parse of `text` itself, or `None` when it did not parse; the
/// AST-aware passes then fall back to their lexical modes.
pub fn format(text: &str, options: &FormattingOptions, ast: Option<&ParsedSql>) -> String {
    if ast.is_none() {
        tracing::debug!("Formatting without an AST");
    }

    let mut text = apply_casing_pass(text, options, ast);

    if options.operator_spacing {
        let contexts = OperatorContextMap::build(ast);
        text = normalize_operator_spacing(&text, contexts.as_ref());
    }
    if options.keyword_spacing {
        text = normalize_keyword_spacing(&text);
    }
    if options.function_paren_spacing {
        text = normalize_function_spacing(&text);
    }
    if options.inline_spacing {
        text = normalize_inline_spacing(&text);
    }
    if options.comma_style == CommaStyle::Leading {
        text = to_leading_commas(&text);
    }

    let text = collapse_blank_lines(
        &text,
        options.max_consecutive_blank_lines,
        options.trim_leading_blank_lines,
    );
    normalize_whitespace(&text, options)
}
