//! `GO` batch splitting

/// A SQL batch with its content and source location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch<'a> {
    pub content: &'a str,
    /// 1-based line number of the batch's first line
    pub start_line: usize,
}

/// Split a script on `GO` separator lines.
///
/// `GO` (or `GO;`) must sit on its own line, optionally surrounded by
/// whitespace. Batches always begin at the start of a line, so character
/// columns inside a batch equal script columns.
pub fn split_batches(content: &str) -> Vec<Batch<'_>> {
    let mut batches = Vec::new();
    let mut batch_start = 0;
    let mut batch_start_line = 1;
    let mut offset = 0;

    for (idx, line) in content.split_inclusive('\n').enumerate() {
        let line_start = offset;
        offset += line.len();

        if !is_separator(line) {
            continue;
        }
        if line_start > batch_start {
            batches.push(Batch {
                content: &content[batch_start..line_start],
                start_line: batch_start_line,
            });
        }
        batch_start = offset;
        batch_start_line = idx + 2;
    }

    if batch_start < content.len() {
        batches.push(Batch {
            content: &content[batch_start..],
            start_line: batch_start_line,
        });
    }

    batches
}

fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.eq_ignore_ascii_case("go") || trimmed.eq_ignore_ascii_case("go;")
}
