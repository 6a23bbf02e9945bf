//! Blank-line normalization.
//!
//! Collapses runs of blank lines to a configured maximum and optionally drops
//! blank lines at the start of the script. Blank lines inside a multi-line
//! string or block comment belong to that region and are left alone.

use super::line_endings::split_lines;
use super::protected::ProtectedRegionTracker;

/// Collapse blank-line runs longer than `max_consecutive` (0 leaves runs as
/// they are) and, when `trim_leading` is set, remove leading blank lines.
pub fn collapse_blank_lines(text: &str, max_consecutive: usize, trim_leading: bool) -> String {
    if max_consecutive == 0 && !trim_leading {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut tracker = ProtectedRegionTracker::new();
    let mut blank_run = 0;
    let mut seen_content = false;

    for line in split_lines(text) {
        let inside_region = tracker.is_active();
        let blank = line.content.trim().is_empty();

        if blank && !inside_region {
            if trim_leading && !seen_content {
                continue;
            }
            blank_run += 1;
            if max_consecutive > 0 && blank_run > max_consecutive {
                continue;
            }
        } else {
            blank_run = 0;
            seen_content = true;
            tracker.advance_over(line.content);
        }

        out.push_str(line.content);
        out.push_str(line.terminator);
    }

    out
}
