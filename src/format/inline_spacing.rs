//! Inline spacing: one space after every comma.

use super::protected::{Cursor, ProtectedRegionTracker};

/// Insert a space after each comma that is directly followed by a
/// non-whitespace character. Existing spacing is never changed.
pub fn normalize_inline_spacing(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 32);
    let mut tracker = ProtectedRegionTracker::new();
    let mut cursor = Cursor::new(text);

    while !cursor.is_at_end() {
        if tracker.skip_protected(&mut cursor, &mut out) {
            continue;
        }
        if cursor.bump_into(&mut out) == Some(',')
            && cursor.current().is_some_and(|next| !next.is_whitespace())
        {
            out.push(' ');
        }
    }

    out
}
