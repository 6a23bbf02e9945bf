//! Letter-casing transforms.
//!
//! Each policy is applied to a whole word as one unit; there is no splitting
//! on underscores or case boundaries. A character is only remapped when its
//! mapping is a single character, so the character count of a word never
//! changes.

use std::borrow::Cow;

use crate::options::ElementCasing;

/// Apply `casing` to `word`.
pub fn apply_casing(word: &str, casing: ElementCasing) -> Cow<'_, str> {
    match casing {
        ElementCasing::None | ElementCasing::Preserve => Cow::Borrowed(word),
        ElementCasing::Upper => map_chars(word, to_upper),
        ElementCasing::Lower | ElementCasing::Camel => map_chars(word, to_lower),
        ElementCasing::Pascal => {
            let lower = map_chars(word, to_lower);
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => {
                    let upper = to_upper(first);
                    if upper == first {
                        return lower;
                    }
                    let mut out = String::with_capacity(lower.len());
                    out.push(upper);
                    out.push_str(chars.as_str());
                    Cow::Owned(out)
                }
                None => lower,
            }
        }
    }
}

fn map_chars(word: &str, f: fn(char) -> char) -> Cow<'_, str> {
    if word.chars().all(|c| f(c) == c) {
        return Cow::Borrowed(word);
    }
    Cow::Owned(word.chars().map(f).collect())
}

fn to_upper(c: char) -> char {
    single(c.to_uppercase()).unwrap_or(c)
}

fn to_lower(c: char) -> char {
    single(c.to_lowercase()).unwrap_or(c)
}

fn single(mut it: impl Iterator<Item = char>) -> Option<char> {
    let first = it.next()?;
    match it.next() {
        None => Some(first),
        Some(_) => None,
    }
}
