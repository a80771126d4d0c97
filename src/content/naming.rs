//! Name handling: natural ordering, numbering prefixes and display titles.

use std::cmp::Ordering;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, PartialEq, Eq)]
enum Run<'a> {
    Text(String),
    Number(&'a str),
}

/// Split a name into alternating text and digit runs, always starting with text.
fn runs(name: &str) -> Vec<Run<'_>> {
    let mut out = Vec::new();
    let mut text_start = 0;
    let mut chars = name.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !ch.is_ascii_digit() {
            continue;
        }
        out.push(Run::Text(name[text_start..idx].to_lowercase()));
        let mut end = idx + 1;
        while let Some(&(next_idx, next)) = chars.peek() {
            if !next.is_ascii_digit() {
                break;
            }
            end = next_idx + 1;
            chars.next();
        }
        out.push(Run::Number(&name[idx..end]));
        text_start = end;
    }
    out.push(Run::Text(name[text_start..].to_lowercase()));
    out
}

/// Compare two digit strings by numeric value without parsing.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Natural ordering: digit runs compare numerically, text runs case-insensitively.
///
/// Names equal under that rule fall back to a plain byte comparison so the
/// order stays total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = runs(a);
    let right = runs(b);
    for (l, r) in left.iter().zip(right.iter()) {
        let ord = match (l, r) {
            (Run::Text(x), Run::Text(y)) => x.cmp(y),
            (Run::Number(x), Run::Number(y)) => cmp_digits(x, y),
            // Runs alternate from the same starting kind, so kinds always line up.
            (Run::Text(_), Run::Number(_)) => Ordering::Greater,
            (Run::Number(_), Run::Text(_)) => Ordering::Less,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    left.len().cmp(&right.len()).then_with(|| a.cmp(b))
}

pub fn natural_sort(names: &mut [String]) {
    names.sort_by(|a, b| natural_cmp(a, b));
}

/// Strip a leading ordinal such as `01 - `, `3_` or `2. `.
///
/// The digits must be followed by at least one of `.`, `-`, `_` or whitespace;
/// `3D Modeling` is left untouched. A name that is nothing but a prefix is
/// returned unchanged.
pub fn strip_numbering_prefix(text: &str) -> String {
    let digits = text.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return text.trim().to_string();
    }
    let rest = &text[digits..];
    let separators = rest
        .chars()
        .take_while(|c| matches!(c, '.' | '-' | '_') || c.is_whitespace())
        .map(char::len_utf8)
        .sum::<usize>();
    if separators == 0 {
        return text.trim().to_string();
    }
    let stripped = rest[separators..].trim();
    if stripped.is_empty() {
        text.trim().to_string()
    } else {
        stripped.to_string()
    }
}

/// Lesson title: file stem with its numbering prefix removed.
pub fn lesson_title(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name);
    strip_numbering_prefix(stem)
}

/// Module title: folder name with its numbering prefix removed.
pub fn module_title(directory_name: &str) -> String {
    strip_numbering_prefix(directory_name)
}

/// Display title for a directory: `_`/`-` become spaces and every word is capitalized.
pub fn format_directory_title(directory_name: &str) -> String {
    let normalized: String = directory_name.nfc().collect();
    normalized
        .replace(['_', '-'], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
