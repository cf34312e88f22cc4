// src/labels/mod.rs
pub mod multi;
pub mod tables;
pub mod translate;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

pub use multi::{decode, encode, indicator_name, split_labels, LabelUniverse};
pub use translate::{FieldGroup, Translator};

/// Lower-case, strip accents, collapse whitespace, trim.
///
/// Every match in the crate (binary answers, ordinal aliases, translation
/// lookups, header resolution) runs on this form. `normalize(normalize(x))`
/// is always `normalize(x)`.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();

    let mut out = String::with_capacity(folded.len());
    for word in folded.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Normalize an optional cell; missing cells fold to the empty string.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Column-safe slug of a label: every run of non-alphanumeric characters
/// becomes a single `_`, leading and trailing separators are dropped.
pub fn slug(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_sep = false;
    for c in normalize(label).chars() {
        if c.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(c);
        } else {
            pending_sep = true;
        }
    }
    out
}
