//! Answer text normalization.
//!
//! Every comparison in the matcher operates on normalized text: lower-cased,
//! punctuation stripped, whitespace collapsed. Normalization is total and
//! idempotent; it never fails, whatever the surrounding system submits.

/// Canonicalize a raw answer for comparison.
///
/// Lower-cases, drops every character that is neither alphanumeric nor
/// whitespace, collapses internal whitespace runs to a single space, and
/// trims. An answer of pure punctuation normalizes to the empty string.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.to_lowercase().chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
        } else if c.is_alphanumeric() {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
        // everything else (punctuation, quotes, parentheses) is dropped
    }

    out
}
