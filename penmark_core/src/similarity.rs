//! Character-level edit-distance similarity
//!
//! Levenshtein distance over Unicode code points with unit costs for
//! insertion, deletion and substitution, converted to a 0-100 percentage
//! relative to the longer string.

use strsim::levenshtein;

/// Levenshtein distance between `a` and `b`, counted in `char`s
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    levenshtein(a, b)
}

/// Similarity of two already-normalized strings in `[0, 100]`.
///
/// Two empty strings are identical (100).
pub fn edit_similarity(a: &str, b: &str) -> f64 {
    let (len_a, len_b) = (a.chars().count(), b.chars().count());
    let (longer, shorter, longer_len) = if len_a > len_b {
        (a, b, len_a)
    } else {
        (b, a, len_b)
    };

    if longer_len == 0 {
        return 100.0;
    }

    let distance = levenshtein(longer, shorter);
    let similarity = (longer_len as f64 - distance as f64) / longer_len as f64 * 100.0;
    similarity.max(0.0)
}
