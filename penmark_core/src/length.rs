//! Word-count ratio scoring

/// Number of whitespace-delimited tokens
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

/// Step score for how close the learner's word count is to the reference's.
///
/// Returns one of 50, 70, 85 or 100. An empty reference scores 100.
pub fn length_score(learner: &str, reference: &str) -> f64 {
    let reference_len = word_count(reference);
    if reference_len == 0 {
        return 100.0;
    }

    let ratio = word_count(learner) as f64 / reference_len as f64;

    if !(0.5..=2.0).contains(&ratio) {
        50.0
    } else if !(0.7..=1.5).contains(&ratio) {
        70.0
    } else if !(0.9..=1.2).contains(&ratio) {
        85.0
    } else {
        100.0
    }
}
