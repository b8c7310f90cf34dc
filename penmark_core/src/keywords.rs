//! Content-word overlap between learner and reference answers

/// English function words ignored by keyword matching
pub const STOP_WORDS: [&str; 17] = [
    "the", "a", "an", "and", "or", "but", "is", "are", "was", "were", "in", "on", "at", "to",
    "for", "of", "with",
];

/// Minimum length (exclusive, in chars) of a content word
const MIN_CONTENT_WORD_LEN: usize = 2;

fn is_content_word(token: &str) -> bool {
    !STOP_WORDS.contains(&token) && token.chars().count() > MIN_CONTENT_WORD_LEN
}

/// Whitespace-delimited tokens that are not stop-words and longer than two chars
pub fn content_words(s: &str) -> Vec<&str> {
    s.split_whitespace().filter(|t| is_content_word(t)).collect()
}

/// Percentage of reference content words found in the learner answer.
///
/// A reference word counts as found when some learner content word contains
/// it or is contained by it, so "travel" and "traveling" match. A reference
/// without content words scores 100.
pub fn keyword_match(learner: &str, reference: &str) -> f64 {
    let reference_words = content_words(reference);
    if reference_words.is_empty() {
        return 100.0;
    }

    let learner_words = content_words(learner);
    let matched = reference_words
        .iter()
        .filter(|w| learner_words.iter().any(|u| u.contains(*w) || w.contains(u)))
        .count();

    matched as f64 / reference_words.len() as f64 * 100.0
}
