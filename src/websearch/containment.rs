use std::collections::HashSet;

/// Containment similarity: the fraction of `original`'s unique words that
/// also appear in `page`.
///
/// Word sets are lower-cased and whitespace-split; set semantics, so word
/// order and repetition are irrelevant. Asymmetric by design: a short
/// quote pasted into a long page still scores high.
pub fn containment(original: &str, page: &str) -> f64 {
    if page.is_empty() {
        return 0.0;
    }

    let original_words: HashSet<String> =
        original.to_lowercase().split_whitespace().map(String::from).collect();

    if original_words.is_empty() {
        return 0.0;
    }

    let page_words: HashSet<String> =
        page.to_lowercase().split_whitespace().map(String::from).collect();

    let intersection = original_words.intersection(&page_words).count();
    intersection as f64 / original_words.len() as f64
}
