use crate::authenticity::signals::split_sentences;
use crate::constants::{MAX_QUERY_WORDS, MIN_QUERY_SENTENCE_WORDS};

/// Derives up to two search queries from document text.
///
/// Long sentences make the most distinctive queries, so the two longest
/// sentences above the word floor are used (longest first), truncated to
/// [`MAX_QUERY_WORDS`]. Text without any qualifying sentence falls back to
/// its first 25 words, or its first 150 characters when even those are
/// missing.
pub fn generate_queries(text: &str) -> Vec<String> {
    let mut long_sentences: Vec<String> = split_sentences(text)
        .into_iter()
        .filter(|s| s.split_whitespace().count() > MIN_QUERY_SENTENCE_WORDS)
        .collect();

    if long_sentences.is_empty() {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.len() > 20 {
            return vec![words[..MAX_QUERY_WORDS.min(words.len())].join(" ")];
        }
        return vec![text.chars().take(150).collect()];
    }

    long_sentences.sort_by_key(|s| std::cmp::Reverse(s.len()));

    long_sentences
        .into_iter()
        .take(2)
        .map(|s| truncate_words(&s, MAX_QUERY_WORDS))
        .collect()
}

fn truncate_words(sentence: &str, max_words: usize) -> String {
    let words: Vec<&str> = sentence.split_whitespace().collect();
    if words.len() > max_words {
        words[..max_words].join(" ")
    } else {
        sentence.to_string()
    }
}
