//! Pure signal math: sentence statistics and score normalization.
//!
//! Everything here maps a raw signal onto the shared 0-100 AI-likelihood
//! scale (100 = certainly machine-written) so the ensemble can combine
//! them linearly.

/// Splits text into sentences on `.`, `!`, or `?` followed by whitespace.
/// Terminators stay attached to their sentence; blank fragments are
/// dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.trim().chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().is_some_and(|n| n.is_whitespace()) {
            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
        }
    }

    let tail = current.trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

/// Burstiness: coefficient of variation of per-sentence word counts.
///
/// Fewer than two sentences cannot produce a variance; that case returns
/// 1.0 (maximally human-like) so short inputs are never flagged as AI on
/// missing evidence alone.
pub fn burstiness(text: &str) -> f64 {
    let sentences = split_sentences(text);
    if sentences.len() < 2 {
        return 1.0;
    }

    let lengths: Vec<f64> = sentences
        .iter()
        .map(|s| s.split_whitespace().count() as f64)
        .collect();

    let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
    if mean == 0.0 {
        return 0.0;
    }

    let variance = lengths.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / lengths.len() as f64;

    variance.sqrt() / mean
}

/// Buckets a language-model perplexity onto the AI-likelihood scale.
/// Low perplexity means the reference model finds the text unsurprising,
/// which is characteristic of machine generation.
pub fn perplexity_bucket(perplexity: f64) -> f64 {
    if perplexity < 30.0 {
        100.0
    } else if perplexity < 60.0 {
        80.0
    } else if perplexity < 100.0 {
        40.0
    } else {
        0.0
    }
}

/// Buckets burstiness onto the AI-likelihood scale. Monotonous sentence
/// lengths (low burstiness) lean AI.
pub fn burstiness_bucket(burstiness: f64) -> f64 {
    if burstiness < 0.4 {
        100.0
    } else if burstiness < 0.6 {
        60.0
    } else if burstiness < 0.8 {
        30.0
    } else {
        0.0
    }
}
