use super::*;

fn words_of(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

#[test]
fn test_default_geometry() {
    let chunker = Chunker::default();
    assert_eq!(chunker.chunk_size(), 500);
    assert_eq!(chunker.overlap(), 50);
}

#[test]
fn test_rejects_zero_chunk_size() {
    assert!(matches!(
        Chunker::new(0, 0),
        Err(ChunkerError::ZeroChunkSize)
    ));
}

#[test]
fn test_rejects_overlap_not_smaller_than_chunk_size() {
    assert!(matches!(
        Chunker::new(100, 100),
        Err(ChunkerError::OverlapTooLarge { .. })
    ));
    assert!(matches!(
        Chunker::new(100, 150),
        Err(ChunkerError::OverlapTooLarge { .. })
    ));
    assert!(Chunker::new(100, 99).is_ok());
}

#[test]
fn test_empty_input_yields_no_chunks() {
    let chunker = Chunker::default();
    assert!(chunker.chunk("").is_empty());
}

#[test]
fn test_short_text_yields_single_trimmed_chunk() {
    let chunker = Chunker::default();
    let chunks = chunker.chunk("  a short document  ");
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].index, 0);
    assert_eq!(chunks[0].text, "a short document");
}

#[test]
fn test_no_chunk_exceeds_chunk_size() {
    let chunker = Chunker::new(40, 10).unwrap();
    let text = "the quick brown fox jumps over the lazy dog ".repeat(20);
    for chunk in chunker.chunk(&text) {
        assert!(chunk.text.chars().count() <= 40);
    }
}

#[test]
fn test_chunking_is_deterministic() {
    let chunker = Chunker::new(60, 15).unwrap();
    let text = "one two three four five six seven eight nine ten ".repeat(10);
    assert_eq!(chunker.chunk(&text), chunker.chunk(&text));
}

#[test]
fn test_boundaries_retract_to_whitespace() {
    let chunker = Chunker::new(12, 2).unwrap();
    let text = "alpha beta gamma delta epsilon zeta";
    let original: Vec<&str> = words_of(text);
    for chunk in chunker.chunk(text) {
        // A retracted boundary never cuts the trailing word. Leading
        // fragments can still occur because the stride is fixed; only the
        // end of each chunk carries the no-split guarantee.
        if let Some(last) = words_of(&chunk.text).last() {
            assert!(original.contains(last), "split trailing word: {last}");
        }
    }
}

#[test]
fn test_window_without_whitespace_keeps_hard_cut() {
    let chunker = Chunker::new(8, 0).unwrap();
    let chunks = chunker.chunk(&"a".repeat(20));
    assert_eq!(chunks[0].text, "aaaaaaaa");
    assert_eq!(chunks.len(), 3);
}

#[test]
fn test_indices_are_sequential() {
    let chunker = Chunker::new(30, 5).unwrap();
    let text = "word ".repeat(50);
    for (i, chunk) in chunker.chunk(&text).iter().enumerate() {
        assert_eq!(chunk.index, i);
    }
}

#[test]
fn test_multibyte_text_does_not_panic() {
    let chunker = Chunker::new(10, 2).unwrap();
    let text = "héllo wörld ünïcode ".repeat(30);
    for chunk in chunker.chunk(&text) {
        assert!(chunk.text.chars().count() <= 10);
    }
}

#[test]
fn test_every_word_is_covered_by_some_chunk() {
    let chunker = Chunker::new(25, 5).unwrap();
    let text = "zero one two three four five six seven eight nine";
    let chunks = chunker.chunk(text);
    for word in words_of(text) {
        assert!(
            chunks.iter().any(|c| words_of(&c.text).contains(&word)),
            "word lost at a split point: {word}"
        );
    }
}
