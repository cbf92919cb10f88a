//! Character-window text chunking.
//!
//! Chunks are the unit of similarity comparison: ingestion indexes them,
//! scanning queries them. The walk is deterministic for a given
//! `(text, chunk_size, overlap)` triple, which is what makes re-scans
//! idempotent and the vector point ids stable.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ChunkerError;

use crate::constants::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};

/// One bounded slice of document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position of this chunk in the walk order.
    pub index: usize,
    /// Trimmed chunk text.
    pub text: String,
}

/// Splits text into overlapping character windows.
///
/// Windows advance by `chunk_size - overlap` characters. A window boundary
/// that would split a word is retracted to the last whitespace inside the
/// window; a window with no whitespace keeps the hard cut. All indexing is
/// in `char`s, never bytes, so multi-byte input cannot split a code point.
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    chunk_size: usize,
    overlap: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl Chunker {
    /// Creates a chunker, rejecting invalid geometry at construction.
    ///
    /// `overlap >= chunk_size` would make the walk stand still or run
    /// backwards; it is a configuration error, never a runtime one.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self, ChunkerError> {
        if chunk_size == 0 {
            return Err(ChunkerError::ZeroChunkSize);
        }
        if overlap >= chunk_size {
            return Err(ChunkerError::OverlapTooLarge {
                overlap,
                chunk_size,
            });
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Splits `text` into chunks. Empty input yields an empty vec.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        let text_len = chars.len();
        let stride = self.chunk_size - self.overlap;

        let mut chunks = Vec::new();
        let mut start = 0;

        while start < text_len {
            let mut end = (start + self.chunk_size).min(text_len);

            // Retract a mid-word boundary to the last whitespace in the
            // window. End-of-text boundaries are never retracted.
            if end < text_len {
                if let Some(offset) = chars[start..end].iter().rposition(|c| c.is_whitespace()) {
                    end = start + offset + 1;
                }
            }

            let chunk_text: String = chars[start..end].iter().collect();
            chunks.push(Chunk {
                index: chunks.len(),
                text: chunk_text.trim().to_string(),
            });

            start += stride;
        }

        chunks
    }
}
