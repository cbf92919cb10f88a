use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::client::EmbeddingClient;
use super::error::EmbeddingError;
use crate::constants::DEFAULT_EMBEDDING_DIM;

/// Deterministic in-process embedding client for tests.
///
/// Unscripted texts get a pseudo-vector derived from a stable hash of the
/// text, so identical texts always embed identically. Individual texts can
/// be scripted with fixed vectors, and the whole client can be switched
/// into a failing mode to exercise fatal-path handling.
pub struct MockEmbeddingClient {
    dimension: usize,
    scripted: RwLock<HashMap<String, Vec<f32>>>,
    fail: RwLock<bool>,
}

impl Default for MockEmbeddingClient {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_DIM)
    }
}

impl MockEmbeddingClient {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            scripted: RwLock::new(HashMap::new()),
            fail: RwLock::new(false),
        }
    }

    /// Pins the vector returned for an exact text.
    pub fn script(&self, text: impl Into<String>, vector: Vec<f32>) {
        self.scripted.write().insert(text.into(), vector);
    }

    /// Makes every subsequent call fail.
    pub fn fail_requests(&self) {
        *self.fail.write() = true;
    }

    fn pseudo_vector(&self, text: &str) -> Vec<f32> {
        // FNV-1a over the text seeds a simple LCG; stable across runs.
        let mut seed: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in text.as_bytes() {
            seed ^= u64::from(*byte);
            seed = seed.wrapping_mul(0x0000_0100_0000_01b3);
        }

        let mut state = seed.max(1);
        (0..self.dimension)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                ((state >> 33) as f32 / u32::MAX as f32) * 2.0 - 1.0
            })
            .collect()
    }
}

#[async_trait]
impl EmbeddingClient for MockEmbeddingClient {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if *self.fail.read() {
            return Err(EmbeddingError::RequestFailed {
                url: "mock://embeddings".to_string(),
                message: "mock failure".to_string(),
            });
        }

        let scripted = self.scripted.read();
        Ok(texts
            .iter()
            .map(|t| {
                scripted
                    .get(t)
                    .cloned()
                    .unwrap_or_else(|| self.pseudo_vector(t))
            })
            .collect())
    }
}
