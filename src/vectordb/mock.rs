use std::collections::HashMap;

use parking_lot::RwLock;

use super::client::VectorIndexClient;
use super::error::VectorDbError;
use super::model::{ChunkHit, ChunkPoint};

/// Cosine similarity between two vectors. Zero-magnitude inputs score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[derive(Default)]
pub struct MockVectorIndex {
    collections: RwLock<HashMap<String, MockCollection>>,
}

#[derive(Default, Clone)]
struct MockCollection {
    vector_size: u64,
    points: HashMap<u64, ChunkPoint>,
}

impl MockVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point_count(&self, collection: &str) -> Option<usize> {
        self.collections
            .read()
            .get(collection)
            .map(|c| c.points.len())
    }

    pub fn vector_size(&self, collection: &str) -> Option<u64> {
        self.collections
            .read()
            .get(collection)
            .map(|c| c.vector_size)
    }
}

impl VectorIndexClient for MockVectorIndex {
    async fn ensure_collection(&self, name: &str, vector_size: u64) -> Result<(), VectorDbError> {
        self.collections
            .write()
            .entry(name.to_string())
            .or_insert(MockCollection {
                vector_size,
                points: HashMap::new(),
            });
        Ok(())
    }

    async fn upsert_chunks(
        &self,
        collection: &str,
        points: Vec<ChunkPoint>,
    ) -> Result<(), VectorDbError> {
        let mut collections = self.collections.write();
        let coll = collections.entry(collection.to_string()).or_default();

        for point in points {
            if coll.vector_size != 0 && point.vector.len() as u64 != coll.vector_size {
                return Err(VectorDbError::InvalidDimension {
                    expected: coll.vector_size as usize,
                    actual: point.vector.len(),
                });
            }
            coll.points.insert(point.point_id(), point);
        }

        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: u64,
        min_score: f32,
    ) -> Result<Vec<ChunkHit>, VectorDbError> {
        let collections = self.collections.read();
        let coll = collections
            .get(collection)
            .ok_or_else(|| VectorDbError::SearchFailed {
                collection: collection.to_string(),
                message: "collection not found".to_string(),
            })?;

        let mut hits: Vec<ChunkHit> = coll
            .points
            .values()
            .map(|p| ChunkHit {
                document_id: p.document_id,
                chunk_index: p.chunk_index,
                text: p.text.clone(),
                score: cosine_similarity(&query, &p.vector),
            })
            .filter(|hit| hit.score >= min_score)
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(limit as usize);

        Ok(hits)
    }

    async fn delete_document(
        &self,
        collection: &str,
        document_id: i64,
    ) -> Result<(), VectorDbError> {
        let mut collections = self.collections.write();
        if let Some(coll) = collections.get_mut(collection) {
            coll.points.retain(|_, p| p.document_id != document_id);
        }
        Ok(())
    }
}
