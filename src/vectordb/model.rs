use qdrant_client::qdrant::ScoredPoint;
use qdrant_client::qdrant::point_id::PointIdOptions;

/// Stable point id for a chunk. FNV-1a over `document_id/chunk_index`,
/// so re-ingestion of the same document overwrites instead of appending.
pub fn chunk_point_id(document_id: i64, chunk_index: usize) -> u64 {
    let key = format!("{document_id}/{chunk_index}");
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in key.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

/// One indexed chunk: vector plus the payload the matcher needs back.
#[derive(Debug, Clone)]
pub struct ChunkPoint {
    pub document_id: i64,
    pub chunk_index: usize,
    pub text: String,
    pub vector: Vec<f32>,
}

impl ChunkPoint {
    pub fn new(document_id: i64, chunk_index: usize, text: String, vector: Vec<f32>) -> Self {
        Self {
            document_id,
            chunk_index,
            text,
            vector,
        }
    }

    pub fn point_id(&self) -> u64 {
        chunk_point_id(self.document_id, self.chunk_index)
    }
}

/// One nearest-neighbor hit for a query chunk.
#[derive(Debug, Clone)]
pub struct ChunkHit {
    pub document_id: i64,
    pub chunk_index: usize,
    pub text: String,
    pub score: f32,
}

impl ChunkHit {
    /// Decodes a Qdrant scored point. Points without a numeric id or the
    /// expected payload shape are dropped rather than surfaced as errors;
    /// they can only come from foreign writers to the collection.
    pub fn from_scored_point(point: ScoredPoint) -> Option<Self> {
        match point.id.and_then(|pid| pid.point_id_options) {
            Some(PointIdOptions::Num(_)) => {}
            _ => return None,
        }

        let payload = point.payload;

        let document_id = payload.get("document_id").and_then(|v| v.as_integer())?;

        let chunk_index = payload
            .get("chunk_index")
            .and_then(|v| v.as_integer())
            .map(|i| i.max(0) as usize)?;

        let text = payload
            .get("text")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())?;

        Some(ChunkHit {
            document_id,
            chunk_index,
            text,
            score: point.score,
        })
    }
}
