use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    Condition, CreateCollectionBuilder, DeletePointsBuilder, Distance, Filter, PointStruct,
    SearchPointsBuilder, UpsertPointsBuilder, VectorParamsBuilder,
};
use std::collections::HashMap;
use tracing::debug;

use super::error::VectorDbError;
use super::model::{ChunkHit, ChunkPoint};

#[derive(Clone)]
/// Direct Qdrant client wrapper.
pub struct QdrantIndex {
    client: Qdrant,
    url: String,
}

impl QdrantIndex {
    /// Creates a client for `url`.
    pub async fn new(url: &str) -> Result<Self, VectorDbError> {
        let client =
            Qdrant::from_url(url)
                .build()
                .map_err(|e| VectorDbError::ConnectionFailed {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Returns the configured URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Performs a basic health check request.
    pub async fn health_check(&self) -> Result<(), VectorDbError> {
        self.client
            .health_check()
            .await
            .map_err(|e| VectorDbError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Ensures a cosine-distance collection exists (creates it if missing).
    pub async fn ensure_collection(
        &self,
        name: &str,
        vector_size: u64,
    ) -> Result<(), VectorDbError> {
        let exists = self.client.collection_exists(name).await.map_err(|e| {
            VectorDbError::CreateCollectionFailed {
                collection: name.to_string(),
                message: e.to_string(),
            }
        })?;

        if exists {
            return Ok(());
        }

        debug!(collection = name, vector_size, "Creating collection");

        let vectors_config = VectorParamsBuilder::new(vector_size, Distance::Cosine);

        self.client
            .create_collection(
                CreateCollectionBuilder::new(name)
                    .vectors_config(vectors_config)
                    .on_disk_payload(true),
            )
            .await
            .map_err(|e| VectorDbError::CreateCollectionFailed {
                collection: name.to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    /// Upserts chunk points into a collection.
    pub async fn upsert_chunks(
        &self,
        collection: &str,
        points: Vec<ChunkPoint>,
    ) -> Result<(), VectorDbError> {
        if points.is_empty() {
            return Ok(());
        }

        let qdrant_points: Vec<PointStruct> = points
            .into_iter()
            .map(|p| {
                let id = p.point_id();
                let mut payload: HashMap<String, qdrant_client::qdrant::Value> = HashMap::new();
                payload.insert("document_id".to_string(), p.document_id.into());
                payload.insert("chunk_index".to_string(), (p.chunk_index as i64).into());
                payload.insert("text".to_string(), p.text.into());

                PointStruct::new(id, p.vector, payload)
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(collection, qdrant_points).wait(true))
            .await
            .map_err(|e| VectorDbError::UpsertFailed {
                collection: collection.to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }

    /// Searches a collection by vector similarity with a score floor.
    pub async fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: u64,
        min_score: f32,
    ) -> Result<Vec<ChunkHit>, VectorDbError> {
        let search_builder = SearchPointsBuilder::new(collection, query, limit)
            .with_payload(true)
            .score_threshold(min_score);

        let search_result = self
            .client
            .search_points(search_builder)
            .await
            .map_err(|e| VectorDbError::SearchFailed {
                collection: collection.to_string(),
                message: e.to_string(),
            })?;

        let hits = search_result
            .result
            .into_iter()
            .filter_map(ChunkHit::from_scored_point)
            .collect();

        Ok(hits)
    }

    /// Deletes every chunk belonging to a document.
    pub async fn delete_document(
        &self,
        collection: &str,
        document_id: i64,
    ) -> Result<(), VectorDbError> {
        let filter = Filter::must([Condition::matches("document_id", document_id)]);

        self.client
            .delete_points(
                DeletePointsBuilder::new(collection)
                    .points(filter)
                    .wait(true),
            )
            .await
            .map_err(|e| VectorDbError::DeleteFailed {
                collection: collection.to_string(),
                message: e.to_string(),
            })?;

        Ok(())
    }
}

/// Minimal async interface used by higher-level code.
pub trait VectorIndexClient: Send + Sync {
    /// Ensures a collection exists.
    fn ensure_collection(
        &self,
        name: &str,
        vector_size: u64,
    ) -> impl std::future::Future<Output = Result<(), VectorDbError>> + Send;

    /// Upserts chunk points.
    fn upsert_chunks(
        &self,
        collection: &str,
        points: Vec<ChunkPoint>,
    ) -> impl std::future::Future<Output = Result<(), VectorDbError>> + Send;

    /// Searches for similar chunks at or above `min_score`.
    fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: u64,
        min_score: f32,
    ) -> impl std::future::Future<Output = Result<Vec<ChunkHit>, VectorDbError>> + Send;

    /// Deletes every chunk of a document.
    fn delete_document(
        &self,
        collection: &str,
        document_id: i64,
    ) -> impl std::future::Future<Output = Result<(), VectorDbError>> + Send;
}

impl VectorIndexClient for QdrantIndex {
    async fn ensure_collection(&self, name: &str, vector_size: u64) -> Result<(), VectorDbError> {
        self.ensure_collection(name, vector_size).await
    }

    async fn upsert_chunks(
        &self,
        collection: &str,
        points: Vec<ChunkPoint>,
    ) -> Result<(), VectorDbError> {
        self.upsert_chunks(collection, points).await
    }

    async fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: u64,
        min_score: f32,
    ) -> Result<Vec<ChunkHit>, VectorDbError> {
        self.search(collection, query, limit, min_score).await
    }

    async fn delete_document(&self, collection: &str, document_id: i64) -> Result<(), VectorDbError> {
        self.delete_document(collection, document_id).await
    }
}
